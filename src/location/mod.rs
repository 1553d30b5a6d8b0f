//! Binding between a photo-level entity and its coordinate value
//!
//! A [`Location`] references exactly one [`Coordinate`] at a time. It never
//! owns the coordinate's state; coordinates are shared, cache-managed values
//! and a location merely holds the current reference. Replacing the
//! coordinate is an explicit, validated mutation.

use crate::identifier::LocationId;
use crate::{Coordinate, PhotolocError, Result};

/// A place a photo was taken, bound to one coordinate value
#[derive(Debug, Clone)]
pub struct Location {
    id: LocationId,
    coordinate: Coordinate,
}

impl Location {
    /// Creates a location at the rectangular origin
    ///
    /// The origin is taken from the interning cache rather than built ad
    /// hoc, so repeated default locations share one coordinate instance and
    /// the identifier sequence stays consistent.
    pub fn new() -> Result<Self> {
        Self::with_coordinate(Some(Coordinate::rectangular(0.0, 0.0, 0.0)?))
    }

    /// Creates a location with an explicit coordinate
    ///
    /// # Errors
    ///
    /// [`PhotolocError::MissingArgument`] when no coordinate is given;
    /// construction is strict where the metric queries are lenient.
    pub fn with_coordinate(coordinate: Option<Coordinate>) -> Result<Self> {
        let coordinate = coordinate
            .ok_or_else(|| PhotolocError::MissingArgument("coordinate".to_string()))?;
        Ok(Location {
            id: LocationId::next(),
            coordinate,
        })
    }

    /// Identifier assigned at construction
    pub fn id(&self) -> LocationId {
        self.id
    }

    /// Current coordinate
    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    /// Replaces the current coordinate
    ///
    /// # Errors
    ///
    /// [`PhotolocError::MissingArgument`] when no replacement is given; the
    /// current coordinate is left untouched in that case.
    pub fn set_coordinate(&mut self, replacement: Option<Coordinate>) -> Result<()> {
        let replacement = replacement
            .ok_or_else(|| PhotolocError::MissingArgument("replacement coordinate".to_string()))?;
        self.coordinate = replacement;
        Ok(())
    }

    /// Value equality, delegated to the coordinate's equality law
    pub fn value_equals(&self, other: &Location) -> bool {
        self.coordinate.value_equals(other.coordinate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_default_location_uses_cached_origin() {
        let first = Location::new().unwrap();
        let second = Location::new().unwrap();

        let Coordinate::Rectangular(a) = first.coordinate() else {
            panic!("default location should be rectangular");
        };
        let Coordinate::Rectangular(b) = second.coordinate() else {
            panic!("default location should be rectangular");
        };

        assert!(Arc::ptr_eq(a, b));
        assert_eq!(a.x(), 0.0);
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_missing_coordinate_fails_construction() {
        assert!(matches!(
            Location::with_coordinate(None),
            Err(PhotolocError::MissingArgument(_))
        ));
    }

    #[test]
    fn test_set_coordinate_replaces_reference() {
        let mut location = Location::new().unwrap();
        let replacement = Coordinate::spherical(30.0, 60.0, 5.0).unwrap();

        location.set_coordinate(Some(replacement.clone())).unwrap();
        assert!(location.coordinate().value_equals(&replacement));
    }

    #[test]
    fn test_set_coordinate_rejects_absent_replacement() {
        let mut location = Location::new().unwrap();
        let before = location.coordinate().clone();

        let result = location.set_coordinate(None);
        assert!(matches!(result, Err(PhotolocError::MissingArgument(_))));
        // the previous coordinate stays in place
        assert!(location.coordinate().value_equals(&before));
    }

    #[test]
    fn test_value_equals_delegates_to_coordinate() {
        let a = Location::with_coordinate(Some(
            Coordinate::rectangular(1.0, 2.0, 3.0).unwrap(),
        ))
        .unwrap();
        let b = Location::with_coordinate(Some(
            Coordinate::rectangular(1.0, 2.0, 3.0).unwrap(),
        ))
        .unwrap();
        let c = Location::with_coordinate(Some(
            Coordinate::rectangular(9.0, 2.0, 3.0).unwrap(),
        ))
        .unwrap();

        assert!(a.value_equals(&b));
        assert!(!a.value_equals(&c));
    }

    #[test]
    fn test_locations_share_coordinates() {
        let shared = Coordinate::rectangular(5.0, 5.0, 5.0).unwrap();
        let a = Location::with_coordinate(Some(shared.clone())).unwrap();
        let b = Location::with_coordinate(Some(shared)).unwrap();

        assert!(a.value_equals(&b));
        assert_eq!(a.coordinate().id(), b.coordinate().id());
    }
}
