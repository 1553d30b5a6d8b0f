//! # Rectangular Coordinate Representation
//!
//! This module provides the 3D rectangular (x, y, z) representation that
//! serves as the canonical reference form for coordinate conversions and
//! distance calculations in the cataloguing core.
//!
//! ## Design Philosophy
//!
//! `RectangularCoordinate` is an immutable value object. Instances are
//! obtained through the interning constructor [`RectangularCoordinate::get_or_create`],
//! which guarantees at most one live instance per distinct (quantized) value
//! triple. Equal values therefore share one allocation, and equality checks
//! can short-circuit on pointer identity.
//!
//! ## Construction Rules
//!
//! - Every component must be finite; NaN or infinite inputs fail
//!   construction before any instance becomes observable.
//! - Negative components are floored to zero. This matches the historical
//!   catalogue behavior that downstream equality tests depend on.
//! - Each fresh instance receives the next identifier from the process-wide
//!   counter; reconstitution from storage reuses the persisted identifier.
//!
//! ## Internal Storage
//!
//! Components are stored as three `f64` values at full IEEE 754 double
//! precision; no normalization or scaling happens after the construction
//! clamp.
//!
//! ## Examples
//!
//! ```rust
//! use photoloc::coordinates::RectangularCoordinate;
//!
//! let a = RectangularCoordinate::get_or_create(2.0, 3.0, 1.0).unwrap();
//! let b = RectangularCoordinate::get_or_create(2.0, 3.0, 1.0).unwrap();
//!
//! // Equal values intern to the same shared instance
//! assert!(std::sync::Arc::ptr_eq(&a, &b));
//! ```

use std::fmt;
use std::sync::Arc;

use lazy_static::lazy_static;
use nalgebra::Vector3;

use crate::coordinates::assert_finite;
use crate::coordinates::registry::{quantize_key, Registry};
use crate::coordinates::spherical::SphericalCoordinate;
use crate::identifier::CoordinateId;
use crate::persist::{CoordinateRecord, ParameterList, Persistent};
use crate::{PhotolocError, Result};

lazy_static! {
    static ref RECTANGULAR_REGISTRY: Registry<RectangularCoordinate> =
        Registry::new("rectangular");
}

/// Immutable rectangular coordinate value (x, y, z)
///
/// All components are finite and non-negative (negative construction inputs
/// are floored to zero). Instances obtained through
/// [`get_or_create`](RectangularCoordinate::get_or_create) are shared: two
/// calls with values that quantize identically return the same allocation.
#[derive(Debug)]
pub struct RectangularCoordinate {
    id: CoordinateId,
    x: f64,
    y: f64,
    z: f64,
}

impl RectangularCoordinate {
    /// Returns the shared instance for (x, y, z), constructing it on first use
    ///
    /// Inputs must be finite; negative inputs are floored to zero before the
    /// value is quantized, so `(-1, -100, -1000)` and `(0, 0, 0)` resolve to
    /// the same shared instance.
    ///
    /// # Errors
    ///
    /// [`PhotolocError::InvalidValue`] if any component is NaN or infinite.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use photoloc::coordinates::RectangularCoordinate;
    ///
    /// let origin = RectangularCoordinate::get_or_create(0.0, 0.0, 0.0).unwrap();
    /// assert_eq!(origin.x(), 0.0);
    ///
    /// assert!(RectangularCoordinate::get_or_create(f64::NAN, 0.0, 0.0).is_err());
    /// ```
    pub fn get_or_create(x: f64, y: f64, z: f64) -> Result<Arc<Self>> {
        assert_finite("x", x)?;
        assert_finite("y", y)?;
        assert_finite("z", z)?;

        // Clamp before quantization so negative inputs share the clamped entry
        let x = x.max(0.0);
        let y = y.max(0.0);
        let z = z.max(0.0);

        let key = quantize_key("rectangular", x, y, z);
        RECTANGULAR_REGISTRY.get_or_insert_with(key, || {
            Ok(RectangularCoordinate {
                id: CoordinateId::next(),
                x,
                y,
                z,
            })
        })
    }

    /// Converts a spherical source, preserving its identifier
    ///
    /// The result is a fresh, non-interned instance: identity is preserved
    /// across representation, not across value.
    pub(crate) fn from_spherical(source: &SphericalCoordinate) -> Self {
        let (sin_phi, cos_phi) = source.phi().sin_cos();
        let radius = source.radius();
        RectangularCoordinate {
            id: source.id(),
            x: radius * sin_phi * source.theta().cos(),
            y: radius * sin_phi * source.theta().sin(),
            z: radius * cos_phi,
        }
    }

    /// X component
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y component
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Z component
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Identifier assigned at construction
    pub fn id(&self) -> CoordinateId {
        self.id
    }

    /// Euclidean distance to another rectangular coordinate
    ///
    /// # Errors
    ///
    /// [`PhotolocError::InvalidValue`] if the distance overflows to a
    /// non-finite value.
    pub fn distance_to(&self, other: &RectangularCoordinate) -> Result<f64> {
        let distance = (self.to_vector3() - other.to_vector3()).norm();
        if !distance.is_finite() {
            return Err(PhotolocError::InvalidValue(format!(
                "distance between {} and {} is not finite",
                self, other
            )));
        }
        Ok(distance)
    }

    /// Converts to a nalgebra vector for linear algebra operations
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl Persistent for RectangularCoordinate {
    fn read_from(record: &CoordinateRecord) -> Result<Self> {
        assert_finite("x", record.x)?;
        assert_finite("y", record.y)?;
        assert_finite("z", record.z)?;

        Ok(RectangularCoordinate {
            id: CoordinateId::from_int(record.id),
            x: record.x,
            y: record.y,
            z: record.z,
        })
    }

    fn write_on(&self, record: &mut CoordinateRecord) {
        record.id = self.id.as_u64() as i64;
        record.x = self.x;
        record.y = self.y;
        record.z = self.z;
    }

    fn write_identifier(&self, statement: &mut ParameterList, position: usize) {
        statement.set(position, self.id.as_u64() as i64);
    }
}

impl fmt::Display for RectangularCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RectangularCoordinate(x = {:.6}, y = {:.6}, z = {:.6})",
            self.x, self.y, self.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(f64::NAN, 0.0, 0.0)]
    #[case(0.0, f64::NEG_INFINITY, 0.0)]
    #[case(0.0, 0.0, f64::INFINITY)]
    fn test_non_finite_components_fail(#[case] x: f64, #[case] y: f64, #[case] z: f64) {
        let result = RectangularCoordinate::get_or_create(x, y, z);
        assert!(matches!(result, Err(PhotolocError::InvalidValue(_))));
    }

    #[test]
    fn test_negative_components_clamp_to_origin() {
        let clamped = RectangularCoordinate::get_or_create(-1.0, -100.0, -1000.0).unwrap();
        let origin = RectangularCoordinate::get_or_create(0.0, 0.0, 0.0).unwrap();

        assert_eq!(clamped.x(), 0.0);
        assert_eq!(clamped.y(), 0.0);
        assert_eq!(clamped.z(), 0.0);
        // Clamping happens before quantization, so both intern to one entry
        assert!(Arc::ptr_eq(&clamped, &origin));
    }

    #[test]
    fn test_interning_returns_shared_instance() {
        let a = RectangularCoordinate::get_or_create(150.3456, 3.14159, 22.0 / 7.0).unwrap();
        let b = RectangularCoordinate::get_or_create(150.3456, 3.14159, 22.0 / 7.0).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_interning_large_components() {
        let a = RectangularCoordinate::get_or_create(100.0e300, 175.0e306, 0.0).unwrap();
        let b = RectangularCoordinate::get_or_create(100.0e300, 175.0e306, 0.0).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_distinct_values_get_distinct_identifiers() {
        let a = RectangularCoordinate::get_or_create(17.5, 0.25, 3.0).unwrap();
        let b = RectangularCoordinate::get_or_create(17.5, 0.25, 4.0).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_distance() {
        let a = RectangularCoordinate::get_or_create(2.0, 3.0, 1.0).unwrap();
        let b = RectangularCoordinate::get_or_create(8.0, 5.0, 0.0).unwrap();

        let distance = a.distance_to(&b).unwrap();
        assert_relative_eq!(distance, 6.4031242374328485, epsilon = crate::EPSILON);
    }

    #[test]
    fn test_distance_with_negative_inputs_uses_clamped_values() {
        let a = RectangularCoordinate::get_or_create(2.0, 3.0, 1.0).unwrap();
        let b = RectangularCoordinate::get_or_create(8.0, -5.0, 0.0).unwrap();

        // (8, -5, 0) clamps to (8, 0, 0)
        let distance = a.distance_to(&b).unwrap();
        assert_relative_eq!(distance, 6.782329983125268, epsilon = crate::EPSILON);
    }

    #[test]
    fn test_distance_symmetric_and_zero_on_self() {
        let a = RectangularCoordinate::get_or_create(1.0, 2.0, 3.0).unwrap();
        let b = RectangularCoordinate::get_or_create(4.5, 0.5, 9.0).unwrap();

        assert_eq!(a.distance_to(&a).unwrap(), 0.0);
        assert_eq!(a.distance_to(&b).unwrap(), b.distance_to(&a).unwrap());
        assert!(a.distance_to(&b).unwrap() >= 0.0);
    }

    #[test]
    fn test_read_from_reuses_identifier() {
        let record = CoordinateRecord {
            id: 12345,
            x: 1.0,
            y: 2.0,
            z: 3.0,
        };
        let coordinate = RectangularCoordinate::read_from(&record).unwrap();

        assert_eq!(coordinate.id().as_u64(), 12345);
        assert_eq!(coordinate.x(), 1.0);
        assert_eq!(coordinate.y(), 2.0);
        assert_eq!(coordinate.z(), 3.0);
    }

    #[test]
    fn test_read_from_negative_id_becomes_null() {
        let record = CoordinateRecord {
            id: -3,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        };
        let coordinate = RectangularCoordinate::read_from(&record).unwrap();
        assert!(coordinate.id().is_null());
    }

    #[test]
    fn test_read_from_rejects_non_finite_fields() {
        let record = CoordinateRecord {
            id: 1,
            x: f64::NAN,
            y: 0.0,
            z: 0.0,
        };
        assert!(matches!(
            RectangularCoordinate::read_from(&record),
            Err(PhotolocError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_write_on_inverts_read_from() {
        let source = RectangularCoordinate::get_or_create(6.5, 7.5, 8.5).unwrap();

        let mut record = CoordinateRecord::default();
        source.write_on(&mut record);

        assert_eq!(record.id, source.id().as_u64() as i64);
        assert_eq!(record.x, 6.5);
        assert_eq!(record.y, 7.5);
        assert_eq!(record.z, 8.5);

        let back = RectangularCoordinate::read_from(&record).unwrap();
        assert_eq!(back.id(), source.id());
    }

    #[test]
    fn test_write_identifier() {
        let source = RectangularCoordinate::get_or_create(11.0, 12.0, 13.0).unwrap();

        let mut statement = ParameterList::new();
        source.write_identifier(&mut statement, 2);

        assert_eq!(statement.get(2), Some(source.id().as_u64() as i64));
        assert_eq!(statement.get(1), None);
    }

    #[test]
    fn test_display_rendering() {
        let record = CoordinateRecord {
            id: 1,
            x: 1.5,
            y: 0.0,
            z: 2.25,
        };
        let coordinate = RectangularCoordinate::read_from(&record).unwrap();
        assert_eq!(
            coordinate.to_string(),
            "RectangularCoordinate(x = 1.500000, y = 0.000000, z = 2.250000)"
        );
    }
}
