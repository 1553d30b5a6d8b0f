//! Coordinate representations, conversions, and metrics
//!
//! Two interchangeable representations of the same abstract concept live
//! here: [`RectangularCoordinate`] (x, y, z) and [`SphericalCoordinate`]
//! (φ, θ, radius). The [`Coordinate`] enum is the capability surface shared
//! by both: conversion either way, the Euclidean distance metric, the
//! central-angle metric, and the epsilon-based value equality law.
//!
//! Conversions are lazy and non-cached: converting a coordinate to the other
//! representation builds a fresh instance of the target form carrying the
//! source's identifier. Construction by value goes through the per-
//! representation interning registries instead, so equal values share one
//! instance.

pub mod rectangular;
pub(crate) mod registry;
pub mod spherical;

use std::fmt;
use std::sync::Arc;

use crate::persist::{CoordinateRecord, Persistent};
use crate::{PhotolocError, Result};

pub use rectangular::RectangularCoordinate;
pub use spherical::SphericalCoordinate;

/// Tolerance of the value-equality law and granularity of the interning keys
pub const EPSILON: f64 = 1e-14;

/// A coordinate value in either representation
///
/// Holds a shared, cache-managed instance of one of the two concrete forms.
/// Cloning a `Coordinate` clones the handle, not the value.
///
/// Value equality is defined only between values of the same concrete
/// representation; cross-representation comparisons must go through explicit
/// conversion first.
///
/// # Examples
///
/// ```rust
/// use photoloc::Coordinate;
///
/// let a = Coordinate::rectangular(2.0, 3.0, 1.0).unwrap();
/// let b = Coordinate::rectangular(8.0, 5.0, 0.0).unwrap();
///
/// let distance = a.distance_to(Some(&b)).unwrap();
/// assert!((distance - 6.4031242374328485).abs() < 1e-14);
/// ```
#[derive(Debug, Clone)]
pub enum Coordinate {
    /// Rectangular (x, y, z) form
    Rectangular(Arc<RectangularCoordinate>),
    /// Spherical (φ, θ, radius) form
    Spherical(Arc<SphericalCoordinate>),
}

impl Coordinate {
    /// Interned rectangular coordinate for (x, y, z)
    ///
    /// See [`RectangularCoordinate::get_or_create`] for the clamping and
    /// finiteness rules.
    pub fn rectangular(x: f64, y: f64, z: f64) -> Result<Self> {
        Ok(Coordinate::Rectangular(
            RectangularCoordinate::get_or_create(x, y, z)?,
        ))
    }

    /// Interned spherical coordinate for (φ°, θ°, radius)
    pub fn spherical(phi_degrees: f64, theta_degrees: f64, radius: f64) -> Result<Self> {
        Ok(Coordinate::Spherical(SphericalCoordinate::get_or_create(
            phi_degrees,
            theta_degrees,
            radius,
        )?))
    }

    /// Identifier of the underlying coordinate instance
    pub fn id(&self) -> crate::CoordinateId {
        match self {
            Coordinate::Rectangular(inner) => inner.id(),
            Coordinate::Spherical(inner) => inner.id(),
        }
    }

    /// Name of the concrete representation, as used by the storage dispatch
    pub fn representation(&self) -> &'static str {
        match self {
            Coordinate::Rectangular(_) => "rectangular",
            Coordinate::Spherical(_) => "spherical",
        }
    }

    /// Rectangular form of this coordinate
    ///
    /// Returns the same shared instance when already rectangular; otherwise
    /// computes a fresh rectangular instance carrying this coordinate's
    /// identifier.
    pub fn to_rectangular(&self) -> Arc<RectangularCoordinate> {
        match self {
            Coordinate::Rectangular(inner) => Arc::clone(inner),
            Coordinate::Spherical(inner) => Arc::new(RectangularCoordinate::from_spherical(inner)),
        }
    }

    /// Spherical form of this coordinate
    ///
    /// Returns the same shared instance when already spherical; otherwise
    /// computes a fresh spherical instance carrying this coordinate's
    /// identifier.
    pub fn to_spherical(&self) -> Arc<SphericalCoordinate> {
        match self {
            Coordinate::Spherical(inner) => Arc::clone(inner),
            Coordinate::Rectangular(inner) => Arc::new(SphericalCoordinate::from_rectangular(inner)),
        }
    }

    /// Euclidean distance to `other`, computed in rectangular space
    ///
    /// Returns 0 when `other` is absent; metric queries are deliberately
    /// lenient where construction is strict.
    ///
    /// # Errors
    ///
    /// [`PhotolocError::InvalidValue`] if the distance overflows to a
    /// non-finite value.
    pub fn distance_to(&self, other: Option<&Coordinate>) -> Result<f64> {
        let Some(other) = other else {
            return Ok(0.0);
        };
        self.to_rectangular().distance_to(&other.to_rectangular())
    }

    /// Central angle to `other`, computed in spherical space
    ///
    /// Returns 0 when `other` is absent. The result is always finite and in
    /// [0, π].
    pub fn central_angle_to(&self, other: Option<&Coordinate>) -> Result<f64> {
        let Some(other) = other else {
            return Ok(0.0);
        };
        let angle = self.to_spherical().central_angle_to(&other.to_spherical());
        if !angle.is_finite() {
            return Err(PhotolocError::InvalidValue(format!(
                "central angle between {} and {} is not finite",
                self, other
            )));
        }
        Ok(angle)
    }

    /// Epsilon-based value equality
    ///
    /// Same shared instance short-circuits to `true`. Values of different
    /// representations are never equal. Within one representation the
    /// applicable metric decides: Euclidean distance for rectangular pairs,
    /// central angle for spherical pairs (the radii do not participate).
    pub fn value_equals(&self, other: &Coordinate) -> bool {
        match (self, other) {
            (Coordinate::Rectangular(a), Coordinate::Rectangular(b)) => {
                if Arc::ptr_eq(a, b) {
                    return true;
                }
                matches!(a.distance_to(b), Ok(distance) if distance < EPSILON)
            }
            (Coordinate::Spherical(a), Coordinate::Spherical(b)) => {
                if Arc::ptr_eq(a, b) {
                    return true;
                }
                a.central_angle_to(b) < EPSILON
            }
            _ => false,
        }
    }

    /// Reconstitutes a coordinate from a tagged storage record
    ///
    /// The tag names the concrete representation (`"rectangular"` or
    /// `"spherical"`); anything else fails with
    /// [`PhotolocError::UnknownRepresentation`], since it indicates a missing
    /// case in the dispatch rather than a value mismatch.
    pub fn read_tagged(representation: &str, record: &CoordinateRecord) -> Result<Self> {
        match representation {
            "rectangular" => Ok(Coordinate::Rectangular(Arc::new(
                RectangularCoordinate::read_from(record)?,
            ))),
            "spherical" => Ok(Coordinate::Spherical(Arc::new(
                SphericalCoordinate::read_from(record)?,
            ))),
            other => Err(PhotolocError::UnknownRepresentation(other.to_string())),
        }
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.value_equals(other)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::Rectangular(inner) => write!(f, "{}", inner),
            Coordinate::Spherical(inner) => write!(f, "{}", inner),
        }
    }
}

/// Rejects NaN and infinite components before any instance is constructed
pub(crate) fn assert_finite(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(PhotolocError::InvalidValue(format!(
            "{} is not finite: {}",
            name, value
        )));
    }
    Ok(())
}
