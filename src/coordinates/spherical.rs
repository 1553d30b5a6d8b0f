//! # Spherical Coordinate Representation
//!
//! Stores a point as (polar angle φ, azimuth θ, radius r). Angles are
//! accepted in degrees at the construction boundary and held in radians
//! internally; the radius is unconstrained apart from finiteness.
//!
//! Like the rectangular form, spherical coordinates are immutable interned
//! value objects: [`SphericalCoordinate::get_or_create`] returns the one
//! shared instance per distinct quantized (φ, θ, r) triple. Conversion from
//! a rectangular source produces a fresh instance carrying the source's
//! identifier.
//!
//! ## Examples
//!
//! ```rust
//! use photoloc::coordinates::SphericalCoordinate;
//!
//! let point = SphericalCoordinate::get_or_create(30.0, 60.0, 5.0).unwrap();
//! assert!((point.phi().to_degrees() - 30.0).abs() < 1e-12);
//! assert!((point.theta().to_degrees() - 60.0).abs() < 1e-12);
//! assert_eq!(point.radius(), 5.0);
//! ```

use std::fmt;
use std::sync::Arc;

use lazy_static::lazy_static;

use crate::coordinates::assert_finite;
use crate::coordinates::rectangular::RectangularCoordinate;
use crate::coordinates::registry::{quantize_key, Registry};
use crate::identifier::CoordinateId;
use crate::persist::{CoordinateRecord, ParameterList, Persistent};
use crate::Result;

lazy_static! {
    static ref SPHERICAL_REGISTRY: Registry<SphericalCoordinate> = Registry::new("spherical");
}

/// Immutable spherical coordinate value (φ, θ, radius)
///
/// Angles are stored in radians. Construction happens in degrees for
/// readability at the call sites; [`Display`](fmt::Display) renders degrees
/// for the same reason.
#[derive(Debug)]
pub struct SphericalCoordinate {
    id: CoordinateId,
    phi: f64,
    theta: f64,
    radius: f64,
}

impl SphericalCoordinate {
    /// Returns the shared instance for (φ°, θ°, radius), constructing it on
    /// first use
    ///
    /// Angles are given in degrees and converted to radians before the value
    /// is quantized. The radius is not clamped; any finite value is accepted.
    ///
    /// # Errors
    ///
    /// [`PhotolocError::InvalidValue`](crate::PhotolocError::InvalidValue) if
    /// any component is NaN or infinite.
    pub fn get_or_create(phi_degrees: f64, theta_degrees: f64, radius: f64) -> Result<Arc<Self>> {
        assert_finite("phi", phi_degrees)?;
        assert_finite("theta", theta_degrees)?;
        assert_finite("radius", radius)?;

        let phi = phi_degrees.to_radians();
        let theta = theta_degrees.to_radians();

        let key = quantize_key("spherical", phi, theta, radius);
        SPHERICAL_REGISTRY.get_or_insert_with(key, || {
            Ok(SphericalCoordinate {
                id: CoordinateId::next(),
                phi,
                theta,
                radius,
            })
        })
    }

    /// Converts a rectangular source, preserving its identifier
    ///
    /// The result is a fresh, non-interned instance: identity is preserved
    /// across representation, not across value.
    pub(crate) fn from_rectangular(source: &RectangularCoordinate) -> Self {
        let (x, y, z) = (source.x(), source.y(), source.z());
        let planar = x * x + y * y;
        SphericalCoordinate {
            id: source.id(),
            radius: (planar + z * z).sqrt(),
            theta: y.atan2(x),
            phi: planar.sqrt().atan2(z),
        }
    }

    /// Polar angle φ in radians
    pub fn phi(&self) -> f64 {
        self.phi
    }

    /// Azimuth θ in radians
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Radius
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Identifier assigned at construction
    pub fn id(&self) -> CoordinateId {
        self.id
    }

    /// Great-circle angular separation to another spherical coordinate
    ///
    /// Uses the numerically stable Vincenty form, so antipodal and
    /// near-identical directions stay accurate. The result is in [0, π] and
    /// ignores both radii.
    pub fn central_angle_to(&self, other: &SphericalCoordinate) -> f64 {
        let delta_theta = (self.theta - other.theta).abs();
        let (sin_phi_s, cos_phi_s) = self.phi.sin_cos();
        let (sin_phi_o, cos_phi_o) = other.phi.sin_cos();

        let t1 = cos_phi_o * delta_theta.sin();
        let t2 = cos_phi_s * sin_phi_o - sin_phi_s * cos_phi_o * delta_theta.cos();
        let y = sin_phi_s * sin_phi_o + cos_phi_s * cos_phi_o * delta_theta.cos();

        (t1 * t1 + t2 * t2).sqrt().atan2(y)
    }
}

impl Persistent for SphericalCoordinate {
    /// Reads (φ, θ, radius) from the positional x/y/z columns, in radians
    fn read_from(record: &CoordinateRecord) -> Result<Self> {
        assert_finite("phi", record.x)?;
        assert_finite("theta", record.y)?;
        assert_finite("radius", record.z)?;

        Ok(SphericalCoordinate {
            id: CoordinateId::from_int(record.id),
            phi: record.x,
            theta: record.y,
            radius: record.z,
        })
    }

    fn write_on(&self, record: &mut CoordinateRecord) {
        record.id = self.id.as_u64() as i64;
        record.x = self.phi;
        record.y = self.theta;
        record.z = self.radius;
    }

    fn write_identifier(&self, statement: &mut ParameterList, position: usize) {
        statement.set(position, self.id.as_u64() as i64);
    }
}

impl fmt::Display for SphericalCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SphericalCoordinate(phi_degrees = {:.6}, theta_degrees = {:.6}, radius = {:.6})",
            self.phi.to_degrees(),
            self.theta.to_degrees(),
            self.radius
        )
    }
}
