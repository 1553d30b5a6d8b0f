//! Photoloc: coordinate value objects for photo cataloguing
//!
//! This crate provides the geometric core of a photo-cataloguing application:
//! interchangeable rectangular and spherical coordinate representations, their
//! mutual conversions, distance and central-angle metrics, and a process-wide
//! interning cache that guarantees a single shared instance per distinct
//! coordinate value.
//!
//! The surrounding web, form, and storage layers are external collaborators;
//! they talk to this crate only through coordinate values and the narrow
//! record contract in [`persist`].

use thiserror::Error;

pub mod coordinates;
pub mod identifier;
pub mod location;
pub mod persist;

// Re-export commonly used types
pub use coordinates::{Coordinate, RectangularCoordinate, SphericalCoordinate, EPSILON};
pub use identifier::{CoordinateId, LocationId};
pub use location::Location;

/// Main error type for the photoloc library
#[derive(Debug, Error)]
pub enum PhotolocError {
    /// A constructor received a non-finite numeric component
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// A required reference was absent where the contract requires presence
    #[error("Missing argument: {0}")]
    MissingArgument(String),

    /// A dispatch encountered a coordinate representation it does not know
    #[error("Unknown coordinate representation: {0}")]
    UnknownRepresentation(String),

    /// The interning registry could not be locked
    #[error("Cache error: {0}")]
    Cache(String),
}

/// Result type for photoloc operations
pub type Result<T> = std::result::Result<T, PhotolocError>;
