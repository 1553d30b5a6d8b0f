//! Stable integer handles for coordinates and locations
//!
//! Every coordinate and location instance carries an identifier issued from a
//! process-wide monotonic counter. Identifiers are never reused while the
//! instance stays reachable from the interning cache, so they double as stable
//! storage keys for the persistence collaborator.
//!
//! The counters are atomic; concurrent construction from multiple threads
//! never hands out the same identifier twice.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_COORDINATE_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_LOCATION_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of a coordinate instance
///
/// Wraps a non-negative integer. Equality and ordering follow the integer
/// value. The reserved null identifier is `0`; issued identifiers start at 1
/// and increase monotonically.
///
/// # Examples
///
/// ```rust
/// use photoloc::identifier::CoordinateId;
///
/// let a = CoordinateId::next();
/// let b = CoordinateId::next();
/// assert!(b > a);
/// assert!(!a.is_null());
/// assert!(CoordinateId::NULL.is_null());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CoordinateId(u64);

impl CoordinateId {
    /// Reserved null identifier
    pub const NULL: CoordinateId = CoordinateId(0);

    /// Issues the next identifier from the process-wide counter
    pub fn next() -> Self {
        CoordinateId(NEXT_COORDINATE_ID.fetch_add(1, Ordering::SeqCst))
    }

    /// Builds an identifier from a raw integer, flooring negatives to null
    pub fn from_int(raw: i64) -> Self {
        if raw < 0 {
            Self::NULL
        } else {
            CoordinateId(raw as u64)
        }
    }

    /// Returns the identifier as a plain integer
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// True for the reserved null identifier
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for CoordinateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a [`Location`](crate::Location)
///
/// Issued from its own process-wide counter, independent of the coordinate
/// counter. `0` is the reserved null identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocationId(u64);

impl LocationId {
    /// Reserved null identifier
    pub const NULL: LocationId = LocationId(0);

    /// Issues the next identifier from the process-wide counter
    pub fn next() -> Self {
        LocationId(NEXT_LOCATION_ID.fetch_add(1, Ordering::SeqCst))
    }

    /// Builds an identifier from a raw integer, flooring negatives to null
    pub fn from_int(raw: i64) -> Self {
        if raw < 0 {
            Self::NULL
        } else {
            LocationId(raw as u64)
        }
    }

    /// Returns the identifier as a plain integer
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// True for the reserved null identifier
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
