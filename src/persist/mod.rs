//! Narrow record contract between coordinates and the storage collaborator
//!
//! This subsystem knows nothing about SQL, files, or wire formats. The
//! storage layer exchanges coordinates through [`CoordinateRecord`]: an
//! identifier plus three positional numeric fields named `x`, `y`, `z`.
//! Rectangular coordinates map their components directly; spherical
//! coordinates reuse the same three columns positionally (φ in `x`, θ in `y`,
//! radius in `z`).
//!
//! [`ParameterList`] stands in for the positional parameter slots of a
//! pending storage statement, so a coordinate can write its identifier at a
//! given position without seeing the statement itself.

use serde::{Deserialize, Serialize};

use crate::Result;

/// Flat storage record for one coordinate of either representation
///
/// Field meaning is positional: for rectangular coordinates the three
/// numeric fields carry (x, y, z); for spherical coordinates they carry
/// (φ, θ, radius) in radians, in that column order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordinateRecord {
    /// Identifier column; negative values reconstitute as the null id
    pub id: i64,
    /// First numeric column (x, or φ in radians)
    pub x: f64,
    /// Second numeric column (y, or θ in radians)
    pub y: f64,
    /// Third numeric column (z, or radius)
    pub z: f64,
}

/// Positional parameter slots of a pending storage statement
///
/// Positions are 1-based, matching the convention of prepared statements in
/// the storage layer. Setting a position beyond the current length grows the
/// list with empty slots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterList {
    slots: Vec<Option<i64>>,
}

impl ParameterList {
    /// Creates an empty parameter list
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value at a 1-based position, growing the list as needed
    pub fn set(&mut self, position: usize, value: i64) {
        if position == 0 {
            return;
        }
        if self.slots.len() < position {
            self.slots.resize(position, None);
        }
        self.slots[position - 1] = Some(value);
    }

    /// Returns the value at a 1-based position, if set
    pub fn get(&self, position: usize) -> Option<i64> {
        if position == 0 {
            return None;
        }
        self.slots.get(position - 1).copied().flatten()
    }

    /// Number of slots currently allocated
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when no slot has been allocated
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Persistence capability of a coordinate representation
///
/// `read_from` validates the record's numeric fields before any instance
/// becomes observable; a record carrying NaN or an infinity fails
/// reconstitution with
/// [`PhotolocError::InvalidValue`](crate::PhotolocError::InvalidValue).
pub trait Persistent: Sized {
    /// Reconstitutes an instance from a storage record, reusing its identifier
    fn read_from(record: &CoordinateRecord) -> Result<Self>;

    /// Writes the inverse mapping onto a storage record
    fn write_on(&self, record: &mut CoordinateRecord);

    /// Writes this instance's identifier at a statement position
    fn write_identifier(&self, statement: &mut ParameterList, position: usize);
}
