//! Process-wide flyweight registry for coordinate values
//!
//! One registry exists per concrete representation. Each maps a quantized
//! value key to the single shared instance for that value, so equal values
//! always resolve to the same allocation. Entries are never evicted; the
//! registry lives for the process lifetime.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use log::{debug, trace};

use crate::coordinates::EPSILON;
use crate::{PhotolocError, Result};

/// Interning registry keyed by quantized value strings
pub(crate) struct Registry<T> {
    name: &'static str,
    entries: RwLock<HashMap<String, Arc<T>>>,
}

impl<T> Registry<T> {
    pub(crate) fn new(name: &'static str) -> Self {
        Registry {
            name,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the shared instance for `key`, constructing it on first use
    ///
    /// Lookup takes only the shared lock. On a miss the exclusive lock is
    /// taken and the key re-checked, so two threads racing on the same fresh
    /// value still end up with one shared instance and one identifier.
    pub(crate) fn get_or_insert_with<F>(&self, key: String, make: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Result<T>,
    {
        {
            let entries = self
                .entries
                .read()
                .map_err(|_| PhotolocError::Cache(format!("{} registry lock poisoned", self.name)))?;
            if let Some(hit) = entries.get(&key) {
                trace!("{} registry hit for {}", self.name, key);
                return Ok(Arc::clone(hit));
            }
        }

        let mut entries = self
            .entries
            .write()
            .map_err(|_| PhotolocError::Cache(format!("{} registry lock poisoned", self.name)))?;
        if let Some(hit) = entries.get(&key) {
            return Ok(Arc::clone(hit));
        }

        let value = Arc::new(make()?);
        debug!("{} registry interned {}", self.name, key);
        entries.insert(key, Arc::clone(&value));
        Ok(value)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }
}

/// Quantizes three components into a deterministic fixed-point key
///
/// Components are scaled by `1/EPSILON` before formatting, so values that
/// compare equal under the epsilon law land on the same key. The fixed
/// six-digit fractional rendering keeps the key independent of locale and
/// float shortest-repr quirks.
pub(crate) fn quantize_key(name: &str, a: f64, b: f64, c: f64) -> String {
    let conv = 1.0 / EPSILON;
    format!(
        "{}({:.6}, {:.6}, {:.6})",
        name,
        a * conv,
        b * conv,
        c * conv
    )
}
