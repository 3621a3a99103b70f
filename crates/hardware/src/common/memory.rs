//! Data memory.
//!
//! A sparse map from integer address to value. Reads of addresses that were
//! never written return zero; writes to any address succeed.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::common::Value;

/// Sparse, word-addressed data memory.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Memory {
    cells: BTreeMap<i64, Value>,
}

impl Memory {
    /// Creates an empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `addr`, defaulting to zero when unmapped.
    #[inline]
    pub fn read(&self, addr: i64) -> Value {
        self.cells.get(&addr).copied().unwrap_or(0.0)
    }

    /// Writes `value` at `addr`.
    #[inline]
    pub fn write(&mut self, addr: i64, value: Value) {
        let _ = self.cells.insert(addr, value);
    }

    /// Number of mapped addresses.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` when no address has been mapped.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates mapped cells in ascending address order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, Value)> + '_ {
        self.cells.iter().map(|(a, v)| (*a, *v))
    }
}

impl FromIterator<(i64, i64)> for Memory {
    fn from_iter<T: IntoIterator<Item = (i64, i64)>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().map(|(a, v)| (a, v as Value)).collect(),
        }
    }
}

impl<'a> FromIterator<(&'a i64, &'a i64)> for Memory {
    fn from_iter<T: IntoIterator<Item = (&'a i64, &'a i64)>>(iter: T) -> Self {
        iter.into_iter().map(|(a, v)| (*a, *v)).collect()
    }
}
