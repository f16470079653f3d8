//! Sparse vector keyed by user or item id.
//!
//! Keys are kept sorted so that two vectors can be intersected with a single
//! merge walk. Absent keys mean "not rated".

use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    keys: Vec<u32>,
    values: Vec<f64>,
}

impl SparseVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (key, value) pairs. A repeated key keeps its last value.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, f64)>) -> Self {
        let entries: BTreeMap<u32, f64> = pairs.into_iter().collect();
        let (keys, values) = entries.into_iter().unzip();
        Self { keys, values }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get(&self, key: u32) -> Option<f64> {
        self.keys
            .binary_search(&key)
            .ok()
            .map(|pos| self.values[pos])
    }

    pub fn contains_key(&self, key: u32) -> bool {
        self.keys.binary_search(&key).is_ok()
    }

    /// Sum of all stored values
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Entries in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.keys.iter().copied().zip(self.values.iter().copied())
    }

    pub fn keys(&self) -> &[u32] {
        &self.keys
    }

    /// Number of keys present in both vectors. Values are ignored.
    pub fn intersect_count(&self, other: &SparseVector) -> usize {
        let (mut a, mut b) = (0, 0);
        let mut shared = 0;
        while a < self.keys.len() && b < other.keys.len() {
            match self.keys[a].cmp(&other.keys[b]) {
                Ordering::Less => a += 1,
                Ordering::Greater => b += 1,
                Ordering::Equal => {
                    shared += 1;
                    a += 1;
                    b += 1;
                }
            }
        }
        shared
    }
}

impl FromIterator<(u32, f64)> for SparseVector {
    fn from_iter<I: IntoIterator<Item = (u32, f64)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
