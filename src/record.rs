use serde::Serialize;

/// Cascade sizes per simulation step: entry `i` is the number of topple
/// events step `i` triggered, zero included. This scalar-per-step record
/// is all the statistics stage needs; full grid snapshots are never kept.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CascadeRecord {
    sizes: Vec<u64>,
}

impl CascadeRecord {
    pub fn with_capacity(iterations: u32) -> Self {
        Self {
            sizes: Vec::with_capacity(iterations as usize),
        }
    }

    pub fn push(&mut self, cascade_size: u64) {
        self.sizes.push(cascade_size);
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn get(&self, step: usize) -> Option<u64> {
        self.sizes.get(step).copied()
    }

    pub fn sizes(&self) -> &[u64] {
        &self.sizes
    }
}
