use crate::coord::Coord;
use crate::error::PileError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A square grid of grain counts plus the toppling threshold.
///
/// The pile owns no cascade behavior of its own; it only guards bounds and
/// keeps counts non-negative. A simulation owns exactly one pile and
/// mutates it in place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pile {
    cells: Vec<Vec<u32>>,
    size: u32,
    threshold: u32,
}

impl Pile {
    /// Allocate a zeroed `size` x `size` pile.
    ///
    /// A zero threshold would make toppling a no-op and the relaxation loop
    /// non-terminating, so it is rejected here rather than guarded later.
    pub fn new(size: u32, threshold: u32) -> Result<Self, PileError> {
        if size == 0 {
            return Err(PileError::InvalidSize(size));
        }
        if threshold == 0 {
            return Err(PileError::InvalidThreshold);
        }
        Ok(Self {
            cells: vec![vec![0; size as usize]; size as usize],
            size,
            threshold,
        })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn in_bounds(&self, c: Coord) -> bool {
        c.x < self.size && c.y < self.size
    }

    pub fn get(&self, c: Coord) -> Result<u32, PileError> {
        if !self.in_bounds(c) {
            return Err(self.out_of_bounds(c));
        }
        Ok(self.cells[c.x as usize][c.y as usize])
    }

    /// Add one grain to a cell.
    pub fn add_grain(&mut self, c: Coord) -> Result<(), PileError> {
        if !self.in_bounds(c) {
            return Err(self.out_of_bounds(c));
        }
        self.cells[c.x as usize][c.y as usize] += 1;
        Ok(())
    }

    /// Inclusive comparison: a cell holding exactly `threshold` grains falls.
    /// Out-of-bounds coordinates never topple.
    pub fn exceeds_threshold(&self, c: Coord) -> bool {
        self.in_bounds(c) && self.cells[c.x as usize][c.y as usize] >= self.threshold
    }

    /// Deposit one grain if the coordinate is on the grid. Grains aimed off
    /// the edge fall into the sink and report `false`.
    pub(crate) fn deposit(&mut self, c: Coord) -> bool {
        if !self.in_bounds(c) {
            return false;
        }
        self.cells[c.x as usize][c.y as usize] += 1;
        true
    }

    /// Remove one topple's worth of grains from a cell. Saturating so a
    /// mis-timed call can never push a count below zero.
    pub(crate) fn shed(&mut self, c: Coord) {
        if !self.in_bounds(c) {
            return;
        }
        let cell = &mut self.cells[c.x as usize][c.y as usize];
        *cell = cell.saturating_sub(self.threshold);
    }

    /// True when no cell meets the toppling threshold.
    pub fn is_stable(&self) -> bool {
        self.cells
            .iter()
            .all(|col| col.iter().all(|&count| count < self.threshold))
    }

    pub fn total_grains(&self) -> u64 {
        self.cells
            .iter()
            .map(|col| col.iter().map(|&count| count as u64).sum::<u64>())
            .sum()
    }

    /// Raw counts, indexed `[x][y]`, for renderers and dumps.
    pub fn counts(&self) -> &[Vec<u32>] {
        &self.cells
    }

    fn out_of_bounds(&self, c: Coord) -> PileError {
        PileError::OutOfBounds {
            x: c.x,
            y: c.y,
            size: self.size,
        }
    }
}

impl fmt::Display for Pile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.size as usize {
            for x in 0..self.size as usize {
                if x > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.cells[x][y])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
