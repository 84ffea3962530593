use serde::{Deserialize, Serialize};

/// Offsets of the four orthogonal neighbors, in the order a toppling cell
/// deals its grains out.
pub const NEIGHBOR_OFFSETS: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// A grid cell position. Plain value type, freely copied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

impl Coord {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Shift by a signed offset. `None` when the result would leave the
    /// non-negative quadrant; the upper grid bound is the pile's concern.
    pub fn offset(&self, dx: i64, dy: i64) -> Option<Coord> {
        let x = self.x as i64 + dx;
        let y = self.y as i64 + dy;
        if x < 0 || y < 0 {
            return None;
        }
        Some(Coord::new(x as u32, y as u32))
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_moves_within_quadrant() {
        let c = Coord::new(3, 5);
        assert_eq!(c.offset(1, 0), Some(Coord::new(4, 5)));
        assert_eq!(c.offset(-1, -1), Some(Coord::new(2, 4)));
    }

    #[test]
    fn offset_below_zero_is_dropped() {
        let origin = Coord::new(0, 0);
        assert_eq!(origin.offset(-1, 0), None);
        assert_eq!(origin.offset(0, -1), None);
        assert_eq!(origin.offset(1, 1), Some(Coord::new(1, 1)));
    }

    #[test]
    fn neighbor_offsets_are_orthogonal() {
        for (dx, dy) in NEIGHBOR_OFFSETS {
            assert_eq!(dx.abs() + dy.abs(), 1, "({}, {}) is not orthogonal", dx, dy);
        }
    }
}
