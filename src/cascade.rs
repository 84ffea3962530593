use crate::coord::{Coord, NEIGHBOR_OFFSETS};
use crate::pile::Pile;

/// Relax the pile around a freshly fed cell and return the number of
/// topple events in the resulting cascade (zero when the cell stayed
/// below threshold).
///
/// Each topple removes exactly `threshold` grains from the falling cell
/// and deals them out one at a time, round-robin over the four orthogonal
/// directions, so grains are conserved for every threshold and the default
/// threshold of 4 gives each neighbor exactly one grain. Grains dealt past
/// the grid edge drop into the sink and leave the system.
///
/// An explicit worklist replaces recursion: cells may be pushed more than
/// once and are re-checked against the threshold when popped, so depth is
/// bounded by grid occupancy instead of the call stack.
pub fn cascade(pile: &mut Pile, seed: Coord) -> u64 {
    let mut topples: u64 = 0;
    let mut work = vec![seed];

    while let Some(c) = work.pop() {
        // a cell can hold several thresholds' worth of grains by the time
        // it is popped, so it keeps falling until it drops below
        while pile.exceeds_threshold(c) {
            pile.shed(c);
            topples += 1;

            for k in 0..pile.threshold() {
                let (dx, dy) = NEIGHBOR_OFFSETS[(k % 4) as usize];
                let Some(neighbor) = c.offset(dx, dy) else {
                    continue; // fell off the low edge
                };
                if pile.deposit(neighbor) {
                    work.push(neighbor);
                }
            }
        }
    }

    topples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PileError;

    fn load(pile: &mut Pile, c: Coord, grains: u32) {
        for _ in 0..grains {
            pile.add_grain(c).expect("coordinate in bounds");
        }
    }

    #[test]
    fn below_threshold_nothing_happens() {
        let mut pile = Pile::new(5, 4).unwrap();
        let c = Coord::new(2, 2);
        load(&mut pile, c, 3);
        assert_eq!(cascade(&mut pile, c), 0);
        assert_eq!(pile.get(c), Ok(3));
    }

    #[test]
    fn fourth_grain_triggers_exactly_one_topple() {
        let mut pile = Pile::new(5, 4).unwrap();
        let c = Coord::new(2, 2);
        load(&mut pile, c, 3);
        pile.add_grain(c).unwrap();
        let topples = cascade(&mut pile, c);

        assert_eq!(topples, 1);
        assert_eq!(pile.get(c), Ok(0));
        for (dx, dy) in NEIGHBOR_OFFSETS {
            let n = c.offset(dx, dy).unwrap();
            assert_eq!(pile.get(n), Ok(1), "neighbor {} should gain one grain", n);
        }
        assert!(pile.is_stable());
    }

    #[test]
    fn interior_topple_conserves_grains() {
        let mut pile = Pile::new(7, 4).unwrap();
        let c = Coord::new(3, 3);
        load(&mut pile, c, 4);
        let before = pile.total_grains();
        cascade(&mut pile, c);
        assert_eq!(pile.total_grains(), before, "no edge, no loss");
    }

    #[test]
    fn corner_topple_spills_into_the_sink() {
        let mut pile = Pile::new(3, 4).unwrap();
        let corner = Coord::new(0, 0);
        load(&mut pile, corner, 4);
        let topples = cascade(&mut pile, corner);

        assert_eq!(topples, 1);
        assert_eq!(pile.get(corner), Ok(0));
        // two grains landed in bounds, two left the system
        assert_eq!(pile.total_grains(), 2);
        assert_eq!(pile.get(Coord::new(1, 0)), Ok(1));
        assert_eq!(pile.get(Coord::new(0, 1)), Ok(1));
    }

    #[test]
    fn chain_reaction_is_attributed_to_one_cascade() {
        let mut pile = Pile::new(5, 4).unwrap();
        let center = Coord::new(2, 2);
        // prime every orthogonal neighbor to the brink
        for (dx, dy) in NEIGHBOR_OFFSETS {
            load(&mut pile, center.offset(dx, dy).unwrap(), 3);
        }
        load(&mut pile, center, 4);
        let topples = cascade(&mut pile, center);

        // center, its four primed neighbors, then the center once more:
        // each neighbor hands a grain back, refilling the center to 4
        assert_eq!(topples, 6);
        assert!(pile.is_stable());
    }

    #[test]
    fn threshold_one_drop_walks_to_the_sink() {
        let mut pile = Pile::new(3, 1).unwrap();
        let center = Coord::new(1, 1);
        pile.add_grain(center).unwrap();
        let topples = cascade(&mut pile, center);

        // the single grain is handed to the +x neighbor, which topples it
        // over the edge; the pile ends empty and stable
        assert_eq!(topples, 2);
        assert_eq!(pile.total_grains(), 0);
        assert!(pile.is_stable());
    }

    #[test]
    fn odd_threshold_still_conserves_per_topple() {
        let mut pile = Pile::new(7, 3).unwrap();
        let c = Coord::new(3, 3);
        load(&mut pile, c, 3);
        let before = pile.total_grains();
        let topples = cascade(&mut pile, c);

        assert!(topples >= 1);
        assert_eq!(pile.total_grains(), before, "interior cascade loses nothing");
        assert!(pile.is_stable());
    }

    #[test]
    fn relaxation_terminates_on_a_dense_pile() {
        let mut pile = Pile::new(9, 4).unwrap();
        let c = Coord::new(4, 4);
        // pile far beyond threshold at a single cell
        load(&mut pile, c, 200);
        let topples = cascade(&mut pile, c);
        assert!(topples > 0);
        assert!(pile.is_stable(), "engine must leave the pile locally stable");
        assert!(pile.total_grains() <= 200);
    }

    #[test]
    fn seed_off_the_grid_is_a_no_op() {
        let mut pile = Pile::new(3, 4).unwrap();
        assert_eq!(cascade(&mut pile, Coord::new(10, 10)), 0);
        assert_eq!(pile.total_grains(), 0);
    }

    #[test]
    fn pile_reports_bounds_errors_but_cascade_never_sees_them() {
        // contract check: the driver adds the grain, the engine only works
        // in-bounds coordinates after that
        let mut pile = Pile::new(2, 4).unwrap();
        assert_eq!(
            pile.add_grain(Coord::new(5, 5)),
            Err(PileError::OutOfBounds { x: 5, y: 5, size: 2 })
        );
    }
}
