use crate::coord::Coord;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

/// Draws the grid positions grains are dropped on.
///
/// Each simulation owns one sampler so runs stay composable: an explicit
/// seed reproduces a run exactly, while the default wall-clock seed gives
/// every run fresh avalanche statistics.
pub struct GrainSampler {
    rng: StdRng,
    size: u32,
    weight: f64,
    seed: u64,
}

impl GrainSampler {
    pub fn new(size: u32, weight: f64, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(clock_seed);
        Self {
            rng: StdRng::seed_from_u64(seed),
            size,
            weight,
            seed,
        }
    }

    /// The seed actually in use, whether supplied or drawn from the clock.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Next drop position. Uniform for weight <= 1; larger weights bias
    /// drops toward the grid center by rejection sampling, accepting a
    /// candidate with probability `(1 - d)^(weight - 1)` for its normalized
    /// center distance `d`. The center is always accepted, so the loop
    /// terminates with probability 1. A non-finite weight falls back to
    /// uniform so the rejection loop can never spin without accepting.
    pub fn next_coord(&mut self) -> Coord {
        loop {
            let c = Coord::new(self.draw_axis(), self.draw_axis());
            if !(self.weight > 1.0) || !self.weight.is_finite() {
                return c;
            }
            let d = self.center_distance(c);
            if self.rng.random::<f64>() < (1.0 - d).powf(self.weight - 1.0) {
                return c;
            }
        }
    }

    // Upper bound sits one below the grid edge, so the last row and
    // column never receive a random drop.
    fn draw_axis(&mut self) -> u32 {
        if self.size <= 1 {
            return 0;
        }
        self.rng.random_range(0..self.size - 1)
    }

    // Chebyshev distance from the grid center, scaled into [0, 1).
    fn center_distance(&self, c: Coord) -> f64 {
        let center = (self.size - 1) as f64 / 2.0;
        let dx = (c.x as f64 - center).abs();
        let dy = (c.y as f64 - center).abs();
        dx.max(dy) / (center + 1.0)
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}
