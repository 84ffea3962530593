use crate::constants::ENSEMBLE_SEED_STRIDE;
use crate::error::PileError;
use crate::sim::{SimProps, Simulation};
use crate::stats::{Histogram, merge_histograms};
use rayon::prelude::*;

/// Run several independent simulations in parallel and merge their
/// cascade-size histograms.
///
/// Parallelism stops at run granularity: a single cascade mutates shared
/// cells and stays sequential, but whole runs share nothing, so each one
/// gets its own pile, sampler and record on a rayon worker. Seeds are
/// derived from the base seed with a fixed stride so the ensemble is
/// reproducible and no two runs share an RNG stream.
pub fn run_ensemble(props: &SimProps, runs: u32) -> Result<Histogram, PileError> {
    let base_seed = props
        .seed
        .unwrap_or_else(|| rand::random::<u64>());

    let histograms: Result<Vec<Histogram>, PileError> = (0..runs)
        .into_par_iter()
        .map(|run_index| {
            let mut run_props = props.clone();
            run_props.seed =
                Some(base_seed.wrapping_add(run_index as u64 ^ ENSEMBLE_SEED_STRIDE));
            // per-run visuals and chatter make no sense across a pool
            run_props.gif_path = None;
            run_props.debug = false;

            let mut sim = Simulation::new(run_props)?;
            sim.run()?;
            Ok(sim.histogram())
        })
        .collect();

    Ok(merge_histograms(histograms?))
}
