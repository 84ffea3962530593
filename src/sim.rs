use crate::cascade::cascade;
use crate::constants::{
    DEFAULT_THRESHOLD, DEFAULT_VIS_FREQ, DEFAULT_WEIGHT, PROGRESS_REPORTS_PER_RUN,
};
use crate::error::PileError;
use crate::gif_exporter::GifRecorder;
use crate::pile::Pile;
use crate::record::CascadeRecord;
use crate::sampler::GrainSampler;
use crate::stats::{Histogram, SimSummary, histogram};
use std::path::PathBuf;
use uuid::Uuid;

/// Configuration for a simulation run.
#[derive(Clone, Debug)]
pub struct SimProps {
    pub size: u32,
    pub iterations: u32,
    pub threshold: u32,
    pub weight: f64,
    pub seed: Option<u64>,
    pub debug: bool,
    pub gif_path: Option<PathBuf>,
    pub vis_freq: u32,
    pub vis_scale: u32,
}

impl SimProps {
    /// Defaults with the required parameters filled in.
    pub fn new(size: u32, iterations: u32) -> Self {
        Self {
            size,
            iterations,
            threshold: DEFAULT_THRESHOLD,
            weight: DEFAULT_WEIGHT,
            seed: None,
            debug: false,
            gif_path: None,
            vis_freq: DEFAULT_VIS_FREQ,
            vis_scale: 8,
        }
    }

    /// Builder pattern methods for customization
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_visualization<P: Into<PathBuf>>(mut self, gif_path: P, vis_freq: u32) -> Self {
        self.gif_path = Some(gif_path.into());
        self.vis_freq = vis_freq.max(1);
        self
    }
}

/// The simulation driver: owns the pile, the sampler and the record, and
/// runs {drop grain, cascade, record size} for the configured number of
/// steps. Strictly sequential; each step topples on the grid state the
/// previous step left behind.
pub struct Simulation {
    pub id: Uuid,
    pile: Pile,
    sampler: GrainSampler,
    record: CascadeRecord,
    iterations: u32,
    weight: f64,
    step: u32,
    debug: bool,
    vis_freq: u32,
    recorder: Option<GifRecorder>,
    start_time: std::time::Instant,
    setup_time_s: f64,
}

impl Simulation {
    /// Validate the configuration and set up the run. Size and threshold
    /// problems surface here, before any simulation work.
    pub fn new(props: SimProps) -> Result<Self, PileError> {
        let start_time = std::time::Instant::now();

        if !props.weight.is_finite() {
            return Err(PileError::InvalidWeight);
        }
        let pile = Pile::new(props.size, props.threshold)?;
        let sampler = GrainSampler::new(props.size, props.weight, props.seed);

        // a failed recorder downgrades the run to no visualization
        let recorder = props.gif_path.as_ref().and_then(|path| {
            match GifRecorder::create(path, props.size, props.vis_scale) {
                Ok(recorder) => Some(recorder),
                Err(e) => {
                    eprintln!("Warning: could not create GIF at {}: {}", path.display(), e);
                    None
                }
            }
        });

        let mut sim = Self {
            id: Uuid::new_v4(),
            pile,
            sampler,
            record: CascadeRecord::with_capacity(props.iterations),
            iterations: props.iterations,
            weight: props.weight,
            step: 0,
            debug: props.debug,
            vis_freq: props.vis_freq.max(1),
            recorder,
            start_time,
            setup_time_s: 0.0,
        };
        sim.setup_time_s = start_time.elapsed().as_secs_f64();

        sim.debug_print(&format!(
            "🏜️ Simulation {} ready: {}x{} grid, threshold {}, seed {}",
            sim.id,
            props.size,
            props.size,
            props.threshold,
            sim.sampler.seed()
        ));
        Ok(sim)
    }

    /// Helper method for debug printing
    fn debug_print(&self, message: &str) {
        if self.debug {
            println!("{}", message);
        }
    }

    /// One step: draw a coordinate, feed it a grain, relax, record the
    /// cascade size for this step.
    pub fn run_step(&mut self) -> Result<(), PileError> {
        let coord = self.sampler.next_coord();
        self.pile.add_grain(coord)?;
        let cascade_size = cascade(&mut self.pile, coord);
        self.record.push(cascade_size);
        self.step += 1;

        if self.step % self.vis_freq == 0 {
            self.capture_frame();
        }
        Ok(())
    }

    /// Run every configured step and return the per-step record. Progress
    /// lines are rate-limited to roughly one per percent and never touch
    /// the simulation state.
    pub fn run(&mut self) -> Result<&CascadeRecord, PileError> {
        let report_every = (self.iterations / PROGRESS_REPORTS_PER_RUN).max(1);

        for _ in 0..self.iterations {
            self.run_step()?;
            if self.debug && self.step % report_every == 0 {
                self.debug_print(&format!("🔄 step {}/{}", self.step, self.iterations));
            }
        }

        // the last step already captured a frame when it landed on the
        // vis_freq boundary; only trailing state needs one more
        if self.step % self.vis_freq != 0 {
            self.capture_frame();
        }
        // dropping the recorder finalizes the GIF
        self.recorder = None;

        self.debug_print(&format!(
            "✅ run complete: {} steps, {} grains resting on the grid",
            self.step,
            self.pile.total_grains()
        ));
        Ok(&self.record)
    }

    fn capture_frame(&mut self) {
        if let Some(recorder) = self.recorder.as_mut() {
            if let Err(e) = recorder.record_frame(&self.pile) {
                eprintln!("❌ failed to record GIF frame at step {}: {}", self.step, e);
            }
        }
    }

    pub fn pile(&self) -> &Pile {
        &self.pile
    }

    pub fn record(&self) -> &CascadeRecord {
        &self.record
    }

    pub fn current_step(&self) -> u32 {
        self.step
    }

    pub fn seed(&self) -> u64 {
        self.sampler.seed()
    }

    pub fn histogram(&self) -> Histogram {
        histogram(&self.record)
    }

    pub fn summary(&self) -> SimSummary {
        SimSummary {
            run_id: self.id,
            size: self.pile.size(),
            iterations: self.iterations,
            threshold: self.pile.threshold(),
            weight: self.weight,
            seed: self.sampler.seed(),
            histogram: self.histogram(),
            final_grid: self.pile.counts().to_vec(),
        }
    }

    /// Print comprehensive timing summary
    pub fn print_timing_summary(&self) {
        let total_s = self.start_time.elapsed().as_secs_f64();
        let sim_s = total_s - self.setup_time_s;
        let avg_step_s = if self.step > 0 {
            sim_s / self.step as f64
        } else {
            0.0
        };

        println!("\n⏱️ === EXECUTION TIMING SUMMARY ===");
        println!("📊 Setup time: {:.3}s", self.setup_time_s);
        println!("🔄 Steps completed: {}", self.step);
        println!(
            "⚡ Average time per step: {:.6}s ({:.3}ms)",
            avg_step_s,
            avg_step_s * 1000.0
        );
        println!("🚀 Total execution time: {:.3}s", total_s);
        println!("===============================\n");
    }
}
