use clap::Parser;
use sandpile_rust::chart::ChartExporter;
use sandpile_rust::constants::{
    DEFAULT_ITERATIONS, DEFAULT_SIZE, DEFAULT_THRESHOLD, DEFAULT_VIS_FREQ, DEFAULT_WEIGHT,
};
use sandpile_rust::ensemble::run_ensemble;
use sandpile_rust::png_exporter::PngExporter;
use sandpile_rust::sim::{SimProps, Simulation};
use std::error::Error;
use std::path::PathBuf;

/// Abelian sandpile simulator: drops grains at random cells, relaxes the
/// resulting cascades, and reports the cascade-size frequency histogram.
#[derive(Parser, Debug)]
#[command(name = "sandpile", version, about)]
struct Cli {
    /// Side length of the square grid.
    #[arg(
        short = 's',
        long,
        default_value_t = DEFAULT_SIZE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    size: u32,

    /// Number of grain-drop steps.
    #[arg(short = 'i', long, default_value_t = DEFAULT_ITERATIONS)]
    iters: u32,

    /// Toppling threshold: grains a cell holds before it falls.
    #[arg(
        long,
        default_value_t = DEFAULT_THRESHOLD,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    height: u32,

    /// Center placement weight; 1 drops uniformly, larger values pull
    /// drops toward the middle of the grid.
    #[arg(short = 'w', long, default_value_t = DEFAULT_WEIGHT)]
    weight: f64,

    /// RNG seed for reproducible runs (defaults to the clock).
    #[arg(long)]
    seed: Option<u64>,

    /// Print progress, the final pile and a timing summary.
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Write a bar chart of the cascade-size totals to this PNG file.
    #[arg(short = 'c', long, value_name = "FILE")]
    chart: Option<PathBuf>,

    /// Plot the chart on a natural-log count axis.
    #[arg(long, requires = "chart")]
    log_scale: bool,

    /// Render the final pile to this PNG file.
    #[arg(long, value_name = "FILE")]
    png: Option<PathBuf>,

    /// Record an animated GIF of the pile to this file.
    #[arg(long, value_name = "FILE")]
    gif: Option<PathBuf>,

    /// Steps between captured GIF frames.
    #[arg(long, default_value_t = DEFAULT_VIS_FREQ, value_parser = clap::value_parser!(u32).range(1..))]
    vis_freq: u32,

    /// Dump the run summary (parameters, histogram, final grid) as JSON.
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Run this many independent simulations in parallel and merge their
    /// histograms. Per-run outputs (png/gif/json) apply to single runs only.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    runs: u32,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let mut props = SimProps::new(cli.size, cli.iters)
        .with_threshold(cli.height)
        .with_weight(cli.weight)
        .with_debug(cli.verbose);
    if let Some(seed) = cli.seed {
        props = props.with_seed(seed);
    }
    if let Some(gif_path) = &cli.gif {
        props = props.with_visualization(gif_path, cli.vis_freq);
    }

    if cli.runs > 1 {
        let totals = run_ensemble(&props, cli.runs)?;
        if let Some(chart_path) = &cli.chart {
            ChartExporter::new(800, 500).export(&totals, cli.log_scale, chart_path)?;
            println!("📊 chart written to {}", chart_path.display());
        }
        println!("{:?}", totals);
        return Ok(());
    }

    let mut sim = Simulation::new(props)?;
    sim.run()?;
    let totals = sim.histogram();

    if cli.verbose {
        println!("{}", sim.pile());
        println!("cascades per step: {:?}", sim.record().sizes());
        sim.print_timing_summary();
    }
    if let Some(chart_path) = &cli.chart {
        ChartExporter::new(800, 500).export(&totals, cli.log_scale, chart_path)?;
        println!("📊 chart written to {}", chart_path.display());
    }
    if let Some(png_path) = &cli.png {
        PngExporter::new(8).export(sim.pile(), png_path)?;
        println!("🖼️ pile written to {}", png_path.display());
    }
    if let Some(json_path) = &cli.json {
        sim.summary().write_json(json_path)?;
        println!("💾 summary written to {}", json_path.display());
    }

    println!("{:?}", totals);
    Ok(())
}
