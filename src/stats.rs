use crate::record::CascadeRecord;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use uuid::Uuid;

/// Cascade size -> number of steps that produced a cascade of that size.
/// Ordered so chart axes come out sorted for free.
pub type Histogram = BTreeMap<u64, u64>;

/// Cascade size -> natural log of its occurrence count.
pub type LogHistogram = BTreeMap<u64, f64>;

/// Count how many steps produced each cascade size. Steps with no cascade
/// contribute to the size-0 bucket, so the counts always sum to the number
/// of steps recorded.
pub fn histogram(record: &CascadeRecord) -> Histogram {
    let mut totals = Histogram::new();
    for &size in record.sizes() {
        *totals.entry(size).or_insert(0) += 1;
    }
    totals
}

/// Log-transform a histogram for power-law visualization. Every key
/// present has count >= 1, so the log is always defined.
pub fn log_histogram(histogram: &Histogram) -> LogHistogram {
    histogram
        .iter()
        .map(|(&size, &count)| (size, (count as f64).ln()))
        .collect()
}

/// Merge several histograms, summing counts per cascade size.
pub fn merge_histograms<I: IntoIterator<Item = Histogram>>(histograms: I) -> Histogram {
    let mut merged = Histogram::new();
    for histogram in histograms {
        for (size, count) in histogram {
            *merged.entry(size).or_insert(0) += count;
        }
    }
    merged
}

/// Everything a run hands to external consumers, in one serializable bag.
#[derive(Debug, Serialize)]
pub struct SimSummary {
    pub run_id: Uuid,
    pub size: u32,
    pub iterations: u32,
    pub threshold: u32,
    pub weight: f64,
    pub seed: u64,
    pub histogram: Histogram,
    pub final_grid: Vec<Vec<u32>>,
}

impl SimSummary {
    /// Write the summary as pretty-printed JSON, creating parent
    /// directories as needed.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}
