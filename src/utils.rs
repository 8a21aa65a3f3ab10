//! Utility helpers: seeded RNG construction, timing, and result reports.

use crate::solution::SearchResult;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::fs::File;
use std::io;
use std::path::Path;
use std::time::Duration;

/// Build the RNG used throughout the engines. A fixed seed gives a fully
/// reproducible run; `None` draws the seed from OS entropy.
pub fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Format a duration as hours, minutes, and seconds.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}h {:02}m {:02}s", hours, minutes, seconds)
}

/// One method's outcome, flattened for serialization. A sequence of reports
/// is what external plotting and tabulation consume.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub method: String,
    pub centroids: Vec<Vec<f64>>,
    pub cost: f64,
    pub history: Vec<f64>,
}

impl SearchReport {
    /// Build a report from a local/tabu search result.
    pub fn from_result(method: &str, result: &SearchResult) -> Self {
        SearchReport {
            method: method.to_string(),
            centroids: result
                .configuration
                .centroids()
                .iter()
                .map(|p| p.coords.clone())
                .collect(),
            cost: result.cost,
            history: result.history.clone(),
        }
    }
}

/// Write a set of reports to a JSON file.
pub fn save_reports<P: AsRef<Path>>(reports: &[SearchReport], path: P) -> io::Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, reports)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}
