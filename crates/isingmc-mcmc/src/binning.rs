use serde::{Deserialize, Serialize};
use tracing::warn;

/// Spread of the coarsened sequence at one binning level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinningLevel {
    /// Level index; level 0 is the raw sequence.
    pub level: usize,
    /// Number of raw samples averaged into each element (`2^level`).
    pub bin_size: usize,
    /// Length of the sequence at this level.
    pub count: usize,
    /// Population standard deviation (divisor `count`) of the sequence.
    pub std_dev: f64,
}

impl BinningLevel {
    /// Standard error of the mean implied by this level: `std_dev / sqrt(count)`.
    pub fn standard_error(&self) -> f64 {
        self.std_dev / (self.count as f64).sqrt()
    }
}

/// Runs the binning analysis over a serially correlated sequence.
///
/// Records the standard deviation of the current sequence, then replaces it by
/// the averages of adjacent pairs `(0, 1), (2, 3), ...`; an odd trailing element
/// is dropped. Stops once fewer than two elements remain or `max_levels`
/// levels have been recorded. The returned deviations are raw per-level
/// values; use [`BinningLevel::standard_error`] for the error of the mean.
pub fn error_binning(samples: &[f64], max_levels: Option<usize>) -> Vec<BinningLevel> {
    let mut levels = Vec::new();
    let mut current = samples.to_vec();
    let mut bin_size = 1usize;
    while current.len() >= 2 && max_levels.map_or(true, |max| levels.len() < max) {
        levels.push(BinningLevel {
            level: levels.len(),
            bin_size,
            count: current.len(),
            std_dev: std_dev(&current),
        });
        current = coarsen(&current);
        bin_size *= 2;
    }
    levels
}

/// Averages adjacent pairs, dropping an odd trailing element.
pub fn coarsen(samples: &[f64]) -> Vec<f64> {
    samples
        .chunks_exact(2)
        .map(|pair| 0.5 * (pair[0] + pair[1]))
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn std_dev(values: &[f64]) -> f64 {
    let mean = mean(values);
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// (mean, error) pair produced from a binning analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Sample mean of the raw sequence.
    pub mean: f64,
    /// Raw standard deviation at the coarsest level.
    pub std_dev: f64,
    /// `std_dev / sqrt(count)` at the coarsest level.
    pub standard_error: f64,
}

/// Mean and binning levels of one observable sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinningAnalysis {
    /// Number of raw samples.
    pub samples: usize,
    /// Mean of the raw samples (NaN when empty).
    pub mean: f64,
    /// Per-level spreads, finest first.
    pub levels: Vec<BinningLevel>,
}

impl BinningAnalysis {
    /// Analyses `samples`, recording at most `max_levels` levels.
    pub fn new(samples: &[f64], max_levels: Option<usize>) -> Self {
        if samples.len() < 2 {
            warn!(samples = samples.len(), "binning needs at least two samples");
        }
        let mean = if samples.is_empty() {
            f64::NAN
        } else {
            mean(samples)
        };
        Self {
            samples: samples.len(),
            mean,
            levels: error_binning(samples, max_levels),
        }
    }

    /// Coarsest recorded level; its spread is the plateau estimate once the
    /// bin size exceeds the autocorrelation length.
    pub fn final_level(&self) -> Option<&BinningLevel> {
        self.levels.last()
    }

    /// Summarises the analysis; both errors are NaN when no level was recorded.
    pub fn estimate(&self) -> Estimate {
        let (std_dev, standard_error) = self
            .final_level()
            .map(|level| (level.std_dev, level.standard_error()))
            .unwrap_or((f64::NAN, f64::NAN));
        Estimate {
            mean: self.mean,
            std_dev,
            standard_error,
        }
    }
}
