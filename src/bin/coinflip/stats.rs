// Monte Carlo Report Types
// Per-metric aggregation across independently seeded requests

use coinflip_engine::binomial::Z_95;
use serde::Serialize;

// ─── Statistics (per-metric Monte Carlo aggregation) ────────────────────────

/// Mean with a normal-approximation 95% interval, plus range.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        let n = samples.len();
        let count = n as f64;
        let mean = samples.iter().sum::<f64>() / count;
        let (min, max) = samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)));

        // Bessel-corrected; a single sample has no spread
        let std_dev = if n > 1 {
            (samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (count - 1.0)).sqrt()
        } else {
            0.0
        };
        let half_width = Z_95 * std_dev / count.sqrt();

        Self {
            mean,
            std_dev,
            ci_lower: mean - half_width,
            ci_upper: mean + half_width,
            min,
            max,
            n,
        }
    }
}

// ─── Single-Run Result ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub seed: u64,
    pub success_count: u32,
    pub success_rate: f64,
    pub p_value: f64,
    pub reject_null: bool,
    pub ci_lower: f64,
    pub ci_upper: f64,
    /// Whether the Wilson interval covers the configured probability.
    pub ci_covers_truth: bool,
}

// ─── Monte Carlo Report ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct MonteCarloReport {
    pub trial_count: u32,
    pub success_probability: f64,
    pub null_probability: f64,
    pub significance_level: f64,
    pub base_seed: u64,
    pub n_runs: usize,
    /// Share of runs that rejected the null (false-positive rate when the
    /// configured coin matches the null, power otherwise).
    pub rejection_rate: f64,
    pub interval_coverage: f64,
    pub p_value: Stats,
    pub success_rate: Stats,
    pub individual_runs: Vec<RunResult>,
}
