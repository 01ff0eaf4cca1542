// Monte Carlo Infrastructure: N independent requests per configuration
// Request i uses seed base + i, so any single run can be replayed alone.

use coinflip_engine::{simulate_seeded, Report, Result, SimulationConfig};
use tracing::debug;

use crate::stats::{MonteCarloReport, RunResult, Stats};

/// Run a single request with a specific seed.
pub fn run_single(config: &SimulationConfig, seed: u64) -> Result<RunResult> {
    let report = simulate_seeded(config, seed)?;
    Ok(to_run_result(&report, config.success_probability, seed))
}

fn to_run_result(report: &Report, truth: f64, seed: u64) -> RunResult {
    let summary = report.summary();
    let test = report.test();
    let ci = test.confidence_interval();
    RunResult {
        seed,
        success_count: summary.success_count(),
        success_rate: summary.success_rate(),
        p_value: test.p_value(),
        reject_null: test.reject_null(),
        ci_lower: ci.lower,
        ci_upper: ci.upper,
        ci_covers_truth: ci.contains(truth),
    }
}

/// Run Monte Carlo: `n_runs` requests of one configuration, aggregate stats.
pub fn run_monte_carlo(
    config: &SimulationConfig,
    n_runs: usize,
    base_seed: u64,
) -> Result<MonteCarloReport> {
    config.validate()?;

    let mut results = Vec::with_capacity(n_runs);
    for i in 0..n_runs {
        let seed = base_seed.wrapping_add(i as u64);
        let result = run_single(config, seed)?;
        debug!(seed, p_value = result.p_value, reject = result.reject_null, "monte carlo run");
        results.push(result);
    }

    Ok(aggregate(config, base_seed, results))
}

/// Aggregate individual runs into a MonteCarloReport.
fn aggregate(config: &SimulationConfig, base_seed: u64, results: Vec<RunResult>) -> MonteCarloReport {
    let n = results.len();
    let share = |count: usize| if n == 0 { 0.0 } else { count as f64 / n as f64 };

    let rejected = results.iter().filter(|r| r.reject_null).count();
    let covered = results.iter().filter(|r| r.ci_covers_truth).count();

    let p_value = Stats::from_samples(
        &results.iter().map(|r| r.p_value).collect::<Vec<_>>()
    );
    let success_rate = Stats::from_samples(
        &results.iter().map(|r| r.success_rate).collect::<Vec<_>>()
    );

    MonteCarloReport {
        trial_count: config.trial_count,
        success_probability: config.success_probability,
        null_probability: config.null_probability,
        significance_level: config.significance_level,
        base_seed,
        n_runs: n,
        rejection_rate: share(rejected),
        interval_coverage: share(covered),
        p_value,
        success_rate,
        individual_runs: results,
    }
}
