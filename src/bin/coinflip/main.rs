// Coin Trial Runner: single request or Monte Carlo sweep
//
// Usage:
//   cargo run --bin coinflip -- --trials 100 --probability 0.6 --seed 42
//   cargo run --bin coinflip -- --trials 100 --csv                # write coin_results.csv
//   cargo run --bin coinflip -- --trials 100 --json               # print the report as JSON
//   cargo run --bin coinflip -- --trials 200 --runs 500           # Monte Carlo mode
//   cargo run --bin coinflip -- --config coin.toml

mod monte_carlo;
mod stats;

use anyhow::{Context, Result};
use clap::Parser;
use coinflip_engine::{report::CSV_FILE_NAME, simulate_seeded, CoinBias, Report, SimulationConfig};
use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::info;
use tracing_subscriber::EnvFilter;

// ─── CLI Parsing ────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "coinflip", version, about = "Simulate coin flips and test whether the coin is fair")]
struct Cli {
    /// Number of flips per request (1-1000 unless max_trials is raised in the config)
    #[arg(short = 'n', long)]
    trials: Option<u32>,

    /// Probability of heads
    #[arg(short, long)]
    probability: Option<f64>,

    /// RNG seed (defaults to the current time)
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML file with request parameters; flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the trial log as CSV (single request only)
    #[arg(long, num_args = 0..=1, default_missing_value = CSV_FILE_NAME, conflicts_with = "runs")]
    csv: Option<PathBuf>,

    /// Print the full report as JSON instead of the text summary
    #[arg(long)]
    json: bool,

    /// Monte Carlo mode: number of independently seeded requests
    #[arg(long)]
    runs: Option<usize>,
}

impl Cli {
    fn resolve_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => SimulationConfig::default(),
        };
        if let Some(n) = self.trials {
            config.trial_count = n;
        }
        if let Some(p) = self.probability {
            config.success_probability = p;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        config.validate().context("invalid simulation parameters")?;
        Ok(config)
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

// ─── Output ─────────────────────────────────────────────────────────────────

fn print_report(report: &Report, seed: u64) {
    let summary = report.summary();
    let test = report.test();
    let ci = test.confidence_interval();
    let (lo, hi) = test.expected_count_range();

    println!("\n  Coin: {}  |  Seed: {}", CoinBias(report.run().success_probability()).describe(), seed);
    println!("  {}", "-".repeat(60));
    println!("  {:<24} {:>8}", "Total flips", summary.trial_count());
    println!("  {:<24} {:>8}  ({:.1}%)", "Heads", summary.success_count(), summary.success_pct());
    println!("  {:<24} {:>8}  ({:.1}%)", "Tails", summary.failure_count(), summary.failure_pct());
    println!("  {:<24} {:>8}", "Difference", summary.difference());
    println!("  {}", "-".repeat(60));
    println!("  Binomial test  H0: p = {}  (two-sided, alpha = {})",
        test.null_probability(), test.significance_level());
    println!("    p-value:                {:.4}", test.p_value());
    println!("    Decision:               {} the null hypothesis",
        if test.reject_null() { "Reject" } else { "Do not reject" });
    println!("    Verdict:                {}", test.verdict());
    println!("    95% CI for heads rate:  [{:.4}, {:.4}]", ci.lower, ci.upper);
    println!("    Expected heads (95%):   [{}, {}]\n", lo, hi);
}

fn print_monte_carlo(report: &stats::MonteCarloReport, elapsed_ms: u128) {
    println!("\n  Monte Carlo: {} runs x {} flips  |  p = {}  |  Base seed: {}",
        report.n_runs, report.trial_count, report.success_probability, report.base_seed);
    println!("  {}", "-".repeat(60));
    println!("  {:<24} {:>8.1}%", "Rejection rate", report.rejection_rate * 100.0);
    println!("  {:<24} {:>8.1}%", "CI coverage", report.interval_coverage * 100.0);
    println!("  {:<24} {:>8.4} ± {:.4}", "Mean p-value",
        report.p_value.mean, (report.p_value.ci_upper - report.p_value.ci_lower) / 2.0);
    println!("  {:<24} {:>8.4} [{:.4}, {:.4}]", "Mean heads rate",
        report.success_rate.mean, report.success_rate.min, report.success_rate.max);
    println!("  {:<24} {:>7}ms\n", "Time", elapsed_ms);
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    let seed = config.seed.unwrap_or_else(clock_seed);

    if let Some(runs) = cli.runs {
        let start = Instant::now();
        let report = monte_carlo::run_monte_carlo(&config, runs, seed)
            .context("monte carlo sweep failed")?;
        info!(runs, rejection_rate = report.rejection_rate, "monte carlo complete");
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_monte_carlo(&report, start.elapsed().as_millis());
        }
        return Ok(());
    }

    let report = simulate_seeded(&config, seed).context("simulation failed")?;
    info!(
        trial_count = report.trial_count(),
        p_value = report.test().p_value(),
        verdict = report.test().verdict().as_str(),
        "simulation complete"
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, seed);
    }

    if let Some(path) = &cli.csv {
        std::fs::write(path, report.to_csv())
            .with_context(|| format!("writing trial log to {}", path.display()))?;
        info!(path = %path.display(), rows = report.trial_count(), "trial log written");
    }

    Ok(())
}
