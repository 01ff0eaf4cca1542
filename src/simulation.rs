// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Coin Trial Simulation Suite - Simulation Pipeline

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info_span};
use wasm_bindgen::prelude::*;

use crate::config::SimulationConfig;
use crate::error::{EngineError, Result};
use crate::hypothesis::HypothesisTest;
use crate::report::{self, Report};
use crate::summary::summarize;

// ─── Pipeline ───────────────────────────────────────────────────────────────

/// Run one request through generator → aggregator → tester → report.
///
/// Parameters are validated up front; no stage runs on bad input.
pub fn simulate<R: Rng + ?Sized>(config: &SimulationConfig, rng: &mut R) -> Result<Report> {
    let span = info_span!(
        "simulate",
        trial_count = config.trial_count,
        success_probability = config.success_probability
    );
    let _guard = span.enter();

    config.validate()?;
    let run = config
        .generator()
        .generate(config.trial_count, config.success_probability, rng)?;
    let summary = summarize(&run)?;
    let test = config.hypothesis().run(&summary)?;
    report::build(run, summary, test)
}

/// Run one request with a fresh ChaCha8 stream seeded from `seed`.
pub fn simulate_seeded(config: &SimulationConfig, seed: u64) -> Result<Report> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    simulate(config, &mut rng)
}

// ─── CoinSimulator struct ───────────────────────────────────────────────────

/// Front-end handle: owns one seeded RNG stream and the last report shown.
#[wasm_bindgen]
pub struct CoinSimulator {
    pub(crate) seed: u64,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) max_trials: u32,
    pub(crate) hypothesis: HypothesisTest,
    pub(crate) last_report: Option<Report>,
}

// ─── Internal Logic (Testable, pure Rust) ───────────────────────────────────

impl CoinSimulator {
    pub fn with_seed(seed: u64) -> Self {
        let defaults = SimulationConfig::default();
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            max_trials: defaults.max_trials,
            hypothesis: defaults.hypothesis(),
            last_report: None,
        }
    }

    /// Build a simulator from a config; a missing seed falls back to 0.
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        let mut sim = Self::with_seed(config.seed.unwrap_or(0));
        sim.max_trials = config.max_trials;
        sim.hypothesis = config.hypothesis();
        Ok(sim)
    }

    fn request_config(&self, trial_count: u32, success_probability: f64) -> SimulationConfig {
        SimulationConfig {
            trial_count,
            success_probability,
            max_trials: self.max_trials,
            seed: Some(self.seed),
            null_probability: self.hypothesis.null_probability,
            significance_level: self.hypothesis.significance_level,
        }
    }

    /// Draw a new report from the simulator's stream and remember it.
    ///
    /// A rejected request leaves the previous report in place.
    pub fn run_request(&mut self, trial_count: u32, success_probability: f64) -> Result<&Report> {
        let config = self.request_config(trial_count, success_probability);
        let report = simulate(&config, &mut self.rng)?;
        debug!(seed = self.seed, verdict = report.test().verdict().as_str(), "request complete");
        Ok(&*self.last_report.insert(report))
    }

    pub fn last_report(&self) -> Option<&Report> {
        self.last_report.as_ref()
    }

    /// CSV trial log of the last report.
    pub fn last_csv(&self) -> Result<String> {
        self.last_report
            .as_ref()
            .map(Report::to_csv)
            .ok_or_else(|| EngineError::invalid_state("no simulation has been run yet"))
    }

    pub fn clear(&mut self) {
        self.last_report = None;
    }

    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.last_report = None;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
