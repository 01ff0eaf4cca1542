// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Coin Trial Simulation Suite - Trial Generator
//
// Draws independent Bernoulli trials from a caller-supplied RNG. The RNG is
// the only state consumed; seeding it fixes the outcome sequence.

use rand::Rng;
use tracing::{debug, warn};

use crate::error::{check_probability, EngineError, Result};
use crate::types::{Outcome, TrialRun};

/// Smallest accepted trial count.
pub const MIN_TRIALS: u32 = 1;

/// Default upper bound on trials per request (usability limit).
pub const DEFAULT_MAX_TRIALS: u32 = 1000;

// ---------------------------------------------------------------------------
// TrialGenerator
// ---------------------------------------------------------------------------

/// Bernoulli trial source with a configurable trial-count ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialGenerator {
    max_trials: u32,
}

impl Default for TrialGenerator {
    fn default() -> Self {
        Self { max_trials: DEFAULT_MAX_TRIALS }
    }
}

impl TrialGenerator {
    /// Relax (or tighten) the trial-count ceiling.
    pub fn with_max_trials(max_trials: u32) -> Self {
        Self { max_trials: max_trials.max(MIN_TRIALS) }
    }

    pub fn max_trials(&self) -> u32 {
        self.max_trials
    }

    /// Check both inputs without drawing anything.
    pub fn validate(&self, trial_count: u32, success_probability: f64) -> Result<()> {
        if trial_count < MIN_TRIALS {
            return Err(EngineError::invalid_parameter(
                "trial_count",
                format!("must be at least {MIN_TRIALS}, got {trial_count}"),
            ));
        }
        if trial_count > self.max_trials {
            return Err(EngineError::invalid_parameter(
                "trial_count",
                format!("must be at most {}, got {trial_count}", self.max_trials),
            ));
        }
        check_probability("success_probability", success_probability)
    }

    /// Draw `trial_count` outcomes, each heads with `success_probability`.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        trial_count: u32,
        success_probability: f64,
        rng: &mut R,
    ) -> Result<TrialRun> {
        if let Err(e) = self.validate(trial_count, success_probability) {
            warn!(trial_count, success_probability, error = %e, "rejected trial request");
            return Err(e);
        }

        let outcomes: Vec<Outcome> = (0..trial_count)
            .map(|_| Outcome::from_success(rng.gen_bool(success_probability)))
            .collect();

        debug!(trial_count, success_probability, "generated trial run");
        Ok(TrialRun::new_unchecked(success_probability, outcomes))
    }
}

/// Generate with the default 1000-trial ceiling.
pub fn generate<R: Rng + ?Sized>(
    trial_count: u32,
    success_probability: f64,
    rng: &mut R,
) -> Result<TrialRun> {
    TrialGenerator::default().generate(trial_count, success_probability, rng)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
