// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Coin Trial Simulation Suite - Type Definitions

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{check_probability, EngineError, Result};

// ─── Outcome ────────────────────────────────────────────────────────────────

/// A single trial result. `Heads` is the success outcome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Outcome {
    Heads,
    Tails,
}

impl Outcome {
    pub fn from_success(success: bool) -> Self {
        if success { Self::Heads } else { Self::Tails }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Heads)
    }

    /// Categorical label used in the exported trial log.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Heads => "Heads",
            Self::Tails => "Tails",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ─── Trial Run ──────────────────────────────────────────────────────────────

/// Ordered outcomes of one simulation request.
///
/// The outcome count always equals `trial_count`; both are fixed at
/// construction.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrialRun {
    trial_count: u32,
    success_probability: f64,
    outcomes: Vec<Outcome>,
}

impl TrialRun {
    pub(crate) fn new_unchecked(success_probability: f64, outcomes: Vec<Outcome>) -> Self {
        Self {
            trial_count: outcomes.len() as u32,
            success_probability,
            outcomes,
        }
    }

    /// Build a run from a fixed outcome sequence.
    ///
    /// The sequence must be non-empty and `success_probability` must lie in
    /// [0, 1]; it records the configured coin, not the observed rate.
    /// The trial ceiling is a generator limit and is not applied here.
    pub fn from_outcomes(outcomes: Vec<Outcome>, success_probability: f64) -> Result<Self> {
        check_probability("success_probability", success_probability)?;
        if outcomes.is_empty() {
            return Err(EngineError::invalid_parameter(
                "outcomes",
                "a trial run needs at least one outcome",
            ));
        }
        if outcomes.len() > u32::MAX as usize {
            return Err(EngineError::invalid_parameter(
                "outcomes",
                format!("{} outcomes exceed the supported trial count", outcomes.len()),
            ));
        }
        Ok(Self::new_unchecked(success_probability, outcomes))
    }

    /// Build a run of `trial_count` outcomes whose first `successes` are heads.
    pub fn with_successes(trial_count: u32, successes: u32, success_probability: f64) -> Result<Self> {
        if successes > trial_count {
            return Err(EngineError::invalid_parameter(
                "successes",
                format!("{successes} exceeds trial count {trial_count}"),
            ));
        }
        let outcomes = (0..trial_count)
            .map(|i| Outcome::from_success(i < successes))
            .collect();
        Self::from_outcomes(outcomes, success_probability)
    }

    pub fn trial_count(&self) -> u32 { self.trial_count }
    pub fn success_probability(&self) -> f64 { self.success_probability }
    pub fn outcomes(&self) -> &[Outcome] { &self.outcomes }
}

// ─── Summary ────────────────────────────────────────────────────────────────

/// Counts and proportions derived from a [`TrialRun`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Summary {
    pub(crate) trial_count: u32,
    pub(crate) success_count: u32,
    pub(crate) failure_count: u32,
    pub(crate) success_rate: f64,
    pub(crate) cumulative_successes: Vec<u32>,
}

impl Summary {
    pub fn trial_count(&self) -> u32 { self.trial_count }
    pub fn success_count(&self) -> u32 { self.success_count }
    pub fn failure_count(&self) -> u32 { self.failure_count }
    pub fn success_rate(&self) -> f64 { self.success_rate }
    pub fn cumulative_successes(&self) -> &[u32] { &self.cumulative_successes }

    pub fn failure_rate(&self) -> f64 {
        if self.trial_count == 0 { return 0.0; }
        self.failure_count as f64 / self.trial_count as f64
    }

    pub fn success_pct(&self) -> f64 { self.success_rate * 100.0 }
    pub fn failure_pct(&self) -> f64 { self.failure_rate() * 100.0 }

    /// Absolute gap between heads and tails.
    pub fn difference(&self) -> u32 {
        self.success_count.abs_diff(self.failure_count)
    }

    /// Failures seen up to and including each trial.
    pub fn cumulative_failures(&self) -> Vec<u32> {
        self.cumulative_successes
            .iter()
            .enumerate()
            .map(|(i, &s)| (i as u32 + 1) - s)
            .collect()
    }
}

// ─── Hypothesis Test Result ─────────────────────────────────────────────────

/// Decision reached by the two-sided test.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Verdict {
    #[serde(rename = "fair coin")]
    FairCoin,
    #[serde(rename = "biased coin")]
    BiasedCoin,
}

impl Verdict {
    pub fn from_rejection(reject_null: bool) -> Self {
        if reject_null { Self::BiasedCoin } else { Self::FairCoin }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FairCoin => "fair coin",
            Self::BiasedCoin => "biased coin",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interval estimate for the true success probability.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
    pub level: f64,
}

impl ConfidenceInterval {
    pub fn contains(&self, p: f64) -> bool {
        self.lower <= p && p <= self.upper
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Output of the exact binomial test.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TestResult {
    pub(crate) trial_count: u32,
    pub(crate) success_count: u32,
    pub(crate) null_probability: f64,
    pub(crate) p_value: f64,
    pub(crate) confidence_interval: ConfidenceInterval,
    pub(crate) significance_level: f64,
    pub(crate) reject_null: bool,
    pub(crate) verdict: Verdict,
    /// Central 95% range of success counts expected under the null.
    pub(crate) expected_count_range: (u32, u32),
}

impl TestResult {
    pub fn trial_count(&self) -> u32 { self.trial_count }
    pub fn success_count(&self) -> u32 { self.success_count }
    pub fn null_probability(&self) -> f64 { self.null_probability }
    pub fn p_value(&self) -> f64 { self.p_value }
    pub fn confidence_interval(&self) -> ConfidenceInterval { self.confidence_interval }
    pub fn significance_level(&self) -> f64 { self.significance_level }
    pub fn reject_null(&self) -> bool { self.reject_null }
    pub fn verdict(&self) -> Verdict { self.verdict }
    pub fn expected_count_range(&self) -> (u32, u32) { self.expected_count_range }
}

// ─── Export Row ─────────────────────────────────────────────────────────────

/// One line of the exported trial log.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct TrialRow {
    pub trial_index: u32,
    pub outcome: Outcome,
}

// ─── Configured Coin ────────────────────────────────────────────────────────

/// Describes the coin a request was configured with, before any trials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoinBias(pub f64);

impl CoinBias {
    pub fn is_fair(&self) -> bool {
        self.0 == 0.5
    }

    pub fn describe(&self) -> String {
        if self.is_fair() {
            Verdict::FairCoin.as_str().to_string()
        } else {
            format!("{} ({:.0}% heads)", Verdict::BiasedCoin.as_str(), self.0 * 100.0)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
