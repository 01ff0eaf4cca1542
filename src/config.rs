// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Coin Trial Simulation Suite - Request Configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EngineError, Result};
use crate::generator::{TrialGenerator, DEFAULT_MAX_TRIALS};
use crate::hypothesis::{HypothesisTest, DEFAULT_SIGNIFICANCE, FAIR_NULL};

/// Parameters for one simulation request.
///
/// Every field has a default, so a TOML file only needs the keys it
/// overrides:
///
/// ```toml
/// trial_count = 100
/// success_probability = 0.6
/// seed = 42
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub trial_count: u32,
    pub success_probability: f64,
    pub max_trials: u32,
    /// `None` lets the caller pick a seed.
    pub seed: Option<u64>,
    pub null_probability: f64,
    pub significance_level: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trial_count: 10,
            success_probability: 0.5,
            max_trials: DEFAULT_MAX_TRIALS,
            seed: None,
            null_probability: FAIR_NULL,
            significance_level: DEFAULT_SIGNIFICANCE,
        }
    }
}

impl SimulationConfig {
    pub fn new(trial_count: u32, success_probability: f64) -> Self {
        Self { trial_count, success_probability, ..Self::default() }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)
            .map_err(|e| EngineError::invalid_parameter("config", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            EngineError::invalid_parameter("config", format!("{}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn generator(&self) -> TrialGenerator {
        TrialGenerator::with_max_trials(self.max_trials)
    }

    pub fn hypothesis(&self) -> HypothesisTest {
        HypothesisTest {
            null_probability: self.null_probability,
            significance_level: self.significance_level,
        }
    }

    /// Domain checks for every field, before any trial is drawn.
    pub fn validate(&self) -> Result<()> {
        if self.max_trials == 0 {
            return Err(EngineError::invalid_parameter("max_trials", "must be at least 1"));
        }
        self.generator().validate(self.trial_count, self.success_probability)?;
        self.hypothesis().validate()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_interactive_ui() {
        let c = SimulationConfig::default();
        assert_eq!(c.trial_count, 10);
        assert_eq!(c.success_probability, 0.5);
        assert_eq!(c.max_trials, 1000);
        assert_eq!(c.significance_level, 0.05);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = SimulationConfig::from_toml_str("trial_count = 250\nseed = 7\n")
            .expect("test: parse config");
        assert_eq!(c.trial_count, 250);
        assert_eq!(c.seed, Some(7));
        assert_eq!(c.success_probability, 0.5);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = SimulationConfig::from_toml_str("success_probability = 1.5\n")
            .expect_err("test: bad probability");
        assert!(err.is_invalid_parameter());

        let err = SimulationConfig::from_toml_str("trial_count = 0\n")
            .expect_err("test: zero trials");
        assert!(err.is_invalid_parameter());

        let err = SimulationConfig::from_toml_str("significance_level = 0.0\n")
            .expect_err("test: bad alpha");
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn raised_ceiling_allows_more_trials() {
        let c = SimulationConfig::from_toml_str("trial_count = 5000\nmax_trials = 10000\n")
            .expect("test: relaxed ceiling");
        assert_eq!(c.generator().max_trials(), 10_000);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(SimulationConfig::from_toml_str("trails = 10\n").is_err());
    }
}
