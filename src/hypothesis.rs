// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Coin Trial Simulation Suite - Hypothesis Tester
//
// Two-sided exact binomial test of the observed head count against a null
// success probability, with a Wilson 95% interval for the observed rate.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::binomial::{self, Z_95};
use crate::error::{check_open_unit, check_probability, EngineError, Result};
use crate::types::{ConfidenceInterval, Summary, TestResult, Verdict};

/// Fair-coin null probability.
pub const FAIR_NULL: f64 = 0.5;

/// Default significance level (alpha).
pub const DEFAULT_SIGNIFICANCE: f64 = 0.05;

/// Coverage of the reported interval and expected-count range.
pub const CONFIDENCE_LEVEL: f64 = 0.95;

// ---------------------------------------------------------------------------
// HypothesisTest
// ---------------------------------------------------------------------------

/// Null probability and significance level for one test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HypothesisTest {
    pub null_probability: f64,
    pub significance_level: f64,
}

impl Default for HypothesisTest {
    fn default() -> Self {
        Self {
            null_probability: FAIR_NULL,
            significance_level: DEFAULT_SIGNIFICANCE,
        }
    }
}

impl HypothesisTest {
    pub fn new(null_probability: f64, significance_level: f64) -> Result<Self> {
        let test = Self { null_probability, significance_level };
        test.validate()?;
        Ok(test)
    }

    pub fn validate(&self) -> Result<()> {
        check_probability("null_probability", self.null_probability)?;
        check_open_unit("significance_level", self.significance_level)
    }

    /// Run the test against `summary`.
    pub fn run(&self, summary: &Summary) -> Result<TestResult> {
        self.validate()?;

        let n = summary.trial_count();
        let k = summary.success_count();
        if n == 0 {
            return Err(EngineError::invalid_state("hypothesis test needs at least one trial"));
        }
        if k > n || summary.failure_count() != n - k {
            return Err(EngineError::invalid_state(format!(
                "summary counts disagree: {k} successes, {} failures, {n} trials",
                summary.failure_count()
            )));
        }

        let p_value = binomial::two_sided_p_value(k, n, self.null_probability);
        let (lower, upper) = binomial::wilson_interval(k, n, Z_95);
        let reject_null = p_value < self.significance_level;
        let verdict = Verdict::from_rejection(reject_null);

        debug!(
            trial_count = n,
            success_count = k,
            p_value,
            ci_lower = lower,
            ci_upper = upper,
            verdict = verdict.as_str(),
            "binomial test complete"
        );

        Ok(TestResult {
            trial_count: n,
            success_count: k,
            null_probability: self.null_probability,
            p_value,
            confidence_interval: ConfidenceInterval { lower, upper, level: CONFIDENCE_LEVEL },
            significance_level: self.significance_level,
            reject_null,
            verdict,
            expected_count_range: binomial::central_count_range(
                n,
                self.null_probability,
                CONFIDENCE_LEVEL,
            ),
        })
    }
}

/// Test with explicit null probability and significance level.
pub fn test(summary: &Summary, null_probability: f64, significance_level: f64) -> Result<TestResult> {
    HypothesisTest::new(null_probability, significance_level)?.run(summary)
}

/// Test against a fair coin at alpha = 0.05.
pub fn test_fair_coin(summary: &Summary) -> Result<TestResult> {
    HypothesisTest::default().run(summary)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
