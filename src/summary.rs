// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Coin Trial Simulation Suite - Summary Aggregator

use tracing::debug;

use crate::error::{EngineError, Result};
use crate::types::{Summary, TrialRun};

/// Reduce a run into counts, rate and the cumulative success series.
///
/// `failure_count` is always derived from `trial_count - success_count`.
pub fn summarize(run: &TrialRun) -> Result<Summary> {
    let outcomes = run.outcomes();
    if outcomes.is_empty() {
        return Err(EngineError::invalid_state("cannot summarize an empty trial run"));
    }
    if outcomes.len() != run.trial_count() as usize {
        return Err(EngineError::invalid_state(format!(
            "trial run holds {} outcomes but reports trial_count {}",
            outcomes.len(),
            run.trial_count()
        )));
    }

    let mut cumulative_successes = Vec::with_capacity(outcomes.len());
    let mut running = 0u32;
    for outcome in outcomes {
        if outcome.is_success() {
            running += 1;
        }
        cumulative_successes.push(running);
    }

    let trial_count = run.trial_count();
    let success_count = running;
    let summary = Summary {
        trial_count,
        success_count,
        failure_count: trial_count - success_count,
        success_rate: success_count as f64 / trial_count as f64,
        cumulative_successes,
    };

    debug!(trial_count, success_count, success_rate = summary.success_rate, "summarized run");
    Ok(summary)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Outcome::{Heads, Tails};

    fn run(outcomes: Vec<crate::types::Outcome>) -> TrialRun {
        TrialRun::from_outcomes(outcomes, 0.5).expect("test: valid run")
    }

    #[test]
    fn counts_and_rate() {
        let s = summarize(&run(vec![Heads, Tails, Heads, Heads])).expect("test: summarize");
        assert_eq!(s.trial_count(), 4);
        assert_eq!(s.success_count(), 3);
        assert_eq!(s.failure_count(), 1);
        assert_eq!(s.success_rate(), 0.75);
        assert_eq!(s.failure_rate(), 0.25);
        assert_eq!(s.difference(), 2);
    }

    #[test]
    fn cumulative_series() {
        let s = summarize(&run(vec![Tails, Heads, Heads, Tails, Heads])).expect("test: summarize");
        assert_eq!(s.cumulative_successes(), &[0, 1, 2, 2, 3]);
        assert_eq!(s.cumulative_failures(), vec![1, 1, 1, 2, 2]);
    }

    #[test]
    fn single_trial() {
        let s = summarize(&run(vec![Tails])).expect("test: n = 1");
        assert_eq!(s.success_count(), 0);
        assert_eq!(s.cumulative_successes(), &[0]);
    }

    #[test]
    fn percentages() {
        let s = summarize(&run(vec![Heads, Tails, Tails, Tails])).expect("test: summarize");
        assert_eq!(s.success_pct(), 25.0);
        assert_eq!(s.failure_pct(), 75.0);
    }

    #[test]
    fn empty_run_is_invalid_state() {
        let empty = TrialRun::new_unchecked(0.5, Vec::new());
        let err = summarize(&empty).expect_err("test: empty run");
        assert!(err.is_invalid_state(), "expected InvalidState, got {err:?}");
    }

    #[test]
    fn repeated_calls_are_identical() {
        let r = run(vec![Heads, Heads, Tails, Heads, Tails, Tails, Heads]);
        let a = summarize(&r).expect("test: first");
        let b = summarize(&r).expect("test: second");
        assert_eq!(a, b);
        assert_eq!(a.success_rate().to_bits(), b.success_rate().to_bits());
    }
}
