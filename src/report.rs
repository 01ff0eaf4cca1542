// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Coin Trial Simulation Suite - Report Builder
//
// Bundles one request's run, summary and test result into an immutable
// Report and projects it into the flat trial log used for CSV export.

use serde::Serialize;
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::types::{Summary, TestResult, TrialRow, TrialRun};

/// Header of the exported trial log.
pub const CSV_HEADER: &str = "trial_index,outcome";

/// Suggested file name for the exported trial log.
pub const CSV_FILE_NAME: &str = "coin_results.csv";

// ─── Report ─────────────────────────────────────────────────────────────────

/// Everything produced by a single simulation request.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Report {
    run: TrialRun,
    summary: Summary,
    test: TestResult,
}

impl Report {
    pub fn run(&self) -> &TrialRun { &self.run }
    pub fn summary(&self) -> &Summary { &self.summary }
    pub fn test(&self) -> &TestResult { &self.test }

    pub fn trial_count(&self) -> u32 {
        self.run.trial_count()
    }

    /// One row per trial, indexed from 1 in trial order.
    pub fn rows(&self) -> Vec<TrialRow> {
        self.run
            .outcomes()
            .iter()
            .zip(1u32..)
            .map(|(&outcome, trial_index)| TrialRow { trial_index, outcome })
            .collect()
    }

    /// Trial log as comma-separated values with a header row.
    pub fn to_csv(&self) -> String {
        let mut csv = String::with_capacity(CSV_HEADER.len() + 1 + self.run.outcomes().len() * 10);
        csv.push_str(CSV_HEADER);
        csv.push('\n');
        for row in self.rows() {
            csv.push_str(&row.trial_index.to_string());
            csv.push(',');
            csv.push_str(row.outcome.label());
            csv.push('\n');
        }
        csv
    }
}

// ─── Builder ────────────────────────────────────────────────────────────────

/// Assemble a [`Report`], checking that all three stages saw the same run.
pub fn build(run: TrialRun, summary: Summary, test: TestResult) -> Result<Report> {
    let n = run.trial_count();
    if summary.trial_count() != n || test.trial_count() != n {
        return Err(EngineError::invalid_state(format!(
            "trial_count mismatch: run {n}, summary {}, test {}",
            summary.trial_count(),
            test.trial_count()
        )));
    }
    if summary.success_count() != test.success_count() {
        return Err(EngineError::invalid_state(format!(
            "success_count mismatch: summary {}, test {}",
            summary.success_count(),
            test.success_count()
        )));
    }

    debug!(trial_count = n, verdict = test.verdict().as_str(), "report assembled");
    Ok(Report { run, summary, test })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
