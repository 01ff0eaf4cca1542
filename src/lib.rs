// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Coin Trial Simulation Suite

pub mod error;
pub mod types;
pub mod config;
pub mod generator;
pub mod summary;
pub mod binomial;
pub mod hypothesis;
pub mod report;
pub mod simulation;

pub use error::{EngineError, Result};
pub use types::*;
pub use config::SimulationConfig;
pub use generator::{generate, TrialGenerator};
pub use summary::summarize;
pub use hypothesis::{test, test_fair_coin, HypothesisTest};
pub use report::{build, Report};
pub use simulation::{simulate, simulate_seeded, CoinSimulator};

use wasm_bindgen::prelude::*;

fn to_js_error(e: EngineError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

// ─── WASM Interface ──────────────────────────────────────────────────────────

#[wasm_bindgen]
impl CoinSimulator {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Self {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        CoinSimulator::with_seed(seed)
    }

    /// Flip `trial_count` coins and return the serialized report.
    pub fn simulate(&mut self, trial_count: u32, success_probability: f64) -> std::result::Result<JsValue, JsValue> {
        let report = self.run_request(trial_count, success_probability).map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(report).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Trial log of the last simulation, for download.
    pub fn export_csv(&self) -> std::result::Result<String, JsValue> {
        self.last_csv().map_err(to_js_error)
    }

    pub fn csv_file_name(&self) -> String {
        report::CSV_FILE_NAME.to_string()
    }

    /// Label for the configured coin shown before flipping.
    pub fn describe_coin(&self, success_probability: f64) -> String {
        CoinBias(success_probability).describe()
    }

    pub fn clear_results(&mut self) {
        self.clear();
    }

    /// Reset the RNG stream to `seed` and drop the last report.
    pub fn reset(&mut self, seed: u64) {
        self.reseed(seed);
    }
}
