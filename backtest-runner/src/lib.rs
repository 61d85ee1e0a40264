//! # backtest-runner
//!
//! The stateful half of the workspace: orchestration, statistics,
//! randomness, optional parallelism, and the externally-serialized result
//! document. `backtest_core` does the deterministic per-day work; this crate
//! drives it across a dataset of `(ticker, date)` groups and assembles what
//! callers actually see.
//!
//! ## Components
//!
//! - `stats`: per-day metrics from an equity curve and trade list (C4)
//! - `aggregate`: cross-day summary over all days and trades (C5)
//! - `global_equity`: stitches per-day equity curves onto one synthetic axis (C6)
//! - `montecarlo`: trade-PnL-shuffle bootstrap (C7)
//! - `driver`: per-day orchestration loop, optionally parallel across days (C8)
//! - `result`: the result document's external shape
//! - `config`: run-level config beyond `backtest_core::BacktestConfig`
//! - `error`: `RunError`, wrapping `backtest_core::CoreError`

pub mod aggregate;
pub mod config;
pub mod driver;
pub mod error;
pub mod global_equity;
pub mod montecarlo;
pub mod result;
pub mod stats;

pub use config::{MonteCarloConfig, ParallelMode};
pub use driver::{run, DayInput};
pub use error::RunError;
pub use result::ResultDocument;

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<DayInput>();
        require_sync::<DayInput>();
        require_send::<ResultDocument>();
        require_sync::<ResultDocument>();
        require_send::<RunError>();
        require_send::<MonteCarloConfig>();
        require_sync::<MonteCarloConfig>();
    }
}
