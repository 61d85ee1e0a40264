//! backtest-core — indicator engine, strategy translator, and portfolio simulator
//! for intraday discretionary backtests.
//!
//! This crate is the deterministic half of the workspace: pure functions over
//! typed OHLCV arrays, no I/O, no RNG, no concurrency. Everything here must be
//! safe to call from a parallel day-level driver without synchronization.

pub mod config;
pub mod domain;
pub mod error;
pub mod indicators;
pub mod simulator;
pub mod strategy;

pub use config::BacktestConfig;
pub use domain::{validate_day, Bar, DailyStats, Signals, Trade};
pub use error::CoreError;
pub use simulator::{simulate, SimulationResult};
pub use strategy::translate_strategy;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: all externally-visible core types are Send + Sync.
    ///
    /// The runner drives days in parallel behind an optional rayon pool; if any
    /// of these types stop being thread-safe this breaks the build immediately
    /// instead of surfacing as a hard-to-reproduce runtime bug.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::DailyStats>();
        require_sync::<domain::DailyStats>();
        require_send::<domain::StrategyDefinition>();
        require_sync::<domain::StrategyDefinition>();
        require_send::<domain::ConditionGroup>();
        require_sync::<domain::ConditionGroup>();
        require_send::<domain::Signals>();
        require_sync::<domain::Signals>();
        require_send::<domain::Trade>();
        require_sync::<domain::Trade>();
        require_send::<error::CoreError>();
        require_sync::<error::CoreError>();
        require_send::<config::BacktestConfig>();
        require_sync::<config::BacktestConfig>();
        require_send::<simulator::SimulationResult>();
        require_sync::<simulator::SimulationResult>();
    }
}
