//! Run-level configuration beyond what `backtest_core::BacktestConfig` covers.

use serde::{Deserialize, Serialize};

use crate::error::RunError;

/// Parameters for the trade-PnL-shuffle bootstrap (§4.7). `seed` makes a call
/// reproducible: the same seed on the same pnl vector always derives the same
/// sub-seeds and therefore the same percentile curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    pub simulations: u32,
    pub seed: u64,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            simulations: 1000,
            seed: 0,
        }
    }
}

impl MonteCarloConfig {
    /// `simulations` must be in `[100, 10_000]`.
    pub fn validate(&self) -> Result<(), RunError> {
        if !(100..=10_000).contains(&self.simulations) {
            return Err(RunError::InvalidMonteCarloConfig(format!(
                "simulations must be in [100, 10000], got {}",
                self.simulations
            )));
        }
        Ok(())
    }
}

/// Whether the driver fans out across days with a `rayon` pool. Additive:
/// the sequential path never touches `rayon` when this is `Sequential`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ParallelMode {
    #[default]
    Sequential,
    Parallel,
}
