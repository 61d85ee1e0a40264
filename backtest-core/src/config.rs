//! Run-level configuration consumed by the portfolio simulator.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// `{init_cash, fees, slippage}` — the three parameters a backtest run needs
/// beyond the strategy and bar data. `fees`/`slippage` are fractions of price
/// per fill (e.g. `0.001` = 10 bps).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    #[serde(default = "default_init_cash")]
    pub init_cash: f64,
    #[serde(default)]
    pub fees: f64,
    #[serde(default)]
    pub slippage: f64,
}

fn default_init_cash() -> f64 {
    10_000.0
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            init_cash: default_init_cash(),
            fees: 0.0,
            slippage: 0.0,
        }
    }
}

impl BacktestConfig {
    /// `fees` and `slippage` must be fractions in `[0,1)`; `init_cash` must be positive.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(self.init_cash > 0.0) {
            return Err(CoreError::InvalidConfig("init_cash must be positive".into()));
        }
        if !(0.0..1.0).contains(&self.fees) {
            return Err(CoreError::InvalidConfig("fees must be in [0,1)".into()));
        }
        if !(0.0..1.0).contains(&self.slippage) {
            return Err(CoreError::InvalidConfig("slippage must be in [0,1)".into()));
        }
        Ok(())
    }
}
