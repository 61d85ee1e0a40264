//! Run-level error taxonomy. Per-day failures are caught at the driver
//! boundary and recorded as skips (see `driver`); only conditions that make
//! the whole run meaningless surface here.

use thiserror::Error;

use backtest_core::CoreError;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("backtest config is invalid: {0}")]
    Config(#[from] CoreError),

    #[error("monte carlo config is invalid: {0}")]
    InvalidMonteCarloConfig(String),

    #[error("no intraday input: at least one (ticker, date) group is required")]
    EmptyInput,

    #[error("monte carlo requires a non-empty trade pnl list")]
    EmptyPnlList,
}
