//! Error taxonomy for translator, indicator, and simulator failures local to a
//! single day's computation. Run-level fatal errors live in `backtest-runner`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("day has {0} bars, fewer than the minimum of {1}")]
    TooFewBars(usize, usize),

    #[error("bar {index} violates OHLC invariant: low={low} open={open} high={high} close={close}")]
    InvalidBar {
        index: usize,
        low: f64,
        open: f64,
        high: f64,
        close: f64,
    },

    #[error("invalid backtest config: {0}")]
    InvalidConfig(String),
}
