//! Bar — one OHLCV observation for a single 1-minute interval.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Fewer bars than this and the indicator catalog (warmup periods, session
/// VWAP) can't produce a meaningful signal for the day.
pub const MIN_BARS_PER_DAY: usize = 5;

/// OHLCV bar. A day is an ordered, strictly-ascending-timestamp sequence of these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
    /// Unix epoch seconds.
    pub timestamp: i64,
}

impl Bar {
    /// `low <= open,close <= high` and `low <= high`; volume non-negative.
    pub fn is_sane(&self) -> bool {
        if self.open.is_nan() || self.high.is_nan() || self.low.is_nan() || self.close.is_nan() {
            return false;
        }
        self.low <= self.open
            && self.low <= self.close
            && self.open <= self.high
            && self.close <= self.high
            && self.low <= self.high
            && self.volume >= 0
    }
}

/// Scalar per-(ticker,date) statistics supplied by the collaborator dataset.
/// Missing fields are `None` and propagate as NaN in dependent indicator series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyStats {
    pub pm_high: Option<f64>,
    pub pm_low: Option<f64>,
    pub yesterday_high: Option<f64>,
    pub yesterday_low: Option<f64>,
    pub previous_close: Option<f64>,
}

impl DailyStats {
    pub fn pm_high_or_nan(&self) -> f64 {
        self.pm_high.unwrap_or(f64::NAN)
    }
    pub fn pm_low_or_nan(&self) -> f64 {
        self.pm_low.unwrap_or(f64::NAN)
    }
    pub fn yesterday_high_or_nan(&self) -> f64 {
        self.yesterday_high.unwrap_or(f64::NAN)
    }
    pub fn yesterday_low_or_nan(&self) -> f64 {
        self.yesterday_low.unwrap_or(f64::NAN)
    }
    pub fn previous_close_or_nan(&self) -> f64 {
        self.previous_close.unwrap_or(f64::NAN)
    }
}

/// Checks a day's bars against the minimum-length and per-bar OHLC invariants
/// before it reaches the translator or simulator.
pub fn validate_day(bars: &[Bar]) -> Result<(), CoreError> {
    if bars.len() < MIN_BARS_PER_DAY {
        return Err(CoreError::TooFewBars(bars.len(), MIN_BARS_PER_DAY));
    }
    if let Some((index, bar)) = bars.iter().enumerate().find(|(_, b)| !b.is_sane()) {
        return Err(CoreError::InvalidBar {
            index,
            low: bar.low,
            open: bar.open,
            high: bar.high,
            close: bar.close,
        });
    }
    Ok(())
}
