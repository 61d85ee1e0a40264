//! The indicator engine: a name-dispatched `compute` function over a fixed
//! catalog, backed by a per-day `IndicatorCache`, plus the candle-pattern
//! detector. Mirrors the single dispatch-function shape of the system this
//! catalog was distilled from rather than a per-indicator trait-object
//! hierarchy — there is no polymorphism to buy here, just a name to match on.

pub mod adx;
pub mod atr;
pub mod ema;
pub mod levels;
pub mod macd;
pub mod patterns;
pub mod rsi;
pub mod sma;
pub mod vwap;
pub mod williams_r;
pub mod wma;

use std::collections::HashMap;

use crate::domain::{Bar, DailyStats};

/// Cache key: `(indicator name, period, offset)`. Lives for one day; shared
/// across entry/exit condition blocks only when both run on 1-minute bars.
pub type CacheKey = (String, Option<i32>, i32);

#[derive(Debug, Default)]
pub struct IndicatorCache {
    series: HashMap<CacheKey, Vec<f64>>,
}

impl IndicatorCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(
        &mut self,
        name: &str,
        bars: &[Bar],
        daily_stats: &DailyStats,
        period: Option<i32>,
        offset: i32,
    ) -> Vec<f64> {
        let key = (name.to_string(), period, offset);
        if let Some(cached) = self.series.get(&key) {
            return cached.clone();
        }
        let series = compute(name, bars, daily_stats, period, offset);
        self.series.insert(key, series.clone());
        series
    }
}

/// Compute a named indicator series, aligned to `bars`. Unknown names yield an
/// all-NaN series (permissive default — see the error-handling design notes).
pub fn compute(
    name: &str,
    bars: &[Bar],
    daily_stats: &DailyStats,
    period: Option<i32>,
    offset: i32,
) -> Vec<f64> {
    let n = bars.len();
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    let raw = match name {
        "Close" => closes,
        "Open" => bars.iter().map(|b| b.open).collect(),
        "High" => bars.iter().map(|b| b.high).collect(),
        "Low" => bars.iter().map(|b| b.low).collect(),
        "Volume" => bars.iter().map(|b| b.volume as f64).collect(),
        "SMA" => sma::sma(&closes, period_or(period, 20)),
        "EMA" => ema::ema(&closes, period_or(period, 20)),
        "RSI" => rsi::rsi(&closes, period_or(period, 14)),
        "MACD" => macd::macd(&closes),
        "ATR" => atr::atr(bars, period_or(period, 14)),
        "WMA" => wma::wma(&closes, period_or(period, 14)),
        "ADX" => adx::adx(bars, period_or(period, 14)),
        "Williams %R" => williams_r::williams_r(bars, period_or(period, 14)),
        "VWAP" | "AVWAP" => vwap::vwap(bars),
        "Pre-Market High" => levels::broadcast(daily_stats.pm_high_or_nan(), n),
        "Pre-Market Low" => levels::broadcast(daily_stats.pm_low_or_nan(), n),
        "Yesterday High" => levels::broadcast(daily_stats.yesterday_high_or_nan(), n),
        "Yesterday Low" => levels::broadcast(daily_stats.yesterday_low_or_nan(), n),
        "Yesterday Close" => levels::broadcast(daily_stats.previous_close_or_nan(), n),
        "High of Day" => levels::high_of_day(bars),
        "Low of Day" => levels::low_of_day(bars),
        "Accumulated Volume" => levels::accumulated_volume(bars),
        "Consecutive Red Candles" => levels::consecutive_red_candles(bars),
        "Consecutive Higher Highs" => levels::consecutive_higher_highs(bars),
        "Consecutive Lower Lows" => levels::consecutive_lower_lows(bars),
        "Ret % PM" => levels::ret_pct_pm(bars, daily_stats),
        "Ret % RTH" | "Ret % AM" => levels::ret_pct_from_first_open(bars),
        "Time of Day" => levels::time_of_day(bars),
        "Max N Bars" => levels::max_n_bars(bars),
        _ => vec![f64::NAN; n],
    };

    apply_offset(&raw, offset)
}

fn period_or(period: Option<i32>, default: i32) -> usize {
    period.filter(|&p| p > 0).unwrap_or(default) as usize
}

/// `offset != 0` shifts the series by that many bars: positive lags (shift
/// right, fill NaN at the front), negative leads (shift left, fill NaN at the
/// back).
fn apply_offset(series: &[f64], offset: i32) -> Vec<f64> {
    if offset == 0 {
        return series.to_vec();
    }
    let n = series.len();
    let mut result = vec![f64::NAN; n];
    if offset > 0 {
        let shift = offset as usize;
        for i in shift..n {
            result[i] = series[i - shift];
        }
    } else {
        let shift = (-offset) as usize;
        for i in 0..n.saturating_sub(shift) {
            result[i] = series[i + shift];
        }
    }
    result
}

/// Construct synthetic bars from close prices for indicator tests: open =
/// prev close, high/low padded by 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let high = open.max(close) + 1.0;
            let low = open.min(close) - 1.0;
            Bar {
                open,
                high,
                low,
                close,
                volume: 1000,
                timestamp: 1_700_000_000 + i as i64 * 60,
            }
        })
        .collect()
}

#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_indicator_name_is_all_nan() {
        let bars = make_bars(&[1.0, 2.0, 3.0]);
        let stats = DailyStats::default();
        let result = compute("Not A Real Indicator", &bars, &stats, None, 0);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn cache_returns_identical_series_on_repeat_lookup() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let stats = DailyStats::default();
        let mut cache = IndicatorCache::new();
        let first = cache.get_or_compute("SMA", &bars, &stats, Some(3), 0);
        let second = cache.get_or_compute("SMA", &bars, &stats, Some(3), 0);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            if a.is_nan() {
                assert!(b.is_nan());
            } else {
                assert_approx(*a, *b, DEFAULT_EPSILON);
            }
        }
    }

    #[test]
    fn offset_lags_series_and_fills_nan_front() {
        let values = [1.0, 2.0, 3.0, 4.0];
        let shifted = apply_offset(&values, 2);
        assert!(shifted[0].is_nan());
        assert!(shifted[1].is_nan());
        assert_eq!(shifted[2], 1.0);
        assert_eq!(shifted[3], 2.0);
    }

    #[test]
    fn close_passthrough_matches_bar_closes() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        let stats = DailyStats::default();
        let result = compute("Close", &bars, &stats, None, 0);
        assert_eq!(result, vec![10.0, 20.0, 30.0]);
    }
}
