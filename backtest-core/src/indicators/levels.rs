//! Session-level scalars, running counters, return-percentage series, and the
//! two bar-position helpers (`Time of Day`, `Max N Bars`).

use chrono::{TimeZone, Utc};

use crate::domain::{Bar, DailyStats};

/// Scalar broadcast of a `DailyStats` field across every bar in the day.
pub fn broadcast(value: f64, n: usize) -> Vec<f64> {
    vec![value; n]
}

pub fn high_of_day(bars: &[Bar]) -> Vec<f64> {
    running_extreme(bars, f64::NEG_INFINITY, |acc, b| acc.max(b.high))
}

pub fn low_of_day(bars: &[Bar]) -> Vec<f64> {
    running_extreme(bars, f64::INFINITY, |acc, b| acc.min(b.low))
}

fn running_extreme(bars: &[Bar], seed: f64, step: impl Fn(f64, &Bar) -> f64) -> Vec<f64> {
    let mut acc = seed;
    bars.iter()
        .map(|b| {
            acc = step(acc, b);
            acc
        })
        .collect()
}

pub fn accumulated_volume(bars: &[Bar]) -> Vec<f64> {
    let mut acc = 0.0;
    bars.iter()
        .map(|b| {
            acc += b.volume as f64;
            acc
        })
        .collect()
}

/// Length of the current run (ending at this bar) where `close < open`; 0 when broken.
pub fn consecutive_red_candles(bars: &[Bar]) -> Vec<f64> {
    let mut run = 0;
    bars.iter()
        .map(|b| {
            run = if b.close < b.open { run + 1 } else { 0 };
            run as f64
        })
        .collect()
}

/// Run length of strict `high[i] > high[i-1]`; first bar is 0.
pub fn consecutive_higher_highs(bars: &[Bar]) -> Vec<f64> {
    consecutive_strict(bars, |prev, cur| cur.high > prev.high)
}

/// Run length of strict `low[i] < low[i-1]`; first bar is 0.
pub fn consecutive_lower_lows(bars: &[Bar]) -> Vec<f64> {
    consecutive_strict(bars, |prev, cur| cur.low < prev.low)
}

fn consecutive_strict(bars: &[Bar], holds: impl Fn(&Bar, &Bar) -> bool) -> Vec<f64> {
    let n = bars.len();
    let mut result = vec![0.0; n];
    let mut run = 0;
    for i in 1..n {
        run = if holds(&bars[i - 1], &bars[i]) { run + 1 } else { 0 };
        result[i] = run as f64;
    }
    result
}

/// `(pm_high - previous_close) / previous_close * 100`, broadcast.
pub fn ret_pct_pm(bars: &[Bar], stats: &DailyStats) -> Vec<f64> {
    let pm_high = stats.pm_high_or_nan();
    let prev_close = stats.previous_close_or_nan();
    let value = if prev_close == 0.0 || prev_close.is_nan() || pm_high.is_nan() {
        f64::NAN
    } else {
        (pm_high - prev_close) / prev_close * 100.0
    };
    broadcast(value, bars.len())
}

/// `(close - first_open) / first_open * 100`.
pub fn ret_pct_from_first_open(bars: &[Bar]) -> Vec<f64> {
    if bars.is_empty() {
        return Vec::new();
    }
    let first_open = bars[0].open;
    bars.iter()
        .map(|b| {
            if first_open == 0.0 || first_open.is_nan() {
                f64::NAN
            } else {
                (b.close - first_open) / first_open * 100.0
            }
        })
        .collect()
}

/// `hour*60 + minute` of the bar's epoch-second timestamp, UTC.
pub fn time_of_day(bars: &[Bar]) -> Vec<f64> {
    bars.iter()
        .map(|b| {
            let dt = Utc.timestamp_opt(b.timestamp, 0).single();
            match dt {
                Some(dt) => {
                    use chrono::Timelike;
                    (dt.hour() * 60 + dt.minute()) as f64
                }
                None => f64::NAN,
            }
        })
        .collect()
}

/// Bar index as a float, `0..N-1`.
pub fn max_n_bars(bars: &[Bar]) -> Vec<f64> {
    (0..bars.len()).map(|i| i as f64).collect()
}
