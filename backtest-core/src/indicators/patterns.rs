//! Candle-pattern detectors: bar-local booleans, with optional forward
//! `lookback` shift and `consecutive_count` run requirement.

use crate::domain::{Bar, CandlePattern};

const DOJI_EPSILON: f64 = 1e-10;

fn green_volume(bars: &[Bar]) -> Vec<bool> {
    bars.iter().map(|b| b.close > b.open).collect()
}

fn red_volume(bars: &[Bar]) -> Vec<bool> {
    bars.iter().map(|b| b.close < b.open).collect()
}

fn green_volume_plus(bars: &[Bar]) -> Vec<bool> {
    let base = green_volume(bars);
    volume_increasing_and(bars, &base)
}

fn red_volume_plus(bars: &[Bar]) -> Vec<bool> {
    let base = red_volume(bars);
    volume_increasing_and(bars, &base)
}

fn volume_increasing_and(bars: &[Bar], base: &[bool]) -> Vec<bool> {
    let n = bars.len();
    let mut result = vec![false; n];
    for i in 1..n {
        result[i] = base[i] && bars[i].volume > bars[i - 1].volume;
    }
    result
}

fn doji(bars: &[Bar]) -> Vec<bool> {
    bars.iter()
        .map(|b| {
            let body = (b.close - b.open).abs();
            let range = b.high - b.low;
            body / (range + DOJI_EPSILON) < 0.1
        })
        .collect()
}

fn hammer(bars: &[Bar]) -> Vec<bool> {
    bars.iter()
        .map(|b| {
            let body = (b.close - b.open).abs();
            let range = b.high - b.low;
            let lower_wick = b.open.min(b.close) - b.low;
            lower_wick >= 2.0 * body && body / range < 0.4
        })
        .collect()
}

fn shooting_star(bars: &[Bar]) -> Vec<bool> {
    bars.iter()
        .map(|b| {
            let body = (b.close - b.open).abs();
            let range = b.high - b.low;
            let upper_wick = b.high - b.open.max(b.close);
            upper_wick >= 2.0 * body && body / range < 0.4
        })
        .collect()
}

/// Detect `pattern` across all bars, then apply the forward `lookback` shift
/// and `consecutive_count` run requirement.
pub fn detect_pattern(
    bars: &[Bar],
    pattern: CandlePattern,
    lookback: i32,
    consecutive_count: i32,
) -> Vec<bool> {
    let raw = match pattern {
        CandlePattern::GreenVolume => green_volume(bars),
        CandlePattern::GreenVolumePlus => green_volume_plus(bars),
        CandlePattern::RedVolume => red_volume(bars),
        CandlePattern::RedVolumePlus => red_volume_plus(bars),
        CandlePattern::Doji => doji(bars),
        CandlePattern::Hammer => hammer(bars),
        CandlePattern::ShootingStar => shooting_star(bars),
    };

    let shifted = shift_forward(&raw, lookback.max(0) as usize);
    require_consecutive(&shifted, consecutive_count.max(1) as usize)
}

/// Shift a boolean series forward by `n` bars, filling the front with false.
fn shift_forward(series: &[bool], n: usize) -> Vec<bool> {
    if n == 0 {
        return series.to_vec();
    }
    let len = series.len();
    let mut result = vec![false; len];
    for i in n..len {
        result[i] = series[i - n];
    }
    result
}

/// True at bar `i` only if `series` is true for `k` consecutive bars ending at `i`.
fn require_consecutive(series: &[bool], k: usize) -> Vec<bool> {
    if k <= 1 {
        return series.to_vec();
    }
    let n = series.len();
    let mut result = vec![false; n];
    let mut run = 0usize;
    for i in 0..n {
        run = if series[i] { run + 1 } else { 0 };
        result[i] = run >= k;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(open: f64, high: f64, low: f64, close: f64, volume: i64) -> Bar {
        Bar {
            open,
            high,
            low,
            close,
            volume,
            timestamp: 1_700_000_000,
        }
    }

    #[test]
    fn green_volume_basic() {
        let bars = vec![bar(100.0, 102.0, 99.0, 101.0, 1000)];
        assert_eq!(
            detect_pattern(&bars, CandlePattern::GreenVolume, 0, 1),
            vec![true]
        );
    }

    #[test]
    fn green_volume_plus_false_at_first_bar() {
        let bars = vec![
            bar(100.0, 102.0, 99.0, 101.0, 1000),
            bar(101.0, 103.0, 100.0, 102.0, 1500),
        ];
        let result = detect_pattern(&bars, CandlePattern::GreenVolumePlus, 0, 1);
        assert_eq!(result, vec![false, true]);
    }

    #[test]
    fn doji_detects_small_body() {
        let bars = vec![bar(100.0, 105.0, 95.0, 100.2, 1000)];
        assert_eq!(detect_pattern(&bars, CandlePattern::Doji, 0, 1), vec![true]);
    }

    #[test]
    fn hammer_detects_long_lower_wick() {
        let bars = vec![bar(100.0, 101.0, 90.0, 100.5, 1000)];
        assert_eq!(
            detect_pattern(&bars, CandlePattern::Hammer, 0, 1),
            vec![true]
        );
    }

    #[test]
    fn lookback_shifts_forward_and_fills_false() {
        let bars = vec![
            bar(100.0, 102.0, 99.0, 101.0, 1000),
            bar(101.0, 103.0, 100.0, 99.0, 1000),
            bar(99.0, 101.0, 98.0, 100.0, 1000),
        ];
        let result = detect_pattern(&bars, CandlePattern::GreenVolume, 1, 1);
        // raw green_volume = [true, false, true]; shifted by 1 = [false, true, false]
        assert_eq!(result, vec![false, true, false]);
    }

    #[test]
    fn consecutive_count_requires_run() {
        let bars = vec![
            bar(100.0, 101.0, 99.0, 101.0, 1000), // green
            bar(101.0, 102.0, 99.0, 102.0, 1000), // green
            bar(102.0, 103.0, 99.0, 101.0, 1000), // red
        ];
        let result = detect_pattern(&bars, CandlePattern::GreenVolume, 0, 2);
        assert_eq!(result, vec![false, true, false]);
    }
}
