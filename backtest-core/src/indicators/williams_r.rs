//! Williams %R — `-100 * (highest_high - close) / (highest_high - lowest_low)`
//! over a rolling window.

use crate::domain::Bar;

pub fn williams_r(bars: &[Bar], period: usize) -> Vec<f64> {
    let n = bars.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 || n < period {
        return result;
    }

    for i in (period - 1)..n {
        let window = &bars[(i + 1 - period)..=i];
        let hh = window.iter().fold(f64::NEG_INFINITY, |m, b| m.max(b.high));
        let ll = window.iter().fold(f64::INFINITY, |m, b| m.min(b.low));
        let range = hh - ll;
        result[i] = if range == 0.0 {
            0.0
        } else {
            -100.0 * (hh - bars[i].close) / range
        };
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    fn make_bars(data: &[(f64, f64, f64, f64)]) -> Vec<Bar> {
        data.iter()
            .enumerate()
            .map(|(i, &(open, high, low, close))| Bar {
                open,
                high,
                low,
                close,
                volume: 1000,
                timestamp: 1_700_000_000 + i as i64 * 60,
            })
            .collect()
    }

    #[test]
    fn williams_r_bounds() {
        let bars = make_bars(&[
            (100.0, 105.0, 95.0, 102.0),
            (102.0, 108.0, 100.0, 106.0),
            (106.0, 107.0, 98.0, 99.0),
        ]);
        let result = williams_r(&bars, 3);
        assert!(result[2] >= -100.0 && result[2] <= 0.0);
    }

    #[test]
    fn williams_r_at_high_is_zero() {
        let bars = make_bars(&[
            (100.0, 105.0, 95.0, 100.0),
            (100.0, 108.0, 95.0, 108.0),
        ]);
        let result = williams_r(&bars, 2);
        assert_approx(result[1], 0.0, DEFAULT_EPSILON);
    }
}
