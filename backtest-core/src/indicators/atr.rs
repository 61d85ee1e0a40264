//! Average True Range.
//!
//! True range seeded at bar 0 as `high-low` (no previous close exists yet);
//! subsequent `TR = max(h-l, |h-prev_close|, |l-prev_close|)`. Unlike the
//! Wilder-smoothed ATR convention used elsewhere in this catalog (ADX's
//! internal TR/DM smoothing), this ATR is smoothed with the standard EMA
//! (alpha = 2/(period+1), SMA-seeded) — a deliberate deviation kept for
//! parity with the system this was distilled from; see DESIGN.md.

use crate::domain::Bar;
use crate::indicators::ema::ema;

/// `TR[0] = high[0] - low[0]`; `TR[i] = max(h-l, |h-prev_close|, |l-prev_close|)`.
pub fn true_range(bars: &[Bar]) -> Vec<f64> {
    let n = bars.len();
    let mut tr = vec![f64::NAN; n];
    if n == 0 {
        return tr;
    }

    tr[0] = bars[0].high - bars[0].low;

    for i in 1..n {
        let h = bars[i].high;
        let l = bars[i].low;
        let pc = bars[i - 1].close;
        tr[i] = (h - l).max((h - pc).abs()).max((l - pc).abs());
    }
    tr
}

/// Wilder smoothing (alpha = 1/period), used by ADX's internal TR/+DM/-DM series.
pub fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 || n < period {
        return result;
    }

    let seed_start = (0..n).find(|&i| {
        i + period <= n && values[i..i + period].iter().all(|v| !v.is_nan())
    });
    let seed_start = match seed_start {
        Some(s) => s,
        None => return result,
    };
    let seed_end = seed_start + period;
    let seed = values[seed_start..seed_end].iter().sum::<f64>() / period as f64;
    result[seed_end - 1] = seed;

    let alpha = 1.0 / period as f64;
    let mut prev = seed;
    for i in seed_end..n {
        if values[i].is_nan() {
            return result;
        }
        let smoothed = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = smoothed;
        prev = smoothed;
    }
    result
}

/// ATR(period): true range smoothed with the standard EMA.
pub fn atr(bars: &[Bar], period: usize) -> Vec<f64> {
    let tr = true_range(bars);
    ema(&tr, period)
}
