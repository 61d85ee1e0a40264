//! VWAP / AVWAP — identical per-day semantics: cumulative
//! `sum(((h+l+c)/3)*v) / sum(v)`, NaN where cumulative volume is zero.

use crate::domain::Bar;

pub fn vwap(bars: &[Bar]) -> Vec<f64> {
    let mut result = Vec::with_capacity(bars.len());
    let mut cum_pv = 0.0;
    let mut cum_v = 0.0;
    for bar in bars {
        let typical = (bar.high + bar.low + bar.close) / 3.0;
        cum_pv += typical * bar.volume as f64;
        cum_v += bar.volume as f64;
        result.push(if cum_v == 0.0 { f64::NAN } else { cum_pv / cum_v });
    }
    result
}
