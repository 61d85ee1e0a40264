//! Cross-Day Aggregator (C5, §4.5): folds per-day stats and the flattened
//! trade list into a single run-level summary.

use serde::{Deserialize, Serialize};

use backtest_core::Trade;

use crate::result::safe_float;
use crate::stats::DayStats;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub total_days: usize,
    pub total_trades: usize,
    pub win_rate_pct: Option<f64>,
    pub avg_return_per_day_pct: Option<f64>,
    pub total_return_pct: Option<f64>,
    pub avg_sharpe: Option<f64>,
    pub avg_max_dd_pct: Option<f64>,
    pub avg_profit_factor: Option<f64>,
    pub avg_pnl: Option<f64>,
    pub total_pnl: Option<f64>,
}

/// `days` and `trades` are independent: `days` drives the per-day averages,
/// `trades` (the flattened trade list across every day) drives the
/// trade-level aggregates.
pub fn compute(days: &[DayStats], trades: &[Trade]) -> AggregateMetrics {
    AggregateMetrics {
        total_days: days.len(),
        total_trades: trades.len(),
        win_rate_pct: safe_float(win_rate_pct(trades)),
        avg_return_per_day_pct: safe_float(mean(days.iter().map(|d| d.total_return_pct))),
        total_return_pct: safe_float(geometric_total_return_pct(days)),
        avg_sharpe: safe_float(mean(days.iter().map(|d| d.sharpe_ratio))),
        avg_max_dd_pct: safe_float(mean(days.iter().map(|d| d.max_drawdown_pct))),
        avg_profit_factor: safe_float(avg_positive_profit_factor(days)),
        avg_pnl: safe_float(mean(trades.iter().map(|t| t.pnl))),
        total_pnl: safe_float(trades.iter().map(|t| t.pnl).sum()),
    }
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let len = values.len();
    if len == 0 {
        return 0.0;
    }
    values.sum::<f64>() / len as f64
}

fn win_rate_pct(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    trades.iter().filter(|t| t.pnl > 0.0).count() as f64 / trades.len() as f64 * 100.0
}

/// `(Π(1 + r_i/100) - 1) * 100` over each day's `total_return_pct`.
fn geometric_total_return_pct(days: &[DayStats]) -> f64 {
    if days.is_empty() {
        return 0.0;
    }
    let product = days
        .iter()
        .fold(1.0_f64, |acc, d| acc * (1.0 + d.total_return_pct / 100.0));
    (product - 1.0) * 100.0
}

/// Mean over days with `profit_factor > 0` — days with no trades report
/// `profit_factor == 0.0` (§4.4) and are excluded so they don't drag the
/// average toward zero for reasons unrelated to performance.
fn avg_positive_profit_factor(days: &[DayStats]) -> f64 {
    let positive: Vec<f64> = days.iter().map(|d| d.profit_factor).filter(|&pf| pf > 0.0).collect();
    if positive.is_empty() {
        return 0.0;
    }
    positive.iter().sum::<f64>() / positive.len() as f64
}
