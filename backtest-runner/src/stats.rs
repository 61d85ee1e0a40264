//! Per-Day Stats Extractor (C4, §4.4): turns one day's `{equity, trades}`
//! into a day metrics record. Pure; no I/O, no RNG — kept separate from
//! `backtest_core` only because it isn't needed to run a simulation, just to
//! summarize one.

use backtest_core::Trade;

/// Minutes per US trading day (390) times trading days per year (252) — the
/// annualization factor for per-bar Sharpe/Sortino.
fn annualization_factor() -> f64 {
    (252.0 * 390.0_f64).sqrt()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayStats {
    pub total_return_pct: f64,
    pub max_drawdown_pct: f64,
    pub win_rate_pct: f64,
    pub total_trades: usize,
    pub profit_factor: f64,
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    pub expectancy: f64,
    pub best_trade_pct: f64,
    pub worst_trade_pct: f64,
    pub init_value: f64,
    pub end_value: f64,
}

/// Compute one day's stats from its equity curve and the trades closed
/// during it. `equity` must be non-empty — the driver never calls this for a
/// day that was skipped before simulation.
pub fn compute(equity: &[f64], trades: &[Trade]) -> DayStats {
    let init_value = equity[0];
    let end_value = *equity.last().unwrap();

    DayStats {
        total_return_pct: total_return_pct(equity),
        max_drawdown_pct: max_drawdown_pct(equity),
        win_rate_pct: win_rate_pct(trades),
        total_trades: trades.len(),
        profit_factor: profit_factor(trades),
        sharpe_ratio: sharpe_ratio(equity),
        sortino_ratio: sortino_ratio(equity),
        expectancy: expectancy(trades),
        best_trade_pct: best_trade_pct(trades),
        worst_trade_pct: worst_trade_pct(trades),
        init_value,
        end_value,
    }
}

fn total_return_pct(equity: &[f64]) -> f64 {
    let first = equity[0];
    if first <= 0.0 {
        return 0.0;
    }
    (equity.last().unwrap() / first - 1.0) * 100.0
}

fn max_drawdown_pct(equity: &[f64]) -> f64 {
    let mut running_max = equity[0];
    let mut worst = 0.0_f64;
    for &value in equity {
        if value > running_max {
            running_max = value;
        }
        if running_max > 0.0 {
            let dd = (value / running_max - 1.0) * 100.0;
            if dd < worst {
                worst = dd;
            }
        }
    }
    worst
}

fn win_rate_pct(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let winners = trades.iter().filter(|t| t.pnl > 0.0).count();
    winners as f64 / trades.len() as f64 * 100.0
}

/// `Σ wins / |Σ losses|`; losses include `pnl == 0` per §4.4.
fn profit_factor(trades: &[Trade]) -> f64 {
    let wins: f64 = trades.iter().filter(|t| t.pnl > 0.0).map(|t| t.pnl).sum();
    let losses: f64 = trades.iter().filter(|t| t.pnl <= 0.0).map(|t| t.pnl.abs()).sum();
    if losses == 0.0 {
        return 0.0;
    }
    wins / losses
}

fn expectancy(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    trades.iter().map(|t| t.pnl).sum::<f64>() / trades.len() as f64
}

fn best_trade_pct(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    trades.iter().map(|t| t.return_pct).fold(f64::MIN, f64::max)
}

fn worst_trade_pct(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    trades.iter().map(|t| t.return_pct).fold(f64::MAX, f64::min)
}

/// Per-bar returns `r[i] = (equity[i+1]-equity[i])/equity[i]`, `0` where
/// `equity[i] == 0`.
fn bar_returns(equity: &[f64]) -> Vec<f64> {
    equity
        .windows(2)
        .map(|w| if w[0] == 0.0 { 0.0 } else { (w[1] - w[0]) / w[0] })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std(values: &[f64], mean_value: f64) -> f64 {
    let variance = values.iter().map(|v| (v - mean_value).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

fn sharpe_ratio(equity: &[f64]) -> f64 {
    let returns = bar_returns(equity);
    if returns.len() < 2 {
        return 0.0;
    }
    let m = mean(&returns);
    let std = population_std(&returns, m);
    if std == 0.0 {
        return 0.0;
    }
    m / std * annualization_factor()
}

fn sortino_ratio(equity: &[f64]) -> f64 {
    let returns = bar_returns(equity);
    if returns.len() < 2 {
        return 0.0;
    }
    let m = mean(&returns);
    let downside: Vec<f64> = returns.iter().copied().filter(|&r| r < 0.0).collect();
    if downside.is_empty() {
        return 0.0;
    }
    let downside_std = population_std(&downside, 0.0);
    if downside_std == 0.0 {
        return 0.0;
    }
    m / downside_std * annualization_factor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use backtest_core::domain::{ExitReason, TradeDirection};

    fn trade(pnl: f64, return_pct: f64) -> Trade {
        Trade {
            entry_idx: 1,
            exit_idx: 2,
            entry_price: 100.0,
            exit_price: 100.0 + pnl,
            pnl,
            return_pct,
            direction: TradeDirection::Long,
            size: 1.0,
            exit_reason: ExitReason::Signal,
        }
    }

    #[test]
    fn flat_equity_has_zero_return_and_drawdown() {
        let equity = vec![10_000.0; 10];
        let stats = compute(&equity, &[]);
        assert_eq!(stats.total_return_pct, 0.0);
        assert_eq!(stats.max_drawdown_pct, 0.0);
        assert_eq!(stats.sharpe_ratio, 0.0);
    }

    #[test]
    fn drawdown_is_negative_after_a_pullback() {
        let equity = vec![10_000.0, 10_500.0, 9_800.0, 10_200.0];
        let stats = compute(&equity, &[]);
        assert!(stats.max_drawdown_pct < 0.0);
    }

    #[test]
    fn win_rate_counts_strictly_positive_pnl() {
        let trades = vec![trade(100.0, 1.0), trade(-50.0, -0.5), trade(0.0, 0.0)];
        let stats = compute(&vec![10_000.0, 10_050.0], &trades);
        assert!((stats.win_rate_pct - (1.0 / 3.0 * 100.0)).abs() < 1e-9);
    }

    #[test]
    fn profit_factor_treats_zero_pnl_as_a_loss() {
        let trades = vec![trade(100.0, 1.0), trade(0.0, 0.0)];
        let stats = compute(&vec![10_000.0, 10_100.0], &trades);
        // losses sum is 0 (only the zero-pnl trade counts, abs(0)=0) -> denominator 0 -> 0.0
        assert_eq!(stats.profit_factor, 0.0);
    }

    #[test]
    fn best_and_worst_trade_pct_bracket_the_trade_list() {
        let trades = vec![trade(100.0, 5.0), trade(-50.0, -2.0), trade(10.0, 1.0)];
        let stats = compute(&vec![10_000.0, 10_060.0], &trades);
        assert_eq!(stats.best_trade_pct, 5.0);
        assert_eq!(stats.worst_trade_pct, -2.0);
    }

    #[test]
    fn no_trades_yields_zero_expectancy_and_profit_factor() {
        let stats = compute(&vec![10_000.0, 10_000.0], &[]);
        assert_eq!(stats.expectancy, 0.0);
        assert_eq!(stats.profit_factor, 0.0);
        assert_eq!(stats.win_rate_pct, 0.0);
    }
}
