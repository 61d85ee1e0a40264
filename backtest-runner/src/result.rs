//! The externally-serialized result document (§6) and the enrichment that
//! turns a bare `backtest_core::Trade` into the `EnrichedTrade` callers see.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

use backtest_core::domain::{ExitReason, HardStopType, RiskConfig, TradeDirection};
use backtest_core::{BacktestConfig, Trade};

use crate::aggregate::AggregateMetrics;
use crate::montecarlo::MonteCarloResult;
use crate::stats::DayStats;

/// `{time, value}` — used for equity curves, drawdown series, and the
/// synthetic global/Monte Carlo axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeValue {
    pub time: i64,
    pub value: f64,
}

/// One OHLCV point in a `candles` series, carrying the bar's real epoch time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandlePoint {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandleSeries {
    pub ticker: String,
    pub date: String,
    pub candles: Vec<CandlePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityCurve {
    pub ticker: String,
    pub date: String,
    pub equity: Vec<TimeValue>,
}

/// Per-day statistics row, §4.4, enriched with the group key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayResult {
    pub ticker: String,
    pub date: String,
    pub total_return_pct: Option<f64>,
    pub max_drawdown_pct: Option<f64>,
    pub win_rate_pct: Option<f64>,
    pub total_trades: usize,
    pub profit_factor: Option<f64>,
    pub sharpe_ratio: Option<f64>,
    pub sortino_ratio: Option<f64>,
    pub expectancy: Option<f64>,
    pub best_trade_pct: Option<f64>,
    pub worst_trade_pct: Option<f64>,
    pub init_value: f64,
    pub end_value: f64,
}

impl DayResult {
    pub fn from_day_stats(ticker: &str, date: &str, stats: &DayStats) -> Self {
        Self {
            ticker: ticker.to_string(),
            date: date.to_string(),
            total_return_pct: safe_float(stats.total_return_pct),
            max_drawdown_pct: safe_float(stats.max_drawdown_pct),
            win_rate_pct: safe_float(stats.win_rate_pct),
            total_trades: stats.total_trades,
            profit_factor: safe_float(stats.profit_factor),
            sharpe_ratio: safe_float(stats.sharpe_ratio),
            sortino_ratio: safe_float(stats.sortino_ratio),
            expectancy: safe_float(stats.expectancy),
            best_trade_pct: safe_float(stats.best_trade_pct),
            worst_trade_pct: safe_float(stats.worst_trade_pct),
            init_value: stats.init_value,
            end_value: stats.end_value,
        }
    }
}

/// A simulator `Trade` enriched with group identity, real timestamps, and the
/// derived fields (§6) that only make sense once the trade is attached to a
/// `(ticker, date)` and the strategy's risk configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedTrade {
    pub ticker: String,
    pub date: String,
    pub entry_time: i64,
    pub exit_time: i64,
    pub entry_idx: usize,
    pub exit_idx: usize,
    pub entry_price: f64,
    pub exit_price: f64,
    pub pnl: f64,
    pub return_pct: f64,
    pub direction: TradeDirection,
    pub status: &'static str,
    pub size: f64,
    pub exit_reason: ExitReason,
    pub r_multiple: Option<f64>,
    pub entry_hour: u32,
    pub entry_weekday: u32,
}

impl EnrichedTrade {
    /// `bar_timestamps[i]` must be the real epoch-seconds timestamp of bar `i`
    /// for this day, so `entry_time`/`exit_time` can be recovered from the
    /// trade's bar indices.
    pub fn from_trade(
        trade: &Trade,
        ticker: &str,
        date: &str,
        bar_timestamps: &[i64],
        risk: &RiskConfig,
    ) -> Self {
        let entry_time = bar_timestamps[trade.entry_idx];
        let exit_time = bar_timestamps[trade.exit_idx];
        let entry_dt: DateTime<Utc> = DateTime::from_timestamp(entry_time, 0).unwrap_or_else(|| DateTime::from_timestamp(0, 0).unwrap());

        Self {
            ticker: ticker.to_string(),
            date: date.to_string(),
            entry_time,
            exit_time,
            entry_idx: trade.entry_idx,
            exit_idx: trade.exit_idx,
            entry_price: trade.entry_price,
            exit_price: trade.exit_price,
            pnl: trade.pnl,
            return_pct: trade.return_pct,
            direction: trade.direction,
            status: "Closed",
            size: trade.size,
            exit_reason: trade.exit_reason,
            r_multiple: r_multiple(trade, risk),
            entry_hour: entry_dt.hour(),
            entry_weekday: entry_dt.weekday().num_days_from_monday(),
        }
    }
}

/// `r_multiple = round(pnl_per_share / (entry_price * sl_pct/100), 2)`, only
/// when the risk config's hard stop is a Percentage type (§6). `None` for
/// every other hard-stop type, including when no hard stop is configured.
fn r_multiple(trade: &Trade, risk: &RiskConfig) -> Option<f64> {
    let hard_stop = risk.hard_stop.as_ref()?;
    if hard_stop.kind != HardStopType::Percentage {
        return None;
    }
    if trade.size == 0.0 || trade.entry_price <= 0.0 {
        return None;
    }
    let pnl_per_share = match trade.direction {
        TradeDirection::Long => trade.exit_price - trade.entry_price,
        TradeDirection::Short => trade.entry_price - trade.exit_price,
    };
    let risk_per_share = trade.entry_price * (hard_stop.value / 100.0);
    if risk_per_share.abs() < 1e-12 {
        return None;
    }
    Some(round_to(pnl_per_share / risk_per_share, 2))
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Replaces NaN/Inf with `None` so the serialized document never contains a
/// non-finite JSON number (§4.4, §7).
pub fn safe_float(value: f64) -> Option<f64> {
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub schema_version: u32,
    pub config: BacktestConfig,
    pub day_count: usize,
    pub elapsed_ms: u64,
}

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultDocument {
    pub aggregate_metrics: AggregateMetrics,
    pub day_results: Vec<DayResult>,
    pub candles: Vec<CandleSeries>,
    pub trades: Vec<EnrichedTrade>,
    pub equity_curves: Vec<EquityCurve>,
    pub global_equity: Vec<TimeValue>,
    pub global_drawdown: Vec<TimeValue>,
    pub montecarlo: Option<MonteCarloResult>,
    pub run_metadata: RunMetadata,
}
