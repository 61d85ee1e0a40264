//! Driver Loop (C8, §2, §5): for each `(ticker, date)` group, orchestrates
//! C1→C3 (via `backtest_core::translate_strategy` and `simulate`) and C4,
//! then folds the day into the run's accumulators. C5, C6, and optionally
//! C7 run once after the loop.

use std::time::Instant;

use backtest_core::domain::{Bar, DailyStats, StrategyDefinition};
use backtest_core::{simulate, translate_strategy, validate_day, BacktestConfig, Trade};

use crate::aggregate;
use crate::config::{MonteCarloConfig, ParallelMode};
use crate::error::RunError;
use crate::global_equity;
use crate::montecarlo;
use crate::result::{
    CandlePoint, CandleSeries, DayResult, EnrichedTrade, EquityCurve, ResultDocument, RunMetadata,
    TimeValue, SCHEMA_VERSION,
};
use crate::stats;

/// One `(ticker, date)` group's raw input: bars sorted ascending by timestamp
/// plus the scalar daily stats the indicator catalog needs (§3).
#[derive(Debug, Clone, PartialEq)]
pub struct DayInput {
    pub ticker: String,
    pub date: String,
    pub bars: Vec<Bar>,
    pub stats: DailyStats,
}

const MAX_EQUITY_POINTS_PER_DAY: usize = 100;

struct DayOutput {
    day_result: DayResult,
    day_stats: stats::DayStats,
    candles: CandleSeries,
    trades: Vec<EnrichedTrade>,
    equity_curve: EquityCurve,
    raw_equity: Vec<f64>,
    raw_trades: Vec<Trade>,
}

/// Run a full backtest over `days`, in input group order. `montecarlo` runs
/// once at the end over every trade's pnl, if `Some`.
pub fn run(
    days: &[DayInput],
    strategy: &StrategyDefinition,
    config: &BacktestConfig,
    montecarlo_config: Option<&MonteCarloConfig>,
    parallel: ParallelMode,
) -> Result<ResultDocument, RunError> {
    config.validate()?;
    if days.is_empty() {
        return Err(RunError::EmptyInput);
    }

    let started = Instant::now();
    tracing::info!(day_count = days.len(), init_cash = config.init_cash, "backtest run starting");

    let outputs: Vec<Option<DayOutput>> = match parallel {
        ParallelMode::Sequential => days.iter().map(|day| process_day(day, strategy, config)).collect(),
        ParallelMode::Parallel => {
            use rayon::prelude::*;
            days.par_iter().map(|day| process_day(day, strategy, config)).collect()
        }
    };

    let mut day_results = Vec::new();
    let mut candles = Vec::new();
    let mut trades = Vec::new();
    let mut equity_curves = Vec::new();
    let mut day_equities = Vec::new();
    let mut all_raw_trades: Vec<Trade> = Vec::new();
    let mut day_stats = Vec::new();

    for (day, output) in days.iter().zip(outputs) {
        let Some(output) = output else {
            tracing::debug!(ticker = %day.ticker, date = %day.date, "day skipped");
            continue;
        };
        day_results.push(output.day_result);
        day_stats.push(output.day_stats);
        candles.push(output.candles);
        trades.extend(output.trades);
        equity_curves.push(output.equity_curve);
        day_equities.push(output.raw_equity);
        all_raw_trades.extend(output.raw_trades.iter().copied());
    }

    let aggregate_metrics = aggregate::compute(&day_stats, &all_raw_trades);
    let (global_equity, global_drawdown) = global_equity::chain(&day_equities);

    let montecarlo_result = match montecarlo_config {
        Some(mc_config) if !all_raw_trades.is_empty() => {
            let pnls: Vec<f64> = all_raw_trades.iter().map(|t| t.pnl).collect();
            Some(montecarlo::run(&pnls, config.init_cash, mc_config)?)
        }
        _ => None,
    };

    let elapsed_ms = started.elapsed().as_millis() as u64;

    Ok(ResultDocument {
        aggregate_metrics,
        day_results,
        candles,
        trades,
        equity_curves,
        global_equity,
        global_drawdown,
        montecarlo: montecarlo_result,
        run_metadata: RunMetadata {
            schema_version: SCHEMA_VERSION,
            config: *config,
            day_count: days.len(),
            elapsed_ms,
        },
    })
}

/// Returns `None` when the day is skipped (§7): too few bars, a malformed
/// bar, or a strategy that never fires an entry on this day.
fn process_day(day: &DayInput, strategy: &StrategyDefinition, config: &BacktestConfig) -> Option<DayOutput> {
    if let Err(reason) = validate_day(&day.bars) {
        tracing::debug!(ticker = %day.ticker, date = %day.date, %reason, "skipping day");
        return None;
    }

    let signals = translate_strategy(strategy, &day.bars, &day.stats);
    if !signals.entries.iter().any(|&e| e) {
        return None;
    }

    let simulation = simulate(&day.bars, &signals, config);

    let bar_timestamps: Vec<i64> = day.bars.iter().map(|b| b.timestamp).collect();
    let enriched_trades: Vec<EnrichedTrade> = simulation
        .trades
        .iter()
        .map(|t| EnrichedTrade::from_trade(t, &day.ticker, &day.date, &bar_timestamps, &strategy.risk_management))
        .collect();

    let day_stats = stats::compute(&simulation.equity, &simulation.trades);
    let day_result = DayResult::from_day_stats(&day.ticker, &day.date, &day_stats);

    let candle_points: Vec<CandlePoint> = day
        .bars
        .iter()
        .map(|b| CandlePoint {
            time: b.timestamp,
            open: b.open,
            high: b.high,
            low: b.low,
            close: b.close,
            volume: b.volume,
        })
        .collect();
    let candles = CandleSeries { ticker: day.ticker.clone(), date: day.date.clone(), candles: candle_points };

    let downsampled = global_equity::downsample(&simulation.equity, MAX_EQUITY_POINTS_PER_DAY);
    let sampled_timestamps = global_equity::downsample(
        &bar_timestamps.iter().map(|&t| t as f64).collect::<Vec<_>>(),
        MAX_EQUITY_POINTS_PER_DAY,
    );
    let equity_points: Vec<TimeValue> = sampled_timestamps
        .iter()
        .zip(downsampled.iter())
        .map(|(&time, &value)| TimeValue { time: time as i64, value })
        .collect();
    let equity_curve = EquityCurve { ticker: day.ticker.clone(), date: day.date.clone(), equity: equity_points };

    Some(DayOutput {
        day_result,
        day_stats,
        candles,
        trades: enriched_trades,
        equity_curve,
        raw_equity: simulation.equity,
        raw_trades: simulation.trades,
    })
}
