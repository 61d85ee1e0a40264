//! Top-level strategy translation: `StrategyDefinition` + a day's bars and
//! daily stats → `Signals`.

use crate::domain::{Bar, Bias, DailyStats, Direction, Signals, StrategyDefinition, Timeframe};
use crate::indicators::IndicatorCache;

use super::evaluate::evaluate_group;
use super::resample::{forward_fill, resample};
use super::risk::translate_risk;

/// Translate `strategy` against one day's 1-minute `bars`. The returned
/// `Signals` vectors are aligned to `bars` regardless of the condition
/// blocks' declared timeframes.
pub fn translate_strategy(strategy: &StrategyDefinition, bars: &[Bar], stats: &DailyStats) -> Signals {
    let entries = evaluate_block(strategy.entry_logic.timeframe, &strategy.entry_logic.root_condition, bars, stats);
    let exits = evaluate_block(strategy.exit_logic.timeframe, &strategy.exit_logic.root_condition, bars, stats);

    let risk = translate_risk(&strategy.risk_management, bars);

    Signals {
        entries,
        exits,
        direction: match strategy.bias {
            Bias::Long => Direction::LongOnly,
            Bias::Short => Direction::ShortOnly,
        },
        sl_stop: risk.sl_stop,
        sl_trail: risk.sl_trail,
        tp_stop: risk.tp_stop,
        accept_reentries: strategy.risk_management.accept_reentries,
    }
}

fn evaluate_block(
    timeframe: Timeframe,
    root: &crate::domain::ConditionGroup,
    bars: &[Bar],
    stats: &DailyStats,
) -> Vec<bool> {
    let mut cache = IndicatorCache::new();

    if timeframe.is_intraday_minute() {
        return evaluate_group(root, bars, stats, &mut cache);
    }

    let (resampled_bars, bucket_members) = resample(bars, timeframe);
    let resampled_signal = evaluate_group(root, &resampled_bars, stats, &mut cache);
    forward_fill(&resampled_signal, &bucket_members, bars.len())
}
