//! Recursive condition-tree evaluation: a post-order fold over per-bar
//! boolean vectors, backed by the shared indicator cache.

use crate::domain::{
    Bar, Comparator, Condition, ConditionGroup, ConditionNode, ComparisonTarget, DailyStats,
    DistanceComparator, GroupOperator, IndicatorRef,
};
use crate::indicators::{self, patterns, IndicatorCache};

/// Evaluate a `ConditionGroup` over `bars`, returning one boolean per bar.
/// An empty group (and therefore an empty strategy) is all-true.
pub fn evaluate_group(
    group: &ConditionGroup,
    bars: &[Bar],
    stats: &DailyStats,
    cache: &mut IndicatorCache,
) -> Vec<bool> {
    let n = bars.len();
    if group.conditions.is_empty() {
        return vec![true; n];
    }

    let mut children = group.conditions.iter().map(|node| evaluate_node(node, bars, stats, cache));

    let first = children.next().expect("non-empty conditions checked above");
    match group.operator {
        GroupOperator::And => children.fold(first, |acc, series| fold_with(acc, series, |a, b| a && b)),
        GroupOperator::Or => children.fold(first, |acc, series| fold_with(acc, series, |a, b| a || b)),
    }
}

fn fold_with(a: Vec<bool>, b: Vec<bool>, op: impl Fn(bool, bool) -> bool) -> Vec<bool> {
    a.into_iter().zip(b).map(|(x, y)| op(x, y)).collect()
}

fn evaluate_node(
    node: &ConditionNode,
    bars: &[Bar],
    stats: &DailyStats,
    cache: &mut IndicatorCache,
) -> Vec<bool> {
    match node {
        ConditionNode::Group(group) => evaluate_group(group, bars, stats, cache),
        ConditionNode::Leaf(condition) => evaluate_condition(condition, bars, stats, cache),
    }
}

fn evaluate_condition(
    condition: &Condition,
    bars: &[Bar],
    stats: &DailyStats,
    cache: &mut IndicatorCache,
) -> Vec<bool> {
    let n = bars.len();
    match condition {
        Condition::IndicatorComparison {
            source,
            target,
            comparator,
        } => {
            let source_series = lookup(cache, source, bars, stats);
            let target_series = match target {
                ComparisonTarget::Indicator(r) => lookup(cache, r, bars, stats),
                ComparisonTarget::Literal(v) => vec![*v; n],
            };
            apply_comparator(*comparator, &source_series, &target_series)
        }
        Condition::PriceLevelDistance {
            source,
            level,
            comparator,
            value_pct,
        } => {
            let source_series = lookup(cache, &IndicatorRef::new(source.clone()), bars, stats);
            let level_series = lookup(cache, &IndicatorRef::new(level.clone()), bars, stats);
            (0..n)
                .map(|i| {
                    let s = source_series[i];
                    let l = level_series[i];
                    if s.is_nan() || l.is_nan() || l == 0.0 {
                        return false;
                    }
                    let distance_pct = (s - l).abs() / l * 100.0;
                    match comparator {
                        DistanceComparator::DistanceLessThan => distance_pct < *value_pct,
                        DistanceComparator::DistanceGreaterThan => distance_pct > *value_pct,
                    }
                })
                .collect()
        }
        Condition::CandlePattern {
            pattern,
            lookback,
            consecutive_count,
        } => patterns::detect_pattern(bars, *pattern, *lookback, *consecutive_count),
        Condition::Unknown => vec![true; n],
    }
}

fn lookup(cache: &mut IndicatorCache, r: &IndicatorRef, bars: &[Bar], stats: &DailyStats) -> Vec<f64> {
    cache.get_or_compute(&r.name, bars, stats, r.period, r.offset)
}

/// `DISTANCE_GREATER_THAN`/`DISTANCE_LESS_THAN` here are the legacy
/// `indicator_comparison` variants: they compare distance-pct against the
/// target value itself rather than a separate threshold. Preserved as-is;
/// `price_level_distance` is the corrected path.
fn apply_comparator(comparator: Comparator, source: &[f64], target: &[f64]) -> Vec<bool> {
    let n = source.len();
    match comparator {
        Comparator::GreaterThan => elementwise(source, target, |a, b| a > b),
        Comparator::LessThan => elementwise(source, target, |a, b| a < b),
        Comparator::GreaterThanOrEqual => elementwise(source, target, |a, b| a >= b),
        Comparator::LessThanOrEqual => elementwise(source, target, |a, b| a <= b),
        Comparator::Equal => elementwise(source, target, |a, b| a == b),
        Comparator::CrossesAbove => {
            let mut result = vec![false; n];
            for i in 1..n {
                result[i] = source[i - 1] <= target[i - 1] && source[i] > target[i];
            }
            result
        }
        Comparator::CrossesBelow => {
            let mut result = vec![false; n];
            for i in 1..n {
                result[i] = source[i - 1] >= target[i - 1] && source[i] < target[i];
            }
            result
        }
        Comparator::DistanceGreaterThan => elementwise(source, target, |a, b| {
            b != 0.0 && (a - b).abs() / b * 100.0 > b
        }),
        Comparator::DistanceLessThan => elementwise(source, target, |a, b| {
            b != 0.0 && (a - b).abs() / b * 100.0 < b
        }),
    }
}

fn elementwise(a: &[f64], b: &[f64], op: impl Fn(f64, f64) -> bool) -> Vec<bool> {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| if x.is_nan() || y.is_nan() { false } else { op(x, y) })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConditionGroup, GroupOperator};

    fn bars_rising(n: usize) -> Vec<Bar> {
        (0..n)
            .map(|i| {
                let close = 100.0 + i as f64;
                Bar {
                    open: close - 0.5,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: 1000,
                    timestamp: 1_700_000_000 + i as i64 * 60,
                }
            })
            .collect()
    }

    #[test]
    fn empty_group_is_all_true() {
        let bars = bars_rising(5);
        let stats = DailyStats::default();
        let mut cache = IndicatorCache::new();
        let group = ConditionGroup::empty(GroupOperator::And);
        let result = evaluate_group(&group, &bars, &stats, &mut cache);
        assert_eq!(result, vec![true; 5]);
    }

    #[test]
    fn and_group_requires_all_children_true() {
        let bars = bars_rising(5);
        let stats = DailyStats::default();
        let mut cache = IndicatorCache::new();
        let group = ConditionGroup {
            operator: GroupOperator::And,
            conditions: vec![
                ConditionNode::Leaf(Condition::IndicatorComparison {
                    source: IndicatorRef::new("Close"),
                    target: ComparisonTarget::Literal(100.0),
                    comparator: Comparator::GreaterThan,
                }),
                ConditionNode::Leaf(Condition::IndicatorComparison {
                    source: IndicatorRef::new("Close"),
                    target: ComparisonTarget::Literal(103.0),
                    comparator: Comparator::LessThan,
                }),
            ],
        };
        let result = evaluate_group(&group, &bars, &stats, &mut cache);
        // closes: 100,101,102,103,104 -> (>100) & (<103) -> false,true,true,false,false
        assert_eq!(result, vec![false, true, true, false, false]);
    }

    #[test]
    fn crosses_above_fires_once_at_crossing_bar() {
        let source = vec![1.0, 2.0, 3.0, 2.0];
        let target = vec![2.5, 2.5, 2.5, 2.5];
        let result = apply_comparator(Comparator::CrossesAbove, &source, &target);
        assert_eq!(result, vec![false, false, true, false]);
    }

    #[test]
    fn unknown_condition_is_all_true() {
        let bars = bars_rising(3);
        let stats = DailyStats::default();
        let mut cache = IndicatorCache::new();
        let result = evaluate_condition(&Condition::Unknown, &bars, &stats, &mut cache);
        assert_eq!(result, vec![true, true, true]);
    }

    #[test]
    fn price_level_distance_compares_against_value_pct() {
        let bars = bars_rising(3);
        let stats = DailyStats::default();
        let mut cache = IndicatorCache::new();
        let cond = Condition::PriceLevelDistance {
            source: "Close".to_string(),
            level: "Open".to_string(),
            comparator: DistanceComparator::DistanceGreaterThan,
            value_pct: 0.1,
        };
        let result = evaluate_condition(&cond, &bars, &stats, &mut cache);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn indicators_module_is_reachable() {
        let bars = bars_rising(3);
        let stats = DailyStats::default();
        let series = indicators::compute("Close", &bars, &stats, None, 0);
        assert_eq!(series.len(), 3);
    }
}
