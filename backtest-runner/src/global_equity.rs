//! Global Equity Chainer (C6, §4.6): stitches each day's equity curve onto a
//! single synthetic time axis, offsetting each day so its first point meets
//! the previous day's last point, then derives a running drawdown series.

use crate::result::TimeValue;

const SYNTHETIC_START: i64 = 1_000_000_000;
const SYNTHETIC_SPACING: i64 = 60;

/// `day_equities[k]` is day k's raw equity series, in input group order.
/// Returns `(global_equity, global_drawdown)`, both on the synthetic axis.
pub fn chain(day_equities: &[Vec<f64>]) -> (Vec<TimeValue>, Vec<TimeValue>) {
    let mut values = Vec::new();
    let mut carry_last: Option<f64> = None;

    for day in day_equities {
        if day.is_empty() {
            continue;
        }
        let offset = match carry_last {
            None => 0.0,
            Some(last) => last - day[0],
        };
        for &v in day {
            values.push(v + offset);
        }
        carry_last = values.last().copied();
    }

    let global_equity: Vec<TimeValue> = values
        .iter()
        .enumerate()
        .map(|(i, &value)| TimeValue {
            time: SYNTHETIC_START + i as i64 * SYNTHETIC_SPACING,
            value,
        })
        .collect();

    let global_drawdown = drawdown_series(&global_equity);

    (global_equity, global_drawdown)
}

fn drawdown_series(equity: &[TimeValue]) -> Vec<TimeValue> {
    let mut running_max = f64::NEG_INFINITY;
    equity
        .iter()
        .map(|point| {
            if point.value > running_max {
                running_max = point.value;
            }
            let dd = if running_max > 0.0 {
                (point.value / running_max - 1.0) * 100.0
            } else {
                0.0
            };
            TimeValue { time: point.time, value: dd }
        })
        .collect()
}

/// Down-sample `points` to at most `max_points` via linearly spaced indices —
/// used for the per-day equity curves returned to callers (§4.6), not for
/// the chaining computation itself.
pub fn downsample(points: &[f64], max_points: usize) -> Vec<f64> {
    if points.len() <= max_points || max_points == 0 {
        return points.to_vec();
    }
    if max_points == 1 {
        return vec![points[0]];
    }
    (0..max_points)
        .map(|i| {
            let idx = i * (points.len() - 1) / (max_points - 1);
            points[idx]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_day_is_unshifted() {
        let (equity, _) = chain(&[vec![10_000.0, 10_050.0, 10_100.0]]);
        let values: Vec<f64> = equity.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![10_000.0, 10_050.0, 10_100.0]);
    }

    #[test]
    fn synthetic_time_axis_starts_at_one_billion_with_60s_spacing() {
        let (equity, _) = chain(&[vec![1.0, 2.0, 3.0]]);
        assert_eq!(equity[0].time, 1_000_000_000);
        assert_eq!(equity[1].time, 1_000_000_060);
        assert_eq!(equity[2].time, 1_000_000_120);
    }

    /// Scenario 6 from the simulator contract: day A ends at 10100, day B's
    /// raw equity is [10000,10050,10080]; day B gets offset +100 so its
    /// points read [10100,10150,10180], continuous with day A's close.
    #[test]
    fn two_day_chaining_is_continuous() {
        let day_a = vec![10_000.0, 10_050.0, 10_100.0];
        let day_b = vec![10_000.0, 10_050.0, 10_080.0];
        let (equity, drawdown) = chain(&[day_a, day_b]);
        let values: Vec<f64> = equity.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![10_000.0, 10_050.0, 10_100.0, 10_100.0, 10_150.0, 10_180.0]);
        assert!(drawdown.iter().all(|p| p.value <= 0.0));
    }

    #[test]
    fn downsample_keeps_first_and_last_point() {
        let points: Vec<f64> = (0..1000).map(|i| i as f64).collect();
        let sampled = downsample(&points, 100);
        assert_eq!(sampled.len(), 100);
        assert_eq!(sampled[0], 0.0);
        assert_eq!(*sampled.last().unwrap(), 999.0);
    }

    #[test]
    fn downsample_is_a_no_op_under_the_limit() {
        let points = vec![1.0, 2.0, 3.0];
        assert_eq!(downsample(&points, 100), points);
    }
}
