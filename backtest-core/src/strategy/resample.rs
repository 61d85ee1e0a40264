//! OHLCV resampling for coarser-timeframe condition blocks, plus the
//! forward-fill back onto the 1-minute index.

use crate::domain::{Bar, Timeframe};

/// Bucket width in seconds for a non-1-minute timeframe. `1d` buckets are
/// aligned to UTC midnight.
fn bucket_seconds(timeframe: Timeframe) -> Option<i64> {
    match timeframe {
        Timeframe::OneMinute => None,
        Timeframe::FiveMinute => Some(5 * 60),
        Timeframe::FifteenMinute => Some(15 * 60),
        Timeframe::ThirtyMinute => Some(30 * 60),
        Timeframe::OneHour => Some(60 * 60),
        Timeframe::OneDay => Some(24 * 60 * 60),
    }
}

/// Resample 1-minute bars into `timeframe` buckets: open=first, high=max,
/// low=min, close=last, volume=sum, timestamp=first-of-bucket. Buckets with no
/// data are never produced (only observed minutes contribute). Returns the
/// resampled bars and, for each resampled bar, the indices of the source bars
/// that fed it (needed for the forward-fill step).
pub fn resample(bars: &[Bar], timeframe: Timeframe) -> (Vec<Bar>, Vec<Vec<usize>>) {
    let Some(width) = bucket_seconds(timeframe) else {
        return (bars.to_vec(), (0..bars.len()).map(|i| vec![i]).collect());
    };
    if bars.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let mut out_bars = Vec::new();
    let mut out_indices = Vec::new();

    let mut current_bucket = bars[0].timestamp / width;
    let mut members = vec![0usize];

    for i in 1..bars.len() {
        let bucket = bars[i].timestamp / width;
        if bucket == current_bucket {
            members.push(i);
        } else {
            out_bars.push(aggregate(bars, &members));
            out_indices.push(std::mem::take(&mut members));
            current_bucket = bucket;
            members.push(i);
        }
    }
    out_bars.push(aggregate(bars, &members));
    out_indices.push(members);

    (out_bars, out_indices)
}

fn aggregate(bars: &[Bar], members: &[usize]) -> Bar {
    let first = &bars[members[0]];
    let last = &bars[*members.last().unwrap()];
    let high = members.iter().map(|&i| bars[i].high).fold(f64::NEG_INFINITY, f64::max);
    let low = members.iter().map(|&i| bars[i].low).fold(f64::INFINITY, f64::min);
    let volume = members.iter().map(|&i| bars[i].volume).sum();
    Bar {
        open: first.open,
        high,
        low,
        close: last.close,
        volume,
        timestamp: first.timestamp,
    }
}

/// Forward-fill a resampled boolean series back onto the 1-minute index:
/// every source bar that fed a resampled bucket inherits that bucket's value.
/// Indices with no covering bucket (shouldn't happen given `resample`'s
/// construction) default to false.
pub fn forward_fill(resampled: &[bool], bucket_members: &[Vec<usize>], original_len: usize) -> Vec<bool> {
    let mut result = vec![false; original_len];
    for (bucket_idx, members) in bucket_members.iter().enumerate() {
        let value = resampled.get(bucket_idx).copied().unwrap_or(false);
        for &i in members {
            result[i] = value;
        }
    }
    result
}
