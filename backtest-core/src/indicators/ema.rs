//! Exponential Moving Average.
//!
//! Seeded with the SMA of the first window, then recursively updated:
//! `out[i] = alpha*v[i] + (1-alpha)*out[i-1]`, `alpha = 2/(period+1)`.
//! First `period-1` values are NaN; NaN anywhere in the seed window or after
//! the seed poisons everything from that point forward.

pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 || n < period {
        return result;
    }

    let alpha = 2.0 / (period as f64 + 1.0);

    let seed_window = &values[0..period];
    if seed_window.iter().any(|v| v.is_nan()) {
        return result;
    }
    let seed = seed_window.iter().sum::<f64>() / period as f64;
    result[period - 1] = seed;

    let mut prev = seed;
    for i in period..n {
        if values[i].is_nan() {
            return result;
        }
        let out = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = out;
        prev = out;
    }
    result
}
