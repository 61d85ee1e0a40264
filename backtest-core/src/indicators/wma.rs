//! Weighted Moving Average — linear weights `1..period`, heaviest on the most
//! recent bar in the window.

pub fn wma(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 || n < period {
        return result;
    }

    let denom: f64 = (1..=period).sum::<usize>() as f64;
    for i in (period - 1)..n {
        let window = &values[(i + 1 - period)..=i];
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        let weighted: f64 = window
            .iter()
            .enumerate()
            .map(|(j, &v)| v * (j + 1) as f64)
            .sum();
        result[i] = weighted / denom;
    }
    result
}
