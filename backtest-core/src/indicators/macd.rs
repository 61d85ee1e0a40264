//! MACD — `EMA(12) - EMA(26)` of close prices.

use crate::indicators::ema::ema;

pub fn macd(closes: &[f64]) -> Vec<f64> {
    let fast = ema(closes, 12);
    let slow = ema(closes, 26);
    fast.iter()
        .zip(slow.iter())
        .map(|(&f, &s)| f - s)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macd_is_nan_until_slow_ema_warms_up() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let result = macd(&closes);
        for v in &result[0..25] {
            assert!(v.is_nan());
        }
        assert!(!result[29].is_nan());
    }
}
