//! Risk-management translation: `RiskConfig` → the scalar stop/target
//! parameters the simulator consumes.

use crate::domain::{Bar, HardStopType, RiskConfig, TakeProfitType, TrailingStopType};
use crate::indicators::atr;

/// Resolved stop/target parameters, as fractions of entry price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskParams {
    pub sl_stop: Option<f64>,
    pub sl_trail: bool,
    pub tp_stop: Option<f64>,
}

/// Translate `risk` into fractional stop/target parameters given the day's
/// bars (needed for `Fixed Amount` and `ATR Multiplier` hard stops, both of
/// which are expressed relative to the day's first close or mean ATR).
pub fn translate_risk(risk: &RiskConfig, bars: &[Bar]) -> RiskParams {
    let mut sl_stop = if risk.use_hard_stop {
        risk.hard_stop.as_ref().and_then(|stop| hard_stop_fraction(stop, bars))
    } else {
        None
    };

    let mut sl_trail = false;
    if let Some(trailing) = risk.trailing_stop.as_ref() {
        if trailing.active {
            sl_trail = true;
            if trailing.kind == TrailingStopType::Percentage {
                sl_stop = Some(trailing.buffer_pct / 100.0);
            }
        }
    }

    let tp_stop = if risk.use_take_profit {
        risk.take_profit.as_ref().and_then(|tp| match tp.kind {
            TakeProfitType::Percentage => Some(tp.value / 100.0),
        })
    } else {
        None
    };

    RiskParams {
        sl_stop,
        sl_trail,
        tp_stop,
    }
}

fn hard_stop_fraction(stop: &crate::domain::HardStop, bars: &[Bar]) -> Option<f64> {
    match stop.kind {
        HardStopType::Percentage => Some(stop.value / 100.0),
        HardStopType::FixedAmount => {
            let first_close = bars.first()?.close;
            if first_close <= 0.0 {
                None
            } else {
                Some(stop.value / first_close)
            }
        }
        HardStopType::AtrMultiplier => {
            let first_close = bars.first()?.close;
            if first_close <= 0.0 {
                return None;
            }
            let series = atr::atr(bars, 14);
            let valid: Vec<f64> = series.into_iter().filter(|v| !v.is_nan()).collect();
            if valid.is_empty() {
                return None;
            }
            let mean_atr = valid.iter().sum::<f64>() / valid.len() as f64;
            Some(mean_atr * stop.value / first_close)
        }
        HardStopType::MarketStructure => None,
    }
}
