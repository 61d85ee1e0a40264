//! `Trade` — one closed position produced by the portfolio simulator.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeDirection {
    Long,
    Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitReason {
    Signal,
    #[serde(rename = "SL")]
    StopLoss,
    #[serde(rename = "TP")]
    TakeProfit,
    Trailing,
    #[serde(rename = "EOD")]
    EndOfDay,
}

/// A closed trade, as produced directly by the simulator (before the driver's
/// timestamp/metadata enrichment — see `backtest_runner::result::EnrichedTrade`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub entry_idx: usize,
    pub exit_idx: usize,
    pub entry_price: f64,
    pub exit_price: f64,
    pub pnl: f64,
    pub return_pct: f64,
    pub direction: TradeDirection,
    pub size: f64,
    pub exit_reason: ExitReason,
}

impl Trade {
    /// Prices to 6 decimals, pnl/return_pct to 4 — display rounding only, the
    /// simulator's internal math stays double precision.
    pub fn rounded(self) -> Self {
        Self {
            entry_price: round_to(self.entry_price, 6),
            exit_price: round_to(self.exit_price, 6),
            pnl: round_to(self.pnl, 4),
            return_pct: round_to(self.return_pct, 4),
            ..self
        }
    }
}

pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_behaves() {
        assert_eq!(round_to(1.234_567_8, 4), 1.2346);
        assert_eq!(round_to(100.0, 6), 100.0);
    }
}
