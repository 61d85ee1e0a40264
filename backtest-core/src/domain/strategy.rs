//! `StrategyDefinition` and the risk-management configuration it carries.

use serde::{Deserialize, Serialize};

use super::condition::ConditionGroup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bias {
    Long,
    Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "5m")]
    FiveMinute,
    #[serde(rename = "15m")]
    FifteenMinute,
    #[serde(rename = "30m")]
    ThirtyMinute,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "1d")]
    OneDay,
}

impl Timeframe {
    pub fn is_intraday_minute(self) -> bool {
        matches!(self, Timeframe::OneMinute)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionBlock {
    pub timeframe: Timeframe,
    pub root_condition: ConditionGroup,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyDefinition {
    pub bias: Bias,
    pub entry_logic: ConditionBlock,
    pub exit_logic: ConditionBlock,
    pub risk_management: RiskConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HardStopType {
    Percentage,
    #[serde(rename = "Fixed Amount")]
    FixedAmount,
    #[serde(rename = "ATR Multiplier")]
    AtrMultiplier,
    #[serde(rename = "Market Structure (HOD/LOD)")]
    MarketStructure,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HardStop {
    #[serde(rename = "type")]
    pub kind: HardStopType,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrailingStopType {
    Percentage,
    #[serde(rename = "ATR Multiplier")]
    AtrMultiplier,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailingStop {
    pub active: bool,
    #[serde(rename = "type")]
    pub kind: TrailingStopType,
    pub buffer_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TakeProfitType {
    Percentage,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TakeProfit {
    #[serde(rename = "type")]
    pub kind: TakeProfitType,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    pub use_hard_stop: bool,
    pub hard_stop: Option<HardStop>,
    pub trailing_stop: Option<TrailingStop>,
    pub use_take_profit: bool,
    pub take_profit: Option<TakeProfit>,
    #[serde(default)]
    pub accept_reentries: bool,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            use_hard_stop: false,
            hard_stop: None,
            trailing_stop: None,
            use_take_profit: false,
            take_profit: None,
            accept_reentries: false,
        }
    }
}
