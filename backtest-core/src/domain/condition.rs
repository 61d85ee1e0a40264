//! The nested boolean condition tree: `ConditionGroup` interior nodes and the
//! three `Condition` leaf kinds. This is a recursive tagged-variant sum type,
//! not a class hierarchy — evaluation in `strategy::evaluate` is a post-order
//! fold over per-bar boolean vectors.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupOperator {
    And,
    Or,
}

/// `{operator, conditions}`. An empty `conditions` list evaluates to true at
/// every bar, regardless of `operator`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionGroup {
    pub operator: GroupOperator,
    pub conditions: Vec<ConditionNode>,
}

impl ConditionGroup {
    pub fn empty(operator: GroupOperator) -> Self {
        Self {
            operator,
            conditions: Vec::new(),
        }
    }
}

/// A child of a `ConditionGroup`: either a nested group or a leaf condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionNode {
    Group(ConditionGroup),
    Leaf(Condition),
}

/// Tagged union of leaf condition kinds. Unrecognized `type` tags deserialize
/// into `Unknown` (permissive default) rather than failing the whole document,
/// and evaluate to all-true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    IndicatorComparison {
        source: IndicatorRef,
        target: ComparisonTarget,
        comparator: Comparator,
    },
    PriceLevelDistance {
        source: String,
        level: String,
        comparator: DistanceComparator,
        value_pct: f64,
    },
    CandlePattern {
        pattern: CandlePattern,
        #[serde(default)]
        lookback: i32,
        #[serde(default = "default_consecutive_count")]
        consecutive_count: i32,
    },
    #[serde(other)]
    Unknown,
}

fn default_consecutive_count() -> i32 {
    1
}

/// The comparison target of an `indicator_comparison`: either another
/// indicator reference or a numeric literal broadcast to a constant series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComparisonTarget {
    Indicator(IndicatorRef),
    Literal(f64),
}

/// `{name, period?, offset?}`. See the indicator catalog for valid names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRef {
    pub name: String,
    pub period: Option<i32>,
    #[serde(default)]
    pub offset: i32,
}

impl IndicatorRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            period: None,
            offset: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Comparator {
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    Equal,
    CrossesAbove,
    CrossesBelow,
    DistanceGreaterThan,
    DistanceLessThan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DistanceComparator {
    DistanceLessThan,
    DistanceGreaterThan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CandlePattern {
    GreenVolume,
    GreenVolumePlus,
    RedVolume,
    RedVolumePlus,
    Doji,
    Hammer,
    ShootingStar,
}
