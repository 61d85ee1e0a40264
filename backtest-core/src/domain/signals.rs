//! `Signals` — the Strategy Translator's output: aligned entry/exit bit
//! vectors plus the scalar risk parameters the simulator needs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    LongOnly,
    ShortOnly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signals {
    pub entries: Vec<bool>,
    pub exits: Vec<bool>,
    pub direction: Direction,
    /// Fractional stop, e.g. `0.02` for 2%. `None` when no hard stop applies.
    pub sl_stop: Option<f64>,
    pub sl_trail: bool,
    pub tp_stop: Option<f64>,
    pub accept_reentries: bool,
}

impl Signals {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
