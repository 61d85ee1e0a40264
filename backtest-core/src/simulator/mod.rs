//! The portfolio simulator: a single-position, per-bar event loop producing
//! an equity series and a list of closed trades for one day.
//!
//! The per-bar order of operations — exit checks (SL > TP > Signal > EOD),
//! then entry check, then mark-to-market — is the semantic contract; changing
//! the order changes results.

use crate::config::BacktestConfig;
use crate::domain::{Bar, Direction, ExitReason, Signals, Trade, TradeDirection};

/// Output of one day's simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub equity: Vec<f64>,
    pub trades: Vec<Trade>,
}

struct State {
    in_position: bool,
    entry_idx: usize,
    entry_price: f64,
    size: f64,
    entry_fee_amount: f64,
    trail_extreme: f64,
    realized_pnl: f64,
}

impl State {
    fn new() -> Self {
        Self {
            in_position: false,
            entry_idx: 0,
            entry_price: 0.0,
            size: 0.0,
            entry_fee_amount: 0.0,
            trail_extreme: 0.0,
            realized_pnl: 0.0,
        }
    }
}

/// Simulate one day of `bars` against `signals` under `config`.
pub fn simulate(bars: &[Bar], signals: &Signals, config: &BacktestConfig) -> SimulationResult {
    let n = bars.len();
    let is_long = matches!(signals.direction, Direction::LongOnly);
    let mut st = State::new();
    let mut equity = vec![0.0; n];
    let mut trades = Vec::new();

    for i in 0..n {
        // 1. exit checks — the position is live starting at its entry_idx bar.
        let active = st.in_position && i >= st.entry_idx;
        if active {
            if let Some(exit) = check_exit(bars, i, &mut st, signals, is_long) {
                let trade = close_position(&mut st, i, exit, config, is_long);
                trades.push(trade);
            }
        }

        // 2. entry check — cannot open on the last bar, no next-bar open to fill at.
        if !st.in_position && signals.entries[i] && i < n - 1 {
            try_enter(bars, i, &mut st, config, is_long);
        }

        // 3. mark-to-market.
        let active_now = st.in_position && i >= st.entry_idx;
        equity[i] = if active_now {
            let unrealized = if is_long {
                (bars[i].close - st.entry_price) * st.size
            } else {
                (st.entry_price - bars[i].close) * st.size
            };
            config.init_cash + st.realized_pnl + unrealized
        } else {
            config.init_cash + st.realized_pnl
        };
    }

    SimulationResult { equity, trades }
}

struct ExitFill {
    price: f64,
    reason: ExitReason,
}

fn check_exit(bars: &[Bar], i: usize, st: &mut State, signals: &Signals, is_long: bool) -> Option<ExitFill> {
    let bar = &bars[i];

    // 1a. stop-loss (fixed or trailing).
    if let Some(sl_stop) = signals.sl_stop {
        let sl_level = if signals.sl_trail {
            if is_long {
                st.trail_extreme = st.trail_extreme.max(bar.high);
                st.trail_extreme * (1.0 - sl_stop)
            } else {
                st.trail_extreme = st.trail_extreme.min(bar.low);
                st.trail_extreme * (1.0 + sl_stop)
            }
        } else if is_long {
            st.entry_price * (1.0 - sl_stop)
        } else {
            st.entry_price * (1.0 + sl_stop)
        };

        let triggered = if is_long { bar.low <= sl_level } else { bar.high >= sl_level };
        if triggered {
            let price = if is_long {
                sl_level.max(bar.low)
            } else {
                sl_level.min(bar.high)
            };
            let reason = if signals.sl_trail {
                ExitReason::Trailing
            } else {
                ExitReason::StopLoss
            };
            return Some(ExitFill { price, reason });
        }
    }

    // 1b. take-profit, only reached if SL did not fire this bar.
    if let Some(tp_stop) = signals.tp_stop {
        let tp_level = if is_long {
            st.entry_price * (1.0 + tp_stop)
        } else {
            st.entry_price * (1.0 - tp_stop)
        };
        let triggered = if is_long { bar.high >= tp_level } else { bar.low <= tp_level };
        if triggered {
            let price = if is_long {
                tp_level.min(bar.high)
            } else {
                tp_level.max(bar.low)
            };
            return Some(ExitFill {
                price,
                reason: ExitReason::TakeProfit,
            });
        }
    }

    // 1c. signal exit.
    if signals.exits[i] {
        return Some(ExitFill {
            price: bar.close,
            reason: ExitReason::Signal,
        });
    }

    // 1d. end-of-day forced liquidation.
    if i == bars.len() - 1 {
        return Some(ExitFill {
            price: bar.close,
            reason: ExitReason::EndOfDay,
        });
    }

    None
}

fn close_position(st: &mut State, exit_idx: usize, exit: ExitFill, config: &BacktestConfig, is_long: bool) -> Trade {
    let net_exit = if is_long {
        exit.price * (1.0 - config.slippage)
    } else {
        exit.price * (1.0 + config.slippage)
    };
    let exit_fee = (net_exit * st.size).abs() * config.fees;
    let pnl = if is_long {
        (net_exit - st.entry_price) * st.size - exit_fee - st.entry_fee_amount
    } else {
        (st.entry_price - net_exit) * st.size - exit_fee - st.entry_fee_amount
    };
    let denom = st.entry_price * st.size + st.entry_fee_amount;
    let return_pct = if denom != 0.0 { pnl / denom * 100.0 } else { 0.0 };

    let trade = Trade {
        entry_idx: st.entry_idx,
        exit_idx,
        entry_price: st.entry_price,
        exit_price: net_exit,
        pnl,
        return_pct,
        direction: if is_long { TradeDirection::Long } else { TradeDirection::Short },
        size: st.size,
        exit_reason: exit.reason,
    }
    .rounded();

    st.realized_pnl += pnl;
    st.in_position = false;
    st.size = 0.0;
    st.entry_fee_amount = 0.0;

    trade
}

fn try_enter(bars: &[Bar], i: usize, st: &mut State, config: &BacktestConfig, is_long: bool) {
    let available_cash = config.init_cash + st.realized_pnl;
    if available_cash <= 0.0 {
        return;
    }

    let next_open = bars[i + 1].open;
    let entry_price = if is_long {
        next_open * (1.0 + config.slippage)
    } else {
        next_open * (1.0 - config.slippage)
    };
    if entry_price <= 0.0 {
        return;
    }

    let size = available_cash / (entry_price * (1.0 + config.fees));
    if size <= 0.0 {
        return;
    }

    let entry_fee_amount = (entry_price * size).abs() * config.fees;

    st.entry_idx = i + 1;
    st.entry_price = entry_price;
    st.size = size;
    st.entry_fee_amount = entry_fee_amount;
    st.realized_pnl -= entry_fee_amount;
    st.trail_extreme = entry_price;
    st.in_position = true;
}
