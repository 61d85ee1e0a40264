//! The literal end-to-end scenarios from the per-bar simulator contract.
//! Scenario 5 (Monte Carlo) and 6 (day chaining) live in `backtest-runner`
//! since they exercise components owned by that crate.

use backtest_core::config::BacktestConfig;
use backtest_core::domain::{Bar, Direction, ExitReason, Signals};
use backtest_core::simulate;

fn bar(open: f64, high: f64, low: f64, close: f64, timestamp: i64) -> Bar {
    Bar {
        open,
        high,
        low,
        close,
        volume: 1000,
        timestamp,
    }
}

fn always_enter(n: usize) -> Vec<bool> {
    vec![true; n]
}

fn never_exit(n: usize) -> Vec<bool> {
    vec![false; n]
}

/// Scenario 1: flat market, no stops. One trade, entry at bar 1, exit at EOD,
/// pnl 0, equity constant at init_cash.
#[test]
fn scenario_1_flat_market_no_stops() {
    let bars: Vec<Bar> = (0..10).map(|i| bar(100.0, 100.0, 100.0, 100.0, i * 60)).collect();
    let signals = Signals {
        entries: always_enter(10),
        exits: never_exit(10),
        direction: Direction::LongOnly,
        sl_stop: None,
        sl_trail: false,
        tp_stop: None,
        accept_reentries: false,
    };
    let config = BacktestConfig::default();
    let result = simulate(&bars, &signals, &config);

    assert_eq!(result.trades.len(), 1);
    let trade = result.trades[0];
    assert_eq!(trade.entry_idx, 1);
    assert_eq!(trade.exit_idx, 9);
    assert_eq!(trade.entry_price, 100.0);
    assert_eq!(trade.exit_price, 100.0);
    assert_eq!(trade.pnl, 0.0);
    assert_eq!(trade.exit_reason, ExitReason::EndOfDay);
    assert!(result.equity.iter().all(|&e| e == 10_000.0));
}

/// Scenario 2: long position, fixed stop-loss hit. Entry at bar 1, open=100,
/// sl_stop=2% => sl_level=98. Bar 5's low of 97 breaches it; fill clamped to
/// max(98, 97)=98.
#[test]
fn scenario_2_long_stop_loss_hit() {
    let bars = vec![
        bar(100.0, 101.0, 99.0, 100.0, 0),
        bar(100.0, 105.0, 99.0, 104.0, 60),
        bar(104.0, 106.0, 103.0, 105.0, 120),
        bar(105.0, 107.0, 104.0, 106.0, 180),
        bar(106.0, 108.0, 105.0, 107.0, 240),
        bar(107.0, 108.0, 97.0, 98.0, 300),
        bar(98.0, 110.0, 98.0, 109.0, 360),
        bar(109.0, 111.0, 108.0, 110.0, 420),
    ];
    let n = bars.len();
    let mut entries = vec![false; n];
    entries[0] = true;
    let signals = Signals {
        entries,
        exits: never_exit(n),
        direction: Direction::LongOnly,
        sl_stop: Some(0.02),
        sl_trail: false,
        tp_stop: None,
        accept_reentries: false,
    };
    let config = BacktestConfig::default();
    let result = simulate(&bars, &signals, &config);

    assert_eq!(result.trades.len(), 1);
    let trade = result.trades[0];
    assert_eq!(trade.entry_idx, 1);
    assert_eq!(trade.entry_price, 100.0);
    assert_eq!(trade.exit_idx, 5);
    assert_eq!(trade.exit_price, 98.0);
    assert_eq!(trade.exit_reason, ExitReason::StopLoss);
    let expected_pnl = (98.0 - 100.0) * trade.size;
    assert!((trade.pnl - expected_pnl).abs() < 1e-6);
}

/// Scenario 3: short position, take-profit hit. Entry at 100, tp_stop=5% =>
/// tp_level=95. Bar 3's low of 94 breaches it favorably for a short.
#[test]
fn scenario_3_short_take_profit_hit() {
    let bars = vec![
        bar(100.0, 101.0, 99.0, 100.0, 0),
        bar(100.0, 102.0, 98.0, 99.0, 60),
        bar(99.0, 100.0, 96.0, 97.0, 120),
        bar(97.0, 98.0, 94.0, 95.0, 180),
        bar(95.0, 97.0, 93.0, 94.0, 240),
    ];
    let n = bars.len();
    let mut entries = vec![false; n];
    entries[0] = true;
    let signals = Signals {
        entries,
        exits: never_exit(n),
        direction: Direction::ShortOnly,
        sl_stop: None,
        sl_trail: false,
        tp_stop: Some(0.05),
        accept_reentries: false,
    };
    let config = BacktestConfig::default();
    let result = simulate(&bars, &signals, &config);

    assert_eq!(result.trades.len(), 1);
    let trade = result.trades[0];
    assert_eq!(trade.entry_idx, 1);
    assert_eq!(trade.entry_price, 100.0);
    assert_eq!(trade.exit_idx, 3);
    assert_eq!(trade.exit_price, 95.0);
    assert_eq!(trade.exit_reason, ExitReason::TakeProfit);
    let expected_pnl = (100.0 - 95.0) * trade.size;
    assert!((trade.pnl - expected_pnl).abs() < 1e-6);
}

/// Scenario 4: trailing stop on a long. trail_extreme ratchets up with highs;
/// a pullback that breaches `trail_extreme * (1 - buffer)` exits as Trailing.
#[test]
fn scenario_4_trailing_stop_on_long() {
    let bars = vec![
        bar(100.0, 101.0, 99.0, 100.0, 0),
        bar(100.0, 103.0, 100.0, 102.0, 60),
        bar(102.0, 105.0, 102.0, 105.0, 120),
        bar(103.0, 105.0, 102.0, 103.0, 180),
        bar(103.0, 104.0, 99.0, 99.0, 240),
    ];
    let n = bars.len();
    let mut entries = vec![false; n];
    entries[0] = true;
    let signals = Signals {
        entries,
        exits: never_exit(n),
        direction: Direction::LongOnly,
        sl_stop: Some(0.03),
        sl_trail: true,
        tp_stop: None,
        accept_reentries: false,
    };
    let config = BacktestConfig::default();
    let result = simulate(&bars, &signals, &config);

    assert_eq!(result.trades.len(), 1);
    let trade = result.trades[0];
    assert_eq!(trade.entry_idx, 1);
    assert_eq!(trade.exit_reason, ExitReason::Trailing);
    // trail_extreme ratchets to 105 (bar 2's high) and holds through bar 3;
    // sl_level = 105*0.97 = 101.85. Bar 4's low of 99 breaches it:
    // fill = max(101.85, 99) = 101.85.
    assert!((trade.exit_price - 101.85).abs() < 1e-6);
    assert_eq!(trade.exit_idx, 4);
}
