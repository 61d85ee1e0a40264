//! Scenarios 5 (Monte Carlo) and 6 (global equity chaining) from the
//! simulator contract — the two end-to-end scenarios owned by this crate.

use backtest_runner::config::MonteCarloConfig;
use backtest_runner::global_equity::chain;
use backtest_runner::montecarlo;

/// Scenario 5: pnls=[+100,+50,-200,+10], S=1000, init_cash=10000. Percentile
/// curves have length 5 (T+1), p50[0]=10000, final balance p5 <= p95.
#[test]
fn scenario_5_monte_carlo_with_four_trades() {
    let pnls = vec![100.0, 50.0, -200.0, 10.0];
    let config = MonteCarloConfig { simulations: 1000, seed: 7 };
    let result = montecarlo::run(&pnls, 10_000.0, &config).unwrap();

    for curve in &result.percentiles {
        assert_eq!(curve.points.len(), 5);
    }
    let p50 = result.percentiles.iter().find(|c| c.q == 50).unwrap();
    assert_eq!(p50.points[0].value, 10_000.0);

    let p5 = result.final_balance_percentiles.iter().find(|f| f.q == 5).unwrap().value;
    let p95 = result.final_balance_percentiles.iter().find(|f| f.q == 95).unwrap().value;
    assert!(p5 <= p95);
}

/// Scenario 6: day A ends at 10100, day B raw equity [10000,10050,10080].
/// Global equity tail: [...,10100,10100,10150,10180]; drawdown stays <= 0.
#[test]
fn scenario_6_two_day_chaining() {
    let day_a = vec![10_000.0, 10_050.0, 10_100.0];
    let day_b = vec![10_000.0, 10_050.0, 10_080.0];
    let (equity, drawdown) = chain(&[day_a, day_b]);

    let values: Vec<f64> = equity.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![10_000.0, 10_050.0, 10_100.0, 10_100.0, 10_150.0, 10_180.0]);
    assert!(drawdown.iter().all(|p| p.value <= 0.0));
}
