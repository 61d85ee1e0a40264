//! Monte Carlo Engine (C7, §4.7): a trade-PnL-shuffle bootstrap. This is the
//! only component in the workspace that touches an RNG, which is why it
//! lives here rather than in `backtest_core`.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::MonteCarloConfig;
use crate::error::RunError;
use crate::result::TimeValue;

const QUANTILES: [u8; 5] = [5, 25, 50, 75, 95];
const SYNTHETIC_START: i64 = 1_000_000_000;
const SYNTHETIC_SPACING: i64 = 86_400;
const RUIN_FRACTION: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileCurve {
    pub q: u8,
    pub points: Vec<TimeValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalBalancePercentile {
    pub q: u8,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloResult {
    pub percentiles: Vec<PercentileCurve>,
    pub worst_drawdown: f64,
    pub median_drawdown: f64,
    pub ruin_probability: f64,
    pub final_balance_percentiles: Vec<FinalBalancePercentile>,
}

/// Run `config.simulations` shuffles of `pnls`, each producing a cumulative
/// equity curve of length `pnls.len() + 1` starting at `init_cash`.
///
/// Sub-seeds are derived from `config.seed` via BLAKE3 so that two calls with
/// the same seed and pnl vector are bit-identical regardless of call order
/// or thread count, even if the driver runs simulations in parallel.
pub fn run(pnls: &[f64], init_cash: f64, config: &MonteCarloConfig) -> Result<MonteCarloResult, RunError> {
    config.validate()?;
    if pnls.is_empty() {
        return Err(RunError::EmptyPnlList);
    }
    tracing::debug!(seed = config.seed, simulations = config.simulations, "monte carlo run starting");

    let simulations = config.simulations as usize;
    let curves: Vec<Vec<f64>> = (0..simulations)
        .map(|i| simulate_once(pnls, init_cash, sub_seed(config.seed, i as u64)))
        .collect();

    let curve_len = pnls.len() + 1;
    let percentiles = QUANTILES
        .iter()
        .map(|&q| PercentileCurve {
            q,
            points: (0..curve_len)
                .map(|j| {
                    let mut column: Vec<f64> = curves.iter().map(|c| c[j]).collect();
                    column.sort_by(|a, b| a.partial_cmp(b).unwrap());
                    TimeValue {
                        time: SYNTHETIC_START + j as i64 * SYNTHETIC_SPACING,
                        value: percentile_sorted(&column, q as f64),
                    }
                })
                .collect(),
        })
        .collect();

    let per_sim_drawdowns: Vec<f64> = curves.iter().map(|c| max_drawdown_pct(c)).collect();
    let mut sorted_drawdowns = per_sim_drawdowns.clone();
    sorted_drawdowns.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let worst_drawdown = sorted_drawdowns.first().copied().unwrap_or(0.0);
    let median_drawdown = percentile_sorted(&sorted_drawdowns, 50.0);

    let ruin_threshold = RUIN_FRACTION * init_cash;
    let ruined = curves.iter().filter(|c| c.iter().any(|&v| v < ruin_threshold)).count();
    let ruin_probability = 100.0 * ruined as f64 / simulations as f64;

    let mut finals: Vec<f64> = curves.iter().map(|c| *c.last().unwrap()).collect();
    finals.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let final_balance_percentiles = QUANTILES
        .iter()
        .map(|&q| FinalBalancePercentile { q, value: percentile_sorted(&finals, q as f64) })
        .collect();

    Ok(MonteCarloResult {
        percentiles,
        worst_drawdown,
        median_drawdown,
        ruin_probability,
        final_balance_percentiles,
    })
}

fn simulate_once(pnls: &[f64], init_cash: f64, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut shuffled = pnls.to_vec();
    shuffled.shuffle(&mut rng);

    let mut curve = Vec::with_capacity(shuffled.len() + 1);
    curve.push(init_cash);
    let mut running = init_cash;
    for pnl in shuffled {
        running += pnl;
        curve.push(running);
    }
    curve
}

/// BLAKE3 of `seed:index`, truncated to the first 8 bytes — deterministic,
/// stable across platforms, independent of evaluation order.
fn sub_seed(seed: u64, index: u64) -> u64 {
    let input = format!("{seed}:{index}");
    let hash = blake3::hash(input.as_bytes());
    u64::from_le_bytes(hash.as_bytes()[0..8].try_into().unwrap())
}

fn max_drawdown_pct(curve: &[f64]) -> f64 {
    let mut running_max = curve[0];
    let mut worst = 0.0_f64;
    for &v in curve {
        if v > running_max {
            running_max = v;
        }
        if running_max > 0.0 {
            let dd = (v - running_max) / running_max * 100.0;
            if dd < worst {
                worst = dd;
            }
        }
    }
    worst
}

/// Linear-interpolation percentile over an already-sorted slice, `p` in `[0,100]`.
fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let frac = rank - lower as f64;
    sorted[lower] * (1.0 - frac) + sorted[upper] * frac
}
