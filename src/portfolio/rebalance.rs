//! # Rebalancing Planner
//!
//! Turns a (current, target) weight pair into an executable trade list with
//! transaction-cost estimates, aggregate turnover metrics and a qualitative
//! recommendation. Pure arithmetic on position data; no optimizer coupling.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::portfolio::types::{RebalanceSummary, TradeAction, TradeInstruction};

/// Share changes below this quantity are treated as no-ops.
const HOLD_THRESHOLD_SHARES: f64 = 0.01;

/// Qualitative verdict on a rebalancing plan. Thresholds are fixed design
/// constants, not inferred from data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
  Hold,
  HighTurnover,
  StronglyRecommended,
  Recommended,
}

impl Display for Recommendation {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Recommendation::Hold => write!(f, "HOLD: costs may outweigh benefit"),
      Recommendation::HighTurnover => {
        write!(f, "HIGH TURNOVER: consider gradual implementation")
      }
      Recommendation::StronglyRecommended => write!(f, "STRONGLY RECOMMENDED"),
      Recommendation::Recommended => write!(f, "RECOMMENDED"),
    }
  }
}

/// Complete rebalancing assessment for one strategy.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RebalanceReport {
  pub trades: Vec<TradeInstruction>,
  pub summary: RebalanceSummary,
  /// Expected return improvement (%) minus annualized cost impact (%).
  pub net_improvement_pct: f64,
  pub recommendation: Recommendation,
}

/// Compute the per-asset trades that move the portfolio from
/// `current_weights` to `target_weights`.
///
/// All slices are ticker-aligned. Fails fast on mismatched lengths or a
/// non-positive total value.
pub fn plan_trades(
  tickers: &[String],
  current_weights: &[f64],
  target_weights: &[f64],
  current_prices: &[f64],
  current_shares: &[f64],
  total_value: f64,
  transaction_cost_rate: f64,
) -> Result<Vec<TradeInstruction>, EngineError> {
  let n = tickers.len();
  for len in [
    current_weights.len(),
    target_weights.len(),
    current_prices.len(),
    current_shares.len(),
  ] {
    if len != n {
      return Err(EngineError::DimensionMismatch {
        expected: n,
        actual: len,
      });
    }
  }
  if !(total_value > 0.0) {
    return Err(EngineError::invalid_input(format!(
      "non-positive total value {total_value}"
    )));
  }
  if let Some(i) = (0..n).find(|&i| !(current_prices[i] > 0.0)) {
    return Err(EngineError::invalid_input(format!(
      "non-positive price {} for {}",
      current_prices[i], tickers[i]
    )));
  }

  let trades = (0..n)
    .map(|i| {
      let price = current_prices[i];
      let current_value = current_shares[i] * price;
      let target_value = total_value * target_weights[i];
      let target_shares = target_value / price;
      let shares_change = target_shares - current_shares[i];

      let action = if shares_change.abs() < HOLD_THRESHOLD_SHARES {
        TradeAction::Hold
      } else if shares_change > 0.0 {
        TradeAction::Buy
      } else {
        TradeAction::Sell
      };

      let dollar_amount = (target_value - current_value).abs();

      TradeInstruction {
        ticker: tickers[i].clone(),
        current_weight: current_weights[i],
        target_weight: target_weights[i],
        current_shares: current_shares[i],
        target_shares,
        shares_to_trade: shares_change.abs(),
        dollar_amount,
        action,
        transaction_cost: dollar_amount * transaction_cost_rate,
      }
    })
    .collect();

  Ok(trades)
}

/// Aggregate trade value, cost, turnover and action counts.
pub fn summarize(trades: &[TradeInstruction], total_value: f64) -> RebalanceSummary {
  let total_trade_value: f64 = trades.iter().map(|t| t.dollar_amount).sum();
  let total_transaction_cost: f64 = trades.iter().map(|t| t.transaction_cost).sum();

  let count = |action: TradeAction| trades.iter().filter(|t| t.action == action).count();

  RebalanceSummary {
    total_trade_value,
    total_transaction_cost,
    turnover_pct: if total_value > 0.0 {
      total_trade_value / total_value * 100.0
    } else {
      0.0
    },
    num_buys: count(TradeAction::Buy),
    num_sells: count(TradeAction::Sell),
    num_holds: count(TradeAction::Hold),
  }
}

/// Recommendation policy over net improvement (%) and turnover (%).
pub fn recommend(net_improvement_pct: f64, turnover_pct: f64) -> Recommendation {
  if net_improvement_pct < 0.5 {
    Recommendation::Hold
  } else if turnover_pct > 50.0 {
    Recommendation::HighTurnover
  } else if net_improvement_pct > 2.0 {
    Recommendation::StronglyRecommended
  } else {
    Recommendation::Recommended
  }
}

/// Stitch trades, summary and recommendation into one report.
///
/// `expected_return_improvement_pct` is the strategy's return pickup over
/// the current portfolio, in percent; the annualized cost impact is derived
/// from the trade list.
#[allow(clippy::too_many_arguments)]
pub fn rebalance_report(
  tickers: &[String],
  current_weights: &[f64],
  target_weights: &[f64],
  current_prices: &[f64],
  current_shares: &[f64],
  total_value: f64,
  transaction_cost_rate: f64,
  expected_return_improvement_pct: f64,
) -> Result<RebalanceReport, EngineError> {
  let trades = plan_trades(
    tickers,
    current_weights,
    target_weights,
    current_prices,
    current_shares,
    total_value,
    transaction_cost_rate,
  )?;
  let summary = summarize(&trades, total_value);

  let annual_cost_impact_pct = summary.total_transaction_cost / total_value * 100.0;
  let net_improvement_pct = expected_return_improvement_pct - annual_cost_impact_pct;

  Ok(RebalanceReport {
    recommendation: recommend(net_improvement_pct, summary.turnover_pct),
    trades,
    summary,
    net_improvement_pct,
  })
}

/// Split a trade list into `num_periods` equal tranches for gradual
/// execution, the follow-through on a high-turnover verdict. Share,
/// dollar and cost fields are divided per period; weights and actions are
/// carried unchanged. Returns one trade list per period.
pub fn implementation_schedule(
  trades: &[TradeInstruction],
  num_periods: usize,
) -> Vec<Vec<TradeInstruction>> {
  if num_periods == 0 {
    return Vec::new();
  }

  let per_period: Vec<TradeInstruction> = trades
    .iter()
    .map(|t| TradeInstruction {
      shares_to_trade: t.shares_to_trade / num_periods as f64,
      dollar_amount: t.dollar_amount / num_periods as f64,
      transaction_cost: t.transaction_cost / num_periods as f64,
      ..t.clone()
    })
    .collect();

  vec![per_period; num_periods]
}

/// Estimated capital-gains tax per trade, aligned with the trade list.
///
/// Sells owe `(price − cost_basis) × shares_sold × rate` when the gain is
/// positive; buys, holds and losses owe 0. `cost_basis` and
/// `current_prices` are trade-list aligned.
pub fn estimate_tax_impact(
  trades: &[TradeInstruction],
  cost_basis: &[f64],
  current_prices: &[f64],
  capital_gains_rate: f64,
) -> Result<Vec<f64>, EngineError> {
  for len in [cost_basis.len(), current_prices.len()] {
    if len != trades.len() {
      return Err(EngineError::DimensionMismatch {
        expected: trades.len(),
        actual: len,
      });
    }
  }

  let taxes = trades
    .iter()
    .enumerate()
    .map(|(i, t)| {
      if t.action != TradeAction::Sell {
        return 0.0;
      }
      let gain = (current_prices[i] - cost_basis[i]) * t.shares_to_trade;
      if gain > 0.0 {
        gain * capital_gains_rate
      } else {
        0.0
      }
    })
    .collect();

  Ok(taxes)
}
