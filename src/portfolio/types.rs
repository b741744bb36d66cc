//! # Portfolio Types
//!
//! $$
//! \mathbf{w}^\*=\arg\max_{\mathbf{w}} \frac{\mathbb E[R_p]-r_f}{\sigma_p}
//! $$
//!
//! Shared result containers for portfolio evaluation, frontier sweeps and
//! rebalancing plans.

use serde::{Deserialize, Serialize};

/// Risk/return profile of one candidate allocation against a fixed
/// (expected returns, covariance) pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioPoint {
  /// Annualized expected portfolio return.
  pub expected_return: f64,
  /// Annualized portfolio standard deviation.
  pub volatility: f64,
  /// `(expected_return - risk_free) / volatility`, 0 at zero volatility.
  pub sharpe: f64,
}

/// Optimal weights together with their evaluated profile.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct OptimalPortfolio {
  pub weights: Vec<f64>,
  pub point: PortfolioPoint,
}

/// Minimum-volatility portfolios along a target-return sweep, in ascending
/// target order. `skipped` counts targets whose solve did not converge;
/// those points are absent from `points` by design.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EfficientFrontier {
  pub points: Vec<PortfolioPoint>,
  pub skipped: usize,
}

/// Trade direction for one rebalancing instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeAction {
  Buy,
  Sell,
  Hold,
}

/// One per-asset rebalancing instruction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TradeInstruction {
  pub ticker: String,
  pub current_weight: f64,
  pub target_weight: f64,
  pub current_shares: f64,
  pub target_shares: f64,
  /// Absolute share quantity to transact.
  pub shares_to_trade: f64,
  /// Absolute dollar value of the trade.
  pub dollar_amount: f64,
  pub action: TradeAction,
  pub transaction_cost: f64,
}

/// Aggregate metrics over a trade list.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct RebalanceSummary {
  pub total_trade_value: f64,
  pub total_transaction_cost: f64,
  pub turnover_pct: f64,
  pub num_buys: usize,
  pub num_sells: usize,
  pub num_holds: usize,
}
