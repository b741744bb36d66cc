//! # Markowitz Engine
//!
//! $$
//! \mathbf{w}^\* = \operatorname{Optimize}(\mu, \Sigma)
//! $$
//!
//! High-level orchestration: derives statistics from a price panel, solves
//! the optimal portfolios, traces the frontier and samples the Monte Carlo
//! cloud in one pass. Collaborating dashboards and report generators
//! consume the assembled [`MarkowitzAnalysis`] as-is.

use serde::{Deserialize, Serialize};

use crate::data::PricePanel;
use crate::error::EngineError;
use crate::portfolio::types::{EfficientFrontier, OptimalPortfolio, PortfolioPoint};
use crate::portfolio::{frontier, math, montecarlo, optimizer};
use crate::stats::{self, risk};

/// Runtime configuration for [`MarkowitzAnalyzer`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MarkowitzConfig {
  /// Annualized risk-free rate used in Sharpe computations.
  pub risk_free: f64,
  /// Number of target returns swept for the frontier.
  pub frontier_points: usize,
  /// Number of random portfolios in the Monte Carlo cloud.
  pub mc_samples: usize,
  /// Proportional transaction cost applied by rebalancing plans.
  pub transaction_cost_rate: f64,
}

impl Default for MarkowitzConfig {
  fn default() -> Self {
    Self {
      risk_free: 0.04,
      frontier_points: 100,
      mc_samples: 5000,
      transaction_cost_rate: 0.001,
    }
  }
}

/// Per-asset risk/return metrics for frontier overlays.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssetMetric {
  pub ticker: String,
  pub expected_return: f64,
  pub volatility: f64,
}

/// Everything a reporting or visualization collaborator needs from one
/// analysis run over an immutable price panel.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MarkowitzAnalysis {
  pub tickers: Vec<String>,
  pub expected_returns: Vec<f64>,
  pub covariance: Vec<Vec<f64>>,
  pub current: OptimalPortfolio,
  pub max_sharpe: OptimalPortfolio,
  pub min_volatility: OptimalPortfolio,
  pub frontier: EfficientFrontier,
  pub random_portfolios: Vec<PortfolioPoint>,
  pub asset_metrics: Vec<AssetMetric>,
}

/// One row of a strategy comparison table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StrategyComparison {
  pub strategy: String,
  pub point: PortfolioPoint,
  /// Percentage-point return pickup over the current portfolio.
  pub return_improvement_pct: f64,
  /// Percentage-point volatility change versus the current portfolio.
  pub risk_change_pct: f64,
  pub sharpe_improvement: f64,
}

/// Stateless single entry point for full mean-variance analyses.
#[derive(Clone, Debug, Default)]
pub struct MarkowitzAnalyzer {
  config: MarkowitzConfig,
}

impl MarkowitzAnalyzer {
  pub fn new(config: MarkowitzConfig) -> Self {
    Self { config }
  }

  pub fn config(&self) -> &MarkowitzConfig {
    &self.config
  }

  /// Run the complete analysis for a panel and the portfolio's current
  /// weights (panel-ticker aligned).
  pub fn analyze(
    &self,
    panel: &PricePanel,
    current_weights: &[f64],
  ) -> Result<MarkowitzAnalysis, EngineError> {
    let rf = self.config.risk_free;

    let mu = stats::expected_returns(panel)?;
    let cov = stats::covariance(panel)?;
    let daily = stats::daily_returns(panel)?;

    let current = OptimalPortfolio {
      weights: current_weights.to_vec(),
      point: math::evaluate(current_weights, &mu, &cov, rf)?,
    };

    let max_sharpe_weights = optimizer::max_sharpe(&mu, &cov, rf)?;
    let max_sharpe = OptimalPortfolio {
      point: math::evaluate(&max_sharpe_weights, &mu, &cov, rf)?,
      weights: max_sharpe_weights,
    };

    let min_vol_weights = optimizer::min_volatility(&mu, &cov)?;
    let min_volatility = OptimalPortfolio {
      point: math::evaluate(&min_vol_weights, &mu, &cov, rf)?,
      weights: min_vol_weights,
    };

    let frontier = frontier::build(&mu, &cov, rf, self.config.frontier_points)?;
    let random_portfolios = montecarlo::sample(&mu, &cov, rf, self.config.mc_samples)?;

    let asset_metrics = panel
      .tickers()
      .iter()
      .zip(mu.iter().zip(daily.iter()))
      .map(|(ticker, (&expected_return, returns))| AssetMetric {
        ticker: ticker.clone(),
        expected_return,
        volatility: risk::annualized_volatility(returns),
      })
      .collect();

    Ok(MarkowitzAnalysis {
      tickers: panel.tickers().to_vec(),
      expected_returns: mu,
      covariance: cov,
      current,
      max_sharpe,
      min_volatility,
      frontier,
      random_portfolios,
      asset_metrics,
    })
  }
}

/// Improvement table of named strategies against the current portfolio.
/// The current portfolio is included as the first row with zero deltas.
pub fn compare_strategies(
  current: &PortfolioPoint,
  strategies: &[(String, PortfolioPoint)],
) -> Vec<StrategyComparison> {
  let mut rows = vec![StrategyComparison {
    strategy: "Current".to_string(),
    point: *current,
    return_improvement_pct: 0.0,
    risk_change_pct: 0.0,
    sharpe_improvement: 0.0,
  }];

  for (name, point) in strategies {
    rows.push(StrategyComparison {
      strategy: name.clone(),
      point: *point,
      return_improvement_pct: (point.expected_return - current.expected_return) * 100.0,
      risk_change_pct: (point.volatility - current.volatility) * 100.0,
      sharpe_improvement: point.sharpe - current.sharpe,
    });
  }

  rows
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;
  use crate::data::PriceSeries;

  fn sample_panel() -> PricePanel {
    let prices: [(&str, &[f64]); 3] = [
      (
        "QQQ",
        &[
          400.0, 404.1, 401.8, 407.3, 410.0, 406.2, 412.5, 415.1, 411.0, 418.2, 421.0, 417.5,
        ],
      ),
      (
        "TLT",
        &[
          95.0, 94.6, 95.2, 94.8, 95.5, 95.1, 94.7, 95.3, 95.8, 95.4, 96.0, 95.6,
        ],
      ),
      (
        "IAU",
        &[
          38.0, 38.3, 38.1, 38.6, 38.4, 38.9, 38.7, 39.1, 38.8, 39.3, 39.0, 39.5,
        ],
      ),
    ];

    let series: Vec<PriceSeries> = prices
      .iter()
      .map(|(ticker, closes)| {
        let obs = closes
          .iter()
          .enumerate()
          .map(|(i, &p)| {
            (
              NaiveDate::from_ymd_opt(2024, 3, 1).unwrap() + chrono::Days::new(i as u64),
              p,
            )
          })
          .collect();
        PriceSeries::new(*ticker, obs).unwrap()
      })
      .collect();

    PricePanel::from_series(&series).unwrap()
  }

  #[test]
  fn analyze_assembles_a_consistent_result() {
    let analyzer = MarkowitzAnalyzer::new(MarkowitzConfig {
      frontier_points: 10,
      mc_samples: 200,
      ..MarkowitzConfig::default()
    });

    let panel = sample_panel();
    let uniform = vec![1.0 / 3.0; 3];
    let analysis = analyzer.analyze(&panel, &uniform).unwrap();

    assert_eq!(analysis.tickers.len(), 3);
    assert_eq!(analysis.expected_returns.len(), 3);
    assert_eq!(analysis.covariance.len(), 3);
    assert_eq!(analysis.random_portfolios.len(), 200);
    assert_eq!(analysis.asset_metrics.len(), 3);
    assert!(analysis.frontier.points.len() + analysis.frontier.skipped == 10);

    // The optimum dominates the uniform baseline on each objective.
    assert!(analysis.max_sharpe.point.sharpe >= analysis.current.point.sharpe - 1e-9);
    assert!(analysis.min_volatility.point.volatility <= analysis.current.point.volatility + 1e-9);
  }

  #[test]
  fn max_sharpe_dominates_random_portfolios() {
    let analyzer = MarkowitzAnalyzer::new(MarkowitzConfig {
      frontier_points: 2,
      mc_samples: 100,
      ..MarkowitzConfig::default()
    });

    let panel = sample_panel();
    let analysis = analyzer.analyze(&panel, &[1.0 / 3.0; 3]).unwrap();

    for random in &analysis.random_portfolios {
      assert!(analysis.max_sharpe.point.sharpe >= random.sharpe - 1e-4);
    }
  }

  #[test]
  fn analysis_serializes_for_reporting_collaborators() -> anyhow::Result<()> {
    let analyzer = MarkowitzAnalyzer::new(MarkowitzConfig {
      frontier_points: 5,
      mc_samples: 20,
      ..MarkowitzConfig::default()
    });

    let analysis = analyzer.analyze(&sample_panel(), &[1.0 / 3.0; 3])?;
    let json = serde_json::to_value(&analysis)?;

    assert!(json["tickers"].is_array());
    assert!(json["frontier"]["points"].is_array());
    assert!(json["max_sharpe"]["weights"].is_array());

    Ok(())
  }

  #[test]
  fn comparison_table_measures_deltas_against_current() {
    let current = PortfolioPoint {
      expected_return: 0.08,
      volatility: 0.15,
      sharpe: 0.27,
    };
    let better = PortfolioPoint {
      expected_return: 0.10,
      volatility: 0.14,
      sharpe: 0.43,
    };

    let rows = compare_strategies(&current, &[("Max Sharpe".to_string(), better)]);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].strategy, "Current");
    assert_eq!(rows[0].return_improvement_pct, 0.0);
    assert!((rows[1].return_improvement_pct - 2.0).abs() < 1e-9);
    assert!((rows[1].risk_change_pct - (-1.0)).abs() < 1e-9);
    assert!((rows[1].sharpe_improvement - 0.16).abs() < 1e-9);
  }
}
