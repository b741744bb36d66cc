//! # Portfolio
//!
//! $$
//! \sigma_p^2 = \mathbf{w}^\top \Sigma \mathbf{w}
//! $$
//!
//! Mean-variance portfolio evaluation, optimization, frontier construction,
//! Monte Carlo context sampling and rebalancing plans.

pub mod engine;
pub mod frontier;
pub mod math;
pub mod montecarlo;
pub mod optimizer;
pub mod rebalance;
pub mod types;

pub use engine::AssetMetric;
pub use engine::MarkowitzAnalysis;
pub use engine::MarkowitzAnalyzer;
pub use engine::MarkowitzConfig;
pub use engine::StrategyComparison;
pub use engine::compare_strategies;
pub use frontier::build as build_frontier;
pub use math::WEIGHT_SUM_TOLERANCE;
pub use math::evaluate;
pub use montecarlo::sample as sample_portfolios;
pub use optimizer::apply_constraints;
pub use optimizer::max_sharpe;
pub use optimizer::min_volatility;
pub use optimizer::min_volatility_for_target;
pub use rebalance::RebalanceReport;
pub use rebalance::Recommendation;
pub use rebalance::estimate_tax_impact;
pub use rebalance::implementation_schedule;
pub use rebalance::plan_trades;
pub use rebalance::rebalance_report;
pub use rebalance::recommend;
pub use rebalance::summarize;
pub use types::EfficientFrontier;
pub use types::OptimalPortfolio;
pub use types::PortfolioPoint;
pub use types::RebalanceSummary;
pub use types::TradeAction;
pub use types::TradeInstruction;
