//! # markowitz-rs
//!
//! $$
//! \mathbf{w}^\* = \arg\min_{\mathbf{w}\in\Delta^{n-1}}
//! \mathbf{w}^\top \Sigma\, \mathbf{w}
//! \quad\text{s.t.}\quad \mathbf{w}^\top \mu = r^\*
//! $$
//!
//! Mean-variance portfolio analytics for a small fixed basket of assets:
//! annualized return/covariance statistics from a price panel, long-only
//! maximum-Sharpe and minimum-volatility allocations, the efficient
//! frontier, Monte Carlo visualization samples and rebalancing trade plans.
//!
//! The engine is pure and synchronous: it performs no I/O, holds no shared
//! state between calls, and surfaces every failure as an
//! [`error::EngineError`]. Data loading, dashboards and report formatting
//! are collaborators outside this crate.

pub mod data;
pub mod error;
pub mod portfolio;
pub mod stats;

pub use data::AssetInfo;
pub use data::Holding;
pub use data::PanelCache;
pub use data::PricePanel;
pub use data::PriceSeries;
pub use error::EngineError;
pub use portfolio::MarkowitzAnalyzer;
pub use portfolio::MarkowitzConfig;
