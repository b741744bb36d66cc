//! # Stats
//!
//! $$
//! \mu = 252\,\overline{r},\qquad \Sigma = 252\,\operatorname{cov}(r)
//! $$
//!
//! Return statistics derived from price panels and standalone risk metrics.

pub mod returns;
pub mod risk;

pub use returns::TRADING_DAYS;
pub use returns::correlation;
pub use returns::covariance;
pub use returns::daily_returns;
pub use returns::expected_returns;
pub use risk::Drawdown;
pub use risk::annualized_return;
pub use risk::annualized_volatility;
pub use risk::beta;
pub use risk::cvar;
pub use risk::downside_deviation;
pub use risk::max_drawdown;
pub use risk::sharpe_ratio;
pub use risk::sortino_ratio;
pub use risk::total_return;
pub use risk::value_at_risk;
