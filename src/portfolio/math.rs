//! # Portfolio Math
//!
//! $$
//! \mu_p = \mathbf{w}^\top \mu,\qquad
//! \sigma_p = \sqrt{\mathbf{w}^\top \Sigma\, \mathbf{w}}
//! $$
//!
//! Pure evaluation of a weight vector against fixed return and covariance
//! inputs.

use crate::error::EngineError;
use crate::portfolio::types::PortfolioPoint;

/// Tolerance on `sum(weights) == 1`.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
  a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

pub(crate) fn mat_vec_mul(mat: &[Vec<f64>], v: &[f64]) -> Vec<f64> {
  mat
    .iter()
    .map(|row| row.iter().zip(v.iter()).map(|(a, b)| a * b).sum())
    .collect()
}

pub(crate) fn check_dimensions(
  weights: &[f64],
  returns: &[f64],
  cov: &[Vec<f64>],
) -> Result<(), EngineError> {
  let n = returns.len();
  if weights.len() != n {
    return Err(EngineError::DimensionMismatch {
      expected: n,
      actual: weights.len(),
    });
  }
  if cov.len() != n {
    return Err(EngineError::DimensionMismatch {
      expected: n,
      actual: cov.len(),
    });
  }
  if let Some(row) = cov.iter().find(|row| row.len() != n) {
    return Err(EngineError::DimensionMismatch {
      expected: n,
      actual: row.len(),
    });
  }
  Ok(())
}

pub(crate) fn check_weight_sum(weights: &[f64]) -> Result<(), EngineError> {
  let sum: f64 = weights.iter().sum();
  if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
    return Err(EngineError::InvalidWeights { sum });
  }
  Ok(())
}

/// Variance `wᵀΣw` with tiny negative numerical noise clamped to 0.
pub(crate) fn portfolio_variance(weights: &[f64], cov: &[Vec<f64>]) -> f64 {
  dot(weights, &mat_vec_mul(cov, weights)).max(0.0)
}

pub(crate) fn sharpe(expected_return: f64, volatility: f64, risk_free: f64) -> f64 {
  if volatility == 0.0 {
    0.0
  } else {
    (expected_return - risk_free) / volatility
  }
}

/// Evaluate a weight vector. Deterministic, no side effects.
///
/// Fails fast on mismatched dimensions or a weight sum outside tolerance;
/// weights are never silently renormalized.
pub fn evaluate(
  weights: &[f64],
  returns: &[f64],
  cov: &[Vec<f64>],
  risk_free: f64,
) -> Result<PortfolioPoint, EngineError> {
  check_dimensions(weights, returns, cov)?;
  check_weight_sum(weights)?;

  let expected_return = dot(weights, returns);
  let volatility = portfolio_variance(weights, cov).sqrt();

  Ok(PortfolioPoint {
    expected_return,
    volatility,
    sharpe: sharpe(expected_return, volatility, risk_free),
  })
}
