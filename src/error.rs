//! # Errors
//!
//! Engine-level error taxonomy. Per-point frontier failures are not errors
//! and never surface through this type.

use thiserror::Error;

/// Errors produced by the analytics engine.
#[derive(Error, Debug)]
pub enum EngineError {
  /// Fewer than 2 usable aligned price rows remain after the inner join.
  #[error("insufficient price data: {rows} aligned row(s), need at least 2")]
  InsufficientData { rows: usize },

  /// Solver non-convergence or infeasible constraint set.
  #[error("optimization failed: {reason}")]
  Optimization { reason: String },

  /// Mismatched input lengths between weights, returns and covariance.
  #[error("dimension mismatch: expected {expected}, got {actual}")]
  DimensionMismatch { expected: usize, actual: usize },

  /// Weight vector does not sum to 1 within tolerance.
  #[error("invalid weights: sum {sum} not within tolerance of 1")]
  InvalidWeights { sum: f64 },

  /// Malformed input data (unordered dates, non-positive prices, ...).
  #[error("invalid input: {reason}")]
  InvalidInput { reason: String },
}

impl EngineError {
  pub(crate) fn optimization(reason: impl Into<String>) -> Self {
    Self::Optimization {
      reason: reason.into(),
    }
  }

  pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
    Self::InvalidInput {
      reason: reason.into(),
    }
  }
}
