//! # Monte Carlo Sampling
//!
//! Random feasible portfolios for visualization context around the
//! frontier. Draws are uniform in `[0, 1)` per asset and normalized to sum
//! to 1, which biases the sample toward the simplex centroid and
//! undersamples single-asset corners; downstream scatter plots are
//! calibrated to exactly that distribution, so it is preserved as-is.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::EngineError;
use crate::portfolio::math::evaluate;
use crate::portfolio::types::PortfolioPoint;

fn random_weights<R: Rng>(rng: &mut R, n: usize) -> Vec<f64> {
  let raw: Vec<f64> = (0..n).map(|_| rng.gen::<f64>()).collect();
  let sum: f64 = raw.iter().sum();

  if sum < 1e-15 {
    vec![1.0 / n as f64; n]
  } else {
    raw.iter().map(|&w| w / sum).collect()
  }
}

/// Evaluate `count` independent random feasible portfolios.
///
/// Each call reseeds its own RNG, so two calls never replay the same draw
/// sequence. Used only for scatter context, never for optimization.
pub fn sample(
  returns: &[f64],
  cov: &[Vec<f64>],
  risk_free: f64,
  count: usize,
) -> Result<Vec<PortfolioPoint>, EngineError> {
  if returns.is_empty() {
    return Err(EngineError::invalid_input("no assets"));
  }

  let mut rng = StdRng::from_entropy();
  let n = returns.len();

  (0..count)
    .map(|_| {
      let weights = random_weights(&mut rng, n);
      evaluate(&weights, returns, cov, risk_free)
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn inputs() -> (Vec<f64>, Vec<Vec<f64>>) {
    (
      vec![0.08, 0.10, 0.12],
      vec![
        vec![0.04, 0.01, 0.00],
        vec![0.01, 0.09, 0.02],
        vec![0.00, 0.02, 0.16],
      ],
    )
  }

  #[test]
  fn sample_produces_requested_count() {
    let (mu, cov) = inputs();
    let points = sample(&mu, &cov, 0.02, 250).unwrap();

    assert_eq!(points.len(), 250);
  }

  #[test]
  fn sampled_points_stay_inside_asset_return_hull() {
    let (mu, cov) = inputs();
    let points = sample(&mu, &cov, 0.02, 500).unwrap();

    for point in &points {
      assert!(point.expected_return >= 0.08 - 1e-9);
      assert!(point.expected_return <= 0.12 + 1e-9);
      assert!(point.volatility >= 0.0);
    }
  }

  #[test]
  fn successive_calls_draw_different_sequences() {
    let (mu, cov) = inputs();

    let first = sample(&mu, &cov, 0.02, 10).unwrap();
    let second = sample(&mu, &cov, 0.02, 10).unwrap();

    // Each call seeds its own RNG from entropy; ten identical draws in a
    // row would mean the sequence was replayed.
    let replayed = first
      .iter()
      .zip(second.iter())
      .all(|(a, b)| a.expected_return == b.expected_return);
    assert!(!replayed);
  }

  #[test]
  fn random_weights_sum_to_one() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
      let w = random_weights(&mut rng, 5);
      let sum: f64 = w.iter().sum();
      assert!((sum - 1.0).abs() < 1e-12);
      assert!(w.iter().all(|&x| x >= 0.0));
    }
  }
}
