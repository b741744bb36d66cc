//! # Efficient Frontier
//!
//! $$
//! \sigma^\*(r) = \min_{\mathbf{w}\in\Delta^{n-1},\ \mathbf{w}^\top\mu = r}
//! \sqrt{\mathbf{w}^\top\Sigma\,\mathbf{w}}
//! $$
//!
//! Sweeps a linearly spaced target-return grid and collects the
//! minimum-volatility solution at each target. Targets whose solve does not
//! converge are skipped without aborting the sweep; only a counter and a
//! debug trace record them.

use tracing::debug;

use crate::error::EngineError;
use crate::portfolio::math::evaluate;
use crate::portfolio::optimizer::min_volatility_for_target;
use crate::portfolio::types::EfficientFrontier;

/// `num_points` values linearly spaced over `[min, max]` inclusive.
fn linspace(min: f64, max: f64, num_points: usize) -> Vec<f64> {
  match num_points {
    0 => Vec::new(),
    1 => vec![min],
    _ => {
      let step = (max - min) / (num_points - 1) as f64;
      (0..num_points).map(|i| min + step * i as f64).collect()
    }
  }
}

/// Trace the efficient frontier across the achievable return range.
///
/// Points are ordered by ascending target return. When every asset carries
/// nearly the same expected return the grid collapses and the frontier
/// degenerates to a single point, which is expected rather than an error.
pub fn build(
  returns: &[f64],
  cov: &[Vec<f64>],
  risk_free: f64,
  num_points: usize,
) -> Result<EfficientFrontier, EngineError> {
  if returns.is_empty() {
    return Err(EngineError::invalid_input("no assets"));
  }

  let min_return = returns.iter().cloned().fold(f64::INFINITY, f64::min);
  let max_return = returns.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

  let mut frontier = EfficientFrontier::default();
  for target in linspace(min_return, max_return, num_points) {
    match min_volatility_for_target(returns, cov, target) {
      Ok(weights) => {
        let point = evaluate(&weights, returns, cov, risk_free)?;
        frontier.points.push(point);
      }
      Err(err) => {
        debug!(target_return = target, %err, "frontier point skipped");
        frontier.skipped += 1;
      }
    }
  }

  Ok(frontier)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn linspace_covers_both_endpoints() {
    let grid = linspace(0.05, 0.15, 5);

    assert_eq!(grid.len(), 5);
    assert!((grid[0] - 0.05).abs() < 1e-12);
    assert!((grid[4] - 0.15).abs() < 1e-12);
  }

  #[test]
  fn frontier_returns_are_non_decreasing() {
    let mu = vec![0.06, 0.10, 0.14];
    let cov = vec![
      vec![0.03, 0.005, 0.0],
      vec![0.005, 0.08, 0.01],
      vec![0.0, 0.01, 0.15],
    ];

    let frontier = build(&mu, &cov, 0.02, 15).unwrap();
    assert!(!frontier.points.is_empty());

    for pair in frontier.points.windows(2) {
      // Achieved returns track the ascending target grid within the
      // per-point target tolerance.
      assert!(pair[1].expected_return >= pair[0].expected_return - 2e-3);
    }
  }

  #[test]
  fn degenerate_equal_returns_collapse_to_one_point() {
    let mu = vec![0.08, 0.08];
    let cov = vec![vec![0.04, 0.0], vec![0.0, 0.04]];

    let frontier = build(&mu, &cov, 0.02, 1).unwrap();
    assert!(frontier.points.len() <= 1);
    if let Some(point) = frontier.points.first() {
      assert!((point.expected_return - 0.08).abs() < 1e-6);
    }
  }

  #[test]
  fn frontier_dominates_random_feasible_portfolios() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mu = vec![0.06, 0.10, 0.14];
    let cov = vec![
      vec![0.03, 0.005, 0.0],
      vec![0.005, 0.08, 0.01],
      vec![0.0, 0.01, 0.15],
    ];
    let frontier = build(&mu, &cov, 0.02, 21).unwrap();

    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
      let raw: Vec<f64> = (0..3).map(|_| rng.gen::<f64>()).collect();
      let sum: f64 = raw.iter().sum();
      let w: Vec<f64> = raw.iter().map(|&x| x / sum).collect();
      let random = evaluate(&w, &mu, &cov, 0.02).unwrap();

      // Against the frontier point closest in return, a random feasible
      // portfolio can never be meaningfully less volatile.
      let nearest = frontier
        .points
        .iter()
        .min_by(|a, b| {
          (a.expected_return - random.expected_return)
            .abs()
            .total_cmp(&(b.expected_return - random.expected_return).abs())
        })
        .unwrap();
      if (nearest.expected_return - random.expected_return).abs() < 0.005 {
        assert!(random.volatility >= nearest.volatility - 0.01);
      }
    }
  }

  #[test]
  fn sweep_survives_infeasible_points() {
    // A grid wider than one point over assets with distinct returns: even
    // if corner targets fail, the interior must produce points.
    let mu = vec![0.05, 0.12];
    let cov = vec![vec![0.02, 0.0], vec![0.0, 0.10]];

    let frontier = build(&mu, &cov, 0.02, 11).unwrap();
    assert!(frontier.points.len() + frontier.skipped == 11);
    assert!(!frontier.points.is_empty());
  }
}
