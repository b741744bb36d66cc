//! # Optimizer
//!
//! $$
//! \min_{\mathbf{w}\in\Delta^{n-1}} \sigma_p(\mathbf{w})
//! \quad\text{and}\quad
//! \max_{\mathbf{w}\in\Delta^{n-1}} \frac{\mu_p(\mathbf{w})-r_f}{\sigma_p(\mathbf{w})}
//! $$
//!
//! Long-only mean-variance solvers. The simplex constraint (`0 ≤ wᵢ ≤ 1`,
//! `Σw = 1`) is enforced by softmax reparameterization, so every candidate
//! the solver visits is feasible; the target-return equality is handled by a
//! quadratic penalty and verified after the solve. Each call is stateless.

use argmin::core::{CostFunction, Executor};
use argmin::solver::neldermead::NelderMead;

use crate::error::EngineError;
use crate::portfolio::math::{check_dimensions, check_weight_sum, dot, portfolio_variance, sharpe};

const MAX_ITERS: u64 = 5000;
const SD_TOLERANCE: f64 = 1e-8;
const TARGET_PENALTY: f64 = 1e3;

/// Accepted gap between achieved and requested return in
/// [`min_volatility_for_target`]. A solve further off-target than this is
/// treated as non-convergence.
pub const TARGET_TOLERANCE: f64 = 1e-3;

fn softmax(x: &[f64]) -> Vec<f64> {
  let max_x = x.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
  let exps: Vec<f64> = x.iter().map(|&v| (v - max_x).exp()).collect();
  let sum: f64 = exps.iter().sum();

  if sum < 1e-15 {
    vec![1.0 / x.len() as f64; x.len()]
  } else {
    exps.iter().map(|&e| e / sum).collect()
  }
}

/// Initial simplex around the origin; `softmax(0) = 1/n` is the uniform
/// starting portfolio.
fn initial_simplex(n: usize) -> Vec<Vec<f64>> {
  let x0 = vec![0.0; n];
  let mut simplex = Vec::with_capacity(n + 1);
  simplex.push(x0.clone());
  for i in 0..n {
    let mut point = x0.clone();
    point[i] = 1.0;
    simplex.push(point);
  }
  simplex
}

fn validate_inputs(returns: &[f64], cov: &[Vec<f64>]) -> Result<(), EngineError> {
  if returns.is_empty() {
    return Err(EngineError::invalid_input("no assets"));
  }
  check_dimensions(returns, returns, cov)
}

struct SimplexCost<F: Fn(&[f64]) -> f64> {
  objective: F,
}

impl<F: Fn(&[f64]) -> f64> CostFunction for SimplexCost<F> {
  type Param = Vec<f64>;
  type Output = f64;

  fn cost(&self, x: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
    Ok((self.objective)(&softmax(x)))
  }
}

/// Run Nelder-Mead on the reparameterized objective; any solver failure or
/// non-finite best cost surfaces as [`EngineError::Optimization`].
fn solve<F: Fn(&[f64]) -> f64>(n: usize, objective: F) -> Result<Vec<f64>, EngineError> {
  let cost = SimplexCost { objective };

  let solver = NelderMead::new(initial_simplex(n))
    .with_sd_tolerance(SD_TOLERANCE)
    .map_err(|e| EngineError::optimization(format!("solver setup: {e}")))?;

  let res = Executor::new(cost, solver)
    .configure(|state| state.max_iters(MAX_ITERS))
    .run()
    .map_err(|e| EngineError::optimization(format!("solver run: {e}")))?;

  if !res.state.best_cost.is_finite() {
    return Err(EngineError::optimization("non-finite objective at optimum"));
  }

  let best_x = res
    .state
    .best_param
    .ok_or_else(|| EngineError::optimization("solver produced no solution"))?;
  let weights = softmax(&best_x);

  check_weight_sum(&weights)
    .map_err(|_| EngineError::optimization("weights outside sum tolerance"))?;

  Ok(weights)
}

/// Maximize the Sharpe ratio over the long-only simplex.
pub fn max_sharpe(
  returns: &[f64],
  cov: &[Vec<f64>],
  risk_free: f64,
) -> Result<Vec<f64>, EngineError> {
  validate_inputs(returns, cov)?;

  let mu = returns.to_vec();
  let sigma = cov.to_vec();
  solve(returns.len(), move |w| {
    let ret = dot(w, &mu);
    let vol = portfolio_variance(w, &sigma).sqrt();
    -sharpe(ret, vol, risk_free)
  })
}

/// Minimize portfolio volatility over the long-only simplex.
pub fn min_volatility(returns: &[f64], cov: &[Vec<f64>]) -> Result<Vec<f64>, EngineError> {
  validate_inputs(returns, cov)?;

  let sigma = cov.to_vec();
  solve(returns.len(), move |w| portfolio_variance(w, &sigma))
}

/// Minimize volatility subject to `Σ wᵢ·returnsᵢ = target_return`.
///
/// Legitimately fails near the extremes of the achievable return range;
/// callers sweeping a target grid treat that failure as a skippable point.
pub fn min_volatility_for_target(
  returns: &[f64],
  cov: &[Vec<f64>],
  target_return: f64,
) -> Result<Vec<f64>, EngineError> {
  validate_inputs(returns, cov)?;

  let mu = returns.to_vec();
  let sigma = cov.to_vec();
  let weights = solve(returns.len(), move |w| {
    let gap = dot(w, &mu) - target_return;
    portfolio_variance(w, &sigma) + TARGET_PENALTY * gap * gap
  })?;

  let achieved = dot(&weights, returns);
  if (achieved - target_return).abs() > TARGET_TOLERANCE {
    return Err(EngineError::optimization(format!(
      "target return {target_return} not attainable (achieved {achieved})"
    )));
  }

  Ok(weights)
}

/// Clip weights into `[min_weight, max_weight]` and renormalize to sum 1.
///
/// A single-pass post-processing transform, separate from the solver's own
/// box constraints; renormalization can move a clipped weight slightly past
/// the bounds again, matching the documented source behavior.
pub fn apply_constraints(weights: &[f64], min_weight: f64, max_weight: f64) -> Vec<f64> {
  let clipped: Vec<f64> = weights
    .iter()
    .map(|&w| w.clamp(min_weight, max_weight))
    .collect();

  let sum: f64 = clipped.iter().sum();
  if sum < 1e-15 {
    vec![1.0 / weights.len() as f64; weights.len()]
  } else {
    clipped.iter().map(|&w| w / sum).collect()
  }
}
