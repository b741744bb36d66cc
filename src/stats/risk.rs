//! # Risk Metrics
//!
//! Historical VaR/CVaR, downside deviation, Sortino, beta and drawdown
//! helpers operating on raw daily return or value series. All annualized
//! figures assume 252 trading days.

use super::returns::{TRADING_DAYS, sample_mean};

fn sorted(returns: &[f64]) -> Vec<f64> {
  let mut xs: Vec<f64> = returns.iter().copied().filter(|x| x.is_finite()).collect();
  xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
  xs
}

/// Historical Value at Risk: the `1 - confidence` quantile of the return
/// distribution. Negative in the usual loss case. Returns 0 on empty input.
pub fn value_at_risk(returns: &[f64], confidence: f64) -> f64 {
  let xs = sorted(returns);
  if xs.is_empty() {
    return 0.0;
  }

  let q = (1.0 - confidence).clamp(0.0, 1.0);
  let idx = ((xs.len() - 1) as f64 * q).round() as usize;
  xs[idx]
}

/// Conditional VaR (expected shortfall): mean of the returns at or below
/// the VaR threshold.
pub fn cvar(returns: &[f64], confidence: f64) -> f64 {
  let xs = sorted(returns);
  if xs.is_empty() {
    return 0.0;
  }

  let var = value_at_risk(&xs, confidence);
  let tail: Vec<f64> = xs.iter().copied().filter(|&r| r <= var).collect();
  if tail.is_empty() {
    0.0
  } else {
    sample_mean(&tail)
  }
}

/// Semi-deviation of returns below `target`. Returns 0 when no observation
/// falls below the target.
pub fn downside_deviation(returns: &[f64], target: f64) -> f64 {
  let downside: Vec<f64> = returns.iter().copied().filter(|&r| r < target).collect();
  if downside.is_empty() {
    return 0.0;
  }

  let mean_sq =
    downside.iter().map(|r| (r - target) * (r - target)).sum::<f64>() / downside.len() as f64;
  mean_sq.sqrt()
}

/// Annualized Sortino ratio: excess return over annualized downside
/// deviation. Defined as 0 when the downside deviation is 0.
pub fn sortino_ratio(daily_returns: &[f64], risk_free: f64, target: f64) -> f64 {
  let annualized_return = sample_mean(daily_returns) * TRADING_DAYS;
  let downside = downside_deviation(daily_returns, target) * TRADING_DAYS.sqrt();

  if downside == 0.0 {
    0.0
  } else {
    (annualized_return - risk_free) / downside
  }
}

/// Annualized volatility of a daily return series.
pub fn annualized_volatility(daily_returns: &[f64]) -> f64 {
  let n = daily_returns.len();
  if n < 2 {
    return 0.0;
  }

  let m = sample_mean(daily_returns);
  let var = daily_returns.iter().map(|r| (r - m) * (r - m)).sum::<f64>() / (n - 1) as f64;
  var.sqrt() * TRADING_DAYS.sqrt()
}

/// Annualized Sharpe ratio of a daily return series. 0 at zero volatility.
pub fn sharpe_ratio(daily_returns: &[f64], risk_free: f64) -> f64 {
  let vol = annualized_volatility(daily_returns);
  if vol == 0.0 {
    0.0
  } else {
    (sample_mean(daily_returns) * TRADING_DAYS - risk_free) / vol
  }
}

/// Beta of an asset versus a market series: cov(asset, market) / var(market).
/// 0 on degenerate input.
pub fn beta(asset_returns: &[f64], market_returns: &[f64]) -> f64 {
  let n = asset_returns.len().min(market_returns.len());
  if n < 2 {
    return 0.0;
  }

  let ma = sample_mean(&asset_returns[..n]);
  let mm = sample_mean(&market_returns[..n]);

  let mut cov = 0.0;
  let mut var = 0.0;
  for i in 0..n {
    let dm = market_returns[i] - mm;
    cov += (asset_returns[i] - ma) * dm;
    var += dm * dm;
  }

  if var == 0.0 {
    0.0
  } else {
    cov / var
  }
}

/// Total return of a value series over its full span, as a fraction of the
/// initial value. 0 on degenerate input.
pub fn total_return(values: &[f64]) -> f64 {
  match (values.first(), values.last()) {
    (Some(&initial), Some(&last)) if initial > 0.0 => (last - initial) / initial,
    _ => 0.0,
  }
}

/// Geometric annualized return of a value series spanning `calendar_days`
/// days (365.25-day years). 0 when the span is empty.
pub fn annualized_return(values: &[f64], calendar_days: f64) -> f64 {
  let years = calendar_days / 365.25;
  if years <= 0.0 {
    return 0.0;
  }

  (1.0 + total_return(values)).powf(1.0 / years) - 1.0
}

/// Maximum peak-to-trough drawdown of a value series.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Drawdown {
  /// Depth as a negative fraction of the peak value.
  pub max_drawdown: f64,
  /// Index of the peak preceding the trough.
  pub peak: usize,
  /// Index of the trough.
  pub trough: usize,
}

/// Scan a portfolio value series for its deepest drawdown.
pub fn max_drawdown(values: &[f64]) -> Drawdown {
  let mut result = Drawdown::default();
  let mut peak_idx = 0;
  let mut peak_val = f64::NEG_INFINITY;

  for (i, &v) in values.iter().enumerate() {
    if v > peak_val {
      peak_val = v;
      peak_idx = i;
    }
    if peak_val > 0.0 {
      let dd = (v - peak_val) / peak_val;
      if dd < result.max_drawdown {
        result.max_drawdown = dd;
        result.peak = peak_idx;
        result.trough = i;
      }
    }
  }

  result
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn var_is_the_tail_quantile() {
    // 100 returns from -0.50 to 0.49 in steps of 0.01.
    let returns: Vec<f64> = (0..100).map(|i| -0.50 + i as f64 * 0.01).collect();
    let var = value_at_risk(&returns, 0.95);

    assert!((var - (-0.45)).abs() < 1e-9);
  }

  #[test]
  fn cvar_averages_the_tail_beyond_var() {
    let returns: Vec<f64> = (0..100).map(|i| -0.50 + i as f64 * 0.01).collect();
    let es = cvar(&returns, 0.95);

    // Tail is {-0.50, ..., -0.45}; mean -0.475.
    assert!((es - (-0.475)).abs() < 1e-9);
    assert!(es <= value_at_risk(&returns, 0.95));
  }

  #[test]
  fn downside_deviation_ignores_gains() {
    let returns = vec![0.02, -0.01, 0.03, -0.03, 0.01];
    let dd = downside_deviation(&returns, 0.0);
    let expected = ((0.01f64.powi(2) + 0.03f64.powi(2)) / 2.0).sqrt();

    assert!((dd - expected).abs() < 1e-12);
    assert_eq!(downside_deviation(&[0.01, 0.02], 0.0), 0.0);
  }

  #[test]
  fn sortino_is_zero_without_downside() {
    assert_eq!(sortino_ratio(&[0.01, 0.02, 0.015], 0.04, 0.0), 0.0);
  }

  #[test]
  fn beta_of_market_against_itself_is_one() {
    let market = vec![0.01, -0.02, 0.015, 0.005, -0.01];
    assert!((beta(&market, &market) - 1.0).abs() < 1e-12);
  }

  #[test]
  fn total_return_measures_the_full_span() {
    assert!((total_return(&[100.0, 105.0, 120.0]) - 0.2).abs() < 1e-12);
    assert_eq!(total_return(&[]), 0.0);
  }

  #[test]
  fn annualized_return_compounds_over_the_period() {
    // +21% over two 365.25-day years is +10% a year.
    let values = vec![100.0, 121.0];
    let annual = annualized_return(&values, 2.0 * 365.25);

    assert!((annual - 0.10).abs() < 1e-12);
    assert_eq!(annualized_return(&values, 0.0), 0.0);
  }

  #[test]
  fn max_drawdown_finds_peak_and_trough() {
    let values = vec![100.0, 110.0, 95.0, 88.0, 120.0, 100.0];
    let dd = max_drawdown(&values);

    assert_eq!(dd.peak, 1);
    assert_eq!(dd.trough, 3);
    assert!((dd.max_drawdown - (88.0 - 110.0) / 110.0).abs() < 1e-12);
  }
}
