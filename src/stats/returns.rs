//! # Return Statistics
//!
//! $$
//! \mu_i = 252\,\overline{r_i},\qquad
//! \Sigma_{ij} = 252\,\operatorname{cov}(r_i, r_j)
//! $$
//!
//! Derives annualized expected returns and covariance/correlation matrices
//! from an aligned price panel. All outputs are indexed 1:1 with the panel's
//! ticker ordering.

use crate::data::PricePanel;
use crate::error::EngineError;

/// Trading days per year used for annualization.
pub const TRADING_DAYS: f64 = 252.0;

pub(crate) fn sample_mean(xs: &[f64]) -> f64 {
  if xs.is_empty() {
    0.0
  } else {
    xs.iter().sum::<f64>() / xs.len() as f64
  }
}

fn sample_covariance(x: &[f64], y: &[f64]) -> f64 {
  let n = x.len().min(y.len());
  if n < 2 {
    return 0.0;
  }

  let mx = sample_mean(x);
  let my = sample_mean(y);

  let mut acc = 0.0;
  for i in 0..n {
    acc += (x[i] - mx) * (y[i] - my);
  }
  acc / (n - 1) as f64
}

fn pearson(x: &[f64], y: &[f64]) -> f64 {
  let sx = sample_covariance(x, x).sqrt();
  let sy = sample_covariance(y, y).sqrt();
  let denom = sx * sy;
  if denom < 1e-15 {
    0.0
  } else {
    (sample_covariance(x, y) / denom).clamp(-1.0, 1.0)
  }
}

/// Day-over-day simple returns for every asset in the panel, one inner
/// `Vec` per asset. The first price row has no prior observation and is
/// dropped. Fails when fewer than 2 aligned price rows are available.
pub fn daily_returns(panel: &PricePanel) -> Result<Vec<Vec<f64>>, EngineError> {
  let rows = panel.num_rows();
  if rows < 2 {
    return Err(EngineError::InsufficientData { rows });
  }

  let out = (0..panel.num_assets())
    .map(|a| {
      let closes = panel.column(a);
      closes
        .windows(2)
        .map(|w| w[1] / w[0] - 1.0)
        .collect::<Vec<f64>>()
    })
    .collect();

  Ok(out)
}

/// Annualized expected-return vector: mean daily return × 252.
pub fn expected_returns(panel: &PricePanel) -> Result<Vec<f64>, EngineError> {
  let returns = daily_returns(panel)?;
  Ok(returns.iter().map(|r| sample_mean(r) * TRADING_DAYS).collect())
}

/// Annualized sample covariance matrix of daily returns (×252).
///
/// Symmetric with non-negative diagonal. With exactly 2 price rows only one
/// return observation exists and the matrix degenerates to all zeros.
pub fn covariance(panel: &PricePanel) -> Result<Vec<Vec<f64>>, EngineError> {
  let returns = daily_returns(panel)?;
  let n = returns.len();

  let mut cov = vec![vec![0.0; n]; n];
  for i in 0..n {
    for j in i..n {
      let c = sample_covariance(&returns[i], &returns[j]) * TRADING_DAYS;
      cov[i][j] = c;
      cov[j][i] = c;
    }
  }

  Ok(cov)
}

/// Pearson correlation matrix of daily returns.
pub fn correlation(panel: &PricePanel) -> Result<Vec<Vec<f64>>, EngineError> {
  let returns = daily_returns(panel)?;
  let n = returns.len();

  let mut corr = vec![vec![1.0; n]; n];
  for i in 0..n {
    for j in (i + 1)..n {
      let r = pearson(&returns[i], &returns[j]);
      corr[i][j] = r;
      corr[j][i] = r;
    }
  }

  Ok(corr)
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;
  use crate::data::PriceSeries;

  fn panel(columns: &[(&str, &[f64])]) -> PricePanel {
    let series: Vec<PriceSeries> = columns
      .iter()
      .map(|(ticker, prices)| {
        let obs = prices
          .iter()
          .enumerate()
          .map(|(i, &p)| {
            (
              NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64),
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
  fn expected_returns_annualize_mean_daily_return() {
    // Constant +1% daily move.
    let p = panel(&[("AAA", &[100.0, 101.0, 102.01, 103.0301])]);
    let mu = expected_returns(&p).unwrap();

    assert_eq!(mu.len(), 1);
    assert!((mu[0] - 0.01 * TRADING_DAYS).abs() < 1e-9);
  }

  #[test]
  fn covariance_is_symmetric_with_nonnegative_diagonal() {
    let p = panel(&[
      ("AAA", &[100.0, 102.0, 99.0, 104.0, 101.0]),
      ("BBB", &[50.0, 50.5, 49.0, 52.0, 51.5]),
    ]);
    let cov = covariance(&p).unwrap();

    assert!((cov[0][1] - cov[1][0]).abs() < 1e-12);
    assert!(cov[0][0] >= 0.0);
    assert!(cov[1][1] >= 0.0);
  }

  #[test]
  fn perfectly_correlated_assets_have_unit_correlation() {
    let p = panel(&[
      ("AAA", &[100.0, 102.0, 99.0, 104.0]),
      ("BBB", &[200.0, 204.0, 198.0, 208.0]),
    ]);
    let corr = correlation(&p).unwrap();

    assert!((corr[0][1] - 1.0).abs() < 1e-9);
  }

  #[test]
  fn single_price_row_is_insufficient() {
    let obs = vec![(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 100.0)];
    let series = PriceSeries::new("AAA", obs).unwrap();
    let err = PricePanel::from_series(&[series]).unwrap_err();

    assert!(matches!(err, EngineError::InsufficientData { rows: 1 }));
  }
}
