//! # Price Data
//!
//! Validated per-asset price histories, the inner-joined price panel that
//! feeds every derived statistic, and an explicit fingerprint-keyed cache
//! for embedding applications that want to reuse a loaded panel.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Static description of a tracked asset, as supplied by the data-loading
/// collaborator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssetInfo {
  pub ticker: String,
  pub name: String,
  pub asset_class: String,
  pub initial_weight: f64,
  pub initial_price: f64,
}

/// A position in a single asset. Value is `shares * price`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Holding {
  pub ticker: String,
  pub shares: f64,
  pub price: f64,
}

impl Holding {
  pub fn value(&self) -> f64 {
    self.shares * self.price
  }
}

/// Ordered (date, price) history for one asset.
///
/// Dates are strictly increasing and prices strictly positive; both are
/// checked at construction so downstream code never revalidates.
#[derive(Clone, Debug)]
pub struct PriceSeries {
  ticker: String,
  observations: Vec<(NaiveDate, f64)>,
}

impl PriceSeries {
  pub fn new(
    ticker: impl Into<String>,
    observations: Vec<(NaiveDate, f64)>,
  ) -> Result<Self, EngineError> {
    for window in observations.windows(2) {
      if window[1].0 <= window[0].0 {
        return Err(EngineError::invalid_input(format!(
          "price series dates not strictly increasing at {}",
          window[1].0
        )));
      }
    }
    if let Some((date, price)) = observations.iter().find(|(_, p)| !(*p > 0.0)) {
      return Err(EngineError::invalid_input(format!(
        "non-positive price {price} at {date}"
      )));
    }

    Ok(Self {
      ticker: ticker.into(),
      observations,
    })
  }

  pub fn ticker(&self) -> &str {
    &self.ticker
  }

  pub fn observations(&self) -> &[(NaiveDate, f64)] {
    &self.observations
  }
}

/// Date-indexed price table with one column per ticker.
///
/// Built by inner join: only dates present in every input series survive.
/// Immutable once constructed; all derived statistics are pure functions of
/// this panel.
#[derive(Clone, Debug)]
pub struct PricePanel {
  tickers: Vec<String>,
  dates: Vec<NaiveDate>,
  /// Row-major: `prices[row][col]` is the price of `tickers[col]` on
  /// `dates[row]`.
  prices: Vec<Vec<f64>>,
}

impl PricePanel {
  /// Inner-join per-asset series on their date index. Rows where any asset
  /// is missing a price are dropped. Fails when fewer than 2 aligned rows
  /// remain.
  pub fn from_series(series: &[PriceSeries]) -> Result<Self, EngineError> {
    if series.is_empty() {
      return Err(EngineError::InsufficientData { rows: 0 });
    }

    let mut common: Vec<NaiveDate> = series[0].observations.iter().map(|(d, _)| *d).collect();
    for s in &series[1..] {
      let dates: Vec<NaiveDate> = s.observations.iter().map(|(d, _)| *d).collect();
      common.retain(|d| dates.binary_search(d).is_ok());
    }

    if common.len() < 2 {
      return Err(EngineError::InsufficientData { rows: common.len() });
    }

    let maps: Vec<HashMap<NaiveDate, f64>> = series
      .iter()
      .map(|s| s.observations.iter().copied().collect())
      .collect();

    let prices: Vec<Vec<f64>> = common
      .iter()
      .map(|d| maps.iter().map(|m| m[d]).collect())
      .collect();

    Ok(Self {
      tickers: series.iter().map(|s| s.ticker.clone()).collect(),
      dates: common,
      prices,
    })
  }

  pub fn tickers(&self) -> &[String] {
    &self.tickers
  }

  pub fn dates(&self) -> &[NaiveDate] {
    &self.dates
  }

  pub fn num_assets(&self) -> usize {
    self.tickers.len()
  }

  pub fn num_rows(&self) -> usize {
    self.dates.len()
  }

  pub fn rows(&self) -> &[Vec<f64>] {
    &self.prices
  }

  /// Price column for one asset, in date order.
  pub fn column(&self, asset: usize) -> Vec<f64> {
    self.prices.iter().map(|row| row[asset]).collect()
  }

  /// Stable content fingerprint over tickers, dates and price bit patterns.
  /// Two panels with identical content hash identically across runs of the
  /// same build.
  pub fn fingerprint(&self) -> u64 {
    let mut hasher = DefaultHasher::new();
    for t in &self.tickers {
      t.hash(&mut hasher);
    }
    for d in &self.dates {
      d.hash(&mut hasher);
    }
    for row in &self.prices {
      for p in row {
        p.to_bits().hash(&mut hasher);
      }
    }
    hasher.finish()
  }
}

/// Explicit, caller-owned cache of derived analysis results keyed by panel
/// fingerprint. The engine itself holds no ambient state; an embedding
/// application owns one of these and invalidates it by dropping entries.
#[derive(Debug, Default)]
pub struct PanelCache<T> {
  entries: HashMap<u64, T>,
}

impl<T> PanelCache<T> {
  pub fn new() -> Self {
    Self {
      entries: HashMap::new(),
    }
  }

  pub fn get(&self, panel: &PricePanel) -> Option<&T> {
    self.entries.get(&panel.fingerprint())
  }

  pub fn insert(&mut self, panel: &PricePanel, value: T) {
    self.entries.insert(panel.fingerprint(), value);
  }

  pub fn invalidate(&mut self, panel: &PricePanel) {
    self.entries.remove(&panel.fingerprint());
  }

  pub fn clear(&mut self) {
    self.entries.clear();
  }
}
