//! Periodic return series with missing-value handling

use crate::error::{QuantError, Result};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Sample mean and standard deviation of the usable returns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Moments {
    pub mean: f64,

    /// Sample standard deviation (n − 1 divisor)
    pub std_dev: f64,
}

/// Chronologically ordered periodic returns
///
/// Entries may be missing (`None`); missing entries are excluded before
/// any statistic is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    observations: Vec<Option<f64>>,
}

impl ReturnSeries {
    /// Create a series from explicit observations
    pub fn new(observations: Vec<Option<f64>>) -> Self {
        Self { observations }
    }

    /// Create a series from raw values, treating NaN as missing
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self {
            observations: values
                .into_iter()
                .map(|v| if v.is_nan() { None } else { Some(v) })
                .collect(),
        }
    }

    /// Simple returns `p[i] / p[i-1] - 1` from a chronological price series
    ///
    /// The first entry is always missing, as is any entry adjacent to a
    /// missing (NaN) price.
    ///
    /// # Example
    ///
    /// ```
    /// use quant_risk::ReturnSeries;
    ///
    /// let series = ReturnSeries::from_prices(&[100.0, 110.0, 99.0]);
    /// assert_eq!(series.len(), 3);
    /// assert_eq!(series.usable_count(), 2);
    /// ```
    pub fn from_prices(prices: &[f64]) -> Self {
        let mut observations = Vec::with_capacity(prices.len());
        if !prices.is_empty() {
            observations.push(None);
        }
        for window in prices.windows(2) {
            let (prev, curr) = (window[0], window[1]);
            let ret = curr / prev - 1.0;
            observations.push(if ret.is_nan() { None } else { Some(ret) });
        }
        Self { observations }
    }

    /// Number of entries, missing ones included
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[Option<f64>] {
        &self.observations
    }

    /// Iterate over non-missing returns in order
    pub fn usable(&self) -> impl Iterator<Item = f64> + '_ {
        self.observations.iter().filter_map(|obs| *obs)
    }

    pub fn usable_count(&self) -> usize {
        self.usable().count()
    }

    pub fn missing_count(&self) -> usize {
        self.len() - self.usable_count()
    }

    pub fn usable_values(&self) -> Vec<f64> {
        self.usable().collect()
    }

    /// Usable values, or `InsufficientData` if fewer than `required` remain
    pub(crate) fn require_usable(&self, required: usize) -> Result<Vec<f64>> {
        let values = self.usable_values();
        if values.len() < required {
            return Err(QuantError::InsufficientData {
                required,
                available: values.len(),
            });
        }
        Ok(values)
    }

    pub fn mean(&self) -> Result<f64> {
        let values = self.require_usable(1)?;
        Ok(values.iter().mean())
    }

    /// Sample standard deviation; needs at least two usable returns
    pub fn std_dev(&self) -> Result<f64> {
        let values = self.require_usable(2)?;
        Ok(values.iter().std_dev())
    }

    /// Mean and sample standard deviation in one pass over the usable data
    pub fn moments(&self) -> Result<Moments> {
        let values = self.require_usable(2)?;
        Ok(Moments {
            mean: values.iter().mean(),
            std_dev: values.iter().std_dev(),
        })
    }
}

impl From<Vec<f64>> for ReturnSeries {
    fn from(values: Vec<f64>) -> Self {
        Self::from_values(values)
    }
}
