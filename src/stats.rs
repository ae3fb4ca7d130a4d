//! Shared numeric helpers: percentiles, the standard normal, running moments

use crate::error::{QuantError, Result};
use statrs::distribution::{ContinuousCDF, Normal};

fn standard_normal() -> Result<Normal> {
    Normal::new(0.0, 1.0).map_err(|e| QuantError::NumericalDegeneracy(e.to_string()))
}

/// Φ(x), the standard normal CDF
pub fn normal_cdf(x: f64) -> Result<f64> {
    Ok(standard_normal()?.cdf(x))
}

/// Φ⁻¹(p) for p in (0, 1)
pub fn inverse_normal_cdf(p: f64) -> Result<f64> {
    if !(p > 0.0 && p < 1.0) {
        return Err(QuantError::invalid(format!(
            "probability must be in (0, 1), got {}",
            p
        )));
    }
    Ok(standard_normal()?.inverse_cdf(p))
}

/// Linear-interpolated percentile, `q` in [0, 100]
///
/// rank = q/100 · (n − 1), interpolated between the adjacent order
/// statistics. Sorts `values` in place.
pub fn percentile(values: &mut [f64], q: f64) -> Result<f64> {
    if values.is_empty() {
        return Err(QuantError::InsufficientData {
            required: 1,
            available: 0,
        });
    }
    if !(0.0..=100.0).contains(&q) {
        return Err(QuantError::invalid(format!(
            "percentile must be in [0, 100], got {}",
            q
        )));
    }

    values.sort_by(|a, b| a.total_cmp(b));

    let rank = q / 100.0 * (values.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;

    Ok(values[lower] + weight * (values[upper] - values[lower]))
}

/// Welford accumulator for mean and variance, mergeable across batches
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningMoments {
    count: usize,
    mean: f64,
    m2: f64,
}

impl RunningMoments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    /// Combine two accumulators (Chan et al. pairwise update)
    pub fn merge(&mut self, other: &RunningMoments) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }

        let count = self.count + other.count;
        let delta = other.mean - self.mean;
        self.mean += delta * other.count as f64 / count as f64;
        self.m2 += other.m2
            + delta * delta * (self.count as f64 * other.count as f64) / count as f64;
        self.count = count;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation (n − 1 divisor); 0 below two observations
    pub fn std_dev(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        (self.m2 / (self.count - 1) as f64).max(0.0).sqrt()
    }

    /// Standard error of the mean
    pub fn standard_error(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.std_dev() / (self.count as f64).sqrt()
    }
}
