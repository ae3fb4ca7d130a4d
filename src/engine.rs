//! Estimation engine
//!
//! [`QuantEngine`] applies configured simulation defaults to the estimators
//! and builds a fresh [`RandomSource`] for every call, so no generator state
//! is shared between calls or threads.

use crate::config::EngineConfig;
use crate::error::Result;
use crate::option::OptionParams;
use crate::pricing::{self, PriceResult, PricingMethod};
use crate::random::RandomSource;
use crate::series::ReturnSeries;
use crate::var::{self, VarMethod, VarResult};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Every VaR estimator's figure for the same series and confidence level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VarComparison {
    pub historical: VarResult,
    pub parametric: VarResult,
    pub monte_carlo_normal: VarResult,
    pub monte_carlo_student_t: VarResult,
}

/// Analytic and simulated price for the same contract
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceComparison {
    pub analytic: PriceResult,
    pub monte_carlo: PriceResult,
}

impl PriceComparison {
    /// Monte Carlo price minus analytic price
    pub fn difference(&self) -> f64 {
        self.monte_carlo.price - self.analytic.price
    }
}

/// Estimation engine with configured simulation defaults
#[derive(Debug, Clone, Default)]
pub struct QuantEngine {
    config: EngineConfig,
}

impl QuantEngine {
    /// Create a new engine from a configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Load configuration from a YAML string
    ///
    /// # Example
    ///
    /// ```
    /// use quant_risk::{OptionParams, QuantEngine};
    ///
    /// let yaml = r#"
    /// pricing_simulations: 20000
    /// seed: 42
    /// "#;
    ///
    /// let engine = QuantEngine::from_yaml(yaml).unwrap();
    /// let call = OptionParams::call(100.0, 100.0, 0.03, 0.2, 1.0);
    ///
    /// let first = engine.monte_carlo_price(&call).unwrap();
    /// let second = engine.monte_carlo_price(&call).unwrap();
    /// assert_eq!(first.price, second.price);
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(Self {
            config: EngineConfig::from_yaml(yaml)?,
        })
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self {
            config: EngineConfig::from_json(json)?,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Source for a single call: seeded when configured, entropy otherwise
    pub fn random_source(&self) -> RandomSource {
        match self.config.seed {
            Some(seed) => RandomSource::from_seed(seed),
            None => RandomSource::from_entropy(),
        }
    }

    pub fn historical_var(&self, series: &ReturnSeries, confidence_level: f64) -> Result<VarResult> {
        self.compute_var(series, confidence_level, VarMethod::Historical)
    }

    pub fn parametric_var(&self, series: &ReturnSeries, confidence_level: f64) -> Result<VarResult> {
        self.compute_var(series, confidence_level, VarMethod::Parametric)
    }

    /// Monte Carlo VaR (Normal) with the configured simulation count
    pub fn monte_carlo_normal_var(
        &self,
        series: &ReturnSeries,
        confidence_level: f64,
    ) -> Result<VarResult> {
        let method = VarMethod::MonteCarloNormal {
            simulations: self.config.var_simulations,
        };
        self.compute_var(series, confidence_level, method)
    }

    /// Monte Carlo VaR (Student-t) with the configured simulation count and
    /// degrees of freedom
    pub fn monte_carlo_student_t_var(
        &self,
        series: &ReturnSeries,
        confidence_level: f64,
    ) -> Result<VarResult> {
        let method = VarMethod::MonteCarloStudentT {
            simulations: self.config.var_simulations,
            degrees_of_freedom: self.config.degrees_of_freedom,
        };
        self.compute_var(series, confidence_level, method)
    }

    /// Compute VaR with an explicit method, drawing from a per-call source
    pub fn compute_var(
        &self,
        series: &ReturnSeries,
        confidence_level: f64,
        method: VarMethod,
    ) -> Result<VarResult> {
        let mut rng = self.random_source();
        var::compute_var(series, confidence_level, method, Some(&mut rng)).map_err(|e| {
            warn!(method = method.name(), error = %e, "VaR estimation rejected");
            e
        })
    }

    /// Run all four VaR estimators on the same inputs
    pub fn compare_var(&self, series: &ReturnSeries, confidence_level: f64) -> Result<VarComparison> {
        let comparison = VarComparison {
            historical: self.historical_var(series, confidence_level)?,
            parametric: self.parametric_var(series, confidence_level)?,
            monte_carlo_normal: self.monte_carlo_normal_var(series, confidence_level)?,
            monte_carlo_student_t: self.monte_carlo_student_t_var(series, confidence_level)?,
        };

        info!(
            confidence_level,
            observations = series.usable_count(),
            historical = comparison.historical.value,
            parametric = comparison.parametric.value,
            monte_carlo_normal = comparison.monte_carlo_normal.value,
            monte_carlo_student_t = comparison.monte_carlo_student_t.value,
            "VaR comparison"
        );

        Ok(comparison)
    }

    pub fn analytic_price(&self, params: &OptionParams) -> Result<PriceResult> {
        self.price_option(params, PricingMethod::Analytic)
    }

    /// Monte Carlo price with the configured simulation count and batches
    pub fn monte_carlo_price(&self, params: &OptionParams) -> Result<PriceResult> {
        let method = PricingMethod::MonteCarlo {
            simulations: self.config.pricing_simulations,
        };
        self.price_option(params, method)
    }

    /// Price with an explicit method, drawing from a per-call source
    ///
    /// Monte Carlo pricing runs in parallel when more than one batch is
    /// configured.
    pub fn price_option(&self, params: &OptionParams, method: PricingMethod) -> Result<PriceResult> {
        let mut rng = self.random_source();
        let result = match method {
            PricingMethod::MonteCarlo { simulations } if self.config.batches > 1 => {
                pricing::monte_carlo_price_parallel(params, simulations, self.config.batches, &mut rng)
            }
            _ => pricing::price_option(params, method, Some(&mut rng)),
        };

        result.map_err(|e| {
            warn!(method = ?method, error = %e, "option pricing rejected");
            e
        })
    }

    /// Price the same contract analytically and by simulation
    pub fn compare_prices(&self, params: &OptionParams) -> Result<PriceComparison> {
        let comparison = PriceComparison {
            analytic: self.analytic_price(params)?,
            monte_carlo: self.monte_carlo_price(params)?,
        };

        info!(
            side = ?params.side,
            analytic = comparison.analytic.price,
            monte_carlo = comparison.monte_carlo.price,
            standard_error = ?comparison.monte_carlo.standard_error,
            "price comparison"
        );

        Ok(comparison)
    }
}
