//! Value at Risk (VaR) estimators
//!
//! Implements four VaR methodologies over a [`ReturnSeries`]:
//! - Historical VaR: empirical percentile of the observed returns
//! - Parametric VaR: assumes normal returns (VaR = μ − z·σ, z = Φ⁻¹(c))
//! - Monte Carlo VaR (Normal): percentile of simulated N(μ, σ) returns
//! - Monte Carlo VaR (Student-t): percentile of simulated μ + σ·t_df returns
//!
//! VaR is reported as a return threshold, typically negative: the value v
//! with P(return ≤ v) = 1 − confidence_level.

use crate::error::{QuantError, Result};
use crate::random::{validate_degrees_of_freedom, RandomSource};
use crate::series::ReturnSeries;
use crate::stats::{inverse_normal_cdf, percentile};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default number of simulated returns for the Monte Carlo estimators
pub const DEFAULT_VAR_SIMULATIONS: usize = 10_000;

/// Default Student-t degrees of freedom
pub const DEFAULT_DEGREES_OF_FREEDOM: f64 = 5.0;

/// VaR estimation method, with the simulation settings it needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VarMethod {
    Historical,
    Parametric,
    MonteCarloNormal {
        simulations: usize,
    },
    MonteCarloStudentT {
        simulations: usize,
        degrees_of_freedom: f64,
    },
}

impl VarMethod {
    /// Human-readable method name
    pub fn name(&self) -> &'static str {
        match self {
            VarMethod::Historical => "Historical",
            VarMethod::Parametric => "Parametric",
            VarMethod::MonteCarloNormal { .. } => "MonteCarloNormal",
            VarMethod::MonteCarloStudentT { .. } => "MonteCarloStudentT",
        }
    }

    /// Whether the method draws from a random source
    pub fn is_simulated(&self) -> bool {
        matches!(
            self,
            VarMethod::MonteCarloNormal { .. } | VarMethod::MonteCarloStudentT { .. }
        )
    }
}

/// VaR calculation result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VarResult {
    /// Return threshold (negative values represent losses)
    pub value: f64,

    /// Confidence level (e.g., 0.95, 0.99)
    pub confidence_level: f64,

    /// Method that produced the estimate
    pub method: VarMethod,
}

/// Historical VaR: the linear-interpolated (1 − c) percentile of the series
///
/// Needs at least one usable return.
pub fn historical_var(series: &ReturnSeries, confidence_level: f64) -> Result<VarResult> {
    validate_confidence_level(confidence_level)?;
    let mut values = series.require_usable(1)?;

    let value = percentile(&mut values, tail_percentile(confidence_level))?;
    debug!(
        confidence_level,
        observations = values.len(),
        value,
        "historical VaR"
    );

    Ok(VarResult {
        value,
        confidence_level,
        method: VarMethod::Historical,
    })
}

/// Parametric VaR: μ − Φ⁻¹(c)·σ with sample mean and standard deviation
///
/// Needs at least two usable returns.
pub fn parametric_var(series: &ReturnSeries, confidence_level: f64) -> Result<VarResult> {
    validate_confidence_level(confidence_level)?;
    let moments = series.moments()?;

    let z_score = inverse_normal_cdf(confidence_level)?;
    let value = moments.mean - z_score * moments.std_dev;
    debug!(
        confidence_level,
        mean = moments.mean,
        std_dev = moments.std_dev,
        z_score,
        value,
        "parametric VaR"
    );

    Ok(VarResult {
        value,
        confidence_level,
        method: VarMethod::Parametric,
    })
}

/// Monte Carlo VaR under a Normal(μ, σ) fit to the series
pub fn monte_carlo_normal_var(
    series: &ReturnSeries,
    confidence_level: f64,
    simulations: usize,
    rng: &mut RandomSource,
) -> Result<VarResult> {
    validate_confidence_level(confidence_level)?;
    validate_simulations(simulations)?;
    let moments = series.moments()?;

    let mut simulated = vec![0.0; simulations];
    rng.fill_normal(&mut simulated);
    for value in simulated.iter_mut() {
        *value = moments.mean + moments.std_dev * *value;
    }

    let value = percentile(&mut simulated, tail_percentile(confidence_level))?;
    debug!(
        confidence_level,
        simulations,
        seed = ?rng.seed(),
        value,
        "Monte Carlo normal VaR"
    );

    Ok(VarResult {
        value,
        confidence_level,
        method: VarMethod::MonteCarloNormal { simulations },
    })
}

/// Monte Carlo VaR with fat tails: simulated returns are μ + σ·t_df
///
/// `degrees_of_freedom` must exceed 2. Smaller values give heavier tails and
/// larger-magnitude VaR.
pub fn monte_carlo_student_t_var(
    series: &ReturnSeries,
    confidence_level: f64,
    simulations: usize,
    degrees_of_freedom: f64,
    rng: &mut RandomSource,
) -> Result<VarResult> {
    validate_confidence_level(confidence_level)?;
    validate_simulations(simulations)?;
    validate_degrees_of_freedom(degrees_of_freedom)?;
    let moments = series.moments()?;

    let mut simulated = vec![0.0; simulations];
    rng.fill_student_t(&mut simulated, degrees_of_freedom)?;
    for value in simulated.iter_mut() {
        *value = moments.mean + moments.std_dev * *value;
    }

    let value = percentile(&mut simulated, tail_percentile(confidence_level))?;
    debug!(
        confidence_level,
        simulations,
        degrees_of_freedom,
        seed = ?rng.seed(),
        value,
        "Monte Carlo Student-t VaR"
    );

    Ok(VarResult {
        value,
        confidence_level,
        method: VarMethod::MonteCarloStudentT {
            simulations,
            degrees_of_freedom,
        },
    })
}

/// Compute VaR with any method
///
/// Monte Carlo methods draw from `rng`; when none is given they construct an
/// entropy-seeded source for this call only.
///
/// # Example
///
/// ```
/// use quant_risk::{compute_var, RandomSource, ReturnSeries, VarMethod};
///
/// let series = ReturnSeries::from_values(vec![-0.05, -0.02, 0.00, 0.01, 0.03, 0.04]);
/// let historical = compute_var(&series, 0.95, VarMethod::Historical, None).unwrap();
/// assert!((historical.value + 0.0425).abs() < 1e-12);
///
/// let mut rng = RandomSource::from_seed(42);
/// let method = VarMethod::MonteCarloNormal { simulations: 10_000 };
/// let simulated = compute_var(&series, 0.95, method, Some(&mut rng)).unwrap();
/// assert!(simulated.value < 0.0);
/// ```
pub fn compute_var(
    series: &ReturnSeries,
    confidence_level: f64,
    method: VarMethod,
    rng: Option<&mut RandomSource>,
) -> Result<VarResult> {
    match method {
        VarMethod::Historical => historical_var(series, confidence_level),
        VarMethod::Parametric => parametric_var(series, confidence_level),
        VarMethod::MonteCarloNormal { simulations } => {
            with_source(rng, |rng| {
                monte_carlo_normal_var(series, confidence_level, simulations, rng)
            })
        }
        VarMethod::MonteCarloStudentT {
            simulations,
            degrees_of_freedom,
        } => with_source(rng, |rng| {
            monte_carlo_student_t_var(
                series,
                confidence_level,
                simulations,
                degrees_of_freedom,
                rng,
            )
        }),
    }
}

pub(crate) fn with_source<T>(
    rng: Option<&mut RandomSource>,
    f: impl FnOnce(&mut RandomSource) -> Result<T>,
) -> Result<T> {
    match rng {
        Some(rng) => f(rng),
        None => f(&mut RandomSource::from_entropy()),
    }
}

fn tail_percentile(confidence_level: f64) -> f64 {
    (1.0 - confidence_level) * 100.0
}

pub(crate) fn validate_confidence_level(confidence_level: f64) -> Result<()> {
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(QuantError::invalid(format!(
            "confidence level must be between 0 and 1, got {}",
            confidence_level
        )));
    }
    Ok(())
}

pub(crate) fn validate_simulations(simulations: usize) -> Result<()> {
    if simulations == 0 {
        return Err(QuantError::invalid(
            "number of simulations must be at least 1",
        ));
    }
    Ok(())
}
