//! European option pricing under Black-Scholes
//!
//! - Analytic: closed-form Black-Scholes price (no dividends)
//! - Monte Carlo: discounted mean payoff over simulated terminal prices
//!   S_T = S·exp[(r − σ²/2)·T + σ·√T·Z], with a standard error
//!
//! Degenerate inputs are special-cased: T = 0 prices at intrinsic value and
//! σ = 0 prices at the deterministic forward limit.

use crate::error::{QuantError, Result};
use crate::option::{OptionParams, OptionSide};
use crate::random::RandomSource;
use crate::stats::{normal_cdf, RunningMoments};
use crate::var::{validate_simulations, with_source};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default number of simulated terminal prices
pub const DEFAULT_PRICING_SIMULATIONS: usize = 100_000;

/// Option pricing method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PricingMethod {
    Analytic,
    MonteCarlo { simulations: usize },
}

/// Option pricing result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceResult {
    pub price: f64,

    /// Standard error of the price (Monte Carlo only)
    pub standard_error: Option<f64>,

    /// Number of simulated paths (Monte Carlo only)
    pub sample_count: Option<usize>,

    pub method: PricingMethod,
}

/// Closed-form Black-Scholes price
///
/// # Example
///
/// ```
/// use quant_risk::{black_scholes_price, OptionParams};
///
/// let call = OptionParams::call(100.0, 100.0, 0.05, 0.2, 1.0);
/// let result = black_scholes_price(&call).unwrap();
/// assert!((result.price - 10.4506).abs() < 1e-4);
/// ```
pub fn black_scholes_price(params: &OptionParams) -> Result<PriceResult> {
    params.validate()?;

    let price = analytic_price(params)?;
    debug!(side = ?params.side, price, "Black-Scholes price");

    Ok(PriceResult {
        price,
        standard_error: None,
        sample_count: None,
        method: PricingMethod::Analytic,
    })
}

fn analytic_price(params: &OptionParams) -> Result<f64> {
    let s = params.spot;
    let k = params.strike;
    let r = params.rate;
    let sigma = params.volatility;
    let t = params.time_to_expiry;

    if t <= 0.0 {
        return Ok(params.intrinsic_value());
    }

    let discount = params.discount_factor();

    // No diffusion: the terminal price is the forward S·e^(rT)
    if sigma * t.sqrt() == 0.0 {
        let forward_value = match params.side {
            OptionSide::Call => (s - k * discount).max(0.0),
            OptionSide::Put => (k * discount - s).max(0.0),
        };
        return Ok(forward_value);
    }

    let d1 = calculate_d1(s, k, t, sigma, r)?;
    let d2 = d1 - sigma * t.sqrt();

    let price = match params.side {
        OptionSide::Call => s * normal_cdf(d1)? - k * discount * normal_cdf(d2)?,
        OptionSide::Put => k * discount * normal_cdf(-d2)? - s * normal_cdf(-d1)?,
    };

    // Rounding can push deep out-of-the-money prices a hair below zero
    Ok(price.max(0.0))
}

/// d1 = [ln(S/K) + (r + σ²/2)·T] / (σ·√T)
fn calculate_d1(s: f64, k: f64, t: f64, sigma: f64, r: f64) -> Result<f64> {
    let denominator = sigma * t.sqrt();
    if denominator == 0.0 {
        return Err(QuantError::NumericalDegeneracy(
            "σ·√T is zero in the Black-Scholes d1 denominator".to_string(),
        ));
    }

    let numerator = (s / k).ln() + (r + 0.5 * sigma * sigma) * t;
    Ok(numerator / denominator)
}

/// Monte Carlo Black-Scholes price with standard error
pub fn monte_carlo_price(
    params: &OptionParams,
    simulations: usize,
    rng: &mut RandomSource,
) -> Result<PriceResult> {
    params.validate()?;
    validate_simulations(simulations)?;

    let payoffs = simulate_payoffs(params, simulations, rng);
    let result = discounted_result(params, &payoffs, simulations);
    debug!(
        side = ?params.side,
        simulations,
        seed = ?rng.seed(),
        price = result.price,
        standard_error = ?result.standard_error,
        "Monte Carlo price"
    );

    Ok(result)
}

/// Monte Carlo price with draws split into `batches` run in parallel
///
/// Each batch draws from its own child of `rng` (see
/// [`RandomSource::split`]), so a seeded parent gives the same result for
/// the same batch count regardless of thread scheduling.
pub fn monte_carlo_price_parallel(
    params: &OptionParams,
    simulations: usize,
    batches: usize,
    rng: &mut RandomSource,
) -> Result<PriceResult> {
    params.validate()?;
    validate_simulations(simulations)?;
    if batches == 0 {
        return Err(QuantError::invalid("number of batches must be at least 1"));
    }

    let base = simulations / batches;
    let extra = simulations % batches;
    let jobs: Vec<(RandomSource, usize)> = rng
        .split(batches)
        .into_iter()
        .enumerate()
        .map(|(i, child)| (child, base + usize::from(i < extra)))
        .collect();

    let partials: Vec<RunningMoments> = jobs
        .into_par_iter()
        .map(|(mut child, size)| simulate_payoffs(params, size, &mut child))
        .collect();

    let mut payoffs = RunningMoments::new();
    for partial in &partials {
        payoffs.merge(partial);
    }

    let result = discounted_result(params, &payoffs, simulations);
    debug!(
        side = ?params.side,
        simulations,
        batches,
        seed = ?rng.seed(),
        price = result.price,
        standard_error = ?result.standard_error,
        "parallel Monte Carlo price"
    );

    Ok(result)
}

fn simulate_payoffs(params: &OptionParams, count: usize, rng: &mut RandomSource) -> RunningMoments {
    let sigma = params.volatility;
    let t = params.time_to_expiry;
    let drift = (params.rate - 0.5 * sigma * sigma) * t;
    let diffusion = sigma * t.sqrt();

    let mut payoffs = RunningMoments::new();
    for _ in 0..count {
        let z = rng.next_normal();
        let terminal = params.spot * (drift + diffusion * z).exp();
        payoffs.push(params.side.payoff(terminal, params.strike));
    }
    payoffs
}

fn discounted_result(params: &OptionParams, payoffs: &RunningMoments, simulations: usize) -> PriceResult {
    let discount = params.discount_factor();
    PriceResult {
        price: discount * payoffs.mean(),
        standard_error: Some(discount * payoffs.standard_error()),
        sample_count: Some(payoffs.count()),
        method: PricingMethod::MonteCarlo { simulations },
    }
}

/// Price an option with either method
///
/// The Monte Carlo method draws from `rng`; when none is given it constructs
/// an entropy-seeded source for this call only.
pub fn price_option(
    params: &OptionParams,
    method: PricingMethod,
    rng: Option<&mut RandomSource>,
) -> Result<PriceResult> {
    match method {
        PricingMethod::Analytic => black_scholes_price(params),
        PricingMethod::MonteCarlo { simulations } => {
            with_source(rng, |rng| monte_carlo_price(params, simulations, rng))
        }
    }
}
