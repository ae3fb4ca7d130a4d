//! # quant-risk: Value-at-Risk and Black-Scholes Option Pricing
//!
//! This library estimates market risk from a return series and prices
//! European options, each with a closed-form estimator and a Monte Carlo
//! estimator so the two figures can be compared for the same inputs.
//!
//! ## Core Components
//!
//! - **VaR estimators**: Historical, Parametric, Monte Carlo (Normal) and
//!   Monte Carlo (Student-t) over a [`ReturnSeries`]
//! - **Option pricers**: analytic Black-Scholes and Monte Carlo under
//!   risk-neutral geometric Brownian motion, for [`OptionParams`]
//! - **RandomSource**: explicit, seedable generator passed to every Monte
//!   Carlo estimator; there is no global random state
//! - **QuantEngine**: YAML/JSON-configured façade applying simulation defaults
//!
//! ## Example Usage
//!
//! ```rust
//! use quant_risk::{
//!     compute_var, price_option, OptionParams, PricingMethod, RandomSource, ReturnSeries,
//!     VarMethod,
//! };
//!
//! let series = ReturnSeries::from_prices(&[100.0, 98.0, 99.5, 97.0, 101.0, 102.5]);
//! let var = compute_var(&series, 0.95, VarMethod::Parametric, None).unwrap();
//! assert!(var.value < 0.0);
//!
//! let call = OptionParams::call(100.0, 100.0, 0.03, 0.2, 1.0);
//! let mut rng = RandomSource::from_seed(42);
//! let mc = price_option(&call, PricingMethod::MonteCarlo { simulations: 10_000 }, Some(&mut rng))
//!     .unwrap();
//! let analytic = price_option(&call, PricingMethod::Analytic, None).unwrap();
//! assert!((mc.price - analytic.price).abs() < 4.0 * mc.standard_error.unwrap());
//! ```

mod config;
mod engine;
mod error;
mod option;
mod pricing;
mod random;
mod series;
mod var;

pub mod stats;

pub use config::EngineConfig;
pub use engine::{PriceComparison, QuantEngine, VarComparison};
pub use error::{ErrorKind, QuantError, Result};
pub use option::{OptionParams, OptionSide};
pub use pricing::{
    black_scholes_price, monte_carlo_price, monte_carlo_price_parallel, price_option,
    PriceResult, PricingMethod, DEFAULT_PRICING_SIMULATIONS,
};
pub use random::RandomSource;
pub use series::{Moments, ReturnSeries};
pub use var::{
    compute_var, historical_var, monte_carlo_normal_var, monte_carlo_student_t_var,
    parametric_var, VarMethod, VarResult, DEFAULT_DEGREES_OF_FREEDOM, DEFAULT_VAR_SIMULATIONS,
};
