//! European option contract parameters

use crate::error::{QuantError, Result};
use serde::{Deserialize, Serialize};

/// Option side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionSide {
    Call,
    Put,
}

impl OptionSide {
    /// Payoff at expiry for a terminal underlying price
    pub fn payoff(&self, terminal: f64, strike: f64) -> f64 {
        match self {
            OptionSide::Call => (terminal - strike).max(0.0),
            OptionSide::Put => (strike - terminal).max(0.0),
        }
    }
}

/// European option under Black-Scholes assumptions (no dividends)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionParams {
    /// Spot price of the underlying
    pub spot: f64,

    /// Strike price
    pub strike: f64,

    /// Risk-free rate (annual, continuously compounded)
    pub rate: f64,

    /// Volatility (annual)
    pub volatility: f64,

    /// Time to maturity in years
    pub time_to_expiry: f64,

    pub side: OptionSide,
}

impl OptionParams {
    pub fn new(
        spot: f64,
        strike: f64,
        rate: f64,
        volatility: f64,
        time_to_expiry: f64,
        side: OptionSide,
    ) -> Self {
        Self {
            spot,
            strike,
            rate,
            volatility,
            time_to_expiry,
            side,
        }
    }

    pub fn call(spot: f64, strike: f64, rate: f64, volatility: f64, time_to_expiry: f64) -> Self {
        Self::new(spot, strike, rate, volatility, time_to_expiry, OptionSide::Call)
    }

    pub fn put(spot: f64, strike: f64, rate: f64, volatility: f64, time_to_expiry: f64) -> Self {
        Self::new(spot, strike, rate, volatility, time_to_expiry, OptionSide::Put)
    }

    /// Same contract on the other side
    pub fn with_side(&self, side: OptionSide) -> Self {
        Self { side, ..*self }
    }

    /// Payoff if exercised against the current spot
    pub fn intrinsic_value(&self) -> f64 {
        self.side.payoff(self.spot, self.strike)
    }

    /// e^(−rT)
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.time_to_expiry).exp()
    }

    /// Validate inputs for pricing
    pub fn validate(&self) -> Result<()> {
        if !self.spot.is_finite() || self.spot <= 0.0 {
            return Err(QuantError::invalid(format!(
                "spot price must be positive, got {}",
                self.spot
            )));
        }

        if !self.strike.is_finite() || self.strike <= 0.0 {
            return Err(QuantError::invalid(format!(
                "strike price must be positive, got {}",
                self.strike
            )));
        }

        if !self.rate.is_finite() {
            return Err(QuantError::invalid(format!(
                "risk-free rate must be finite, got {}",
                self.rate
            )));
        }

        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return Err(QuantError::invalid(format!(
                "volatility must be non-negative, got {}",
                self.volatility
            )));
        }

        if !self.time_to_expiry.is_finite() || self.time_to_expiry < 0.0 {
            return Err(QuantError::invalid(format!(
                "time to expiry must be non-negative, got {}",
                self.time_to_expiry
            )));
        }

        Ok(())
    }
}
