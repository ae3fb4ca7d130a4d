//! Engine configuration
//!
//! Simulation defaults for [`QuantEngine`](crate::QuantEngine), typically
//! loaded from YAML or JSON.

use crate::error::{QuantError, Result};
use crate::pricing::DEFAULT_PRICING_SIMULATIONS;
use crate::var::{DEFAULT_DEGREES_OF_FREEDOM, DEFAULT_VAR_SIMULATIONS};
use serde::{Deserialize, Serialize};

/// Defaults applied by the engine façade
///
/// Every field is optional in the serialized form.
///
/// ```yaml
/// var_simulations: 10000
/// pricing_simulations: 100000
/// degrees_of_freedom: 5.0
/// seed: 42
/// batches: 4
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Simulated returns per Monte Carlo VaR estimate
    pub var_simulations: usize,

    /// Simulated terminal prices per Monte Carlo option price
    pub pricing_simulations: usize,

    /// Student-t degrees of freedom (must exceed 2)
    pub degrees_of_freedom: f64,

    /// Seed for reproducible Monte Carlo (None = OS entropy)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Parallel batches for Monte Carlo pricing (1 = sequential)
    pub batches: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            var_simulations: DEFAULT_VAR_SIMULATIONS,
            pricing_simulations: DEFAULT_PRICING_SIMULATIONS,
            degrees_of_freedom: DEFAULT_DEGREES_OF_FREEDOM,
            seed: None,
            batches: 1,
        }
    }
}

impl EngineConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: EngineConfig = serde_yaml::from_str(yaml)
            .map_err(|e| QuantError::Config(format!("Failed to parse YAML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)
            .map_err(|e| QuantError::Config(format!("Failed to parse JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.var_simulations == 0 {
            return Err(QuantError::Config(
                "var_simulations must be at least 1".to_string(),
            ));
        }

        if self.pricing_simulations == 0 {
            return Err(QuantError::Config(
                "pricing_simulations must be at least 1".to_string(),
            ));
        }

        if !self.degrees_of_freedom.is_finite() || self.degrees_of_freedom <= 2.0 {
            return Err(QuantError::Config(format!(
                "degrees_of_freedom must be greater than 2, got {}",
                self.degrees_of_freedom
            )));
        }

        if self.batches == 0 {
            return Err(QuantError::Config("batches must be at least 1".to_string()));
        }

        Ok(())
    }
}
