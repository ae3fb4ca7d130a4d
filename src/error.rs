//! Error types for risk estimation and option pricing

use thiserror::Error;

/// Errors that can occur in VaR estimation or option pricing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuantError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Insufficient data: need at least {required} usable observations, got {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Numerical degeneracy: {0}")]
    NumericalDegeneracy(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Payload-free error taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidParameter,
    InsufficientData,
    NumericalDegeneracy,
    Config,
}

impl QuantError {
    /// The kind of failure, without its details
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuantError::InvalidParameter(_) => ErrorKind::InvalidParameter,
            QuantError::InsufficientData { .. } => ErrorKind::InsufficientData,
            QuantError::NumericalDegeneracy(_) => ErrorKind::NumericalDegeneracy,
            QuantError::Config(_) => ErrorKind::Config,
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        QuantError::InvalidParameter(message.into())
    }
}

pub type Result<T> = std::result::Result<T, QuantError>;
