//! Error types for the simulation engine.

use freight_core::types::StatisticsError;
use thiserror::Error;

/// Configuration error for the path simulator.
///
/// Raised at construction time when invalid parameters are provided.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Path count outside valid range [1, 1_000_000].
    #[error("Invalid path count {0}: must be in range [1, 1_000_000]")]
    InvalidPathCount(usize),
    /// Step count outside valid range [1, 520].
    #[error("Invalid step count {0}: must be in range [1, 520]")]
    InvalidStepCount(usize),
    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
    /// Numeric parameter outside its domain.
    #[error("Invalid parameter '{name}' = {value}: {reason}")]
    InvalidValue {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
        /// Constraint the value breaks.
        reason: &'static str,
    },
}

/// Runtime error while summarising simulated paths.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum SimulationError {
    /// Invalid simulator configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Percentile or summary statistics could not be computed.
    #[error("Statistics error: {0}")]
    Statistics(#[from] StatisticsError),
}
