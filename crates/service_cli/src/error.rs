//! CLI error types
//!
//! Each library error converts into [`CliError`] so commands can use `?`
//! throughout; `main` adds context through `anyhow`.

use freight_core::types::StatisticsError;
use freight_models::demand::DemandError;
use freight_models::equilibrium::EquilibriumError;
use freight_models::supply::SupplyError;
use freight_pricing::mc::{ConfigError as ParameterError, SimulationError};
use freight_pricing::options::OptionError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `freight` commands
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid simulation parameters: {0}")]
    Parameters(#[from] ParameterError),

    #[error("Simulation failed: {0}")]
    Simulation(#[from] SimulationError),

    #[error("Option valuation failed: {0}")]
    Option(#[from] OptionError),

    #[error("Demand model error: {0}")]
    Demand(#[from] DemandError),

    #[error("Supply curve error: {0}")]
    Supply(#[from] SupplyError),

    #[error("Equilibrium error: {0}")]
    Equilibrium(#[from] EquilibriumError),

    #[error("Statistics error: {0}")]
    Statistics(#[from] StatisticsError),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for command implementations
pub type Result<T> = std::result::Result<T, CliError>;
