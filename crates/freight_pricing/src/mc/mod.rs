//! Monte Carlo simulation of freight-rate paths.
//!
//! # Architecture
//!
//! ```text
//! SimulationParameters ──validate──► GbmParams ─┐
//!          │                                   ▼
//!          └──config_builder──► SimulationConfig ──► PathSimulator
//!                                                      │
//!                                                      ▼
//!                                              SimulationResult
//!                                              ├── price_paths
//!                                              ├── final_prices
//!                                              └── percentile_bands
//! ```
//!
//! # Examples
//!
//! ```rust
//! use freight_pricing::mc::{PathSimulator, SimulationParameters};
//!
//! let params = SimulationParameters::default();
//! params.validate().unwrap();
//!
//! let config = params.config_builder().seed(42).parallel(true).build().unwrap();
//! let result = PathSimulator::new(config).simulate(&params.gbm_params()).unwrap();
//!
//! let metrics = result.risk_metrics(params.initial_spot, params.forecasted_rate);
//! assert!(metrics.above_forecast_pct + metrics.below_forecast_pct <= 100.0);
//! ```

mod config;
mod error;
mod params;
mod paths;
mod result;

pub use config::{SimulationConfig, SimulationConfigBuilder, MAX_PATHS, MAX_STEPS};
pub use error::{ConfigError, SimulationError};
pub use params::{SimulationParameters, DRIFT_REFERENCE_STEPS};
pub use paths::{evolve_path, GbmParams, PathSimulator, PricePath, CHUNK_SIZE};
pub use result::{PercentileBands, RiskMetrics, SimulationResult};
