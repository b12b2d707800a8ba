//! # Freight Pricing (Layer 3: Simulation Engine)
//!
//! Monte Carlo simulation of freight-rate paths and option payoffs built on
//! the simulated paths.
//!
//! ## Modules
//!
//! - [`rng`]: seeded Box-Muller normal generator
//! - [`mc`]: simulation parameters and configuration, GBM path simulator,
//!   percentile bands and risk metrics
//! - [`options`]: call/put payoffs at an exercise step, payoff summaries and
//!   histograms
//!
//! ## Usage Example
//!
//! ```rust
//! use freight_pricing::mc::{PathSimulator, SimulationParameters};
//! use freight_pricing::options::{price_option, OptionKind, OptionSpec, StrikeSpec};
//!
//! let params = SimulationParameters::new(3000.0, 3200.0, 0.03, 13, 2_000);
//! params.validate().unwrap();
//!
//! let config = params.config_builder().seed(42).build().unwrap();
//! let result = PathSimulator::new(config).simulate(&params.gbm_params()).unwrap();
//! assert_eq!(result.final_prices.len(), 2_000);
//!
//! let strike = StrikeSpec::PercentOfSpot(105.0).resolve(params.initial_spot).unwrap();
//! let spec = OptionSpec::new(13, strike, OptionKind::Call);
//! let valuation = price_option(&result.price_paths, &spec).unwrap();
//! assert!(valuation.summary.mean >= 0.0);
//! ```

#![warn(missing_docs)]

pub mod mc;
pub mod options;
pub mod rng;
