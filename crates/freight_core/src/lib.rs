//! # freight_core: Statistical Foundation for the Freight-Rate Simulator
//!
//! ## Layer 1 (Foundation) Role
//!
//! freight_core is the bottom layer of the simulator workspace, providing:
//! - Linear-interpolation percentiles (`math::percentile`)
//! - Sample summaries used for price and payoff reporting (`math::statistics`)
//! - Error types shared by the upper layers (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other freight_* crates, with minimal external
//! dependencies:
//! - num-traits: Generic floating-point bounds for the percentile routines
//! - thiserror: Structured error types
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use freight_core::math::percentile::percentile;
//! use freight_core::math::statistics::SampleSummary;
//!
//! let prices = [3100.0, 2950.0, 3300.0, 3000.0, 3200.0];
//!
//! let median = percentile(&prices, 50.0).unwrap();
//! assert_eq!(median, 3100.0);
//!
//! let summary = SampleSummary::from_samples(&prices).unwrap();
//! assert_eq!(summary.min, 2950.0);
//! assert_eq!(summary.max, 3300.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for summaries and errors

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
