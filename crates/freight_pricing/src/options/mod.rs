//! Option payoffs evaluated on simulated freight-rate paths.
//!
//! An option is read off every path at its exercise step; the payoff
//! distribution is summarised without discounting.
//!
//! # Examples
//!
//! ```rust
//! use freight_pricing::options::{price_option, OptionKind, OptionSpec};
//!
//! let paths = vec![
//!     vec![100.0, 110.0, 125.0],
//!     vec![100.0, 95.0, 90.0],
//! ];
//! let spec = OptionSpec::new(3, 100.0, OptionKind::Call);
//! let valuation = price_option(&paths, &spec).unwrap();
//!
//! assert_eq!(valuation.payoffs, vec![25.0, 0.0]);
//! assert_eq!(valuation.summary.mean, 12.5);
//! ```

mod error;
mod histogram;
mod payoff;
mod spec;

pub use error::OptionError;
pub use histogram::{PayoffHistogram, DEFAULT_BINS};
pub use payoff::{price_option, OptionValuation, PayoffSummary};
pub use spec::{OptionKind, OptionSpec, StrikeSpec, MAX_STRIKE_PCT, MIN_STRIKE_PCT};
