//! Option error types.

use thiserror::Error;

/// Errors raised while specifying or pricing an option.
///
/// # Examples
/// ```
/// use freight_pricing::options::OptionError;
///
/// let err = OptionError::InvalidStrike { strike: -100.0 };
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionError {
    /// No paths to price on.
    #[error("Empty path set: at least one path is required")]
    EmptyPaths,

    /// Exercise step is outside the simulated horizon.
    #[error("Invalid exercise step {step}: must be in range [1, {path_len}]")]
    InvalidExerciseStep {
        /// Requested 1-based step
        step: usize,
        /// Length of the shortest path
        path_len: usize,
    },

    /// Strike is negative or not finite.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Percent-of-spot strike outside [1, 500].
    #[error("Invalid strike percentage {pct}: must be in range [1, 500]")]
    InvalidStrikePercent {
        /// The invalid percentage
        pct: f64,
    },

    /// Histogram needs at least one bin.
    #[error("Invalid bin count: {0}")]
    InvalidBinCount(usize),
}
