//! Error types for structured error handling.
//!
//! This module provides:
//! - `StatisticsError`: Errors from percentile and sample summary operations

use thiserror::Error;

/// Statistics-related errors.
///
/// Raised by the percentile and summary routines when the sample cannot
/// support the requested statistic.
///
/// # Variants
/// - `EmptySample`: No observations were supplied
/// - `InvalidPercentile`: Requested percentile outside [0, 100]
///
/// # Examples
/// ```
/// use freight_core::types::StatisticsError;
///
/// let err = StatisticsError::InvalidPercentile(120.0);
/// assert_eq!(format!("{}", err), "Invalid percentile 120: must be in range [0, 100]");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatisticsError {
    /// The sample contains no observations.
    #[error("Empty sample: at least one observation is required")]
    EmptySample,

    /// The requested percentile lies outside [0, 100] or is NaN.
    #[error("Invalid percentile {0}: must be in range [0, 100]")]
    InvalidPercentile(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_error_display() {
        let err = StatisticsError::EmptySample;
        assert!(err.to_string().contains("at least one observation"));

        let err = StatisticsError::InvalidPercentile(-5.0);
        assert!(err.to_string().contains("-5"));
    }

    #[test]
    fn test_statistics_error_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&StatisticsError::EmptySample);
    }
}
