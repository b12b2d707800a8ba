//! Demand curve error types.

use thiserror::Error;

/// Errors raised while constructing a demand curve.
///
/// Low R² or wide confidence bands are not errors; they are reported on the
/// fitted curve itself.
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DemandError {
    /// Too few observations for the requested strategy.
    #[error("Insufficient data points: got {got}, need at least {need}")]
    InsufficientData {
        /// Number of observations provided
        got: usize,
        /// Minimum number required
        need: usize,
    },

    /// An observation has a non-positive or non-finite price or volume.
    #[error("Invalid observation at index {index}: price = {price}, volume = {volume} (both must be positive)")]
    InvalidObservation {
        /// Position of the offending observation
        index: usize,
        /// Observed price
        price: f64,
        /// Observed volume
        volume: f64,
    },

    /// Every observation shares the same price, so the slope is unidentified.
    #[error("Degenerate design: all observations share the same price")]
    DegenerateDesign,

    /// The user-supplied volume sensitivity is not a finite number.
    #[error("Invalid sensitivity {0}: must be a finite percentage")]
    InvalidSensitivity(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demand_error_display() {
        let err = DemandError::InsufficientData { got: 1, need: 2 };
        assert_eq!(
            err.to_string(),
            "Insufficient data points: got 1, need at least 2"
        );

        let err = DemandError::InvalidObservation {
            index: 3,
            price: -1.0,
            volume: 10.0,
        };
        assert!(err.to_string().contains("index 3"));

        assert!(DemandError::DegenerateDesign
            .to_string()
            .contains("same price"));
    }
}
