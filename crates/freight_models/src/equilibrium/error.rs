//! Equilibrium error types.

use crate::demand::DemandError;
use thiserror::Error;

/// Errors raised while configuring an equilibrium search or analysis.
///
/// The search itself never fails: a missing intersection is reported
/// through [`EquilibriumPoint::residual`](super::EquilibriumPoint::residual).
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquilibriumError {
    /// Search bounds are not a positive, non-empty interval.
    #[error("Invalid search bounds [{min}, {max}]: require 0 < min < max")]
    InvalidBounds {
        /// Lower price bound
        min: f64,
        /// Upper price bound
        max: f64,
    },

    /// Grid must have at least one step.
    #[error("Invalid grid step count: {0}")]
    InvalidGridSteps(usize),

    /// A demand curve could not be constructed.
    #[error("Demand curve error: {0}")]
    Demand(#[from] DemandError),
}
