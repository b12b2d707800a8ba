//! Market-clearing search and before/after shock analysis.
//!
//! - [`EquilibriumSolver`]: intersects a [`DemandCurve`](crate::demand::DemandCurve)
//!   with a [`SupplyCurve`](crate::supply::SupplyCurve)
//! - [`MarketShift`]: compares two equilibria and their curve fits
//! - [`ShockAnalysis`]: fits before/after datasets, picks the curve strategy
//!   for the post-event data and reports the shift

mod analysis;
mod error;
mod shift;
mod solver;

pub use analysis::{ShockAnalysis, ShockAnalysisReport};
pub use error::EquilibriumError;
pub use shift::{MarketShift, PriceDirection, UncertaintyTrend, UNCERTAINTY_THRESHOLD};
pub use solver::{EquilibriumPoint, EquilibriumSolver, SearchBounds, GRID_STEPS};
