//! Before/after market shock analysis.

use super::error::EquilibriumError;
use super::shift::MarketShift;
use super::solver::{EquilibriumPoint, EquilibriumSolver, SearchBounds};
use crate::demand::{
    DemandCurveFitter, DemandDataset, DemandError, DemandObservation, FittedDemandCurve,
};
use crate::supply::SupplyCurve;

/// Result of a before/after shock analysis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShockAnalysisReport {
    /// Demand curve for the pre-event market.
    pub before_curve: FittedDemandCurve,
    /// Demand curve for the post-event market.
    pub after_curve: FittedDemandCurve,
    /// Pre-event clearing point.
    pub before_equilibrium: EquilibriumPoint,
    /// Post-event clearing point.
    pub after_equilibrium: EquilibriumPoint,
    /// Changes between the two clearing points.
    pub shift: MarketShift,
    /// Valid post-event observations flagged as shocks.
    pub shock_points: Vec<DemandObservation>,
}

/// Fits pre- and post-event demand, clears both markets against one supply
/// curve and reports the shift.
///
/// The post-event curve strategy depends on how much valid data there is:
///
/// | Valid post-event rows | Curve |
/// |-----------------------|-------|
/// | ≥ 2 | regression fit, widened if any row is a shock |
/// | 1 | shock shift of the pre-event curve through that row |
/// | 0 | [`DemandError::InsufficientData`] |
///
/// Rows with a non-positive price or volume are dropped before fitting.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShockAnalysis {
    fitter: DemandCurveFitter,
    solver: EquilibriumSolver,
    bounds: Option<SearchBounds>,
}

impl ShockAnalysis {
    /// Creates an analysis with the default solver and search ranges.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `solver` for both equilibria.
    pub fn with_solver(mut self, solver: EquilibriumSolver) -> Self {
        self.solver = solver;
        self
    }

    /// Searches both equilibria over `bounds`.
    pub fn with_bounds(mut self, bounds: SearchBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Runs the analysis with a regression-fitted pre-event curve.
    ///
    /// # Errors
    ///
    /// Propagates [`DemandError`] from either fit.
    pub fn analyse(
        &self,
        before: &DemandDataset,
        after: &DemandDataset,
        supply: &SupplyCurve,
    ) -> Result<ShockAnalysisReport, EquilibriumError> {
        let before_valid = before.valid_only();
        let before_curve = self
            .fitter
            .fit(before_valid.observations(), before_valid.has_shock())?;
        self.analyse_from_curve(before_curve, after, supply)
    }

    /// Runs the analysis against an existing pre-event curve, for example
    /// one built with [`FittedDemandCurve::from_baseline_elasticity`].
    ///
    /// # Errors
    ///
    /// [`DemandError::InsufficientData`] if `after` has no valid rows, or any
    /// error from fitting the post-event curve.
    pub fn analyse_from_curve(
        &self,
        before_curve: FittedDemandCurve,
        after: &DemandDataset,
        supply: &SupplyCurve,
    ) -> Result<ShockAnalysisReport, EquilibriumError> {
        let after_curve = self.after_curve(&before_curve, after)?;

        let before_equilibrium = self.solver.solve(&before_curve, supply, self.bounds);
        let after_equilibrium = self.solver.solve(&after_curve, supply, self.bounds);

        let shift = MarketShift::between(
            &before_equilibrium,
            &after_equilibrium,
            before_curve.r_squared(),
            after_curve.r_squared(),
        );

        tracing::debug!(
            before_price = before_equilibrium.price,
            after_price = after_equilibrium.price,
            after_source = ?after_curve.source(),
            "shock analysis complete"
        );

        Ok(ShockAnalysisReport {
            before_curve,
            after_curve,
            before_equilibrium,
            after_equilibrium,
            shift,
            shock_points: after.shock_points(),
        })
    }

    fn after_curve(
        &self,
        before_curve: &FittedDemandCurve,
        after: &DemandDataset,
    ) -> Result<FittedDemandCurve, DemandError> {
        let valid = after.valid_only();
        match valid.observations() {
            [] => Err(DemandError::InsufficientData { got: 0, need: 1 }),
            [only] => before_curve.shock_shift(only.price, only.volume),
            rows => self.fitter.fit(rows, valid.has_shock()),
        }
    }
}
