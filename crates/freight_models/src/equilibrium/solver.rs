//! Brute-force market-clearing search.

use super::error::EquilibriumError;
use crate::demand::DemandCurve;
use crate::supply::SupplyCurve;

/// Default number of grid steps (the grid has `GRID_STEPS + 1` points).
pub const GRID_STEPS: usize = 1000;

/// Default sloped-supply search range, as multiples of the base price.
const SLOPED_RANGE: (f64, f64) = (0.5, 3.0);

/// Default flat-supply fallback range, as multiples of the base price.
const FLAT_FALLBACK_RANGE: (f64, f64) = (0.05, 20.0);

/// Closed price interval searched by the grid.
///
/// # Examples
///
/// ```
/// use freight_models::equilibrium::SearchBounds;
///
/// assert!(SearchBounds::new(100.0, 500.0).is_ok());
/// assert!(SearchBounds::new(0.0, 500.0).is_err());
/// assert!(SearchBounds::new(500.0, 500.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchBounds {
    min: f64,
    max: f64,
}

impl SearchBounds {
    /// Creates bounds, requiring finite `0 < min < max`.
    ///
    /// # Errors
    ///
    /// [`EquilibriumError::InvalidBounds`] otherwise.
    pub fn new(min: f64, max: f64) -> Result<Self, EquilibriumError> {
        if min.is_finite() && max.is_finite() && min > 0.0 && min < max {
            Ok(Self { min, max })
        } else {
            Err(EquilibriumError::InvalidBounds { min, max })
        }
    }

    /// Lower bound.
    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    fn scaled(base_price: f64, (lo, hi): (f64, f64)) -> Self {
        Self {
            min: base_price * lo,
            max: base_price * hi,
        }
    }
}

/// Market-clearing point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquilibriumPoint {
    /// Clearing price.
    pub price: f64,
    /// Volume traded at the clearing price.
    pub volume: f64,
    /// Absolute mismatch at the reported point; 0 for an analytic solution.
    pub residual: f64,
}

impl EquilibriumPoint {
    fn unresolved() -> Self {
        Self {
            price: f64::NAN,
            volume: f64::NAN,
            residual: f64::INFINITY,
        }
    }

    /// Returns `true` if price and volume are both finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.price.is_finite() && self.volume.is_finite()
    }
}

/// Finds where a demand curve meets a supply curve.
///
/// # Algorithm
///
/// - **Flat supply**: invert the demand curve at the fixed capacity. If the
///   curve has no closed-form inverse, or the inverse is non-finite or
///   non-positive, fall back to a grid search minimising
///   `|demand(p) - capacity|` over the caller's bounds or
///   `[0.05, 20] × base_price`.
/// - **Sloped supply**: grid search over the caller's bounds or
///   `[0.5, 3] × base_price` minimising `|p - supply(demand(p))|`.
///
/// The grid visits prices in ascending order and keeps the first minimum.
/// `NaN` objective values are never selected; if every value is `NaN` the
/// point has `NaN` price and volume and an infinite residual.
///
/// # Examples
///
/// ```
/// use freight_models::demand::FittedDemandCurve;
/// use freight_models::equilibrium::EquilibriumSolver;
/// use freight_models::supply::SupplyCurve;
///
/// // Volume = 100 / Price
/// let demand = FittedDemandCurve::from_baseline_elasticity(1.0, 100.0, 10.0).unwrap();
/// let supply = SupplyCurve::flat(2.0, 50.0).unwrap();
///
/// let point = EquilibriumSolver::new().solve(&demand, &supply, None);
/// assert!((point.price - 2.0).abs() < 1e-9);
/// assert_eq!(point.residual, 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EquilibriumSolver {
    steps: usize,
}

impl Default for EquilibriumSolver {
    fn default() -> Self {
        Self { steps: GRID_STEPS }
    }
}

impl EquilibriumSolver {
    /// Creates a solver with [`GRID_STEPS`] grid steps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a solver with a custom number of grid steps.
    ///
    /// # Errors
    ///
    /// [`EquilibriumError::InvalidGridSteps`] if `steps == 0`.
    pub fn with_steps(steps: usize) -> Result<Self, EquilibriumError> {
        if steps == 0 {
            return Err(EquilibriumError::InvalidGridSteps(steps));
        }
        Ok(Self { steps })
    }

    /// Number of grid steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Solves for the market-clearing point.
    pub fn solve<D: DemandCurve + ?Sized>(
        &self,
        demand: &D,
        supply: &SupplyCurve,
        bounds: Option<SearchBounds>,
    ) -> EquilibriumPoint {
        match *supply {
            SupplyCurve::Flat {
                base_price,
                capacity,
            } => self.solve_flat(demand, base_price, capacity, bounds),
            SupplyCurve::Sloped { base_price, .. } => {
                let bounds =
                    bounds.unwrap_or_else(|| SearchBounds::scaled(base_price, SLOPED_RANGE));
                self.grid_search(bounds, |price| {
                    let volume = demand.predict(price);
                    ((price - supply.predict(volume)).abs(), volume)
                })
            }
        }
    }

    fn solve_flat<D: DemandCurve + ?Sized>(
        &self,
        demand: &D,
        base_price: f64,
        capacity: f64,
        bounds: Option<SearchBounds>,
    ) -> EquilibriumPoint {
        if let Some(price) = demand.price_for_volume(capacity) {
            if price.is_finite() && price > 0.0 {
                return EquilibriumPoint {
                    price,
                    volume: capacity,
                    residual: 0.0,
                };
            }
        }

        let bounds = bounds.unwrap_or_else(|| SearchBounds::scaled(base_price, FLAT_FALLBACK_RANGE));
        tracing::warn!(
            capacity,
            min = bounds.min,
            max = bounds.max,
            "flat-supply inversion degenerate, falling back to grid search"
        );
        self.grid_search(bounds, |price| {
            let volume = demand.predict(price);
            ((volume - capacity).abs(), volume)
        })
    }

    /// Evaluates `objective` on `steps + 1` evenly spaced prices. The
    /// objective returns `(residual, volume)`.
    fn grid_search<F>(&self, bounds: SearchBounds, objective: F) -> EquilibriumPoint
    where
        F: Fn(f64) -> (f64, f64),
    {
        let step = (bounds.max - bounds.min) / self.steps as f64;
        let mut best = EquilibriumPoint::unresolved();

        for i in 0..=self.steps {
            let price = bounds.min + i as f64 * step;
            let (residual, volume) = objective(price);
            if residual < best.residual {
                best = EquilibriumPoint {
                    price,
                    volume,
                    residual,
                };
            }
        }

        tracing::debug!(
            price = best.price,
            volume = best.volume,
            residual = best.residual,
            "grid search complete"
        );
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demand::{CurveSource, FittedDemandCurve};
    use approx::assert_relative_eq;

    /// Volume = intercept - slope × price, with no closed-form inverse.
    struct LinearDemand {
        intercept: f64,
        slope: f64,
    }

    impl DemandCurve for LinearDemand {
        fn predict(&self, price: f64) -> f64 {
            self.intercept - self.slope * price
        }
    }

    struct NanDemand;

    impl DemandCurve for NanDemand {
        fn predict(&self, _price: f64) -> f64 {
            f64::NAN
        }
    }

    fn power_law(a: f64, b: f64) -> FittedDemandCurve {
        FittedDemandCurve::from_parts(a, b, 1.0, 0.0, 1.96, 0.0, 1.0, 5, CurveSource::RegressionFit)
    }

    #[test]
    fn test_flat_supply_analytic_inversion() {
        let demand = power_law(100.0, -1.0);
        let supply = SupplyCurve::flat(10.0, 50.0).unwrap();
        let point = EquilibriumSolver::new().solve(&demand, &supply, None);

        assert_relative_eq!(point.price, 2.0, max_relative = 1e-12);
        assert_eq!(point.volume, 50.0);
        assert_eq!(point.residual, 0.0);
    }

    #[test]
    fn test_flat_supply_falls_back_when_inverse_degenerate() {
        // b = 0 makes (capacity / a)^(1/b) collapse to 0
        let demand = power_law(100.0, 0.0);
        let supply = SupplyCurve::flat(100.0, 50.0).unwrap();
        let point = EquilibriumSolver::new().solve(&demand, &supply, None);

        // Every grid point ties; the first (lowest) price wins
        assert_relative_eq!(point.price, 5.0, max_relative = 1e-12);
        assert_relative_eq!(point.volume, 100.0);
        assert_relative_eq!(point.residual, 50.0);
    }

    #[test]
    fn test_flat_supply_without_inverse_uses_grid() {
        let demand = LinearDemand {
            intercept: 1000.0,
            slope: 2.0,
        };
        let supply = SupplyCurve::flat(250.0, 400.0).unwrap();
        let bounds = SearchBounds::new(100.0, 500.0).unwrap();
        let point = EquilibriumSolver::new().solve(&demand, &supply, Some(bounds));

        let step = 400.0 / GRID_STEPS as f64;
        assert!((point.price - 300.0).abs() <= step);
        assert!(point.residual <= 2.0 * step);
    }

    #[test]
    fn test_sloped_supply_within_one_grid_step() {
        // 1000 - 2P = V, P = 100 + 0.5V  =>  P = 300, V = 400
        let demand = LinearDemand {
            intercept: 1000.0,
            slope: 2.0,
        };
        let supply = SupplyCurve::sloped(100.0, 0.5).unwrap();
        let bounds = SearchBounds::new(100.0, 500.0).unwrap();
        let point = EquilibriumSolver::new().solve(&demand, &supply, Some(bounds));

        let step = (bounds.max() - bounds.min()) / GRID_STEPS as f64;
        assert!((point.price - 300.0).abs() <= step);
        assert!((point.volume - 400.0).abs() <= 2.0 * step);
    }

    #[test]
    fn test_sloped_supply_default_bounds() {
        // Intersection at 300 lies on the upper edge of [50, 300]
        let demand = LinearDemand {
            intercept: 1000.0,
            slope: 2.0,
        };
        let supply = SupplyCurve::sloped(100.0, 0.5).unwrap();
        let point = EquilibriumSolver::new().solve(&demand, &supply, None);
        assert!((point.price - 300.0).abs() <= 0.25 + 1e-9);
    }

    #[test]
    fn test_sloped_first_minimum_wins() {
        // Constant demand: |p - 150| is minimised at exactly one grid point
        let demand = LinearDemand {
            intercept: 100.0,
            slope: 0.0,
        };
        let supply = SupplyCurve::sloped(100.0, 0.5).unwrap();
        let solver = EquilibriumSolver::with_steps(10).unwrap();
        let bounds = SearchBounds::new(100.0, 200.0).unwrap();
        let point = solver.solve(&demand, &supply, Some(bounds));
        assert_relative_eq!(point.price, 150.0, max_relative = 1e-12);
        assert_relative_eq!(point.residual, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_all_nan_objective_is_unresolved() {
        let supply = SupplyCurve::sloped(100.0, 0.5).unwrap();
        let point = EquilibriumSolver::new().solve(&NanDemand, &supply, None);
        assert!(point.price.is_nan());
        assert!(point.volume.is_nan());
        assert_eq!(point.residual, f64::INFINITY);
        assert!(!point.is_finite());
    }

    #[test]
    fn test_with_steps_validates() {
        assert_eq!(
            EquilibriumSolver::with_steps(0).unwrap_err(),
            EquilibriumError::InvalidGridSteps(0)
        );
        assert_eq!(EquilibriumSolver::with_steps(10).unwrap().steps(), 10);
    }

    #[test]
    fn test_search_bounds_validation() {
        assert!(SearchBounds::new(-1.0, 10.0).is_err());
        assert!(SearchBounds::new(10.0, 1.0).is_err());
        assert!(SearchBounds::new(1.0, f64::INFINITY).is_err());
        let bounds = SearchBounds::new(1.0, 2.0).unwrap();
        assert_eq!((bounds.min(), bounds.max()), (1.0, 2.0));
    }
}
