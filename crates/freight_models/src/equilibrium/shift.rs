//! Before/after comparison of two market equilibria.

use super::solver::EquilibriumPoint;

/// R² change beyond which model uncertainty is reported as having moved.
pub const UNCERTAINTY_THRESHOLD: f64 = 0.05;

/// How model fit quality moved between two curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UncertaintyTrend {
    /// R² fell by more than [`UNCERTAINTY_THRESHOLD`].
    IncreasedUncertainty,
    /// R² rose by more than [`UNCERTAINTY_THRESHOLD`].
    ImprovedFit,
    /// R² moved by at most the threshold, or the change is not finite.
    Stable,
}

impl UncertaintyTrend {
    /// Classifies an R² change (`after - before`).
    pub fn classify(r_squared_change: f64) -> Self {
        if r_squared_change < -UNCERTAINTY_THRESHOLD {
            UncertaintyTrend::IncreasedUncertainty
        } else if r_squared_change > UNCERTAINTY_THRESHOLD {
            UncertaintyTrend::ImprovedFit
        } else {
            UncertaintyTrend::Stable
        }
    }
}

/// Direction of the clearing-price move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PriceDirection {
    /// Clearing price rose.
    Up,
    /// Clearing price fell.
    Down,
    /// No change, or the change is not finite.
    Unchanged,
}

/// Changes between a pre-event and a post-event equilibrium.
///
/// Percentage changes are relative to the pre-event values and are
/// non-finite when a pre-event value is zero.
///
/// # Examples
///
/// ```
/// use freight_models::equilibrium::{EquilibriumPoint, MarketShift, PriceDirection, UncertaintyTrend};
///
/// let before = EquilibriumPoint { price: 3000.0, volume: 1000.0, residual: 0.0 };
/// let after = EquilibriumPoint { price: 3300.0, volume: 900.0, residual: 0.0 };
///
/// let shift = MarketShift::between(&before, &after, 0.92, 0.70);
/// assert_eq!(shift.price_change, 300.0);
/// assert!((shift.price_change_pct - 10.0).abs() < 1e-12);
/// assert_eq!(shift.direction, PriceDirection::Up);
/// assert_eq!(shift.uncertainty, UncertaintyTrend::IncreasedUncertainty);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketShift {
    /// Pre-event equilibrium.
    pub before: EquilibriumPoint,
    /// Post-event equilibrium.
    pub after: EquilibriumPoint,
    /// `after.price - before.price`.
    pub price_change: f64,
    /// Price change as a percentage of the pre-event price.
    pub price_change_pct: f64,
    /// `after.volume - before.volume`.
    pub volume_change: f64,
    /// Volume change as a percentage of the pre-event volume.
    pub volume_change_pct: f64,
    /// `after_r_squared - before_r_squared`.
    pub r_squared_change: f64,
    /// Classification of the R² change.
    pub uncertainty: UncertaintyTrend,
    /// Direction of the price move.
    pub direction: PriceDirection,
}

impl MarketShift {
    /// Compares two equilibria and the R² of the curves behind them.
    pub fn between(
        before: &EquilibriumPoint,
        after: &EquilibriumPoint,
        before_r_squared: f64,
        after_r_squared: f64,
    ) -> Self {
        let price_change = after.price - before.price;
        let volume_change = after.volume - before.volume;
        let r_squared_change = after_r_squared - before_r_squared;

        let direction = if price_change > 0.0 {
            PriceDirection::Up
        } else if price_change < 0.0 {
            PriceDirection::Down
        } else {
            PriceDirection::Unchanged
        };

        Self {
            before: *before,
            after: *after,
            price_change,
            price_change_pct: price_change / before.price * 100.0,
            volume_change,
            volume_change_pct: volume_change / before.volume * 100.0,
            r_squared_change,
            uncertainty: UncertaintyTrend::classify(r_squared_change),
            direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn point(price: f64, volume: f64) -> EquilibriumPoint {
        EquilibriumPoint {
            price,
            volume,
            residual: 0.0,
        }
    }

    #[test]
    fn test_classify_thresholds() {
        assert_eq!(
            UncertaintyTrend::classify(-0.06),
            UncertaintyTrend::IncreasedUncertainty
        );
        assert_eq!(UncertaintyTrend::classify(0.06), UncertaintyTrend::ImprovedFit);
        assert_eq!(UncertaintyTrend::classify(0.05), UncertaintyTrend::Stable);
        assert_eq!(UncertaintyTrend::classify(-0.05), UncertaintyTrend::Stable);
        assert_eq!(UncertaintyTrend::classify(f64::NAN), UncertaintyTrend::Stable);
    }

    #[test]
    fn test_shift_down() {
        let shift = MarketShift::between(&point(200.0, 50.0), &point(150.0, 60.0), 0.8, 0.9);
        assert_eq!(shift.direction, PriceDirection::Down);
        assert_relative_eq!(shift.price_change_pct, -25.0);
        assert_relative_eq!(shift.volume_change, 10.0);
        assert_relative_eq!(shift.volume_change_pct, 20.0);
        assert_eq!(shift.uncertainty, UncertaintyTrend::ImprovedFit);
    }

    #[test]
    fn test_shift_unchanged() {
        let shift = MarketShift::between(&point(200.0, 50.0), &point(200.0, 50.0), 0.8, 0.8);
        assert_eq!(shift.direction, PriceDirection::Unchanged);
        assert_eq!(shift.uncertainty, UncertaintyTrend::Stable);
        assert_eq!(shift.price_change_pct, 0.0);
    }

    #[test]
    fn test_shift_propagates_nan() {
        let unresolved = EquilibriumPoint {
            price: f64::NAN,
            volume: f64::NAN,
            residual: f64::INFINITY,
        };
        let shift = MarketShift::between(&point(200.0, 50.0), &unresolved, 0.8, 0.8);
        assert!(shift.price_change.is_nan());
        assert_eq!(shift.direction, PriceDirection::Unchanged);
    }
}
