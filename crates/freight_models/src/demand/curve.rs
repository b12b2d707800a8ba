//! Fitted demand curves and their prediction intervals.

use super::error::DemandError;

/// Heuristic R² assigned to a baseline-elasticity curve.
const BASELINE_R_SQUARED: f64 = 0.85;
/// Heuristic log-space standard error assigned to a baseline-elasticity curve.
const BASELINE_STANDARD_ERROR: f64 = 0.3;
/// Confidence multiplier assigned to a baseline-elasticity curve.
const BASELINE_MULTIPLIER: f64 = 1.96;

/// Floor for the R² of a shock-shifted curve.
const SHOCK_R_SQUARED_FLOOR: f64 = 0.3;
/// Fraction of the source R² retained by a shock-shifted curve.
const SHOCK_R_SQUARED_RETENTION: f64 = 0.6;
/// Standard error inflation for a shock-shifted curve.
const SHOCK_STANDARD_ERROR_INFLATION: f64 = 2.0;
/// Minimum confidence multiplier of a shock-shifted curve.
const SHOCK_MULTIPLIER_FLOOR: f64 = 2.8;
/// Multiplier growth relative to the source curve.
const SHOCK_MULTIPLIER_GROWTH: f64 = 1.1;

/// Volume-at-price contract shared by every demand model.
///
/// The equilibrium solver only needs point predictions; models that can be
/// inverted in closed form may also implement [`DemandCurve::price_for_volume`]
/// so that a fixed-capacity market clears analytically.
pub trait DemandCurve {
    /// Predicted volume at `price`.
    fn predict(&self, price: f64) -> f64;

    /// Price at which predicted demand equals `volume`, if the model has a
    /// closed-form inverse. The result may be non-finite; callers check it.
    fn price_for_volume(&self, _volume: f64) -> Option<f64> {
        None
    }
}

/// How a demand curve was constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveSource {
    /// Log-linear least squares over two or more observations.
    RegressionFit,
    /// One baseline point plus a user-specified volume sensitivity.
    BaselineElasticity,
    /// A source curve rescaled through one post-shock observation.
    ShockShift,
}

/// Point prediction with lower and upper prediction bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PredictionInterval {
    /// Predicted volume, `a × price^b`.
    pub predicted: f64,
    /// Lower prediction bound.
    pub lower: f64,
    /// Upper prediction bound.
    pub upper: f64,
}

impl PredictionInterval {
    /// Width of the interval.
    #[inline]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Power-law demand curve `Volume = a × Price^b` with fit diagnostics.
///
/// Constructed once per analysis and never mutated; a new analysis builds a
/// new curve.
///
/// # Prediction Interval
///
/// At query price `P`, with `x = ln P`:
///
/// ```text
/// h      = 1/n + (x - mean_log_price)² / sxx
/// margin = confidence_multiplier × standard_error × √h
/// bounds = exp(ln(a) + b·x ± margin)
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FittedDemandCurve {
    a: f64,
    b: f64,
    r_squared: f64,
    standard_error: f64,
    confidence_multiplier: f64,
    mean_log_price: f64,
    sxx: f64,
    n: usize,
    source: CurveSource,
}

impl FittedDemandCurve {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        a: f64,
        b: f64,
        r_squared: f64,
        standard_error: f64,
        confidence_multiplier: f64,
        mean_log_price: f64,
        sxx: f64,
        n: usize,
        source: CurveSource,
    ) -> Self {
        Self {
            a,
            b,
            r_squared,
            standard_error,
            confidence_multiplier,
            mean_log_price,
            sxx,
            n,
            source,
        }
    }

    /// Builds a curve from one baseline point and a volume sensitivity.
    ///
    /// `sensitivity_pct` is the percentage change in volume for a 10% change
    /// in price, so the elasticity is `b = -sensitivity_pct / 10` and `a` is
    /// chosen so the curve passes through the baseline point. With no
    /// residuals to learn from, the fit statistics are fixed heuristics
    /// (R² = 0.85, standard error = 0.3, multiplier = 1.96).
    ///
    /// # Errors
    ///
    /// - [`DemandError::InvalidObservation`] if the baseline price or volume
    ///   is not strictly positive
    /// - [`DemandError::InvalidSensitivity`] if the sensitivity is not finite
    ///
    /// # Examples
    ///
    /// ```rust
    /// use freight_models::demand::{CurveSource, DemandCurve, FittedDemandCurve};
    ///
    /// let curve = FittedDemandCurve::from_baseline_elasticity(100.0, 50.0, 10.0).unwrap();
    /// assert_eq!(curve.source(), CurveSource::BaselineElasticity);
    /// assert!((curve.b() + 1.0).abs() < 1e-12);
    /// assert!((curve.predict(100.0) - 50.0).abs() < 1e-9);
    /// ```
    pub fn from_baseline_elasticity(
        price: f64,
        volume: f64,
        sensitivity_pct: f64,
    ) -> Result<Self, DemandError> {
        check_point(0, price, volume)?;
        if !sensitivity_pct.is_finite() {
            return Err(DemandError::InvalidSensitivity(sensitivity_pct));
        }

        let b = -sensitivity_pct / 10.0;
        let a = volume / price.powf(b);

        // n = 1 with a unit sxx keeps the leverage term finite: the band
        // widens with the squared log-distance from the baseline price.
        Ok(Self::from_parts(
            a,
            b,
            BASELINE_R_SQUARED,
            BASELINE_STANDARD_ERROR,
            BASELINE_MULTIPLIER,
            price.ln(),
            1.0,
            1,
            CurveSource::BaselineElasticity,
        ))
    }

    /// Re-estimates this curve through a single post-shock observation.
    ///
    /// The elasticity `b` is kept; `a` is scaled by the ratio of the observed
    /// volume to the volume this curve predicts at the shock price. The
    /// result carries degraded confidence:
    ///
    /// - `r_squared = max(0.3, source × 0.6)`
    /// - `standard_error = source × 2.0`
    /// - `confidence_multiplier = max(2.8, source × 1.1)`, always strictly
    ///   greater than the source multiplier
    ///
    /// # Errors
    ///
    /// [`DemandError::InvalidObservation`] if the shock price or volume is not
    /// strictly positive.
    pub fn shock_shift(&self, shock_price: f64, shock_volume: f64) -> Result<Self, DemandError> {
        check_point(0, shock_price, shock_volume)?;

        let expected = self.predict(shock_price);
        let ratio = shock_volume / expected;

        Ok(Self::from_parts(
            self.a * ratio,
            self.b,
            (self.r_squared * SHOCK_R_SQUARED_RETENTION).max(SHOCK_R_SQUARED_FLOOR),
            self.standard_error * SHOCK_STANDARD_ERROR_INFLATION,
            (self.confidence_multiplier * SHOCK_MULTIPLIER_GROWTH).max(SHOCK_MULTIPLIER_FLOOR),
            self.mean_log_price,
            self.sxx,
            self.n,
            CurveSource::ShockShift,
        ))
    }

    /// Scale coefficient `a`.
    #[inline]
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Elasticity exponent `b`.
    #[inline]
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Coefficient of determination in log space. May be negative.
    #[inline]
    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }

    /// Residual standard error in log space. `NaN` for a two-point fit.
    #[inline]
    pub fn standard_error(&self) -> f64 {
        self.standard_error
    }

    /// Critical value scaling the prediction margin.
    #[inline]
    pub fn confidence_multiplier(&self) -> f64 {
        self.confidence_multiplier
    }

    /// Mean of the log prices the curve was fitted on.
    #[inline]
    pub fn mean_log_price(&self) -> f64 {
        self.mean_log_price
    }

    /// Sum of squared log-price deviations.
    #[inline]
    pub fn sxx(&self) -> f64 {
        self.sxx
    }

    /// Number of observations behind the curve.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Construction strategy.
    #[inline]
    pub fn source(&self) -> CurveSource {
        self.source
    }

    /// Human-readable equation, e.g. `Volume = 1234.57 × Price^-1.250`.
    pub fn equation(&self) -> String {
        format!("Volume = {:.2} × Price^{:.3}", self.a, self.b)
    }

    /// Predicted volume with prediction bounds at `price`.
    ///
    /// Non-finite statistics (for example the `NaN` standard error of a
    /// two-point fit) propagate into the bounds.
    pub fn predict_with_confidence(&self, price: f64) -> PredictionInterval {
        let log_price = price.ln();
        let log_prediction = self.a.ln() + self.b * log_price;

        let deviation = log_price - self.mean_log_price;
        let leverage = 1.0 / self.n as f64 + deviation * deviation / self.sxx;
        let margin = self.confidence_multiplier * self.standard_error * leverage.sqrt();

        PredictionInterval {
            predicted: log_prediction.exp(),
            lower: (log_prediction - margin).exp(),
            upper: (log_prediction + margin).exp(),
        }
    }
}

impl DemandCurve for FittedDemandCurve {
    #[inline]
    fn predict(&self, price: f64) -> f64 {
        self.a * price.powf(self.b)
    }

    /// `price = (volume / a)^(1 / b)`.
    #[inline]
    fn price_for_volume(&self, volume: f64) -> Option<f64> {
        Some((volume / self.a).powf(1.0 / self.b))
    }
}

pub(crate) fn check_point(index: usize, price: f64, volume: f64) -> Result<(), DemandError> {
    if price.is_finite() && price > 0.0 && volume.is_finite() && volume > 0.0 {
        Ok(())
    } else {
        Err(DemandError::InvalidObservation {
            index,
            price,
            volume,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_curve() -> FittedDemandCurve {
        FittedDemandCurve::from_parts(
            5000.0,
            -0.8,
            0.9,
            0.1,
            2.4,
            8.0,
            0.5,
            6,
            CurveSource::RegressionFit,
        )
    }

    #[test]
    fn test_predict_is_power_law() {
        let curve = sample_curve();
        for price in [10.0, 250.0, 3000.0] {
            assert_relative_eq!(
                curve.predict(price),
                5000.0 * f64::powf(price, -0.8),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_interval_brackets_prediction() {
        let curve = sample_curve();
        let interval = curve.predict_with_confidence(3000.0);
        assert_relative_eq!(interval.predicted, curve.predict(3000.0), max_relative = 1e-12);
        assert!(interval.lower < interval.predicted);
        assert!(interval.upper > interval.predicted);
        assert_relative_eq!(interval.width(), interval.upper - interval.lower);
        assert!(interval.width() > 0.0);
    }

    #[test]
    fn test_interval_narrowest_at_mean_log_price() {
        let curve = sample_curve();
        let at_centre = curve.predict_with_confidence(8.0_f64.exp());
        let away = curve.predict_with_confidence(9.0_f64.exp());

        let centre_log_width = at_centre.upper.ln() - at_centre.lower.ln();
        let away_log_width = away.upper.ln() - away.lower.ln();
        assert!(away_log_width > centre_log_width);

        // h = 1/n at the centre
        let expected_margin = 2.4 * 0.1 * (1.0_f64 / 6.0).sqrt();
        assert_relative_eq!(centre_log_width, 2.0 * expected_margin, max_relative = 1e-9);
    }

    #[test]
    fn test_interval_propagates_nan_standard_error() {
        let curve = FittedDemandCurve::from_parts(
            100.0,
            -1.0,
            1.0,
            f64::NAN,
            12.7,
            0.0,
            1.0,
            2,
            CurveSource::RegressionFit,
        );
        let interval = curve.predict_with_confidence(2.0);
        assert_relative_eq!(interval.predicted, 50.0, max_relative = 1e-12);
        assert!(interval.lower.is_nan());
        assert!(interval.upper.is_nan());
        assert!(interval.width().is_nan());
    }

    #[test]
    fn test_baseline_elasticity() {
        let curve = FittedDemandCurve::from_baseline_elasticity(3000.0, 1000.0, 15.0).unwrap();
        assert_relative_eq!(curve.b(), -1.5);
        assert_relative_eq!(curve.predict(3000.0), 1000.0, max_relative = 1e-12);
        assert_eq!(curve.r_squared(), 0.85);
        assert_eq!(curve.standard_error(), 0.3);
        assert_eq!(curve.confidence_multiplier(), 1.96);
        assert_eq!(curve.n(), 1);

        // 10% price increase -> roughly 15% less volume (exactly 1.1^-1.5)
        let ratio = curve.predict(3300.0) / curve.predict(3000.0);
        assert_relative_eq!(ratio, 1.1_f64.powf(-1.5), max_relative = 1e-12);
    }

    #[test]
    fn test_baseline_elasticity_rejects_bad_input() {
        assert!(matches!(
            FittedDemandCurve::from_baseline_elasticity(0.0, 10.0, 5.0),
            Err(DemandError::InvalidObservation { .. })
        ));
        assert!(matches!(
            FittedDemandCurve::from_baseline_elasticity(10.0, 10.0, f64::NAN),
            Err(DemandError::InvalidSensitivity(_))
        ));
    }

    #[test]
    fn test_shock_shift_keeps_elasticity() {
        let source = sample_curve();
        let shifted = source.shock_shift(3000.0, source.predict(3000.0) * 1.25).unwrap();

        assert_eq!(shifted.source(), CurveSource::ShockShift);
        assert_eq!(shifted.b(), source.b());
        assert_relative_eq!(shifted.a(), source.a() * 1.25, max_relative = 1e-12);
        assert_relative_eq!(shifted.r_squared(), 0.54, max_relative = 1e-12);
        assert_relative_eq!(shifted.standard_error(), 0.2, max_relative = 1e-12);
        assert_relative_eq!(shifted.confidence_multiplier(), 2.8);
    }

    #[test]
    fn test_shock_shift_widens_from_wide_source() {
        let source = FittedDemandCurve::from_parts(
            100.0,
            -1.0,
            0.2,
            0.5,
            12.7,
            0.0,
            1.0,
            2,
            CurveSource::RegressionFit,
        );
        let shifted = source.shock_shift(2.0, 40.0).unwrap();
        assert!(shifted.confidence_multiplier() > source.confidence_multiplier());
        assert_eq!(shifted.r_squared(), 0.3);
    }

    #[test]
    fn test_shock_shift_rejects_bad_point() {
        let source = sample_curve();
        assert!(source.shock_shift(-5.0, 10.0).is_err());
        assert!(source.shock_shift(5.0, 0.0).is_err());
    }

    #[test]
    fn test_price_for_volume_inverts_predict() {
        let curve = sample_curve();
        let price = curve.price_for_volume(curve.predict(1234.0)).unwrap();
        assert_relative_eq!(price, 1234.0, max_relative = 1e-10);
    }

    #[test]
    fn test_equation_format() {
        let curve = FittedDemandCurve::from_baseline_elasticity(1.0, 2.0, 10.0).unwrap();
        assert_eq!(curve.equation(), "Volume = 2.00 × Price^-1.000");
    }
}
