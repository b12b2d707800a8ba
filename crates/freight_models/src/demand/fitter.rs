//! Log-linear least-squares fitting of power-law demand curves.

use super::curve::{check_point, CurveSource, FittedDemandCurve};
use super::error::DemandError;
use super::observation::DemandObservation;

/// Two-sided 95% Student-t critical values for `n = 2..=10` observations.
///
/// Index `n - 2`. Larger samples fall back to the normal quantile 1.96.
pub const T_CRITICAL_VALUES: [f64; 9] = [12.7, 4.3, 3.2, 2.8, 2.4, 2.4, 2.3, 2.3, 2.2];

/// Normal-approximation multiplier used once `n > 10`.
const NORMAL_CRITICAL_VALUE: f64 = 1.96;

/// Factor applied to the multiplier when shock observations are present.
pub const SHOCK_WIDENING: f64 = 1.8;

/// Minimum number of observations for a regression fit.
const MIN_OBSERVATIONS: usize = 2;

/// Confidence multiplier for a fit over `n` observations.
///
/// # Examples
///
/// ```rust
/// use freight_models::demand::confidence_multiplier;
///
/// assert_eq!(confidence_multiplier(2, false), 12.7);
/// assert_eq!(confidence_multiplier(50, false), 1.96);
/// assert!((confidence_multiplier(5, true) - 2.8 * 1.8).abs() < 1e-12);
/// ```
pub fn confidence_multiplier(n: usize, widen_for_shock: bool) -> f64 {
    let base = match n {
        2..=10 => T_CRITICAL_VALUES[n - 2],
        _ => NORMAL_CRITICAL_VALUE,
    };
    if widen_for_shock {
        base * SHOCK_WIDENING
    } else {
        base
    }
}

/// Fits `Volume = a × Price^b` by ordinary least squares on
/// `(ln price, ln volume)`.
///
/// The fitter is stateless; it exists so the regression strategy has a
/// named home next to the degenerate constructors on
/// [`FittedDemandCurve`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DemandCurveFitter;

impl DemandCurveFitter {
    /// Creates a fitter.
    pub fn new() -> Self {
        Self
    }

    /// Fits a demand curve to `observations`.
    ///
    /// `widen_for_shock` multiplies the confidence multiplier by
    /// [`SHOCK_WIDENING`]; callers set it when the dataset contains shock
    /// points.
    ///
    /// # Errors
    ///
    /// - [`DemandError::InsufficientData`] for fewer than 2 observations
    /// - [`DemandError::InvalidObservation`] for a non-positive or
    ///   non-finite price or volume
    /// - [`DemandError::DegenerateDesign`] if every observation has the same price
    ///
    /// A zero total sum of squares (all volumes equal) is not an error: the
    /// resulting R² is non-finite and returned as such. With exactly two
    /// observations the standard error is `NaN`.
    pub fn fit(
        &self,
        observations: &[DemandObservation],
        widen_for_shock: bool,
    ) -> Result<FittedDemandCurve, DemandError> {
        let n = observations.len();
        if n < MIN_OBSERVATIONS {
            return Err(DemandError::InsufficientData {
                got: n,
                need: MIN_OBSERVATIONS,
            });
        }

        for (index, obs) in observations.iter().enumerate() {
            check_point(index, obs.price, obs.volume)?;
        }

        let first_price = observations[0].price;
        if observations.iter().all(|obs| obs.price == first_price) {
            return Err(DemandError::DegenerateDesign);
        }

        let (xs, ys): (Vec<f64>, Vec<f64>) = observations
            .iter()
            .map(|obs| (obs.price.ln(), obs.volume.ln()))
            .unzip();

        let nf = n as f64;
        let sum_x: f64 = xs.iter().sum();
        let sum_y: f64 = ys.iter().sum();
        let sum_xy: f64 = xs.iter().zip(&ys).map(|(x, y)| x * y).sum();
        let sum_x2: f64 = xs.iter().map(|x| x * x).sum();

        let sxx = sum_x2 - sum_x * sum_x / nf;
        if sxx.is_nan() || sxx <= 0.0 {
            return Err(DemandError::DegenerateDesign);
        }
        let sxy = sum_xy - sum_x * sum_y / nf;

        let slope = sxy / sxx;
        let intercept = (sum_y - slope * sum_x) / nf;

        let mean_y = sum_y / nf;
        let ss_tot: f64 = ys.iter().map(|y| (y - mean_y).powi(2)).sum();
        let ss_res: f64 = xs
            .iter()
            .zip(&ys)
            .map(|(x, y)| (y - (intercept + slope * x)).powi(2))
            .sum();

        let r_squared = 1.0 - ss_res / ss_tot;
        // (n - 2) = 0 yields NaN at n = 2
        let standard_error = if n > 2 {
            (ss_res / (nf - 2.0)).sqrt()
        } else {
            f64::NAN
        };

        tracing::debug!(
            n,
            a = intercept.exp(),
            b = slope,
            r_squared,
            "fitted demand curve"
        );

        Ok(FittedDemandCurve::from_parts(
            intercept.exp(),
            slope,
            r_squared,
            standard_error,
            confidence_multiplier(n, widen_for_shock),
            sum_x / nf,
            sxx,
            n,
            CurveSource::RegressionFit,
        ))
    }
}
