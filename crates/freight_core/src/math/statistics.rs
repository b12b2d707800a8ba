//! Sample statistics used for simulated price and payoff reporting.

use super::percentile::{percentile_sorted, sorted_copy};
use crate::types::StatisticsError;
use num_traits::Float;

/// Arithmetic mean of a sample.
///
/// # Errors
///
/// Returns [`StatisticsError::EmptySample`] if `samples` is empty.
///
/// # Examples
///
/// ```
/// use freight_core::math::statistics::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]).unwrap(), 2.0);
/// ```
pub fn mean<T: Float>(samples: &[T]) -> Result<T, StatisticsError> {
    if samples.is_empty() {
        return Err(StatisticsError::EmptySample);
    }
    let sum = samples.iter().fold(T::zero(), |acc, &x| acc + x);
    let n = T::from(samples.len()).unwrap_or_else(T::nan);
    Ok(sum / n)
}

/// Percentage of observations strictly satisfying `predicate`.
///
/// Returns a value in [0, 100]. An empty sample yields `NaN` so that callers
/// cannot mistake "no data" for "never happens".
pub fn percent_where<F>(samples: &[f64], predicate: F) -> f64
where
    F: Fn(f64) -> bool,
{
    if samples.is_empty() {
        return f64::NAN;
    }
    let hits = samples.iter().filter(|&&x| predicate(x)).count();
    hits as f64 / samples.len() as f64 * 100.0
}

/// Descriptive summary of a sample.
///
/// Holds the mean together with the median and the 5th/95th percentiles
/// computed by linear interpolation, plus the extremes.
///
/// # Examples
///
/// ```
/// use freight_core::math::statistics::SampleSummary;
///
/// let summary = SampleSummary::from_samples(&[0.0, 10.0, 20.0]).unwrap();
/// assert_eq!(summary.mean, 10.0);
/// assert_eq!(summary.median, 10.0);
/// assert!((summary.p5 - 1.0).abs() < 1e-9);
/// assert!((summary.p95 - 19.0).abs() < 1e-9);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleSummary {
    /// Arithmetic mean.
    pub mean: f64,
    /// 50th percentile.
    pub median: f64,
    /// 5th percentile.
    pub p5: f64,
    /// 95th percentile.
    pub p95: f64,
    /// Smallest observation.
    pub min: f64,
    /// Largest observation.
    pub max: f64,
}

impl SampleSummary {
    /// Summarises `samples`, sorting a copy once.
    ///
    /// # Errors
    ///
    /// Returns [`StatisticsError::EmptySample`] if `samples` is empty.
    pub fn from_samples(samples: &[f64]) -> Result<Self, StatisticsError> {
        let mean = mean(samples)?;
        let sorted = sorted_copy(samples);
        Ok(Self {
            mean,
            median: percentile_sorted(&sorted, 50.0)?,
            p5: percentile_sorted(&sorted, 5.0)?,
            p95: percentile_sorted(&sorted, 95.0)?,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
        })
    }
}
