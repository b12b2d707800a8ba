//! Linear-interpolation percentiles.
//!
//! The percentile of a sample of size `n` at level `p` is read from the
//! ascending order statistics at the fractional index
//!
//! ```text
//! idx = (p / 100) × (n - 1)
//! ```
//!
//! interpolating linearly between `floor(idx)` and `ceil(idx)`. This matches
//! the "linear" method of most statistics packages, so `p = 0` returns the
//! minimum and `p = 100` the maximum.

use crate::types::StatisticsError;
use num_traits::Float;
use std::cmp::Ordering;

#[inline]
fn cast<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

fn ascending<T: Float>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

fn check_level(p: f64) -> Result<(), StatisticsError> {
    if (0.0..=100.0).contains(&p) {
        Ok(())
    } else {
        Err(StatisticsError::InvalidPercentile(p))
    }
}

/// Returns a sorted copy of `samples` in ascending order.
///
/// NaN values compare as equal to their neighbours and keep their relative
/// position.
pub fn sorted_copy<T: Float>(samples: &[T]) -> Vec<T> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(ascending);
    sorted
}

/// Computes the `p`-th percentile of an unsorted sample.
///
/// The input slice is not modified; a sorted copy is taken internally.
///
/// # Arguments
///
/// * `samples` - Observations in any order
/// * `p` - Percentile level in [0, 100]
///
/// # Errors
///
/// - [`StatisticsError::EmptySample`] if `samples` is empty
/// - [`StatisticsError::InvalidPercentile`] if `p` is outside [0, 100] or NaN
///
/// # Examples
///
/// ```
/// use freight_core::math::percentile::percentile;
///
/// let samples = [4.0, 1.0, 3.0, 2.0];
/// assert_eq!(percentile(&samples, 0.0).unwrap(), 1.0);
/// assert_eq!(percentile(&samples, 100.0).unwrap(), 4.0);
/// assert_eq!(percentile(&samples, 50.0).unwrap(), 2.5);
/// ```
pub fn percentile<T: Float>(samples: &[T], p: f64) -> Result<T, StatisticsError> {
    check_level(p)?;
    if samples.is_empty() {
        return Err(StatisticsError::EmptySample);
    }
    let sorted = sorted_copy(samples);
    percentile_sorted(&sorted, p)
}

/// Computes the `p`-th percentile of a sample already sorted ascending.
///
/// Use this when several percentiles are read from the same sample so the
/// sort is paid once.
///
/// # Errors
///
/// Same conditions as [`percentile`].
pub fn percentile_sorted<T: Float>(sorted: &[T], p: f64) -> Result<T, StatisticsError> {
    check_level(p)?;
    let n = sorted.len();
    if n == 0 {
        return Err(StatisticsError::EmptySample);
    }

    let idx = (p / 100.0) * (n - 1) as f64;
    let lower = idx.floor() as usize;
    let upper = idx.ceil() as usize;

    if lower == upper {
        return Ok(sorted[lower]);
    }

    let upper_weight: T = cast(idx - lower as f64);
    let lower_weight: T = cast(upper as f64 - idx);
    Ok(sorted[lower] * lower_weight + sorted[upper] * upper_weight)
}

/// Computes several percentiles of an unsorted sample with a single sort.
///
/// # Errors
///
/// Fails on an empty sample or on the first invalid level.
///
/// # Examples
///
/// ```
/// use freight_core::math::percentile::percentiles;
///
/// let samples = [10.0, 30.0, 20.0];
/// let levels = percentiles(&samples, &[0.0, 50.0, 100.0]).unwrap();
/// assert_eq!(levels, vec![10.0, 20.0, 30.0]);
/// ```
pub fn percentiles<T: Float>(samples: &[T], levels: &[f64]) -> Result<Vec<T>, StatisticsError> {
    if samples.is_empty() {
        return Err(StatisticsError::EmptySample);
    }
    let sorted = sorted_copy(samples);
    levels
        .iter()
        .map(|&p| percentile_sorted(&sorted, p))
        .collect()
}
