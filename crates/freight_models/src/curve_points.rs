//! Curve sampling for chart renderers.
//!
//! Points are `(price, volume)` pairs; the renderer decides the axes.

use crate::demand::{DemandCurve, DemandObservation};
use crate::supply::SupplyCurve;

/// Default number of sampled points per curve.
pub const DEFAULT_POINTS: usize = 100;

/// One sampled point on a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurvePoint {
    /// Price coordinate.
    pub price: f64,
    /// Volume coordinate.
    pub volume: f64,
}

/// Axis ranges covering a set of observations with a margin.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartRange {
    /// `0.8 ×` the lowest observed price.
    pub min_price: f64,
    /// `1.2 ×` the highest observed price.
    pub max_price: f64,
    /// `1.2 ×` the highest observed volume.
    pub max_volume: f64,
}

impl ChartRange {
    /// Derives the range from observations; `None` when there are none.
    ///
    /// # Examples
    ///
    /// ```
    /// use freight_models::curve_points::ChartRange;
    /// use freight_models::demand::DemandObservation;
    ///
    /// let obs = [
    ///     DemandObservation::new(100.0, 10.0),
    ///     DemandObservation::new(200.0, 5.0),
    /// ];
    /// let range = ChartRange::from_observations(&obs).unwrap();
    /// assert_eq!(range.min_price, 80.0);
    /// assert_eq!(range.max_price, 240.0);
    /// assert_eq!(range.max_volume, 12.0);
    /// ```
    pub fn from_observations<'a, I>(observations: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a DemandObservation>,
    {
        let mut iter = observations.into_iter();
        let first = iter.next()?;
        let (min_price, max_price, max_volume) = iter.fold(
            (first.price, first.price, first.volume),
            |(lo, hi, vol), obs| (lo.min(obs.price), hi.max(obs.price), vol.max(obs.volume)),
        );
        Some(Self {
            min_price: min_price * 0.8,
            max_price: max_price * 1.2,
            max_volume: max_volume * 1.2,
        })
    }
}

/// Samples `points` evenly spaced prices over `[min_price, max_price]`,
/// keeping only points with positive predicted volume.
///
/// Fewer than two points yields at most the single point at `min_price`.
pub fn demand_curve_points<D: DemandCurve + ?Sized>(
    curve: &D,
    min_price: f64,
    max_price: f64,
    points: usize,
) -> Vec<CurvePoint> {
    sample(min_price, max_price, points)
        .map(|price| CurvePoint {
            price,
            volume: curve.predict(price),
        })
        .filter(|point| point.volume > 0.0)
        .collect()
}

/// Samples `points` evenly spaced volumes over `[0, max_volume]`.
pub fn supply_curve_points(supply: &SupplyCurve, max_volume: f64, points: usize) -> Vec<CurvePoint> {
    sample(0.0, max_volume, points)
        .map(|volume| CurvePoint {
            price: supply.predict(volume),
            volume,
        })
        .collect()
}

fn sample(start: f64, end: f64, points: usize) -> impl Iterator<Item = f64> {
    let step = if points > 1 {
        (end - start) / (points - 1) as f64
    } else {
        0.0
    };
    (0..points).map(move |i| start + i as f64 * step)
}
