//! Summaries of a set of simulated paths.

use super::paths::PricePath;
use freight_core::math::percentile::{percentile_sorted, sorted_copy};
use freight_core::math::statistics::{mean, percent_where, SampleSummary};
use freight_core::types::StatisticsError;

/// Percentile levels reported per step.
const BAND_LEVELS: [f64; 5] = [5.0, 25.0, 50.0, 75.0, 95.0];

/// Per-step distribution of simulated prices.
///
/// Every vector has one entry per path step; entry `t` summarises the prices
/// of all paths at step `t`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PercentileBands {
    /// 5th percentile per step.
    pub p5: Vec<f64>,
    /// 25th percentile per step.
    pub p25: Vec<f64>,
    /// Median per step.
    pub p50: Vec<f64>,
    /// 75th percentile per step.
    pub p75: Vec<f64>,
    /// 95th percentile per step.
    pub p95: Vec<f64>,
    /// Mean per step.
    pub mean: Vec<f64>,
}

impl PercentileBands {
    /// Computes bands across `paths`, sorting each step's prices once.
    ///
    /// Paths are assumed to share one length; the shortest path bounds the
    /// number of steps.
    ///
    /// # Errors
    ///
    /// [`StatisticsError::EmptySample`] if `paths` is empty.
    pub fn from_paths(paths: &[PricePath]) -> Result<Self, StatisticsError> {
        if paths.is_empty() {
            return Err(StatisticsError::EmptySample);
        }
        let n_steps = paths.iter().map(Vec::len).min().unwrap_or(0);

        let mut bands = Self::default();
        let mut step_prices = Vec::with_capacity(paths.len());
        for step in 0..n_steps {
            step_prices.clear();
            step_prices.extend(paths.iter().map(|path| path[step]));
            let sorted = sorted_copy(&step_prices);

            let [p5, p25, p50, p75, p95] = BAND_LEVELS;
            bands.p5.push(percentile_sorted(&sorted, p5)?);
            bands.p25.push(percentile_sorted(&sorted, p25)?);
            bands.p50.push(percentile_sorted(&sorted, p50)?);
            bands.p75.push(percentile_sorted(&sorted, p75)?);
            bands.p95.push(percentile_sorted(&sorted, p95)?);
            bands.mean.push(mean(&step_prices)?);
        }
        Ok(bands)
    }

    /// Number of steps covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    /// Returns `true` if no steps are covered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }
}

/// Probabilities of terminal-price outcomes, as percentages of paths.
///
/// All comparisons are strict.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskMetrics {
    /// Percentage of paths ending above the forecast.
    pub above_forecast_pct: f64,
    /// Percentage of paths ending below the forecast.
    pub below_forecast_pct: f64,
    /// Percentage of paths ending above 1.5 × spot.
    pub up_50_pct: f64,
    /// Percentage of paths ending below 0.5 × spot.
    pub down_50_pct: f64,
}

impl RiskMetrics {
    /// Computes metrics over terminal prices. An empty sample yields `NaN`
    /// for every field.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use freight_pricing::mc::RiskMetrics;
    ///
    /// let finals = [1000.0, 3000.0, 3200.0, 3300.0, 5000.0];
    /// let metrics = RiskMetrics::from_terminal_prices(&finals, 3000.0, 3200.0);
    /// assert_eq!(metrics.above_forecast_pct, 40.0);
    /// assert_eq!(metrics.below_forecast_pct, 40.0);
    /// assert_eq!(metrics.up_50_pct, 20.0);
    /// assert_eq!(metrics.down_50_pct, 20.0);
    /// ```
    pub fn from_terminal_prices(final_prices: &[f64], initial_spot: f64, forecast: f64) -> Self {
        let up = initial_spot * 1.5;
        let down = initial_spot * 0.5;
        Self {
            above_forecast_pct: percent_where(final_prices, |p| p > forecast),
            below_forecast_pct: percent_where(final_prices, |p| p < forecast),
            up_50_pct: percent_where(final_prices, |p| p > up),
            down_50_pct: percent_where(final_prices, |p| p < down),
        }
    }
}

/// Output of a simulation run. Never mutated after construction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationResult {
    /// All simulated paths.
    pub price_paths: Vec<PricePath>,
    /// Last price of every path.
    pub final_prices: Vec<f64>,
    /// Per-step percentile bands.
    pub percentile_bands: PercentileBands,
}

impl SimulationResult {
    /// Derives terminal prices and bands from `paths`.
    ///
    /// # Errors
    ///
    /// [`StatisticsError::EmptySample`] if `paths` is empty.
    pub fn from_paths(paths: Vec<PricePath>) -> Result<Self, StatisticsError> {
        let percentile_bands = PercentileBands::from_paths(&paths)?;
        let final_prices = paths
            .iter()
            .filter_map(|path| path.last().copied())
            .collect();
        Ok(Self {
            price_paths: paths,
            final_prices,
            percentile_bands,
        })
    }

    /// Mean, median, p5 and p95 (plus extremes) of the terminal prices.
    ///
    /// # Errors
    ///
    /// [`StatisticsError::EmptySample`] if there are no terminal prices.
    pub fn terminal_summary(&self) -> Result<SampleSummary, StatisticsError> {
        SampleSummary::from_samples(&self.final_prices)
    }

    /// Outcome probabilities of the terminal prices.
    pub fn risk_metrics(&self, initial_spot: f64, forecast: f64) -> RiskMetrics {
        RiskMetrics::from_terminal_prices(&self.final_prices, initial_spot, forecast)
    }

    /// Number of simulated paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.price_paths.len()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const STEPS: usize = 6;

    proptest! {
        #[test]
        fn prop_bands_ordered_at_every_step(
            paths in prop::collection::vec(prop::collection::vec(1.0f64..1.0e4, STEPS), 1..60),
        ) {
            let bands = PercentileBands::from_paths(&paths).unwrap();
            prop_assert_eq!(bands.len(), STEPS);

            // Interpolated percentiles may drift by a few ulps
            let tol = 1e-9 * 1.0e4;
            for t in 0..STEPS {
                let lo = paths.iter().map(|p| p[t]).fold(f64::INFINITY, f64::min);
                let hi = paths.iter().map(|p| p[t]).fold(f64::NEG_INFINITY, f64::max);

                prop_assert!(lo <= bands.p5[t] + tol);
                prop_assert!(bands.p5[t] <= bands.p25[t] + tol);
                prop_assert!(bands.p25[t] <= bands.p50[t] + tol);
                prop_assert!(bands.p50[t] <= bands.p75[t] + tol);
                prop_assert!(bands.p75[t] <= bands.p95[t] + tol);
                prop_assert!(bands.p95[t] <= hi + tol);
                prop_assert!(bands.mean[t] >= lo - tol && bands.mean[t] <= hi + tol);
            }
        }
    }
}
