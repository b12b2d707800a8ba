//! Equal-width histogram of payoffs.

use super::error::OptionError;

/// Default number of histogram bins.
pub const DEFAULT_BINS: usize = 30;

/// Payoff counts over equal-width bins spanning `[min, max]`.
///
/// When every payoff is identical the bin width is 1. A value equal to the
/// maximum falls into the last bin.
///
/// # Examples
///
/// ```
/// use freight_pricing::options::PayoffHistogram;
///
/// let hist = PayoffHistogram::from_payoffs(&[0.0, 0.0, 5.0, 10.0], 2).unwrap();
/// assert_eq!(hist.counts, vec![2, 2]);
/// assert_eq!(hist.bin_width, 5.0);
/// assert_eq!(hist.lower_edges(), vec![0.0, 5.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PayoffHistogram {
    /// Lower edge of the first bin.
    pub min: f64,
    /// Width of every bin.
    pub bin_width: f64,
    /// Number of payoffs per bin.
    pub counts: Vec<usize>,
}

impl PayoffHistogram {
    /// Bins `payoffs` into `bins` equal-width buckets.
    ///
    /// Non-finite payoffs are skipped. An empty sample yields all-zero
    /// counts starting at 0.
    ///
    /// # Errors
    ///
    /// [`OptionError::InvalidBinCount`] if `bins == 0`.
    pub fn from_payoffs(payoffs: &[f64], bins: usize) -> Result<Self, OptionError> {
        if bins == 0 {
            return Err(OptionError::InvalidBinCount(bins));
        }

        let finite = || payoffs.iter().copied().filter(|p| p.is_finite());
        let (min, max) = finite().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p), hi.max(p))
        });
        if !min.is_finite() {
            return Ok(Self {
                min: 0.0,
                bin_width: 1.0,
                counts: vec![0; bins],
            });
        }

        let width = (max - min) / bins as f64;
        let bin_width = if width > 0.0 { width } else { 1.0 };

        let mut counts = vec![0; bins];
        for payoff in finite() {
            let index = ((payoff - min) / bin_width).floor() as usize;
            counts[index.min(bins - 1)] += 1;
        }

        Ok(Self {
            min,
            bin_width,
            counts,
        })
    }

    /// Lower edge of each bin.
    pub fn lower_edges(&self) -> Vec<f64> {
        (0..self.counts.len())
            .map(|i| self.min + i as f64 * self.bin_width)
            .collect()
    }

    /// Total number of binned payoffs.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}
