//! Demand observations and datasets.

/// A single observed (price, volume) pair.
///
/// `is_shock` marks observations taken after a market event; they are
/// reported separately and may trigger widened confidence bands.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DemandObservation {
    /// Observed price.
    pub price: f64,
    /// Observed volume at that price.
    pub volume: f64,
    /// Whether the observation was flagged as a shock point.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_shock: bool,
}

impl DemandObservation {
    /// Creates an ordinary (non-shock) observation.
    #[inline]
    pub fn new(price: f64, volume: f64) -> Self {
        Self {
            price,
            volume,
            is_shock: false,
        }
    }

    /// Creates an observation flagged as a shock point.
    #[inline]
    pub fn shock(price: f64, volume: f64) -> Self {
        Self {
            price,
            volume,
            is_shock: true,
        }
    }

    /// Returns `true` if both price and volume are finite and strictly positive.
    ///
    /// Only valid observations can be mapped into log space.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.price.is_finite() && self.price > 0.0 && self.volume.is_finite() && self.volume > 0.0
    }
}

/// An ordered collection of demand observations.
///
/// # Examples
///
/// ```rust
/// use freight_models::demand::{DemandDataset, DemandObservation};
///
/// let dataset = DemandDataset::from(vec![
///     DemandObservation::new(3000.0, 1000.0),
///     DemandObservation::new(-1.0, 900.0),
///     DemandObservation::shock(3600.0, 1200.0),
/// ]);
///
/// assert_eq!(dataset.valid_only().len(), 2);
/// assert_eq!(dataset.shock_points().len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DemandDataset {
    observations: Vec<DemandObservation>,
}

impl DemandDataset {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an observation.
    pub fn push(&mut self, observation: DemandObservation) {
        self.observations.push(observation);
    }

    /// Returns all observations in insertion order.
    #[inline]
    pub fn observations(&self) -> &[DemandObservation] {
        &self.observations
    }

    /// Number of observations.
    #[inline]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Returns `true` if the dataset holds no observations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Returns a new dataset without rows whose price or volume is
    /// non-positive or non-finite.
    pub fn valid_only(&self) -> Self {
        Self {
            observations: self
                .observations
                .iter()
                .copied()
                .filter(DemandObservation::is_valid)
                .collect(),
        }
    }

    /// Valid observations flagged as shock points.
    pub fn shock_points(&self) -> Vec<DemandObservation> {
        self.observations
            .iter()
            .copied()
            .filter(|obs| obs.is_shock && obs.is_valid())
            .collect()
    }

    /// Returns `true` if any valid observation is flagged as a shock point.
    pub fn has_shock(&self) -> bool {
        self.observations
            .iter()
            .any(|obs| obs.is_shock && obs.is_valid())
    }
}

impl From<Vec<DemandObservation>> for DemandDataset {
    fn from(observations: Vec<DemandObservation>) -> Self {
        Self { observations }
    }
}

impl FromIterator<DemandObservation> for DemandDataset {
    fn from_iter<I: IntoIterator<Item = DemandObservation>>(iter: I) -> Self {
        Self {
            observations: iter.into_iter().collect(),
        }
    }
}
