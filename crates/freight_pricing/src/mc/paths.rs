//! GBM price-path generation.
//!
//! Each path starts at the spot and evolves by multiplicative log-returns:
//!
//! ```text
//! p[0]   = spot
//! p[t]   = p[t-1] × exp(r_t),   r_t ~ N(drift, volatility)
//! ```
//!
//! # Reproducibility
//!
//! Paths are generated in fixed-size chunks of [`CHUNK_SIZE`]. Chunk `k`
//! owns a generator seeded with the `k`-th output of a SplitMix64 sequence
//! started at the base seed, so a seeded run yields the same paths whether
//! chunks run sequentially or on any number of rayon threads, and runs with
//! nearby base seeds share no chunk streams.

use super::config::SimulationConfig;
use super::error::{ConfigError, SimulationError};
use super::result::SimulationResult;
use crate::rng::FreightRng;
use rayon::prelude::*;

/// Paths per independently seeded chunk.
pub const CHUNK_SIZE: usize = 1024;

/// A single simulated price path; index 0 holds the initial spot.
pub type PricePath = Vec<f64>;

/// SplitMix64 increment (the 64-bit golden ratio).
const SPLITMIX_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seed for chunk `index`: output `index + 1` of SplitMix64 seeded with
/// `base_seed`.
#[inline]
fn chunk_seed(base_seed: u64, index: u64) -> u64 {
    let mut z = base_seed.wrapping_add(index.wrapping_add(1).wrapping_mul(SPLITMIX_GAMMA));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Per-step parameters of the log-return process.
///
/// # Examples
///
/// ```rust
/// use freight_pricing::mc::GbmParams;
///
/// let params = GbmParams::new(3000.0, 0.005, 0.03);
/// assert!(params.is_valid());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GbmParams {
    /// Initial spot price.
    pub spot: f64,
    /// Mean log-return per step.
    pub drift: f64,
    /// Standard deviation of the log-return per step.
    pub volatility: f64,
}

impl GbmParams {
    /// Creates new GBM parameters.
    #[inline]
    pub fn new(spot: f64, drift: f64, volatility: f64) -> Self {
        Self {
            spot,
            drift,
            volatility,
        }
    }

    /// Checks that spot is positive and all values are finite with a
    /// non-negative volatility.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |name, value, reason| ConfigError::InvalidValue {
            name,
            value,
            reason,
        };
        if !(self.spot.is_finite() && self.spot > 0.0) {
            return Err(invalid("spot", self.spot, "must be positive"));
        }
        if !self.drift.is_finite() {
            return Err(invalid("drift", self.drift, "must be finite"));
        }
        if !(self.volatility.is_finite() && self.volatility >= 0.0) {
            return Err(invalid("volatility", self.volatility, "must be non-negative"));
        }
        Ok(())
    }

    /// Returns `true` if [`GbmParams::validate`] passes.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Generates a single path of `n_steps` points.
///
/// With zero volatility the path is `spot × exp(drift × t)` exactly.
pub fn evolve_path(rng: &mut FreightRng, params: &GbmParams, n_steps: usize) -> PricePath {
    let mut path = Vec::with_capacity(n_steps);
    if n_steps == 0 {
        return path;
    }

    let mut price = params.spot;
    path.push(price);
    for _ in 1..n_steps {
        let log_return = rng.sample(params.drift, params.volatility);
        price *= log_return.exp();
        path.push(price);
    }
    path
}

/// Monte Carlo path simulator.
///
/// # Examples
///
/// ```rust
/// use freight_pricing::mc::{GbmParams, PathSimulator, SimulationConfig};
///
/// let config = SimulationConfig::builder()
///     .n_paths(500)
///     .n_steps(13)
///     .seed(7)
///     .build()
///     .unwrap();
///
/// let result = PathSimulator::new(config)
///     .simulate(&GbmParams::new(3000.0, 0.005, 0.03))
///     .unwrap();
///
/// assert_eq!(result.price_paths.len(), 500);
/// assert!(result.price_paths.iter().all(|p| p.len() == 13 && p[0] == 3000.0));
/// ```
#[derive(Clone, Debug)]
pub struct PathSimulator {
    config: SimulationConfig,
}

impl PathSimulator {
    /// Creates a simulator for a validated configuration.
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Generates the raw price paths.
    ///
    /// Parameters are not validated here; see
    /// [`SimulationParameters::validate`](super::SimulationParameters::validate).
    pub fn generate_paths(&self, params: &GbmParams) -> Vec<PricePath> {
        let n_paths = self.config.n_paths();
        let n_steps = self.config.n_steps();
        let base_seed = self
            .config
            .seed()
            .unwrap_or_else(|| FreightRng::from_entropy().gen_seed());

        let n_chunks = n_paths.div_ceil(CHUNK_SIZE);
        let chunk = |index: usize| -> Vec<PricePath> {
            let mut rng = FreightRng::from_seed(chunk_seed(base_seed, index as u64));
            let len = CHUNK_SIZE.min(n_paths - index * CHUNK_SIZE);
            (0..len)
                .map(|_| evolve_path(&mut rng, params, n_steps))
                .collect()
        };

        let chunks: Vec<Vec<PricePath>> = if self.config.parallel() {
            (0..n_chunks).into_par_iter().map(chunk).collect()
        } else {
            (0..n_chunks).map(chunk).collect()
        };

        chunks.into_iter().flatten().collect()
    }

    /// Generates paths and summarises them into percentile bands and
    /// terminal prices.
    ///
    /// # Errors
    ///
    /// - [`SimulationError::Config`] if `params` fails [`GbmParams::validate`]
    /// - [`SimulationError::Statistics`] if the band statistics cannot be
    ///   computed; with a validated configuration this does not occur
    pub fn simulate(&self, params: &GbmParams) -> Result<SimulationResult, SimulationError> {
        params.validate()?;
        tracing::debug!(
            n_paths = self.config.n_paths(),
            n_steps = self.config.n_steps(),
            seed = ?self.config.seed(),
            parallel = self.config.parallel(),
            drift = params.drift,
            volatility = params.volatility,
            "simulating price paths"
        );

        let paths = self.generate_paths(params);
        let result = SimulationResult::from_paths(paths)?;

        tracing::debug!(
            terminal_mean = result.percentile_bands.mean.last().copied().unwrap_or(f64::NAN),
            "simulation complete"
        );
        Ok(result)
    }
}
