//! Simulator configuration.
//!
//! This module provides [`SimulationConfig`] and its validating builder.

use super::error::ConfigError;

/// Maximum number of simulated paths.
pub const MAX_PATHS: usize = 1_000_000;

/// Maximum number of points per path (ten years of weekly steps).
pub const MAX_STEPS: usize = 520;

/// Simulator configuration.
///
/// Immutable once built. Use [`SimulationConfig::builder`] to construct.
///
/// # Examples
///
/// ```rust
/// use freight_pricing::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .n_paths(10_000)
///     .n_steps(13)
///     .seed(42)
///     .parallel(true)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 10_000);
/// assert_eq!(config.n_steps(), 13);
/// assert!(config.parallel());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of simulated paths.
    n_paths: usize,
    /// Number of points per path, including the initial spot.
    n_steps: usize,
    /// Optional seed for reproducibility.
    seed: Option<u64>,
    /// Whether path chunks are generated on the rayon pool.
    parallel: bool,
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Returns the number of simulated paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the number of points per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the optional seed.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns whether generation runs in parallel.
    #[inline]
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_paths` is 0 or greater than 1,000,000
    /// - `n_steps` is 0 or greater than 520
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_paths == 0 || self.n_paths > MAX_PATHS {
            return Err(ConfigError::InvalidPathCount(self.n_paths));
        }
        if self.n_steps == 0 || self.n_steps > MAX_STEPS {
            return Err(ConfigError::InvalidStepCount(self.n_steps));
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    n_paths: Option<usize>,
    n_steps: Option<usize>,
    seed: Option<u64>,
    parallel: bool,
}

impl SimulationConfigBuilder {
    /// Sets the number of paths, in [1, 1_000_000].
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the number of points per path, in [1, 520].
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the seed if one is given; `None` leaves the current value.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Enables or disables parallel generation.
    #[inline]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_paths` not set or invalid
    /// - `n_steps` not set or invalid
    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let n_paths = self.n_paths.ok_or(ConfigError::InvalidParameter {
            name: "n_paths",
            value: "must be specified".to_string(),
        })?;

        let n_steps = self.n_steps.ok_or(ConfigError::InvalidParameter {
            name: "n_steps",
            value: "must be specified".to_string(),
        })?;

        let config = SimulationConfig {
            n_paths,
            n_steps,
            seed: self.seed,
            parallel: self.parallel,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder_valid() {
        let config = SimulationConfig::builder()
            .n_paths(10_000)
            .n_steps(13)
            .build()
            .unwrap();

        assert_eq!(config.n_paths(), 10_000);
        assert_eq!(config.n_steps(), 13);
        assert_eq!(config.seed(), None);
        assert!(!config.parallel());
    }

    #[test]
    fn test_config_builder_with_seed() {
        let config = SimulationConfig::builder()
            .n_paths(1000)
            .n_steps(52)
            .seed(42)
            .build()
            .unwrap();

        assert_eq!(config.seed(), Some(42));
    }

    #[test]
    fn test_maybe_seed_keeps_existing() {
        let config = SimulationConfig::builder()
            .n_paths(10)
            .n_steps(10)
            .seed(7)
            .maybe_seed(None)
            .build()
            .unwrap();
        assert_eq!(config.seed(), Some(7));
    }

    #[test]
    fn test_config_invalid_zero_paths() {
        let result = SimulationConfig::builder().n_paths(0).n_steps(13).build();
        assert!(matches!(result, Err(ConfigError::InvalidPathCount(0))));
    }

    #[test]
    fn test_config_invalid_too_many_paths() {
        let result = SimulationConfig::builder()
            .n_paths(MAX_PATHS + 1)
            .n_steps(13)
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidPathCount(_))));
    }

    #[test]
    fn test_config_invalid_steps() {
        let result = SimulationConfig::builder().n_paths(1000).n_steps(0).build();
        assert!(matches!(result, Err(ConfigError::InvalidStepCount(0))));

        let result = SimulationConfig::builder()
            .n_paths(1000)
            .n_steps(MAX_STEPS + 1)
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidStepCount(521))));
    }

    #[test]
    fn test_config_missing_fields() {
        let result = SimulationConfig::builder().n_steps(13).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "n_paths",
                ..
            })
        ));

        let result = SimulationConfig::builder().n_paths(1000).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "n_steps",
                ..
            })
        ));
    }
}
