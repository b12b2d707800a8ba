//! Market inputs for a simulation run.

use super::config::{SimulationConfigBuilder, MAX_PATHS, MAX_STEPS};
use super::error::ConfigError;
use super::paths::GbmParams;

/// Number of weekly steps over which the forecast is expected to be reached.
///
/// The drift is calibrated to a quarterly (13-week) forecast regardless of
/// how many steps are simulated.
pub const DRIFT_REFERENCE_STEPS: f64 = 13.0;

/// Inputs describing one simulation run.
///
/// # Examples
///
/// ```rust
/// use freight_pricing::mc::SimulationParameters;
///
/// let params = SimulationParameters::default();
/// assert!(params.validate().is_ok());
///
/// // ln(3200 / 3000) / 13
/// assert!((params.weekly_drift() - 0.004965).abs() < 1e-5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationParameters {
    /// Current spot rate.
    pub initial_spot: f64,
    /// Rate forecast for the end of the quarter.
    pub forecasted_rate: f64,
    /// Per-step volatility as a fraction (0.03 = 3%).
    pub volatility: f64,
    /// Points per path, including the initial spot.
    pub step_count: usize,
    /// Number of simulated paths.
    pub path_count: usize,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            initial_spot: 3000.0,
            forecasted_rate: 3200.0,
            volatility: 0.03,
            step_count: 13,
            path_count: 10_000,
        }
    }
}

impl SimulationParameters {
    /// Creates a parameter set.
    #[inline]
    pub fn new(
        initial_spot: f64,
        forecasted_rate: f64,
        volatility: f64,
        step_count: usize,
        path_count: usize,
    ) -> Self {
        Self {
            initial_spot,
            forecasted_rate,
            volatility,
            step_count,
            path_count,
        }
    }

    /// Per-step log drift: `ln(forecasted_rate / initial_spot) / 13`.
    #[inline]
    pub fn weekly_drift(&self) -> f64 {
        (self.forecasted_rate / self.initial_spot).ln() / DRIFT_REFERENCE_STEPS
    }

    /// Rejects inputs the simulator cannot use.
    ///
    /// # Errors
    ///
    /// - `InvalidValue` for a non-positive spot or forecast, or a negative
    ///   or non-finite volatility
    /// - `InvalidStepCount` / `InvalidPathCount` for counts outside the
    ///   configured limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.initial_spot.is_finite() && self.initial_spot > 0.0) {
            return Err(invalid("initial_spot", self.initial_spot, "must be positive"));
        }
        if !(self.forecasted_rate.is_finite() && self.forecasted_rate > 0.0) {
            return Err(invalid(
                "forecasted_rate",
                self.forecasted_rate,
                "must be positive",
            ));
        }
        if !(self.volatility.is_finite() && self.volatility >= 0.0) {
            return Err(invalid("volatility", self.volatility, "must be non-negative"));
        }
        if self.step_count == 0 || self.step_count > MAX_STEPS {
            return Err(ConfigError::InvalidStepCount(self.step_count));
        }
        if self.path_count == 0 || self.path_count > MAX_PATHS {
            return Err(ConfigError::InvalidPathCount(self.path_count));
        }
        Ok(())
    }

    /// Per-step GBM parameters derived from these inputs.
    #[inline]
    pub fn gbm_params(&self) -> GbmParams {
        GbmParams::new(self.initial_spot, self.weekly_drift(), self.volatility)
    }

    /// Config builder pre-populated with the path and step counts.
    pub fn config_builder(&self) -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
            .n_paths(self.path_count)
            .n_steps(self.step_count)
    }
}

fn invalid(name: &'static str, value: f64, reason: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        name,
        value,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_weekly_drift() {
        let params = SimulationParameters::default();
        assert_relative_eq!(
            params.weekly_drift(),
            (3200.0_f64 / 3000.0).ln() / 13.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_drift_independent_of_step_count() {
        let a = SimulationParameters::new(100.0, 110.0, 0.02, 13, 10);
        let b = SimulationParameters::new(100.0, 110.0, 0.02, 52, 10);
        assert_eq!(a.weekly_drift(), b.weekly_drift());
    }

    #[test]
    fn test_validate_rejects_bad_inputs() {
        let base = SimulationParameters::default();

        let p = SimulationParameters {
            initial_spot: 0.0,
            ..base
        };
        assert!(matches!(
            p.validate(),
            Err(ConfigError::InvalidValue {
                name: "initial_spot",
                ..
            })
        ));

        let p = SimulationParameters {
            forecasted_rate: -5.0,
            ..base
        };
        assert_eq!(
            p.validate(),
            Err(ConfigError::InvalidValue {
                name: "forecasted_rate",
                value: -5.0,
                reason: "must be positive",
            })
        );
        assert_eq!(
            p.validate().unwrap_err().to_string(),
            "Invalid parameter 'forecasted_rate' = -5: must be positive"
        );

        let p = SimulationParameters {
            volatility: -0.01,
            ..base
        };
        assert!(matches!(
            p.validate(),
            Err(ConfigError::InvalidValue {
                name: "volatility",
                ..
            })
        ));

        let p = SimulationParameters {
            step_count: 0,
            ..base
        };
        assert_eq!(p.validate(), Err(ConfigError::InvalidStepCount(0)));

        let p = SimulationParameters {
            path_count: 0,
            ..base
        };
        assert_eq!(p.validate(), Err(ConfigError::InvalidPathCount(0)));
    }

    #[test]
    fn test_zero_volatility_is_valid() {
        let p = SimulationParameters {
            volatility: 0.0,
            ..SimulationParameters::default()
        };
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_config_builder_carries_counts() {
        let params = SimulationParameters::new(100.0, 100.0, 0.1, 26, 500);
        let config = params.config_builder().build().unwrap();
        assert_eq!(config.n_paths(), 500);
        assert_eq!(config.n_steps(), 26);
    }
}
