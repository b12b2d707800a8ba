//! Run configuration management
//!
//! A run file is TOML with optional `[simulation]`, `[option]`, `[demand]`
//! and `[supply]` tables. Precedence, lowest first: built-in defaults, the
//! run file, `FREIGHT_*` environment variables, CLI flags (applied by the
//! commands).

use std::path::Path;
use std::str::FromStr;

use freight_models::demand::{DemandDataset, DemandError, FittedDemandCurve};
use freight_models::equilibrium::SearchBounds;
use freight_models::supply::{SupplyCurve, SupplyError};
use freight_pricing::mc::SimulationParameters;
use freight_pricing::options::{OptionKind, StrikeSpec};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "FREIGHT_LOG_LEVEL";

/// Environment variable overriding the simulation seed.
pub const ENV_SEED: &str = "FREIGHT_SEED";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),

    #[error("Run file has no [{0}] table")]
    MissingSection(&'static str),

    #[error("Invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Log levels accepted in run files, `FREIGHT_LOG_LEVEL` and `--log-level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// `[simulation]` table. Volatility is a percentage (3.0 = 3% per week).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationSection {
    pub spot: f64,
    pub forecast: f64,
    pub volatility_pct: f64,
    pub weeks: usize,
    pub paths: usize,
    pub seed: Option<u64>,
    pub parallel: bool,
}

impl Default for SimulationSection {
    fn default() -> Self {
        let defaults = SimulationParameters::default();
        Self {
            spot: defaults.initial_spot,
            forecast: defaults.forecasted_rate,
            volatility_pct: defaults.volatility * 100.0,
            weeks: defaults.step_count,
            paths: defaults.path_count,
            seed: None,
            parallel: true,
        }
    }
}

impl SimulationSection {
    /// Engine parameters for this table.
    pub fn parameters(&self) -> SimulationParameters {
        SimulationParameters::new(
            self.spot,
            self.forecast,
            self.volatility_pct / 100.0,
            self.weeks,
            self.paths,
        )
    }
}

/// How `[option].strike` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StrikeMode {
    /// Price units.
    #[default]
    Absolute,
    /// Percentage of the initial spot.
    Percent,
}

/// `[option]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionSection {
    /// 1-based exercise week; week 1 is the initial spot.
    pub week: usize,
    pub strike: f64,
    pub strike_mode: StrikeMode,
    pub kind: OptionKind,
}

impl Default for OptionSection {
    fn default() -> Self {
        let defaults = SimulationParameters::default();
        Self {
            week: defaults.step_count,
            strike: defaults.forecasted_rate,
            strike_mode: StrikeMode::Absolute,
            kind: OptionKind::Call,
        }
    }
}

impl OptionSection {
    pub fn strike_spec(&self) -> StrikeSpec {
        match self.strike_mode {
            StrikeMode::Absolute => StrikeSpec::Absolute(self.strike),
            StrikeMode::Percent => StrikeSpec::PercentOfSpot(self.strike),
        }
    }
}

/// Pre-event curve from a single reference point and a volume sensitivity.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BaselineSection {
    pub price: f64,
    pub volume: f64,
    /// Percentage volume change for a 10% price change.
    pub sensitivity_pct: f64,
}

/// `[demand]` table.
///
/// The pre-event curve comes either from `before` observations or from a
/// `baseline`, never both.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemandSection {
    pub before: DemandDataset,
    pub baseline: Option<BaselineSection>,
    pub after: DemandDataset,
    pub search_min: Option<f64>,
    pub search_max: Option<f64>,
}

impl DemandSection {
    /// Caller-supplied equilibrium search range, if any.
    pub fn bounds(&self) -> Result<Option<SearchBounds>, ConfigError> {
        match (self.search_min, self.search_max) {
            (None, None) => Ok(None),
            (Some(min), Some(max)) => SearchBounds::new(min, max)
                .map(Some)
                .map_err(|e| invalid("demand.search_min/search_max", e)),
            _ => Err(ConfigError::InvalidValue {
                field: "demand.search_min/search_max",
                reason: "set both bounds or neither".to_string(),
            }),
        }
    }

    /// Baseline-elasticity curve when `baseline` is configured.
    pub fn baseline_curve(&self) -> Option<Result<FittedDemandCurve, DemandError>> {
        self.baseline.map(|b| {
            FittedDemandCurve::from_baseline_elasticity(b.price, b.volume, b.sensitivity_pct)
        })
    }
}

/// Fully merged run configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    pub simulation: SimulationSection,
    pub option: OptionSection,
    pub demand: Option<DemandSection>,
    pub supply: Option<SupplyCurve>,
}

impl RunConfig {
    /// Parse a run file body.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::FileError(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    /// Defaults or the run file, then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(
            std::env::var(ENV_LOG_LEVEL).ok().as_deref(),
            std::env::var(ENV_SEED).ok().as_deref(),
        )?;
        Ok(config)
    }

    /// Applies raw override values as read from the environment.
    pub fn apply_overrides(
        &mut self,
        log_level: Option<&str>,
        seed: Option<&str>,
    ) -> Result<(), ConfigError> {
        if let Some(level) = log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        if let Some(seed) = seed {
            let seed = seed
                .trim()
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("{ENV_SEED}={seed} is not a u64")))?;
            self.simulation.seed = Some(seed);
        }
        Ok(())
    }

    /// Validated supply curve; deserialisation bypasses the constructors.
    pub fn supply_curve(&self) -> Result<SupplyCurve, ConfigError> {
        let curve = self.supply.ok_or(ConfigError::MissingSection("supply"))?;
        validated_supply(curve).map_err(|e| invalid("supply", e))
    }

    /// Checks every configured table without running anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let params = self.simulation.parameters();
        params.validate().map_err(|e| invalid("simulation", e))?;

        self.option
            .strike_spec()
            .resolve(params.initial_spot)
            .map_err(|e| invalid("option.strike", e))?;
        if self.option.week == 0 || self.option.week > params.step_count {
            return Err(ConfigError::InvalidValue {
                field: "option.week",
                reason: format!(
                    "{} is outside 1..={}",
                    self.option.week, params.step_count
                ),
            });
        }

        if let Some(demand) = &self.demand {
            demand.bounds()?;
            match demand.baseline_curve() {
                Some(_) if !demand.before.is_empty() => {
                    return Err(ConfigError::InvalidValue {
                        field: "demand",
                        reason: "set either `before` or `baseline`, not both".to_string(),
                    });
                }
                Some(curve) => {
                    curve.map_err(|e| invalid("demand.baseline", e))?;
                }
                None => {}
            }
            if demand.after.valid_only().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "demand.after",
                    reason: "needs at least one positive observation".to_string(),
                });
            }
            self.supply_curve()?;
        }
        Ok(())
    }
}

fn validated_supply(curve: SupplyCurve) -> Result<SupplyCurve, SupplyError> {
    match curve {
        SupplyCurve::Flat {
            base_price,
            capacity,
        } => SupplyCurve::flat(base_price, capacity),
        SupplyCurve::Sloped { base_price, slope } => SupplyCurve::sloped(base_price, slope),
    }
}

fn invalid(field: &'static str, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUN_FILE: &str = r#"
log_level = "debug"

[simulation]
spot = 2500.0
forecast = 2700.0
volatility_pct = 4.0
weeks = 26
paths = 5000
seed = 7

[option]
week = 26
strike = 110.0
strike_mode = "percent"
kind = "put"

[demand]
after = [
    { price = 2400.0, volume = 900.0 },
    { price = 2600.0, volume = 800.0, is_shock = true },
]

[demand.baseline]
price = 2500.0
volume = 1000.0
sensitivity_pct = 12.0

[supply]
type = "sloped"
base_price = 2000.0
slope = 0.5
"#;

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.simulation.parameters(), SimulationParameters::default());
        assert!(config.simulation.parallel);
        assert!(config.demand.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_run_file() {
        let config = RunConfig::from_toml_str(RUN_FILE).unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.simulation.weeks, 26);
        assert_eq!(config.simulation.seed, Some(7));
        assert!((config.simulation.parameters().volatility - 0.04).abs() < 1e-12);

        assert_eq!(config.option.kind, OptionKind::Put);
        assert_eq!(config.option.strike_spec(), StrikeSpec::PercentOfSpot(110.0));

        let demand = config.demand.as_ref().unwrap();
        assert_eq!(demand.after.len(), 2);
        assert!(demand.after.has_shock());
        assert!(demand.baseline.is_some());

        assert_eq!(
            config.supply_curve().unwrap(),
            SupplyCurve::Sloped {
                base_price: 2000.0,
                slope: 0.5
            }
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_run_file_keeps_defaults() {
        let config = RunConfig::from_toml_str("[simulation]\npaths = 100\n").unwrap();
        assert_eq!(config.simulation.paths, 100);
        assert_eq!(config.simulation.spot, 3000.0);
        assert_eq!(config.option, OptionSection::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = RunConfig::from_toml_str("[simulation]\nspots = 1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::FileError(_)));
    }

    #[test]
    fn test_invalid_log_level_in_file() {
        let err = RunConfig::from_toml_str("log_level = \"loud\"\n").unwrap_err();
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut config = RunConfig::from_toml_str(RUN_FILE).unwrap();
        config.apply_overrides(Some("WARN"), Some(" 99 ")).unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.simulation.seed, Some(99));
    }

    #[test]
    fn test_bad_seed_override() {
        let mut config = RunConfig::default();
        let err = config.apply_overrides(None, Some("abc")).unwrap_err();
        assert!(matches!(err, ConfigError::EnvError(_)));
    }

    #[test]
    fn test_log_level_from_str() {
        assert_eq!("trace".parse::<LogLevel>().unwrap(), LogLevel::Trace);
        assert_eq!("Error".parse::<LogLevel>().unwrap(), LogLevel::Error);
        assert!("verbose".parse::<LogLevel>().is_err());
        assert_eq!(LogLevel::Warn.to_string(), "warn");
    }

    #[test]
    fn test_validate_rejects_out_of_range_week() {
        let mut config = RunConfig::default();
        config.option.week = 14;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("option.week"));
    }

    #[test]
    fn test_validate_rejects_strike_percent() {
        let mut config = RunConfig::default();
        config.option.strike_mode = StrikeMode::Percent;
        config.option.strike = 700.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_demand_requires_supply() {
        let mut config = RunConfig::from_toml_str(RUN_FILE).unwrap();
        config.supply = None;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingSection("supply")));
    }

    #[test]
    fn test_validate_rejects_before_and_baseline() {
        let mut config = RunConfig::from_toml_str(RUN_FILE).unwrap();
        if let Some(demand) = config.demand.as_mut() {
            demand
                .before
                .push(freight_models::demand::DemandObservation::new(2500.0, 1000.0));
        }
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_supply_curve_revalidated() {
        let config =
            RunConfig::from_toml_str("[supply]\ntype = \"flat\"\nbase_price = 10.0\ncapacity = -1.0\n")
                .unwrap();
        assert!(config.supply_curve().is_err());
    }

    #[test]
    fn test_sample_run_file_is_valid() {
        let config = RunConfig::from_toml_str(include_str!("../../../runs/shock.toml")).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.demand.unwrap().after.shock_points().len(), 2);
    }

    #[test]
    fn test_half_bounds_rejected() {
        let demand = DemandSection {
            search_min: Some(100.0),
            ..DemandSection::default()
        };
        assert!(demand.bounds().is_err());
    }
}
