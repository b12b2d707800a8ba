//! CLI command implementations

pub mod check;
pub mod demand;
pub mod option;
pub mod simulate;

use clap::{Args, ValueEnum};
use freight_pricing::mc::{PathSimulator, SimulationParameters, SimulationResult};
use serde::Serialize;
use tracing::info;

use crate::config::SimulationSection;
use crate::Result;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Table,
    /// Pretty-printed JSON on stdout
    Json,
}

/// Simulation flags shared by `simulate` and `option`; each overrides the
/// run file's `[simulation]` value.
#[derive(Args, Debug, Clone, Default)]
pub struct SimulationArgs {
    /// Initial spot rate
    #[arg(long)]
    spot: Option<f64>,

    /// Rate forecast for week 13
    #[arg(long)]
    forecast: Option<f64>,

    /// Weekly volatility in percent
    #[arg(long)]
    volatility_pct: Option<f64>,

    /// Number of weeks per path
    #[arg(long)]
    weeks: Option<usize>,

    /// Number of paths
    #[arg(long)]
    paths: Option<usize>,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Generate paths on one thread
    #[arg(long)]
    sequential: bool,
}

impl SimulationArgs {
    /// Merges these flags over `section`.
    pub fn apply(&self, section: &mut SimulationSection) {
        if let Some(spot) = self.spot {
            section.spot = spot;
        }
        if let Some(forecast) = self.forecast {
            section.forecast = forecast;
        }
        if let Some(volatility_pct) = self.volatility_pct {
            section.volatility_pct = volatility_pct;
        }
        if let Some(weeks) = self.weeks {
            section.weeks = weeks;
        }
        if let Some(paths) = self.paths {
            section.paths = paths;
        }
        if self.seed.is_some() {
            section.seed = self.seed;
        }
        if self.sequential {
            section.parallel = false;
        }
    }
}

/// Validates the merged section and runs the path simulator.
pub(crate) fn run_simulation(
    section: &SimulationSection,
) -> Result<(SimulationParameters, SimulationResult)> {
    let params = section.parameters();
    params.validate()?;

    let config = params
        .config_builder()
        .maybe_seed(section.seed)
        .parallel(section.parallel)
        .build()?;

    info!(
        spot = params.initial_spot,
        forecast = params.forecasted_rate,
        volatility = params.volatility,
        weeks = params.step_count,
        paths = params.path_count,
        seed = ?section.seed,
        "running simulation"
    );
    let result = PathSimulator::new(config).simulate(&params.gbm_params())?;
    Ok((params, result))
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_section() {
        let args = SimulationArgs {
            paths: Some(250),
            seed: Some(3),
            sequential: true,
            ..SimulationArgs::default()
        };
        let mut section = SimulationSection::default();
        args.apply(&mut section);

        assert_eq!(section.paths, 250);
        assert_eq!(section.seed, Some(3));
        assert!(!section.parallel);
        assert_eq!(section.spot, 3000.0);
    }

    #[test]
    fn test_missing_seed_keeps_section_seed() {
        let mut section = SimulationSection {
            seed: Some(11),
            ..SimulationSection::default()
        };
        SimulationArgs::default().apply(&mut section);
        assert_eq!(section.seed, Some(11));
    }

    #[test]
    fn test_run_simulation_seeded() {
        let section = SimulationSection {
            paths: 200,
            seed: Some(42),
            ..SimulationSection::default()
        };
        let (params, first) = run_simulation(&section).unwrap();
        let (_, second) = run_simulation(&section).unwrap();

        assert_eq!(params.path_count, 200);
        assert_eq!(first.final_prices, second.final_prices);
    }

    #[test]
    fn test_run_simulation_rejects_bad_parameters() {
        let section = SimulationSection {
            spot: -1.0,
            ..SimulationSection::default()
        };
        assert!(run_simulation(&section).is_err());
    }
}
