//! Simulate command implementation
//!
//! Runs the path simulator and reports weekly percentile bands, terminal
//! price statistics and risk metrics.

use freight_core::math::statistics::SampleSummary;
use freight_pricing::mc::{PercentileBands, RiskMetrics, SimulationParameters};
use serde::Serialize;
use tracing::info;

use super::{print_json, run_simulation, OutputFormat, SimulationArgs};
use crate::config::RunConfig;
use crate::Result;

#[derive(Debug, Serialize)]
struct SimulationReport<'a> {
    parameters: &'a SimulationParameters,
    weekly_drift: f64,
    seed: Option<u64>,
    terminal: SampleSummary,
    risk: RiskMetrics,
    bands: &'a PercentileBands,
}

/// Run the simulate command
pub fn run(config: &RunConfig, args: &SimulationArgs, format: OutputFormat) -> Result<()> {
    let mut section = config.simulation.clone();
    args.apply(&mut section);

    let (params, result) = run_simulation(&section)?;
    let report = SimulationReport {
        parameters: &params,
        weekly_drift: params.weekly_drift(),
        seed: section.seed,
        terminal: result.terminal_summary()?,
        risk: result.risk_metrics(params.initial_spot, params.forecasted_rate),
        bands: &result.percentile_bands,
    };
    info!(paths = result.n_paths(), "simulation complete");

    match format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Table => {
            print_table(&report);
            Ok(())
        }
    }
}

fn print_table(report: &SimulationReport<'_>) {
    let params = report.parameters;
    println!("========================================");
    println!("Freight Rate Simulation");
    println!("========================================");
    println!("  Spot:          {:.2}", params.initial_spot);
    println!("  Forecast:      {:.2}", params.forecasted_rate);
    println!("  Volatility:    {:.2}% / week", params.volatility * 100.0);
    println!("  Weekly drift:  {:.6}", report.weekly_drift);
    println!("  Paths x weeks: {} x {}", params.path_count, params.step_count);
    if let Some(seed) = report.seed {
        println!("  Seed:          {}", seed);
    }
    println!();

    println!(
        "{:>5} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "Week", "P5", "P25", "Median", "P75", "P95", "Mean"
    );
    println!("{}", "-".repeat(71));
    let bands = report.bands;
    for t in 0..bands.len() {
        println!(
            "{:>5} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
            t + 1,
            bands.p5[t],
            bands.p25[t],
            bands.p50[t],
            bands.p75[t],
            bands.p95[t],
            bands.mean[t]
        );
    }
    println!();

    let terminal = &report.terminal;
    println!("Terminal prices:");
    println!("  Mean:   {:.2}", terminal.mean);
    println!("  Median: {:.2}", terminal.median);
    println!("  P5:     {:.2}", terminal.p5);
    println!("  P95:    {:.2}", terminal.p95);
    println!();

    let risk = &report.risk;
    println!("Risk metrics:");
    println!("  Above forecast:       {:>6.2}%", risk.above_forecast_pct);
    println!("  Below forecast:       {:>6.2}%", risk.below_forecast_pct);
    println!("  Up more than 50%:     {:>6.2}%", risk.up_50_pct);
    println!("  Down more than 50%:   {:>6.2}%", risk.down_50_pct);
}
