//! Check command implementation
//!
//! Validates the merged configuration without running a simulation.

use std::path::Path;

use freight_models::supply::SupplyCurve;
use tracing::info;

use crate::config::RunConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &RunConfig, run_file: Option<&Path>) -> Result<()> {
    config.validate()?;

    let source = run_file
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "(built-in defaults)".to_string());
    println!("Run file:   {}", source);
    println!("Log level:  {}", config.log_level);

    let sim = &config.simulation;
    println!(
        "Simulation: spot {:.2} -> forecast {:.2}, {:.2}% vol, {} weeks x {} paths{}",
        sim.spot,
        sim.forecast,
        sim.volatility_pct,
        sim.weeks,
        sim.paths,
        sim.seed.map(|s| format!(", seed {s}")).unwrap_or_default()
    );

    let option = &config.option;
    println!(
        "Option:     {:?} at week {}, strike {} ({:?})",
        option.kind, option.week, option.strike, option.strike_mode
    );

    match &config.demand {
        Some(demand) => {
            let before = match demand.baseline {
                Some(b) => format!(
                    "baseline {:.2} @ {:.2}, sensitivity {:.1}%",
                    b.volume, b.price, b.sensitivity_pct
                ),
                None => format!("{} observations", demand.before.len()),
            };
            println!(
                "Demand:     before {}; after {} observations ({} shock)",
                before,
                demand.after.len(),
                demand.after.shock_points().len()
            );
        }
        None => println!("Demand:     not configured"),
    }

    match config.supply {
        Some(SupplyCurve::Flat {
            base_price,
            capacity,
        }) => println!("Supply:     flat {:.2} up to {:.2}", base_price, capacity),
        Some(SupplyCurve::Sloped { base_price, slope }) => {
            println!("Supply:     sloped {:.2} + {:.4} x volume", base_price, slope)
        }
        None => println!("Supply:     not configured"),
    }

    info!("configuration valid");
    println!();
    println!("Configuration OK");
    Ok(())
}
