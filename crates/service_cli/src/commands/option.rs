//! Option command implementation
//!
//! Values a European call or put exercised at a chosen week, using the
//! undiscounted mean payoff across simulated paths.

use clap::{Args, ValueEnum};
use freight_core::math::statistics::percent_where;
use freight_pricing::options::{
    price_option, OptionKind, OptionSpec, PayoffHistogram, PayoffSummary, DEFAULT_BINS,
};
use serde::Serialize;
use tracing::info;

use super::{print_json, run_simulation, OutputFormat, SimulationArgs};
use crate::config::{OptionSection, RunConfig, StrikeMode};
use crate::Result;

/// Width of the longest histogram bar in table output.
const BAR_WIDTH: usize = 40;

/// Option kind as typed on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Call,
    Put,
}

impl From<KindArg> for OptionKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Call => OptionKind::Call,
            KindArg::Put => OptionKind::Put,
        }
    }
}

/// Option flags; each overrides the run file's `[option]` value.
#[derive(Args, Debug, Clone, Default)]
pub struct OptionArgs {
    /// Exercise week (week 1 is the initial spot)
    #[arg(long)]
    week: Option<usize>,

    /// Strike, in price units or percent of spot
    #[arg(long)]
    strike: Option<f64>,

    /// How to read --strike
    #[arg(long, value_enum)]
    strike_mode: Option<StrikeMode>,

    /// Call or put
    #[arg(long, value_enum)]
    kind: Option<KindArg>,
}

impl OptionArgs {
    /// Merges these flags over `section`.
    pub fn apply(&self, section: &mut OptionSection) {
        if let Some(week) = self.week {
            section.week = week;
        }
        if let Some(strike) = self.strike {
            section.strike = strike;
        }
        if let Some(mode) = self.strike_mode {
            section.strike_mode = mode;
        }
        if let Some(kind) = self.kind {
            section.kind = kind.into();
        }
    }
}

#[derive(Debug, Serialize)]
struct OptionReport {
    spec: OptionSpec,
    summary: PayoffSummary,
    in_the_money_pct: f64,
    histogram: PayoffHistogram,
}

/// Run the option command
pub fn run(
    config: &RunConfig,
    simulation: &SimulationArgs,
    args: &OptionArgs,
    format: OutputFormat,
) -> Result<()> {
    let mut sim_section = config.simulation.clone();
    simulation.apply(&mut sim_section);
    let mut option_section = config.option.clone();
    args.apply(&mut option_section);

    let (params, result) = run_simulation(&sim_section)?;
    let strike = option_section.strike_spec().resolve(params.initial_spot)?;
    let spec = OptionSpec::new(option_section.week, strike, option_section.kind);

    let valuation = price_option(&result.price_paths, &spec)?;
    let histogram = PayoffHistogram::from_payoffs(&valuation.payoffs, DEFAULT_BINS)?;
    let in_the_money_pct = percent_where(&valuation.payoffs, |p| p > 0.0);
    info!(
        kind = ?spec.kind,
        strike = spec.strike,
        week = spec.exercise_step,
        mean_payoff = valuation.summary.mean,
        "option valued"
    );

    let report = OptionReport {
        spec,
        summary: valuation.summary,
        in_the_money_pct,
        histogram,
    };
    match format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Table => {
            print_table(&report);
            Ok(())
        }
    }
}

fn print_table(report: &OptionReport) {
    let kind = match report.spec.kind {
        OptionKind::Call => "Call",
        OptionKind::Put => "Put",
    };
    println!("========================================");
    println!("{} option, strike {:.2}, week {}", kind, report.spec.strike, report.spec.exercise_step);
    println!("========================================");
    println!("  Mean payoff (value): {:.2}", report.summary.mean);
    println!("  Median payoff:       {:.2}", report.summary.median);
    println!("  P5 payoff:           {:.2}", report.summary.p5);
    println!("  P95 payoff:          {:.2}", report.summary.p95);
    println!("  In the money:        {:.2}%", report.in_the_money_pct);
    println!();

    let hist = &report.histogram;
    let peak = hist.counts.iter().copied().max().unwrap_or(0).max(1);
    println!("Payoff distribution:");
    for (lower, &count) in hist.lower_edges().iter().zip(&hist.counts) {
        let bar = "#".repeat(count * BAR_WIDTH / peak);
        println!(
            "  {:>10.2} - {:>10.2} | {:>6} {}",
            lower,
            lower + hist.bin_width,
            count,
            bar
        );
    }
}
