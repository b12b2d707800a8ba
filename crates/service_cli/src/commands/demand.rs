//! Demand command implementation
//!
//! Fits pre- and post-event demand curves from the run file, clears both
//! markets against the configured supply curve and reports the shift.

use freight_models::curve_points::{
    demand_curve_points, supply_curve_points, ChartRange, CurvePoint, DEFAULT_POINTS,
};
use freight_models::demand::{FittedDemandCurve, PredictionInterval};
use freight_models::equilibrium::{
    PriceDirection, ShockAnalysis, ShockAnalysisReport, UncertaintyTrend,
};
use freight_models::supply::SupplyCurve;
use serde::Serialize;
use tracing::{info, warn};

use super::{print_json, OutputFormat};
use crate::config::{ConfigError, DemandSection, RunConfig};
use crate::Result;

#[derive(Debug, Serialize)]
struct CurveSeries {
    range: ChartRange,
    before: Vec<CurvePoint>,
    after: Vec<CurvePoint>,
    supply: Vec<CurvePoint>,
}

#[derive(Debug, Serialize)]
struct DemandReport<'a> {
    supply: SupplyCurve,
    before_equation: String,
    after_equation: String,
    after_interval: PredictionInterval,
    analysis: &'a ShockAnalysisReport,
    curves: Option<CurveSeries>,
}

/// Run the demand command
pub fn run(config: &RunConfig, format: OutputFormat) -> Result<()> {
    let demand = config
        .demand
        .as_ref()
        .ok_or(ConfigError::MissingSection("demand"))?;
    config.validate()?;
    let supply = config.supply_curve()?;

    let analysis = analyse(demand, &supply)?;
    if !analysis.after_equilibrium.is_finite() {
        warn!("post-event market did not clear inside the search range");
    }
    info!(
        direction = ?analysis.shift.direction,
        price_change = analysis.shift.price_change,
        "demand analysis complete"
    );

    let report = DemandReport {
        supply,
        before_equation: analysis.before_curve.equation(),
        after_equation: analysis.after_curve.equation(),
        after_interval: analysis
            .after_curve
            .predict_with_confidence(analysis.after_equilibrium.price),
        analysis: &analysis,
        curves: curve_series(demand, &analysis, &supply),
    };

    match format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Table => {
            print_table(&report);
            Ok(())
        }
    }
}

fn analyse(demand: &DemandSection, supply: &SupplyCurve) -> Result<ShockAnalysisReport> {
    let mut analysis = ShockAnalysis::new();
    if let Some(bounds) = demand.bounds()? {
        analysis = analysis.with_bounds(bounds);
    }

    let report = match demand.baseline_curve() {
        Some(curve) => analysis.analyse_from_curve(curve?, &demand.after, supply)?,
        None => analysis.analyse(&demand.before, &demand.after, supply)?,
    };
    Ok(report)
}

fn curve_series(
    demand: &DemandSection,
    analysis: &ShockAnalysisReport,
    supply: &SupplyCurve,
) -> Option<CurveSeries> {
    let observations = demand
        .before
        .observations()
        .iter()
        .chain(demand.after.observations())
        .filter(|obs| obs.is_valid());
    let range = ChartRange::from_observations(observations)?;

    Some(CurveSeries {
        range,
        before: points_for(&analysis.before_curve, &range),
        after: points_for(&analysis.after_curve, &range),
        supply: supply_curve_points(supply, range.max_volume, DEFAULT_POINTS),
    })
}

fn points_for(curve: &FittedDemandCurve, range: &ChartRange) -> Vec<CurvePoint> {
    demand_curve_points(curve, range.min_price, range.max_price, DEFAULT_POINTS)
}

fn print_table(report: &DemandReport<'_>) {
    let analysis = report.analysis;
    let shift = &analysis.shift;

    println!("========================================");
    println!("Demand Shock Analysis");
    println!("========================================");
    println!(
        "Before: {}  (R² {:.3}, {:?})",
        report.before_equation,
        analysis.before_curve.r_squared(),
        analysis.before_curve.source()
    );
    println!(
        "After:  {}  (R² {:.3}, {:?})",
        report.after_equation,
        analysis.after_curve.r_squared(),
        analysis.after_curve.source()
    );
    println!();

    println!("{:<12} {:>12} {:>12}", "", "Price", "Volume");
    println!(
        "{:<12} {:>12.2} {:>12.2}",
        "Before", analysis.before_equilibrium.price, analysis.before_equilibrium.volume
    );
    println!(
        "{:<12} {:>12.2} {:>12.2}",
        "After", analysis.after_equilibrium.price, analysis.after_equilibrium.volume
    );
    println!(
        "{:<12} {:>+12.2} {:>+12.2}",
        "Change", shift.price_change, shift.volume_change
    );
    println!(
        "{:<12} {:>+11.2}% {:>+11.2}%",
        "", shift.price_change_pct, shift.volume_change_pct
    );
    println!();

    let direction = match shift.direction {
        PriceDirection::Up => "up",
        PriceDirection::Down => "down",
        PriceDirection::Unchanged => "unchanged",
    };
    let uncertainty = match shift.uncertainty {
        UncertaintyTrend::IncreasedUncertainty => "increased uncertainty",
        UncertaintyTrend::ImprovedFit => "improved fit",
        UncertaintyTrend::Stable => "stable",
    };
    println!("Clearing price moved {}", direction);
    println!(
        "Model fit: {} (R² change {:+.3})",
        uncertainty, shift.r_squared_change
    );

    let interval = &report.after_interval;
    println!(
        "Post-event volume at clearing price: {:.2} [{:.2}, {:.2}], band width {:.2}",
        interval.predicted,
        interval.lower,
        interval.upper,
        interval.width()
    );

    if !analysis.shock_points.is_empty() {
        println!();
        println!("Shock points:");
        for obs in &analysis.shock_points {
            println!("  price {:>10.2}  volume {:>10.2}", obs.price, obs.volume);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BaselineSection;
    use freight_models::demand::{CurveSource, DemandDataset, DemandObservation};

    fn dataset(a: f64, b: f64, prices: &[f64]) -> DemandDataset {
        prices
            .iter()
            .map(|&p| DemandObservation::new(p, a * p.powf(b)))
            .collect()
    }

    #[test]
    fn test_analyse_from_observations() {
        let demand = DemandSection {
            before: dataset(1.0e7, -1.2, &[2600.0, 2800.0, 3000.0]),
            after: dataset(1.4e7, -1.2, &[2600.0, 2800.0, 3000.0]),
            ..DemandSection::default()
        };
        let supply = SupplyCurve::sloped(2000.0, 0.5).unwrap();

        let report = analyse(&demand, &supply).unwrap();
        assert_eq!(report.shift.direction, PriceDirection::Up);

        let interval = report
            .after_curve
            .predict_with_confidence(report.after_equilibrium.price);
        assert!(interval.width() >= 0.0);

        let series = curve_series(&demand, &report, &supply).unwrap();
        assert_eq!(series.supply.len(), DEFAULT_POINTS);
        assert!(!series.before.is_empty());
        assert!(series.range.min_price < 2600.0);
    }

    #[test]
    fn test_analyse_from_baseline() {
        let demand = DemandSection {
            baseline: Some(BaselineSection {
                price: 3000.0,
                volume: 1000.0,
                sensitivity_pct: 15.0,
            }),
            after: [DemandObservation::shock(3000.0, 1200.0)].into_iter().collect(),
            ..DemandSection::default()
        };
        let supply = SupplyCurve::flat(3000.0, 1000.0).unwrap();

        let report = analyse(&demand, &supply).unwrap();
        assert_eq!(report.before_curve.source(), CurveSource::BaselineElasticity);
        assert_eq!(report.after_curve.source(), CurveSource::ShockShift);
        assert_eq!(report.shock_points.len(), 1);
    }

    #[test]
    fn test_missing_demand_table() {
        let config = RunConfig::default();
        assert!(run(&config, OutputFormat::Json).is_err());
    }
}
