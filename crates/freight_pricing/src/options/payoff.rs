//! Per-path payoff evaluation and summary.

use super::error::OptionError;
use super::spec::OptionSpec;
use crate::mc::PricePath;
use freight_core::math::statistics::SampleSummary;

/// Mean, median and 5th/95th percentiles of a payoff sample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PayoffSummary {
    /// Expected (undiscounted) payoff.
    pub mean: f64,
    /// Median payoff.
    pub median: f64,
    /// 5th percentile payoff.
    pub p5: f64,
    /// 95th percentile payoff.
    pub p95: f64,
}

impl From<SampleSummary> for PayoffSummary {
    fn from(summary: SampleSummary) -> Self {
        Self {
            mean: summary.mean,
            median: summary.median,
            p5: summary.p5,
            p95: summary.p95,
        }
    }
}

/// Raw payoffs and their summary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionValuation {
    /// The option that was priced.
    pub spec: OptionSpec,
    /// One payoff per path, in path order.
    pub payoffs: Vec<f64>,
    /// Summary of `payoffs`.
    pub summary: PayoffSummary,
}

/// Evaluates `spec` on every path at `exercise_step - 1`.
///
/// # Errors
///
/// - [`OptionError::EmptyPaths`] if `paths` is empty
/// - [`OptionError::InvalidStrike`] for a negative or non-finite strike
/// - [`OptionError::InvalidExerciseStep`] if the step is 0 or beyond the
///   shortest path
pub fn price_option(paths: &[PricePath], spec: &OptionSpec) -> Result<OptionValuation, OptionError> {
    let path_len = paths
        .iter()
        .map(Vec::len)
        .min()
        .ok_or(OptionError::EmptyPaths)?;
    spec.validate(path_len)?;

    let index = spec.exercise_step - 1;
    let payoffs: Vec<f64> = paths
        .iter()
        .map(|path| spec.kind.payoff(path[index], spec.strike))
        .collect();

    let summary = SampleSummary::from_samples(&payoffs)
        .map_err(|_| OptionError::EmptyPaths)?
        .into();

    tracing::debug!(
        kind = ?spec.kind,
        strike = spec.strike,
        exercise_step = spec.exercise_step,
        n_paths = payoffs.len(),
        "priced option"
    );

    Ok(OptionValuation {
        spec: *spec,
        payoffs,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionKind;
    use approx::assert_relative_eq;

    fn paths() -> Vec<PricePath> {
        vec![
            vec![100.0, 80.0, 60.0],
            vec![100.0, 100.0, 100.0],
            vec![100.0, 120.0, 140.0],
        ]
    }

    #[test]
    fn test_call_payoffs() {
        let spec = OptionSpec::new(3, 100.0, OptionKind::Call);
        let valuation = price_option(&paths(), &spec).unwrap();
        assert_eq!(valuation.payoffs, vec![0.0, 0.0, 40.0]);
        assert_relative_eq!(valuation.summary.mean, 40.0 / 3.0);
        assert_eq!(valuation.summary.median, 0.0);
    }

    #[test]
    fn test_put_payoffs_at_intermediate_step() {
        let spec = OptionSpec::new(2, 100.0, OptionKind::Put);
        let valuation = price_option(&paths(), &spec).unwrap();
        assert_eq!(valuation.payoffs, vec![20.0, 0.0, 0.0]);
    }

    #[test]
    fn test_step_one_reads_spot() {
        let spec = OptionSpec::new(1, 90.0, OptionKind::Call);
        let valuation = price_option(&paths(), &spec).unwrap();
        assert!(valuation.payoffs.iter().all(|&p| p == 10.0));
    }

    #[test]
    fn test_strike_at_maximum_gives_zero_call() {
        let spec = OptionSpec::new(3, 140.0, OptionKind::Call);
        let valuation = price_option(&paths(), &spec).unwrap();
        assert!(valuation.payoffs.iter().all(|&p| p == 0.0));
        assert_eq!(valuation.summary.mean, 0.0);
    }

    #[test]
    fn test_zero_strike_call_equals_price() {
        let spec = OptionSpec::new(3, 0.0, OptionKind::Call);
        let valuation = price_option(&paths(), &spec).unwrap();
        assert_relative_eq!(valuation.summary.mean, 100.0, max_relative = 1e-12);
    }

    #[test]
    fn test_errors() {
        let empty: Vec<PricePath> = Vec::new();
        let spec = OptionSpec::new(1, 100.0, OptionKind::Call);
        assert_eq!(price_option(&empty, &spec), Err(OptionError::EmptyPaths));

        let spec = OptionSpec::new(4, 100.0, OptionKind::Call);
        assert!(matches!(
            price_option(&paths(), &spec),
            Err(OptionError::InvalidExerciseStep { step: 4, path_len: 3 })
        ));

        let spec = OptionSpec::new(2, -5.0, OptionKind::Put);
        assert!(matches!(
            price_option(&paths(), &spec),
            Err(OptionError::InvalidStrike { .. })
        ));
    }
}
