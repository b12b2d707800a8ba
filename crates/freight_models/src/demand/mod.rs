//! Power-law demand curves.
//!
//! Demand for freight capacity is modelled as
//!
//! ```text
//! Volume = a × Price^b
//! ```
//!
//! where `b` is the price elasticity (typically negative). Curves come from
//! one of three construction strategies, all sharing the same
//! [`FittedDemandCurve::predict`] / [`FittedDemandCurve::predict_with_confidence`]
//! contract:
//!
//! | Strategy | When | Constructor |
//! |----------|------|-------------|
//! | [`CurveSource::RegressionFit`] | ≥ 2 observations | [`DemandCurveFitter::fit`] |
//! | [`CurveSource::BaselineElasticity`] | one baseline point and a user sensitivity | [`FittedDemandCurve::from_baseline_elasticity`] |
//! | [`CurveSource::ShockShift`] | a source curve and one post-shock observation | [`FittedDemandCurve::shock_shift`] |
//!
//! # Examples
//!
//! ```rust
//! use freight_models::demand::{DemandCurve, FittedDemandCurve};
//!
//! // 10% price rise loses 15% of volume
//! let baseline = FittedDemandCurve::from_baseline_elasticity(3000.0, 1000.0, 15.0).unwrap();
//! assert!((baseline.b() + 1.5).abs() < 1e-12);
//!
//! // A shock observation well above the baseline curve shifts it upwards
//! let shocked = baseline.shock_shift(3000.0, 1300.0).unwrap();
//! assert!((shocked.predict(3000.0) - 1300.0).abs() < 1e-6);
//! assert!(shocked.confidence_multiplier() > baseline.confidence_multiplier());
//! ```

mod curve;
mod error;
mod fitter;
mod observation;

pub use curve::{CurveSource, DemandCurve, FittedDemandCurve, PredictionInterval};
pub use error::DemandError;
pub use fitter::{confidence_multiplier, DemandCurveFitter, SHOCK_WIDENING, T_CRITICAL_VALUES};
pub use observation::{DemandDataset, DemandObservation};
