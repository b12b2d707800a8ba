//! # Freight Models (L2: Market Logic)
//!
//! Demand and supply models for freight capacity, and the market-clearing
//! search that combines them.
//!
//! This crate provides:
//! - Power-law demand curves fitted by log-linear least squares, with
//!   prediction intervals (`demand`)
//! - Degenerate-data curve strategies: baseline elasticity and shock shift
//! - Flat and linearly sloped supply curves (`supply`)
//! - Equilibrium search and before/after market shift reporting (`equilibrium`)
//! - Curve sampling for renderers (`curve_points`)
//!
//! ## Design Principles
//!
//! - **One prediction contract**: every fitted curve carries a
//!   [`CurveSource`](demand::CurveSource) tag but is consumed through the
//!   [`DemandCurve`](demand::DemandCurve) trait; supply curves are a closed enum
//! - **Immutable results**: fitted curves and equilibrium points are never
//!   updated in place; re-analysis builds new values
//! - **Explicit degeneracy**: non-finite statistics propagate as `NaN`
//!   rather than being replaced with plausible numbers
//!
//! ## Example
//!
//! ```rust
//! use freight_models::demand::{DemandCurveFitter, DemandObservation};
//! use freight_models::equilibrium::EquilibriumSolver;
//! use freight_models::supply::SupplyCurve;
//!
//! let observations = vec![
//!     DemandObservation::new(2800.0, 1250.0),
//!     DemandObservation::new(3000.0, 1100.0),
//!     DemandObservation::new(3200.0, 1010.0),
//!     DemandObservation::new(3400.0, 920.0),
//! ];
//!
//! let curve = DemandCurveFitter::new().fit(&observations, false).unwrap();
//! assert!(curve.b() < 0.0);
//!
//! let supply = SupplyCurve::sloped(2500.0, 0.5).unwrap();
//! let point = EquilibriumSolver::new().solve(&curve, &supply, None);
//! assert!(point.price.is_finite());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod curve_points;
pub mod demand;
pub mod equilibrium;
pub mod supply;
