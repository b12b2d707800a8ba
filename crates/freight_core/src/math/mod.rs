//! Mathematical utilities for simulation summaries.
//!
//! - [`percentile`]: Linear-interpolation percentiles over unsorted or sorted samples
//! - [`statistics`]: Means and five-number-style sample summaries

pub mod percentile;
pub mod statistics;
