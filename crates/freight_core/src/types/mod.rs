//! Shared types for the simulator workspace.
//!
//! This module provides:
//! - `StatisticsError`: Errors from percentile and summary computations

pub mod error;

pub use error::StatisticsError;
