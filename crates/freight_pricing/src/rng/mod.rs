//! # Random Number Generation
//!
//! Seeded normal deviates for the path simulator.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: a seeded generator always yields the same sequence
//! - **Independence**: parallel chunks each own a generator derived from the
//!   base seed and the chunk index, so no state is shared between threads
//! - **Box-Muller**: normals are produced from two uniform draws with exact
//!   zeros redrawn, so `ln(u)` is always finite
//!
//! ## Usage Example
//!
//! ```rust
//! use freight_pricing::rng::FreightRng;
//!
//! let mut rng = FreightRng::from_seed(12345);
//!
//! // Weekly log-return with 0.5% drift and 3% volatility
//! let r = rng.sample(0.005, 0.03);
//! assert!(r.is_finite());
//!
//! // Batch generation into a pre-allocated buffer
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//! ```

mod prng;

pub use prng::FreightRng;
