//! Seeded pseudo-random generator with Box-Muller normal sampling.
//!
//! This module provides [`FreightRng`], a wrapper around `rand::rngs::StdRng`
//! that records its seed for reproducibility tracking.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// Monte Carlo random number generator.
///
/// # Algorithm
///
/// Standard normals use the Box-Muller transform:
///
/// ```text
/// u, v ~ U[0, 1),  redrawn while exactly 0
/// z    = sqrt(-2 ln u) × cos(2π v)
/// ```
///
/// Only the cosine branch is used; the sine partner is discarded, so every
/// normal costs two uniforms.
///
/// # Examples
///
/// ```rust
/// use freight_pricing::rng::FreightRng;
///
/// let mut rng1 = FreightRng::from_seed(42);
/// let mut rng2 = FreightRng::from_seed(42);
/// assert_eq!(rng1.gen_normal(), rng2.gen_normal());
/// assert_eq!(rng1.seed(), Some(42));
/// ```
#[derive(Clone, Debug)]
pub struct FreightRng {
    /// The underlying PRNG instance.
    inner: StdRng,
    /// Seed used for initialisation; `None` when seeded from entropy.
    seed: Option<u64>,
}

impl FreightRng {
    /// Creates a generator initialised with `seed`.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Creates a generator seeded from operating-system entropy.
    ///
    /// Sequences are not reproducible; [`FreightRng::seed`] returns `None`.
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Returns the seed used for initialisation, if any.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Uniform value in (0, 1): exact zeros are redrawn.
    #[inline]
    pub fn gen_uniform_nonzero(&mut self) -> f64 {
        loop {
            let u: f64 = self.inner.gen();
            if u != 0.0 {
                return u;
            }
        }
    }

    /// Uniform 64-bit value, used to derive child seeds.
    #[inline]
    pub fn gen_seed(&mut self) -> u64 {
        self.inner.gen()
    }

    /// Standard normal variate (mean 0, standard deviation 1).
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        let u = self.gen_uniform_nonzero();
        let v = self.gen_uniform_nonzero();
        (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos()
    }

    /// Normal variate with the given mean and standard deviation.
    ///
    /// A zero `std_dev` returns `mean` exactly.
    #[inline]
    pub fn sample(&mut self, mean: f64, std_dev: f64) -> f64 {
        mean + std_dev * self.gen_normal()
    }

    /// Fills `buffer` with standard normal variates.
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.gen_normal();
        }
    }
}
