//! Pseudo-random number generator wrapper for Monte Carlo simulations.
//!
//! This module provides [`SimRng`], a seeded PRNG wrapper that offers
//! reproducible random number generation with efficient batch operations,
//! and the [`NormalSource`] trait consumed by the path generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// A source of standard normal draws.
///
/// The path generator only ever asks for one N(0, 1) sample at a time, so
/// anything able to produce them (a seeded PRNG, a recorded sequence in a
/// test) can drive a simulation.
pub trait NormalSource {
    /// Returns the next standard normal variate and advances the source.
    fn next_normal(&mut self) -> f64;
}

/// Monte Carlo simulation random number generator.
///
/// Provides seeded, reproducible random number generation for uniform and
/// normal distributions. A `SimRng` is owned by exactly one simulation
/// thread; it is `Send` but deliberately not `Clone`, so a stream can be
/// moved to a worker but never duplicated across workers.
///
/// # Examples
///
/// ```rust
/// use mc_kernel::rng::SimRng;
///
/// let mut rng = SimRng::from_seed(42);
///
/// let u: f64 = rng.gen_uniform();
/// let n: f64 = rng.gen_normal();
///
/// let mut buffer = vec![0.0; 100];
/// rng.fill_normal(&mut buffer);
/// ```
#[derive(Debug)]
pub struct SimRng {
    /// The underlying PRNG instance.
    inner: StdRng,
    /// The seed used for initialisation (stored for reproducibility tracking).
    seed: u64,
}

impl SimRng {
    /// Creates a new RNG instance initialised with the given seed.
    ///
    /// The same seed will always produce the same sequence of random numbers.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mc_kernel::rng::SimRng;
    ///
    /// let mut rng1 = SimRng::from_seed(12345);
    /// let mut rng2 = SimRng::from_seed(12345);
    ///
    /// assert_eq!(rng1.gen_normal(), rng2.gen_normal());
    /// ```
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Returns the seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generates a single uniform random value in [0, 1).
    #[inline]
    pub fn gen_uniform(&mut self) -> f64 {
        self.inner.gen()
    }

    /// Generates a single standard normal variate (mean=0, std=1).
    ///
    /// Uses the Ziggurat algorithm via `rand_distr::StandardNormal`.
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Fills the buffer with standard normal variates.
    ///
    /// Zero-allocation; empty buffers are a no-op. Consumes the stream in
    /// the same order as repeated [`gen_normal`](Self::gen_normal) calls.
    #[inline]
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = StandardNormal.sample(&mut self.inner);
        }
    }
}

impl NormalSource for SimRng {
    #[inline]
    fn next_normal(&mut self) -> f64 {
        self.gen_normal()
    }
}
