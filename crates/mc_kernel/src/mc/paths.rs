//! Path generation for Monte Carlo simulation.
//!
//! This module implements Geometric Brownian Motion (GBM) path generation
//! using the log-space (exact-in-distribution) update over a unit horizon
//! split into `n_steps` equal intervals.
//!
//! Both entry points consume exactly `n_steps` normal draws from the supplied
//! source, so [`simulate_path`] and [`simulate_trajectory`] agree on the
//! terminal price for identically seeded streams.

use super::config::MAX_STEPS;
use super::error::ConfigError;
use crate::rng::NormalSource;

/// Parameters for Geometric Brownian Motion path generation.
///
/// # Model
///
/// ```text
/// dS = μ S dt + σ S dW
/// ```
///
/// simulated over the horizon `[0, 1]` with `dt = 1 / n_steps`.
///
/// The struct is `Copy` and is handed to every worker by value; it is never
/// mutated after construction.
///
/// # Examples
///
/// ```rust
/// use mc_kernel::mc::GbmParams;
///
/// let params = GbmParams::new(100.0, 0.05, 0.2, 252);
/// assert!(params.is_valid());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GbmParams {
    /// Initial spot price (S₀).
    pub spot: f64,
    /// Drift (μ) over the horizon.
    pub drift: f64,
    /// Volatility (σ) over the horizon.
    pub volatility: f64,
    /// Number of time steps discretising the horizon.
    pub n_steps: usize,
}

impl GbmParams {
    /// Creates new GBM parameters.
    #[inline]
    pub fn new(spot: f64, drift: f64, volatility: f64, n_steps: usize) -> Self {
        Self {
            spot,
            drift,
            volatility,
            n_steps,
        }
    }

    /// Returns `true` if all parameters are valid (finite, positive spot,
    /// non-negative volatility, step count in range).
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// - `InvalidStepCount` if `n_steps` is 0 or greater than [`MAX_STEPS`]
    /// - `InvalidParameter` for a non-positive spot, a non-finite drift or a
    ///   negative volatility
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_steps == 0 || self.n_steps > MAX_STEPS {
            return Err(ConfigError::InvalidStepCount(self.n_steps));
        }
        if !(self.spot > 0.0 && self.spot.is_finite()) {
            return Err(ConfigError::InvalidParameter {
                name: "spot",
                value: format!("{} must be positive and finite", self.spot),
            });
        }
        if !self.drift.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "drift",
                value: format!("{} must be finite", self.drift),
            });
        }
        if !(self.volatility >= 0.0 && self.volatility.is_finite()) {
            return Err(ConfigError::InvalidParameter {
                name: "volatility",
                value: format!("{} must be non-negative and finite", self.volatility),
            });
        }
        Ok(())
    }

    /// Time step length `1 / n_steps`.
    #[inline]
    pub fn dt(&self) -> f64 {
        1.0 / self.n_steps as f64
    }
}

impl Default for GbmParams {
    fn default() -> Self {
        Self {
            spot: 100.0,
            drift: 0.05,
            volatility: 0.2,
            n_steps: 252,
        }
    }
}

/// Per-step constants `(μ - σ²/2)dt` and `σ√dt`, hoisted out of the loop.
#[derive(Clone, Copy, Debug)]
struct StepCoefficients {
    drift_dt: f64,
    vol_sqrt_dt: f64,
}

impl StepCoefficients {
    #[inline]
    fn new(params: &GbmParams) -> Self {
        let dt = params.dt();
        Self {
            drift_dt: (params.drift - 0.5 * params.volatility * params.volatility) * dt,
            vol_sqrt_dt: params.volatility * dt.sqrt(),
        }
    }

    #[inline]
    fn growth(&self, z: f64) -> f64 {
        (self.drift_dt + self.vol_sqrt_dt * z).exp()
    }
}

/// Simulates one GBM path and returns its terminal price.
///
/// ```text
/// S(t+dt) = S(t) × exp((μ - 0.5σ²)dt + σ√dt × Z)
/// ```
///
/// Advances `rng` by exactly `params.n_steps` draws. With `n_steps == 0` the
/// spot is returned unchanged and no draw is made.
///
/// # Examples
///
/// ```rust
/// use mc_kernel::mc::{simulate_path, GbmParams};
/// use mc_kernel::rng::SimRng;
///
/// let mut rng = SimRng::from_seed(42);
/// let terminal = simulate_path(&GbmParams::default(), &mut rng);
/// assert!(terminal > 0.0);
/// ```
#[inline]
pub fn simulate_path<R>(params: &GbmParams, rng: &mut R) -> f64
where
    R: NormalSource + ?Sized,
{
    let coeffs = StepCoefficients::new(params);
    let mut price = params.spot;
    for _ in 0..params.n_steps {
        price *= coeffs.growth(rng.next_normal());
    }
    price
}

/// Simulates one GBM path and returns every price from day 0 to `n_steps`.
///
/// The returned vector has `n_steps + 1` entries; index 0 is the spot.
pub fn simulate_trajectory<R>(params: &GbmParams, rng: &mut R) -> Vec<f64>
where
    R: NormalSource + ?Sized,
{
    let coeffs = StepCoefficients::new(params);
    let mut prices = Vec::with_capacity(params.n_steps + 1);
    let mut price = params.spot;
    prices.push(price);
    for _ in 0..params.n_steps {
        price *= coeffs.growth(rng.next_normal());
        prices.push(price);
    }
    prices
}

/// Fills `out` with terminal prices drawn sequentially from one stream.
///
/// This is the unit of work of both execution modes: the sequential runner
/// calls it once on the whole buffer, parallel workers call it on the blocks
/// they own.
#[inline]
pub(crate) fn fill_terminal_prices<R>(params: &GbmParams, rng: &mut R, out: &mut [f64])
where
    R: NormalSource + ?Sized,
{
    for slot in out.iter_mut() {
        *slot = simulate_path(params, rng);
    }
}
