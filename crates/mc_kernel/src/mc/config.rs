//! Monte Carlo simulation configuration.
//!
//! This module provides the run configuration (path count, execution mode,
//! seeding and scheduling policy) and its builder.

use std::fmt;

use super::error::ConfigError;
use crate::rng::{SeedStrategy, DEFAULT_SEQUENTIAL_SEED};

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 100_000_000;

/// Maximum number of time steps allowed per path.
///
/// Bounds the reporting trajectories, which hold `steps + 1` prices each.
pub const MAX_STEPS: usize = 10_000_000;

/// Maximum number of worker threads in parallel mode.
pub const MAX_WORKERS: usize = 1024;

/// Default number of paths per block handed out by the dynamic scheduler.
pub const DEFAULT_BLOCK_SIZE: usize = 64;

/// How the N path simulations are executed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecutionMode {
    /// Single thread, single random stream, path ids in order.
    #[default]
    Sequential,
    /// Fixed-size pool of OS threads, one random stream per worker.
    Parallel {
        /// Number of worker threads.
        workers: usize,
    },
}

impl ExecutionMode {
    /// Returns the number of workers that will run paths (1 for sequential).
    #[inline]
    pub fn workers(&self) -> usize {
        match *self {
            Self::Sequential => 1,
            Self::Parallel { workers } => workers,
        }
    }

    /// Returns `true` for parallel mode.
    #[inline]
    pub fn is_parallel(&self) -> bool {
        matches!(self, Self::Parallel { .. })
    }

    /// Seed strategy used when none is configured explicitly.
    ///
    /// Sequential runs are reproducible by default; parallel runs take their
    /// base seed from the wall clock.
    #[inline]
    pub fn default_seed_strategy(&self) -> SeedStrategy {
        match self {
            Self::Sequential => SeedStrategy::Fixed(DEFAULT_SEQUENTIAL_SEED),
            Self::Parallel { .. } => SeedStrategy::TimeAndWorkerOffset,
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Parallel { workers } => write!(f, "parallel({})", workers),
        }
    }
}

/// Assignment of path indices to workers in parallel mode.
///
/// Either way the result buffer is cut into disjoint blocks and each block is
/// exclusively borrowed by exactly one worker, so no slot is written twice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Schedule {
    /// Workers repeatedly claim the next free block of `block_size` paths.
    ///
    /// Which worker simulates which path varies between runs, so results are
    /// not bit-reproducible even with a fixed seed.
    Dynamic {
        /// Paths per block.
        block_size: usize,
    },
    /// One contiguous share of the buffer per worker.
    ///
    /// Combined with [`SeedStrategy::Fixed`] this makes parallel runs
    /// bit-reproducible for a given worker count.
    Static,
}

impl Default for Schedule {
    fn default() -> Self {
        Self::Dynamic {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

/// Monte Carlo run configuration.
///
/// Immutable once built. Use [`MonteCarloConfigBuilder`] to construct
/// instances.
///
/// # Examples
///
/// ```rust
/// use mc_kernel::mc::{ExecutionMode, MonteCarloConfig};
/// use mc_kernel::rng::SeedStrategy;
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(10_000)
///     .mode(ExecutionMode::Parallel { workers: 4 })
///     .seed_strategy(SeedStrategy::Fixed(42))
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 10_000);
/// assert_eq!(config.workers(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct MonteCarloConfig {
    /// Number of simulation paths.
    n_paths: usize,
    /// Sequential or parallel execution.
    mode: ExecutionMode,
    /// Seeding policy for the main run.
    seed_strategy: SeedStrategy,
    /// Work assignment in parallel mode.
    schedule: Schedule,
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Returns the number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the execution mode.
    #[inline]
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Returns the number of workers (1 in sequential mode).
    #[inline]
    pub fn workers(&self) -> usize {
        self.mode.workers()
    }

    /// Returns the seeding policy.
    #[inline]
    pub fn seed_strategy(&self) -> SeedStrategy {
        self.seed_strategy
    }

    /// Returns the parallel scheduling policy.
    #[inline]
    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_paths` is 0 or greater than [`MAX_PATHS`]
    /// - the parallel worker count is 0 or greater than [`MAX_WORKERS`]
    /// - the dynamic block size is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_paths == 0 || self.n_paths > MAX_PATHS {
            return Err(ConfigError::InvalidPathCount(self.n_paths));
        }
        if let ExecutionMode::Parallel { workers } = self.mode {
            if workers == 0 || workers > MAX_WORKERS {
                return Err(ConfigError::InvalidWorkerCount(workers));
            }
        }
        if let Schedule::Dynamic { block_size: 0 } = self.schedule {
            return Err(ConfigError::InvalidParameter {
                name: "block_size",
                value: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for [`MonteCarloConfig`].
///
/// When no seed strategy is given the mode's default applies (see
/// [`ExecutionMode::default_seed_strategy`]).
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    n_paths: Option<usize>,
    mode: ExecutionMode,
    seed_strategy: Option<SeedStrategy>,
    schedule: Schedule,
}

impl MonteCarloConfigBuilder {
    /// Sets the number of simulation paths.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the execution mode.
    #[inline]
    pub fn mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the seeding policy.
    #[inline]
    pub fn seed_strategy(mut self, seed_strategy: SeedStrategy) -> Self {
        self.seed_strategy = Some(seed_strategy);
        self
    }

    /// Shorthand for `seed_strategy(SeedStrategy::Fixed(seed))`.
    #[inline]
    pub fn seed(self, seed: u64) -> Self {
        self.seed_strategy(SeedStrategy::Fixed(seed))
    }

    /// Sets the parallel scheduling policy.
    #[inline]
    pub fn schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `n_paths` is not set or any value is invalid.
    pub fn build(self) -> Result<MonteCarloConfig, ConfigError> {
        let n_paths = self.n_paths.ok_or(ConfigError::InvalidParameter {
            name: "n_paths",
            value: "must be specified".to_string(),
        })?;

        let config = MonteCarloConfig {
            n_paths,
            mode: self.mode,
            seed_strategy: self
                .seed_strategy
                .unwrap_or_else(|| self.mode.default_seed_strategy()),
            schedule: self.schedule,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder_defaults() {
        let config = MonteCarloConfig::builder().n_paths(10_000).build().unwrap();

        assert_eq!(config.n_paths(), 10_000);
        assert_eq!(config.mode(), ExecutionMode::Sequential);
        assert_eq!(config.workers(), 1);
        assert_eq!(config.seed_strategy(), SeedStrategy::Fixed(12345));
        assert_eq!(config.schedule(), Schedule::Dynamic { block_size: 64 });
    }

    #[test]
    fn test_parallel_defaults_to_wall_clock_seed() {
        let config = MonteCarloConfig::builder()
            .n_paths(100)
            .mode(ExecutionMode::Parallel { workers: 4 })
            .build()
            .unwrap();

        assert_eq!(config.workers(), 4);
        assert_eq!(config.seed_strategy(), SeedStrategy::TimeAndWorkerOffset);
    }

    #[test]
    fn test_explicit_seed_overrides_mode_default() {
        let config = MonteCarloConfig::builder()
            .n_paths(100)
            .mode(ExecutionMode::Parallel { workers: 2 })
            .seed(42)
            .build()
            .unwrap();

        assert_eq!(config.seed_strategy(), SeedStrategy::Fixed(42));
    }

    #[test]
    fn test_config_invalid_zero_paths() {
        let result = MonteCarloConfig::builder().n_paths(0).build();
        assert!(matches!(result, Err(ConfigError::InvalidPathCount(0))));
    }

    #[test]
    fn test_config_invalid_too_many_paths() {
        let result = MonteCarloConfig::builder().n_paths(MAX_PATHS + 1).build();
        assert!(matches!(result, Err(ConfigError::InvalidPathCount(_))));
    }

    #[test]
    fn test_config_invalid_zero_workers() {
        let result = MonteCarloConfig::builder()
            .n_paths(10)
            .mode(ExecutionMode::Parallel { workers: 0 })
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidWorkerCount(0))));
    }

    #[test]
    fn test_config_invalid_block_size() {
        let result = MonteCarloConfig::builder()
            .n_paths(10)
            .schedule(Schedule::Dynamic { block_size: 0 })
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "block_size",
                ..
            })
        ));
    }

    #[test]
    fn test_config_missing_paths() {
        let result = MonteCarloConfig::builder().build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "n_paths",
                ..
            })
        ));
    }

    #[test]
    fn test_sequential_ignores_worker_validation() {
        // Worker count only matters in parallel mode.
        let config = MonteCarloConfig::builder()
            .n_paths(1)
            .mode(ExecutionMode::Sequential)
            .build()
            .unwrap();
        assert_eq!(config.workers(), 1);
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(ExecutionMode::Sequential.to_string(), "sequential");
        assert_eq!(
            ExecutionMode::Parallel { workers: 8 }.to_string(),
            "parallel(8)"
        );
    }
}
