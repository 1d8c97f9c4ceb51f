//! Monte Carlo kernel for geometric Brownian motion.
//!
//! # Architecture
//!
//! ```text
//! MonteCarloRunner
//! ├── MonteCarloConfig  (paths, mode, seeding, schedule)
//! ├── rayon::ThreadPool (parallel mode only, `workers` threads)
//! └── Orchestration
//!     ├── simulate_path()          one terminal price per path id
//!     ├── parallel fan-out         disjoint blocks, one stream per worker
//!     ├── CompensatedSum           mean of the terminal prices
//!     └── sample_trajectories()    min(20, N) reproducible full paths
//! ```
//!
//! # Examples
//!
//! ## Sequential run
//!
//! ```rust
//! use mc_kernel::mc::{GbmParams, MonteCarloConfig, MonteCarloRunner};
//!
//! let config = MonteCarloConfig::builder().n_paths(10_000).build().unwrap();
//! let runner = MonteCarloRunner::new(config).unwrap();
//!
//! let params = GbmParams::new(100.0, 0.05, 0.2, 252);
//! let summary = runner.run(&params);
//! println!("avg={:.4} in {:.3}s", summary.average_final_price, summary.elapsed_seconds);
//! ```
//!
//! ## Reproducible parallel run
//!
//! ```rust
//! use mc_kernel::mc::{ExecutionMode, GbmParams, MonteCarloConfig, MonteCarloRunner, Schedule};
//! use mc_kernel::rng::SeedStrategy;
//!
//! let config = MonteCarloConfig::builder()
//!     .n_paths(10_000)
//!     .mode(ExecutionMode::Parallel { workers: 4 })
//!     .seed_strategy(SeedStrategy::Fixed(42))
//!     .schedule(Schedule::Static)
//!     .build()
//!     .unwrap();
//!
//! let runner = MonteCarloRunner::new(config).unwrap();
//! let first = runner.run(&GbmParams::default());
//! let second = runner.run(&GbmParams::default());
//! assert_eq!(first.average_final_price, second.average_final_price);
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod parallel;
pub mod paths;
pub mod runner;
pub mod trajectory;

// Re-exports for convenient access
pub use aggregate::{compensated_mean, CompensatedSum};
pub use config::{
    ExecutionMode, MonteCarloConfig, MonteCarloConfigBuilder, Schedule, DEFAULT_BLOCK_SIZE,
    MAX_PATHS, MAX_STEPS, MAX_WORKERS,
};
pub use error::ConfigError;
pub use parallel::WorkerStats;
pub use paths::{simulate_path, simulate_trajectory, GbmParams};
pub use runner::{MonteCarloRunner, RunSummary, SimulationOutput};
pub use trajectory::{
    sample_trajectories, sample_trajectories_capped, trajectory_sample_count, TrajectoryPoint,
    TrajectorySample, MAX_TRAJECTORY_SAMPLES,
};
