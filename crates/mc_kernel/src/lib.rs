//! # Monte Carlo Kernel (Layer P: The Kernel)
//!
//! Simulation engine for geometric Brownian motion price paths:
//! - Seeded random streams with explicit per-worker seed derivation
//! - Single-path GBM generator (terminal price or full trajectory)
//! - Sequential and parallel orchestration with disjoint result blocks
//! - Compensated aggregation and reproducible trajectory sampling
//!
//! The kernel depends on no other workspace crate and performs no I/O. Inputs
//! are validated when a [`MonteCarloConfig`](mc::MonteCarloConfig) or
//! [`GbmParams`](mc::GbmParams) is checked; once a run starts it cannot fail.
//!
//! ## Usage Example
//!
//! ```rust
//! use mc_kernel::mc::{GbmParams, MonteCarloConfig, MonteCarloRunner};
//!
//! let params = GbmParams::new(100.0, 0.05, 0.2, 252);
//! params.validate().unwrap();
//!
//! let runner = MonteCarloRunner::new(
//!     MonteCarloConfig::builder().n_paths(1_000).build().unwrap(),
//! )
//! .unwrap();
//!
//! let summary = runner.run(&params);
//! let samples = runner.sample_trajectories(&params);
//! assert_eq!(samples.len(), 20);
//! assert!(summary.average_final_price > 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod mc;
pub mod rng;

pub use mc::{
    ExecutionMode, GbmParams, MonteCarloConfig, MonteCarloRunner, RunSummary, Schedule,
    TrajectorySample,
};
pub use rng::{SeedStrategy, SimRng};
