//! # Random Number Generation Infrastructure
//!
//! Random number generation facilities for the Monte Carlo kernel.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: All generators are seeded; identical seeds give
//!   identical sequences
//! - **Ownership**: A [`SimRng`] is owned by a single worker; streams are
//!   moved into workers, never shared behind a reference
//! - **Static dispatch**: the path generator is generic over [`NormalSource`]
//!
//! ## Module Structure
//!
//! - [`prng`]: Pseudo-random number generator wrapper with seed management
//! - [`seeding`]: Run-level seed strategies and per-worker seed derivation
//!
//! ## Usage Example
//!
//! ```rust
//! use mc_kernel::rng::{SeedStrategy, SimRng};
//!
//! let seeds = SeedStrategy::Fixed(12345).resolve();
//! let mut worker_rng = SimRng::from_seed(seeds.worker_seed(2));
//! let z = worker_rng.gen_normal();
//! assert!(z.is_finite());
//! ```

mod prng;
mod seeding;

pub use prng::{NormalSource, SimRng};
pub use seeding::{
    trajectory_seed, RunSeeds, SeedStrategy, DEFAULT_SEQUENTIAL_SEED, TRAJECTORY_SEED_BASE,
    WORKER_SEED_STRIDE,
};
