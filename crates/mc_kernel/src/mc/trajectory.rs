//! Reproducible sample trajectories for reporting.
//!
//! A small number of full price paths is regenerated after every run so that
//! they can be plotted. Sample `k` always uses its own stream seeded with
//! `1000 + k`, so the samples do not depend on how the main run was executed.

use super::paths::{simulate_trajectory, GbmParams};
use crate::rng::{trajectory_seed, SimRng};

/// Maximum number of trajectories sampled per run.
pub const MAX_TRAJECTORY_SAMPLES: usize = 20;

/// One point of a sampled trajectory.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrajectoryPoint {
    /// Step index, 0 for the initial price.
    pub day: usize,
    /// Simulated price at `day`.
    pub price: f64,
}

/// Full trajectory of one sampled path.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrajectorySample {
    /// Path id within the sample (`0..count`).
    pub path_id: usize,
    /// Points for days `0..=n_steps`, in order.
    pub points: Vec<TrajectoryPoint>,
}

impl TrajectorySample {
    /// Returns the final simulated price.
    pub fn terminal_price(&self) -> Option<f64> {
        self.points.last().map(|p| p.price)
    }
}

/// Number of trajectories sampled for a run of `n_paths` paths.
#[inline]
pub fn trajectory_sample_count(n_paths: usize) -> usize {
    n_paths.min(MAX_TRAJECTORY_SAMPLES)
}

/// Regenerates `min(20, n_paths)` trajectories with per-path fixed seeds.
///
/// # Examples
///
/// ```rust
/// use mc_kernel::mc::{sample_trajectories, GbmParams};
///
/// let params = GbmParams::new(100.0, 0.05, 0.2, 10);
/// let samples = sample_trajectories(&params, 5);
///
/// assert_eq!(samples.len(), 5);
/// assert_eq!(samples[0].points.len(), 11);
/// ```
pub fn sample_trajectories(params: &GbmParams, n_paths: usize) -> Vec<TrajectorySample> {
    sample_trajectories_capped(params, n_paths, MAX_TRAJECTORY_SAMPLES)
}

/// Like [`sample_trajectories`] with a custom cap on the sample count.
pub fn sample_trajectories_capped(
    params: &GbmParams,
    n_paths: usize,
    max_samples: usize,
) -> Vec<TrajectorySample> {
    (0..n_paths.min(max_samples))
        .map(|path_id| {
            let mut rng = SimRng::from_seed(trajectory_seed(path_id));
            let points = simulate_trajectory(params, &mut rng)
                .into_iter()
                .enumerate()
                .map(|(day, price)| TrajectoryPoint { day, price })
                .collect();
            TrajectorySample { path_id, points }
        })
        .collect()
}
