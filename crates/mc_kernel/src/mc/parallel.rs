//! Parallel fan-out of path simulations over a fixed worker pool.
//!
//! # Ownership contract
//!
//! The result buffer is split into disjoint `&mut [f64]` blocks before any
//! worker starts. A block is handed to exactly one worker, which holds the
//! exclusive borrow until it has written every slot, so slot `i` is written
//! once, by one worker, with the price of path `i`. No locking guards the
//! slots themselves.
//!
//! Each worker builds its own [`SimRng`] by value from the run seeds. Streams
//! are never shared, cloned or reused between workers.

use std::sync::{Mutex, PoisonError};

use rayon::prelude::*;

use super::config::Schedule;
use super::paths::{fill_terminal_prices, GbmParams};
use crate::rng::{RunSeeds, SimRng};

/// What one worker did during a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkerStats {
    /// Logical worker id (`0..workers`).
    pub worker_id: usize,
    /// Seed of the worker's random stream.
    pub seed: u64,
    /// Number of paths simulated.
    pub paths: usize,
    /// Number of blocks claimed.
    pub blocks: usize,
}

impl WorkerStats {
    fn idle(worker_id: usize, seed: u64) -> Self {
        Self {
            worker_id,
            seed,
            paths: 0,
            blocks: 0,
        }
    }
}

/// Runs all paths of `out` on the current rayon pool.
///
/// Must be called from inside `ThreadPool::install` so that `workers`
/// matches the pool size. Returns one [`WorkerStats`] per logical worker,
/// ordered by worker id.
pub(crate) fn simulate_parallel(
    params: &GbmParams,
    seeds: RunSeeds,
    workers: usize,
    schedule: Schedule,
    out: &mut [f64],
) -> Vec<WorkerStats> {
    match schedule {
        Schedule::Static => simulate_static(params, seeds, workers, out),
        Schedule::Dynamic { block_size } => {
            simulate_dynamic(params, seeds, workers, block_size, out)
        }
    }
}

/// One contiguous share per worker; the share of worker `k` is fixed by `k`.
fn simulate_static(
    params: &GbmParams,
    seeds: RunSeeds,
    workers: usize,
    out: &mut [f64],
) -> Vec<WorkerStats> {
    let share = out.len().div_ceil(workers).max(1);

    let mut stats: Vec<WorkerStats> = out
        .par_chunks_mut(share)
        .enumerate()
        .map(|(worker_id, block)| {
            let seed = seeds.worker_seed(worker_id);
            let mut rng = SimRng::from_seed(seed);
            fill_terminal_prices(params, &mut rng, block);
            WorkerStats {
                worker_id,
                seed,
                paths: block.len(),
                blocks: 1,
            }
        })
        .collect();

    // Workers left without a share still appear in the report.
    for worker_id in stats.len()..workers {
        stats.push(WorkerStats::idle(worker_id, seeds.worker_seed(worker_id)));
    }
    stats
}

/// Workers claim blocks from a shared queue until it is empty.
///
/// Claiming moves the block's exclusive borrow out of the queue, so the lock
/// is held only while taking the next block, never while simulating.
fn simulate_dynamic(
    params: &GbmParams,
    seeds: RunSeeds,
    workers: usize,
    block_size: usize,
    out: &mut [f64],
) -> Vec<WorkerStats> {
    let queue = Mutex::new(out.chunks_mut(block_size));

    (0..workers)
        .into_par_iter()
        .map(|worker_id| {
            let seed = seeds.worker_seed(worker_id);
            let mut rng = SimRng::from_seed(seed);
            let mut stats = WorkerStats::idle(worker_id, seed);

            loop {
                let claimed = queue.lock().unwrap_or_else(PoisonError::into_inner).next();
                let Some(block) = claimed else {
                    break;
                };
                fill_terminal_prices(params, &mut rng, block);
                stats.paths += block.len();
                stats.blocks += 1;
            }

            stats
        })
        .collect()
}
