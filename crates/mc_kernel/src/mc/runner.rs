//! Monte Carlo run orchestration.
//!
//! [`MonteCarloRunner`] owns a validated [`MonteCarloConfig`] and, in
//! parallel mode, a dedicated rayon pool with exactly `workers` threads. A
//! run allocates the result buffer (one slot per path id), fills it in the
//! configured mode, and reduces it to a [`RunSummary`].

use std::time::{Duration, Instant};

use super::aggregate::CompensatedSum;
use super::config::{ExecutionMode, MonteCarloConfig};
use super::error::ConfigError;
use super::parallel::{simulate_parallel, WorkerStats};
use super::paths::{fill_terminal_prices, GbmParams};
use super::trajectory::{sample_trajectories, TrajectorySample};
use crate::rng::SimRng;

/// Summary of one Monte Carlo run.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    /// Mean terminal price over all paths.
    pub average_final_price: f64,
    /// Wall-clock time spent generating paths, in seconds.
    pub elapsed_seconds: f64,
    /// Number of terminal prices aggregated.
    pub n_paths: usize,
    /// Mode the run executed in.
    pub mode: ExecutionMode,
    /// Base seed the worker streams were derived from.
    pub seed_base: u64,
}

/// Raw output of the path-generation phase.
#[derive(Clone, Debug)]
pub struct SimulationOutput {
    /// Terminal price of path `i` at index `i`.
    pub terminal_prices: Vec<f64>,
    /// Time spent generating paths.
    pub elapsed: Duration,
    /// Per-worker report, ordered by worker id.
    pub workers: Vec<WorkerStats>,
    /// Base seed the worker streams were derived from.
    pub seed_base: u64,
}

/// Monte Carlo orchestrator.
///
/// # Examples
///
/// ```rust
/// use mc_kernel::mc::{ExecutionMode, GbmParams, MonteCarloConfig, MonteCarloRunner};
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(1_000)
///     .mode(ExecutionMode::Parallel { workers: 2 })
///     .build()
///     .unwrap();
///
/// let runner = MonteCarloRunner::new(config).unwrap();
/// let summary = runner.run(&GbmParams::new(100.0, 0.05, 0.2, 50));
///
/// assert_eq!(summary.n_paths, 1_000);
/// assert!(summary.average_final_price > 0.0);
/// ```
#[derive(Debug)]
pub struct MonteCarloRunner {
    config: MonteCarloConfig,
    pool: Option<rayon::ThreadPool>,
}

impl MonteCarloRunner {
    /// Creates a runner, building the worker pool for parallel mode.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is invalid or the worker
    /// threads cannot be spawned.
    pub fn new(config: MonteCarloConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let pool = match config.mode() {
            ExecutionMode::Sequential => None,
            ExecutionMode::Parallel { workers } => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(workers)
                    .thread_name(|i| format!("mc-worker-{}", i))
                    .build()
                    .map_err(|e| ConfigError::InvalidParameter {
                        name: "workers",
                        value: format!("cannot start {} worker threads: {}", workers, e),
                    })?,
            ),
        };

        Ok(Self { config, pool })
    }

    /// Returns the run configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Generates all terminal prices without reducing them.
    ///
    /// `params` must satisfy [`GbmParams::validate`]; the kernel does not
    /// re-check them.
    pub fn simulate(&self, params: &GbmParams) -> SimulationOutput {
        debug_assert!(params.is_valid(), "invalid GBM parameters: {:?}", params);

        let n_paths = self.config.n_paths();
        let seeds = self.config.seed_strategy().resolve();
        let mut terminal_prices = vec![0.0; n_paths];

        let start = Instant::now();
        let workers = match (&self.pool, self.config.mode()) {
            (Some(pool), ExecutionMode::Parallel { workers }) => pool.install(|| {
                simulate_parallel(
                    params,
                    seeds,
                    workers,
                    self.config.schedule(),
                    &mut terminal_prices,
                )
            }),
            _ => {
                let seed = seeds.worker_seed(0);
                let mut rng = SimRng::from_seed(seed);
                fill_terminal_prices(params, &mut rng, &mut terminal_prices);
                vec![WorkerStats {
                    worker_id: 0,
                    seed,
                    paths: n_paths,
                    blocks: 1,
                }]
            }
        };
        let elapsed = start.elapsed();

        SimulationOutput {
            terminal_prices,
            elapsed,
            workers,
            seed_base: seeds.base(),
        }
    }

    /// Generates the terminal prices only.
    #[inline]
    pub fn simulate_terminal_prices(&self, params: &GbmParams) -> Vec<f64> {
        self.simulate(params).terminal_prices
    }

    /// Runs the simulation and returns its summary.
    pub fn run(&self, params: &GbmParams) -> RunSummary {
        self.summarise(&self.simulate(params))
    }

    /// Reduces a simulation output to a summary.
    pub fn summarise(&self, output: &SimulationOutput) -> RunSummary {
        let total: CompensatedSum = output.terminal_prices.iter().copied().collect();

        RunSummary {
            average_final_price: total.mean(),
            elapsed_seconds: output.elapsed.as_secs_f64(),
            n_paths: total.count(),
            mode: self.config.mode(),
            seed_base: output.seed_base,
        }
    }

    /// Regenerates the reporting trajectories for this run's path count.
    #[inline]
    pub fn sample_trajectories(&self, params: &GbmParams) -> Vec<TrajectorySample> {
        sample_trajectories(params, self.config.n_paths())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::config::Schedule;
    use crate::rng::SeedStrategy;
    use approx::assert_relative_eq;

    fn runner(n_paths: usize, mode: ExecutionMode) -> MonteCarloRunner {
        let config = MonteCarloConfig::builder()
            .n_paths(n_paths)
            .mode(mode)
            .build()
            .unwrap();
        MonteCarloRunner::new(config).unwrap()
    }

    #[test]
    fn test_sequential_is_reproducible() {
        let params = GbmParams::default();
        let a = runner(2_000, ExecutionMode::Sequential).run(&params);
        let b = runner(2_000, ExecutionMode::Sequential).run(&params);

        assert_eq!(a.average_final_price.to_bits(), b.average_final_price.to_bits());
        assert_eq!(a.seed_base, 12345);
    }

    #[test]
    fn test_sequential_matches_single_stream() {
        let params = GbmParams::new(100.0, 0.05, 0.2, 10);
        let prices = runner(5, ExecutionMode::Sequential).simulate_terminal_prices(&params);

        let mut rng = SimRng::from_seed(12345);
        let expected: Vec<f64> = (0..5)
            .map(|_| crate::mc::simulate_path(&params, &mut rng))
            .collect();

        assert_eq!(prices, expected);
    }

    #[test]
    fn test_summary_counts_every_path() {
        let params = GbmParams::new(100.0, 0.05, 0.2, 5);
        for mode in [
            ExecutionMode::Sequential,
            ExecutionMode::Parallel { workers: 1 },
            ExecutionMode::Parallel { workers: 3 },
        ] {
            let r = runner(257, mode);
            let output = r.simulate(&params);
            assert_eq!(output.terminal_prices.len(), 257);
            assert_eq!(output.workers.iter().map(|w| w.paths).sum::<usize>(), 257);

            let summary = r.summarise(&output);
            assert_eq!(summary.n_paths, 257);
            assert_eq!(summary.mode, mode);
        }
    }

    #[test]
    fn test_summary_average_matches_prices() {
        let params = GbmParams::new(100.0, 0.05, 0.2, 5);
        let r = runner(1_000, ExecutionMode::Sequential);
        let output = r.simulate(&params);
        let summary = r.summarise(&output);

        let naive = output.terminal_prices.iter().sum::<f64>() / 1_000.0;
        assert_relative_eq!(summary.average_final_price, naive, max_relative = 1e-12);
    }

    #[test]
    fn test_parallel_fixed_static_is_reproducible() {
        let params = GbmParams::new(100.0, 0.05, 0.2, 20);
        let config = || {
            MonteCarloConfig::builder()
                .n_paths(999)
                .mode(ExecutionMode::Parallel { workers: 4 })
                .seed_strategy(SeedStrategy::Fixed(2024))
                .schedule(Schedule::Static)
                .build()
                .unwrap()
        };

        let a = MonteCarloRunner::new(config()).unwrap().simulate_terminal_prices(&params);
        let b = MonteCarloRunner::new(config()).unwrap().simulate_terminal_prices(&params);

        assert_eq!(a, b);
    }

    #[test]
    fn test_single_path_run() {
        let params = GbmParams::new(100.0, 0.05, 0.2, 252);
        let summary = runner(1, ExecutionMode::Parallel { workers: 4 }).run(&params);

        assert_eq!(summary.n_paths, 1);
        assert!(summary.average_final_price.is_finite());
        assert!(summary.average_final_price > 0.0);
        assert!(summary.elapsed_seconds >= 0.0);
    }

    #[test]
    fn test_runner_samples_clamped_trajectories() {
        let params = GbmParams::new(100.0, 0.05, 0.2, 3);
        assert_eq!(runner(7, ExecutionMode::Sequential).sample_trajectories(&params).len(), 7);
        assert_eq!(
            runner(500, ExecutionMode::Parallel { workers: 2 })
                .sample_trajectories(&params)
                .len(),
            20
        );
    }
}
