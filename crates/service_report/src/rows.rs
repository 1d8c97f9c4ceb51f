//! CSV row layouts.
//!
//! Field names double as the CSV header, so renaming a field changes the
//! file format.

use mc_kernel::mc::{ExecutionMode, RunSummary, TrajectorySample};
use serde::Serialize;

/// Label written to the `mode` column.
pub fn mode_label(mode: ExecutionMode) -> &'static str {
    match mode {
        ExecutionMode::Sequential => "seq",
        ExecutionMode::Parallel { .. } => "omp",
    }
}

/// One line of `results.csv`: the outcome of one run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResultRow<'a> {
    /// Ticker symbol
    pub ticker: &'a str,
    /// Number of simulated paths
    pub simulations: usize,
    /// Steps per path
    pub steps: usize,
    /// Worker count, `1` in sequential mode
    pub threads: usize,
    /// `seq` or `omp`
    pub mode: &'static str,
    /// Mean terminal price
    pub avg_final: f64,
    /// Simulation wall-clock time in seconds
    pub time_sec: f64,
}

impl<'a> ResultRow<'a> {
    /// Builds the row for a finished run.
    pub fn from_summary(ticker: &'a str, steps: usize, summary: &RunSummary) -> Self {
        Self {
            ticker,
            simulations: summary.n_paths,
            steps,
            threads: summary.mode.workers(),
            mode: mode_label(summary.mode),
            avg_final: summary.average_final_price,
            time_sec: summary.elapsed_seconds,
        }
    }
}

/// One line of `trajectories.csv`: the price of one sampled path on one day.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TrajectoryRow<'a> {
    /// Ticker symbol
    pub ticker: &'a str,
    /// Sampled path id
    pub sim_id: usize,
    /// Step index, `0` is the spot
    pub day: usize,
    /// Price on that day
    pub price: f64,
}

/// Flattens trajectory samples into rows, path by path, day by day.
pub fn trajectory_rows<'a>(
    ticker: &'a str,
    samples: &'a [TrajectorySample],
) -> impl Iterator<Item = TrajectoryRow<'a>> + 'a {
    samples.iter().flat_map(move |sample| {
        sample.points.iter().map(move |point| TrajectoryRow {
            ticker,
            sim_id: sample.path_id,
            day: point.day,
            price: point.price,
        })
    })
}
