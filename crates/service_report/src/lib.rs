//! # Run Reports (Layer S: Output)
//!
//! Persists Monte Carlo runs as append-only CSV files:
//!
//! - `results.csv`: `ticker,simulations,steps,threads,mode,avg_final,time_sec`,
//!   one line per run
//! - `trajectories.csv`: `ticker,sim_id,day,price`, one line per sampled path
//!   and day
//!
//! Headers are written only when a file is created (or found empty), so the
//! files accumulate the history of every run.

#![deny(missing_docs)]

pub mod error;
pub mod rows;
pub mod sink;

pub use error::ReportError;
pub use rows::{mode_label, trajectory_rows, ResultRow, TrajectoryRow};
pub use sink::{CsvAppender, RunReportWriter, DEFAULT_RESULTS_PATH, DEFAULT_TRAJECTORIES_PATH};
