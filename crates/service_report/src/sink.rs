//! Append-only CSV files.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use mc_kernel::mc::{RunSummary, TrajectorySample};
use serde::Serialize;
use tracing::info;

use crate::error::ReportError;
use crate::rows::{trajectory_rows, ResultRow};

/// Default results file name.
pub const DEFAULT_RESULTS_PATH: &str = "results.csv";

/// Default trajectories file name.
pub const DEFAULT_TRAJECTORIES_PATH: &str = "trajectories.csv";

/// CSV file that only ever grows.
///
/// The header is written when the file is absent or empty, never again, so
/// successive runs accumulate under a single header.
#[derive(Clone, Debug)]
pub struct CsvAppender {
    path: PathBuf,
}

impl CsvAppender {
    /// Create an appender for `path`; nothing is touched until the first append.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Target file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<(File, bool), ReportError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;
        let is_empty = file
            .metadata()
            .map_err(|source| self.io_error(source))?
            .len()
            == 0;
        Ok((file, is_empty))
    }

    /// Appends `rows`, returning how many were written.
    pub fn append<R, I>(&self, rows: I) -> Result<usize, ReportError>
    where
        R: Serialize,
        I: IntoIterator<Item = R>,
    {
        let (file, is_empty) = self.open()?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_empty)
            .from_writer(file);

        let mut written = 0;
        for row in rows {
            writer.serialize(row).map_err(|source| self.csv_error(source))?;
            written += 1;
        }
        writer.flush().map_err(|source| self.io_error(source))?;

        Ok(written)
    }

    fn io_error(&self, source: std::io::Error) -> ReportError {
        ReportError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn csv_error(&self, source: csv::Error) -> ReportError {
        ReportError::Csv {
            path: self.path.clone(),
            source,
        }
    }
}

/// The pair of reports produced by every run.
#[derive(Clone, Debug)]
pub struct RunReportWriter {
    results: CsvAppender,
    trajectories: CsvAppender,
}

impl RunReportWriter {
    /// Create a writer for the given results and trajectories files.
    pub fn new(results: impl AsRef<Path>, trajectories: impl AsRef<Path>) -> Self {
        Self {
            results: CsvAppender::new(results),
            trajectories: CsvAppender::new(trajectories),
        }
    }

    /// Results file.
    pub fn results_path(&self) -> &Path {
        self.results.path()
    }

    /// Trajectories file.
    pub fn trajectories_path(&self) -> &Path {
        self.trajectories.path()
    }

    /// Appends one line for the run to the results file.
    pub fn write_result(
        &self,
        ticker: &str,
        steps: usize,
        summary: &RunSummary,
    ) -> Result<(), ReportError> {
        let row = ResultRow::from_summary(ticker, steps, summary);
        self.results.append([row])?;

        info!(
            path = %self.results.path().display(),
            ticker,
            avg_final = summary.average_final_price,
            "Run result appended"
        );
        Ok(())
    }

    /// Appends every point of every sample to the trajectories file.
    pub fn write_trajectories(
        &self,
        ticker: &str,
        samples: &[TrajectorySample],
    ) -> Result<usize, ReportError> {
        let rows = self.trajectories.append(trajectory_rows(ticker, samples))?;

        info!(
            path = %self.trajectories.path().display(),
            ticker,
            samples = samples.len(),
            rows,
            "Trajectories appended"
        );
        Ok(rows)
    }
}

impl Default for RunReportWriter {
    fn default() -> Self {
        Self::new(DEFAULT_RESULTS_PATH, DEFAULT_TRAJECTORIES_PATH)
    }
}
