//! Error types for report output.

use std::path::PathBuf;

use thiserror::Error;

/// Report writing error
#[derive(Debug, Error)]
pub enum ReportError {
    /// The report file could not be opened or flushed
    #[error("IO error on {}: {source}", path.display())]
    Io {
        /// Report file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A row could not be serialised
    #[error("CSV error on {}: {source}", path.display())]
    Csv {
        /// Report file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: csv::Error,
    },
}

impl ReportError {
    /// File the failure relates to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Csv { path, .. } => path,
        }
    }
}
