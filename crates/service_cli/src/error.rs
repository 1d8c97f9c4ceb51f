//! CLI error type and exit codes.

use adapter_params::FetchError;
use service_report::ReportError;
use thiserror::Error;

use crate::config::ConfigError;

/// Exit code for argument and configuration problems.
pub const EXIT_INVALID_ARGUMENT: u8 = 1;

/// Exit code when a report file or the console cannot be written.
pub const EXIT_OUTPUT_FAILED: u8 = 8;

/// Exit code for a mode other than `seq` or `omp`.
pub const EXIT_INVALID_MODE: u8 = 10;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// A command-line argument is missing or unparseable
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Unknown execution mode
    #[error("mode must be seq or omp, got '{0}'")]
    InvalidMode(String),

    /// Client configuration is unusable
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Run parameters rejected by the kernel
    #[error("Invalid run parameters: {0}")]
    Kernel(#[from] mc_kernel::mc::ConfigError),

    /// Parameter server failure
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Report output failure
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// Console output failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidArgument(_) | Self::Config(_) | Self::Kernel(_) => EXIT_INVALID_ARGUMENT,
            Self::InvalidMode(_) => EXIT_INVALID_MODE,
            Self::Fetch(err) => err.exit_code(),
            Self::Report(_) | Self::Io(_) => EXIT_OUTPUT_FAILED,
        }
    }
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
