//! # mc-client (Layer S: Service)
//!
//! Command-line client tying the workspace together:
//!
//! 1. Validate the arguments and configure the kernel
//! 2. Fetch drift, volatility and spot for the ticker from the parameter server
//! 3. Run the simulation in the requested mode
//! 4. Append the run to `results.csv` and sample paths to `trajectories.csv`
//!
//! ```text
//! mc-client <server_ip> <port> <ticker> <years> <simulations> <steps> <seq|omp> <threads>
//! ```
//!
//! Every failure maps to a distinct process exit code, see
//! [`CliError::exit_code`].

pub mod args;
pub mod config;
pub mod error;
pub mod run;

pub use args::{parse_mode, Cli, RunRequest};
pub use config::{ClientConfig, ConfigError, DEFAULT_CONFIG_PATH};
pub use error::{CliError, Result, EXIT_INVALID_ARGUMENT, EXIT_INVALID_MODE, EXIT_OUTPUT_FAILED};
pub use run::{build_runner, execute, run_cli, RunOutcome};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` takes precedence over
/// `default_level`. Log lines go to stderr; stdout carries the run report.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed (tests).
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
