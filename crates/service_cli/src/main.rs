//! mc-client - Monte Carlo GBM simulation driven by a parameter server
//!
//! Fetches drift, volatility and spot for a ticker, simulates geometric
//! Brownian motion paths sequentially or on a worker pool, and appends the
//! outcome to CSV reports.

use std::process::ExitCode;

use clap::Parser;
use service_cli::{init_tracing, run_cli, Cli, ClientConfig, EXIT_INVALID_ARGUMENT};
use tracing::{info, warn};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version requests are not failures.
            let code = if err.use_stderr() {
                EXIT_INVALID_ARGUMENT
            } else {
                0
            };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    let config = match ClientConfig::load_with_env_and_validate(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            return ExitCode::from(EXIT_INVALID_ARGUMENT);
        }
    };

    init_tracing(&config.log_level);
    info!(config = %cli.config.display(), "mc-client starting");

    match run_cli(&cli, &config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.exit_code();
            warn!(exit_code = code, "mc-client failed");
            eprintln!("ERROR: {}", err);
            ExitCode::from(code)
        }
    }
}
