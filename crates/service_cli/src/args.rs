//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use mc_kernel::mc::{ExecutionMode, MAX_STEPS};

use crate::config::DEFAULT_CONFIG_PATH;
use crate::error::{CliError, Result};

/// Fetch GBM parameters for a ticker and run a Monte Carlo simulation
#[derive(Debug, Parser)]
#[command(name = "mc-client")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Parameter server IPv4 address
    pub server_ip: String,

    /// Parameter server port
    pub port: u16,

    /// Ticker symbol
    pub ticker: String,

    /// Lookback window in years for parameter estimation
    pub years: u32,

    /// Number of simulated paths
    pub simulations: usize,

    /// Time steps per path
    pub steps: usize,

    /// Execution mode: `seq` or `omp`
    pub mode: String,

    /// Worker threads for `omp` (ignored by `seq`)
    pub threads: usize,

    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

/// Validated run request.
#[derive(Clone, Debug, PartialEq)]
pub struct RunRequest {
    /// Parameter server IPv4 address
    pub server_ip: String,
    /// Parameter server port
    pub port: u16,
    /// Ticker as given on the command line
    pub ticker: String,
    /// Lookback window in years
    pub years: u32,
    /// Number of simulated paths
    pub simulations: usize,
    /// Time steps per path
    pub steps: usize,
    /// Execution mode
    pub mode: ExecutionMode,
}

impl Cli {
    /// Checks the arguments that can be checked without the server.
    pub fn run_request(&self) -> Result<RunRequest> {
        let mode = parse_mode(&self.mode, self.threads)?;

        if self.ticker.trim().is_empty() {
            return Err(CliError::InvalidArgument("ticker cannot be empty".to_string()));
        }
        if self.steps == 0 || self.steps > MAX_STEPS {
            return Err(mc_kernel::mc::ConfigError::InvalidStepCount(self.steps).into());
        }

        Ok(RunRequest {
            server_ip: self.server_ip.clone(),
            port: self.port,
            ticker: self.ticker.clone(),
            years: self.years,
            simulations: self.simulations,
            steps: self.steps,
            mode,
        })
    }
}

/// Maps the `mode` argument to an execution mode.
///
/// `threads` is only used by `omp`; worker-count limits are enforced when
/// the run is configured.
pub fn parse_mode(mode: &str, threads: usize) -> Result<ExecutionMode> {
    match mode {
        "seq" => Ok(ExecutionMode::Sequential),
        "omp" => Ok(ExecutionMode::Parallel { workers: threads }),
        other => Err(CliError::InvalidMode(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("mc-client").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_positional_arguments() {
        let cli = cli(&["127.0.0.1", "9000", "aapl", "5", "1000", "252", "omp", "8"]);
        let request = cli.run_request().unwrap();

        assert_eq!(request.server_ip, "127.0.0.1");
        assert_eq!(request.port, 9000);
        assert_eq!(request.ticker, "aapl");
        assert_eq!(request.years, 5);
        assert_eq!(request.simulations, 1000);
        assert_eq!(request.steps, 252);
        assert_eq!(request.mode, ExecutionMode::Parallel { workers: 8 });
        assert_eq!(cli.config, PathBuf::from("mc-client.toml"));
    }

    #[test]
    fn test_seq_ignores_threads() {
        let request = cli(&["10.0.0.2", "9000", "MSFT", "1", "10", "5", "seq", "0"])
            .run_request()
            .unwrap();
        assert_eq!(request.mode, ExecutionMode::Sequential);
    }

    #[test]
    fn test_wrong_argument_count_fails_to_parse() {
        let result = Cli::try_parse_from(["mc-client", "127.0.0.1", "9000", "AAPL"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_numeric_argument_fails_to_parse() {
        let result = Cli::try_parse_from([
            "mc-client", "127.0.0.1", "9000", "AAPL", "5", "many", "252", "seq", "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_mode() {
        let err = cli(&["127.0.0.1", "9000", "AAPL", "5", "10", "5", "gpu", "4"])
            .run_request()
            .unwrap_err();
        assert!(matches!(err, CliError::InvalidMode(ref m) if m == "gpu"));
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn test_mode_is_case_sensitive() {
        assert!(parse_mode("SEQ", 1).is_err());
        assert!(parse_mode("Omp", 1).is_err());
    }

    #[test]
    fn test_zero_steps_rejected() {
        let err = cli(&["127.0.0.1", "9000", "AAPL", "5", "10", "0", "seq", "1"])
            .run_request()
            .unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_large_step_counts_accepted() {
        let request = cli(&["127.0.0.1", "9000", "AAPL", "5", "10", "250000", "seq", "1"])
            .run_request()
            .unwrap();
        assert_eq!(request.steps, 250_000);

        let at_cap = MAX_STEPS.to_string();
        assert!(cli(&["127.0.0.1", "9000", "AAPL", "5", "10", at_cap.as_str(), "seq", "1"])
            .run_request()
            .is_ok());

        let over_cap = (MAX_STEPS + 1).to_string();
        let err = cli(&["127.0.0.1", "9000", "AAPL", "5", "10", over_cap.as_str(), "seq", "1"])
            .run_request()
            .unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }
}
