//! One client run: fetch parameters, simulate, report.

use std::io::Write;

use adapter_params::{FetchError, MarketParameters, ParameterClient, ParameterRequest, ParameterSource};
use mc_kernel::mc::{
    sample_trajectories_capped, ExecutionMode, GbmParams, MonteCarloConfig, MonteCarloRunner,
    RunSummary,
};
use service_report::RunReportWriter;
use tracing::info;

use crate::args::{Cli, RunRequest};
use crate::config::ClientConfig;
use crate::error::Result;

/// What a successful run produced.
#[derive(Clone, Debug)]
pub struct RunOutcome {
    /// Ticker as sent to the server
    pub ticker: String,
    /// Parameters received from the server
    pub params: MarketParameters,
    /// Simulation summary
    pub summary: RunSummary,
    /// Rows appended to the trajectories file
    pub trajectory_rows: usize,
}

/// Configures the kernel for `request`. Fails before any network traffic.
pub fn build_runner(request: &RunRequest, config: &ClientConfig) -> Result<MonteCarloRunner> {
    let mc_config = MonteCarloConfig::builder()
        .n_paths(request.simulations)
        .mode(request.mode)
        .seed_strategy(config.seed_strategy(request.mode))
        .schedule(config.schedule())
        .build()?;

    Ok(MonteCarloRunner::new(mc_config)?)
}

/// Runs `request` against `source`, writing the console report to `out`.
pub fn execute<S, W>(
    request: &RunRequest,
    config: &ClientConfig,
    source: &S,
    out: &mut W,
) -> Result<RunOutcome>
where
    S: ParameterSource + ?Sized,
    W: Write,
{
    let runner = build_runner(request, config)?;
    run_with(runner, request, config, source, out)
}

fn run_with<S, W>(
    runner: MonteCarloRunner,
    request: &RunRequest,
    config: &ClientConfig,
    source: &S,
    out: &mut W,
) -> Result<RunOutcome>
where
    S: ParameterSource + ?Sized,
    W: Write,
{
    let fetch = ParameterRequest::new(&request.ticker, request.years);
    let ticker = fetch.ticker();
    info!(ticker, years = request.years, "Fetching parameters");

    let params = source.fetch(&fetch)?;
    let gbm = GbmParams::new(params.spot, params.drift, params.volatility, request.steps);
    gbm.validate()
        .map_err(|e| FetchError::malformed(format!("unusable parameters: {}", e)))?;

    writeln!(
        out,
        "Params from server: ticker={} S0={:.8} mu={:.8} sigma={:.8}",
        ticker, params.spot, params.drift, params.volatility
    )?;

    match request.mode {
        ExecutionMode::Sequential => writeln!(out, "[RUN] Sequential...")?,
        ExecutionMode::Parallel { workers } => {
            writeln!(out, "[RUN] Parallel ({} threads)...", workers)?
        }
    }
    info!(
        ticker,
        n_paths = request.simulations,
        steps = request.steps,
        mode = %request.mode,
        "Starting simulation"
    );

    let summary = runner.run(&gbm);

    info!(
        ticker,
        avg_final = summary.average_final_price,
        elapsed = summary.elapsed_seconds,
        seed_base = summary.seed_base,
        "Simulation complete"
    );
    writeln!(
        out,
        "[DONE] avg_final={:.8} time={:.8}s",
        summary.average_final_price, summary.elapsed_seconds
    )?;

    let reports = RunReportWriter::new(&config.results_path, &config.trajectories_path);
    let samples =
        sample_trajectories_capped(&gbm, request.simulations, config.trajectory_samples);
    let trajectory_rows = reports.write_trajectories(ticker, &samples)?;
    reports.write_result(ticker, request.steps, &summary)?;

    writeln!(out, "[Saved] results to {}", reports.results_path().display())?;
    writeln!(
        out,
        "[Saved] sample trajectories to {}",
        reports.trajectories_path().display()
    )?;

    Ok(RunOutcome {
        ticker: ticker.to_string(),
        params,
        summary,
        trajectory_rows,
    })
}

/// Full command-line run against the real parameter server.
pub fn run_cli(cli: &Cli, config: &ClientConfig) -> Result<RunOutcome> {
    let request = cli.run_request()?;
    let runner = build_runner(&request, config)?;

    let client = ParameterClient::new(&request.server_ip, request.port)?
        .with_connect_timeout(config.connect_timeout())
        .with_read_timeout(config.read_timeout());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with(runner, &request, config, &client, &mut out)
}
