//! Client configuration.
//!
//! Loaded from an optional TOML file, then overridden from `MC_*`
//! environment variables, then validated as a whole.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use mc_kernel::mc::{ExecutionMode, Schedule, MAX_TRAJECTORY_SAMPLES};
use mc_kernel::rng::{SeedStrategy, DEFAULT_SEQUENTIAL_SEED};
use serde::Deserialize;

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "mc-client.toml";

/// Upper bound for `trajectory_samples`.
const MAX_CONFIGURED_SAMPLES: usize = 10_000;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Client configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Run results CSV
    pub results_path: PathBuf,

    /// Sample trajectories CSV
    pub trajectories_path: PathBuf,

    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,

    /// TCP connect timeout in milliseconds
    pub connect_timeout_ms: u64,

    /// Server reply timeout in milliseconds
    pub read_timeout_ms: u64,

    /// Seed of the single stream in sequential mode
    pub sequential_seed: u64,

    /// Base seed for parallel workers; wall clock when unset
    pub parallel_seed: Option<u64>,

    /// Paths per block claimed by parallel workers
    pub block_size: usize,

    /// Number of trajectories sampled per run (capped by the path count)
    pub trajectory_samples: usize,

    /// Environment overrides that failed to parse
    #[serde(skip)]
    env_errors: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            results_path: PathBuf::from(service_report::DEFAULT_RESULTS_PATH),
            trajectories_path: PathBuf::from(service_report::DEFAULT_TRAJECTORIES_PATH),
            log_level: "info".to_string(),
            connect_timeout_ms: 5_000,
            read_timeout_ms: 30_000,
            sequential_seed: DEFAULT_SEQUENTIAL_SEED,
            parallel_seed: None,
            block_size: mc_kernel::mc::DEFAULT_BLOCK_SIZE,
            trajectory_samples: MAX_TRAJECTORY_SAMPLES,
            env_errors: Vec::new(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load `path`, falling back to defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply `MC_*` environment variable overrides
    pub fn with_env_override(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("MC_RESULTS_PATH") {
            self.results_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("MC_TRAJECTORIES_PATH") {
            self.trajectories_path = PathBuf::from(path);
        }
        if let Some(level) = lookup("MC_LOG_LEVEL") {
            self.log_level = level;
        }

        let mut errors = Vec::new();
        let errs = &mut errors;
        override_parsed(&lookup, "MC_CONNECT_TIMEOUT_MS", &mut self.connect_timeout_ms, errs);
        override_parsed(&lookup, "MC_READ_TIMEOUT_MS", &mut self.read_timeout_ms, errs);
        override_parsed(&lookup, "MC_SEQUENTIAL_SEED", &mut self.sequential_seed, errs);
        override_parsed(&lookup, "MC_BLOCK_SIZE", &mut self.block_size, errs);

        if let Some(raw) = lookup("MC_PARALLEL_SEED") {
            match raw.trim().parse() {
                Ok(seed) => self.parallel_seed = Some(seed),
                Err(_) => errors.push(format!("MC_PARALLEL_SEED '{}' is not a valid u64", raw)),
            }
        }

        self.env_errors.extend(errors);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = self.env_errors.clone();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if self.results_path.as_os_str().is_empty() {
            errors.push("results_path cannot be empty".to_string());
        }
        if self.trajectories_path.as_os_str().is_empty() {
            errors.push("trajectories_path cannot be empty".to_string());
        }

        if self.connect_timeout_ms == 0 {
            errors.push("connect_timeout_ms must be greater than 0".to_string());
        }
        if self.read_timeout_ms == 0 {
            errors.push("read_timeout_ms must be greater than 0".to_string());
        }

        if self.block_size == 0 {
            errors.push("block_size must be greater than 0".to_string());
        }

        if self.trajectory_samples > MAX_CONFIGURED_SAMPLES {
            errors.push(format!(
                "trajectory_samples {} exceeds maximum allowed ({})",
                self.trajectory_samples, MAX_CONFIGURED_SAMPLES
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file (or defaults) with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }

    /// Seeding for a run in `mode`.
    pub fn seed_strategy(&self, mode: ExecutionMode) -> SeedStrategy {
        match (mode, self.parallel_seed) {
            (ExecutionMode::Sequential, _) => SeedStrategy::Fixed(self.sequential_seed),
            (ExecutionMode::Parallel { .. }, Some(seed)) => SeedStrategy::Fixed(seed),
            (ExecutionMode::Parallel { .. }, None) => SeedStrategy::TimeAndWorkerOffset,
        }
    }

    /// Parallel block schedule.
    pub fn schedule(&self) -> Schedule {
        Schedule::Dynamic {
            block_size: self.block_size,
        }
    }

    /// TCP connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Server reply timeout.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

fn override_parsed<T, F>(lookup: &F, key: &str, target: &mut T, errors: &mut Vec<String>)
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(key) {
        match raw.trim().parse() {
            Ok(value) => *target = value,
            Err(_) => errors.push(format!("{} '{}' is not a valid number", key, raw)),
        }
    }
}

/// Configuration error type
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// IO error reading config file
    Io(String),
    /// Parse error in config file
    Parse(String),
    /// Validation error
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {}", msg),
            Self::Parse(msg) => write!(f, "Parse error: {}", msg),
            Self::Validation(errors) => write!(f, "Validation errors: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {}
