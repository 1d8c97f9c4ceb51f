//! Error types for the Monte Carlo kernel.
//!
//! The kernel itself has no runtime error states; every error here is raised
//! while building a configuration, before any path is simulated.

use std::fmt;

use super::config::{MAX_PATHS, MAX_STEPS, MAX_WORKERS};

/// Configuration error for the Monte Carlo runner.
///
/// These errors occur during construction when invalid parameters are provided.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Path count outside valid range [1, MAX_PATHS].
    InvalidPathCount(usize),
    /// Step count outside valid range [1, MAX_STEPS].
    InvalidStepCount(usize),
    /// Worker count outside valid range [1, MAX_WORKERS].
    InvalidWorkerCount(usize),
    /// Invalid parameter value with name and description.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPathCount(count) => {
                write!(
                    f,
                    "Invalid path count {}: must be in range [1, {}]",
                    count, MAX_PATHS
                )
            }
            Self::InvalidStepCount(count) => {
                write!(
                    f,
                    "Invalid step count {}: must be in range [1, {}]",
                    count, MAX_STEPS
                )
            }
            Self::InvalidWorkerCount(count) => {
                write!(
                    f,
                    "Invalid worker count {}: must be in range [1, {}]",
                    count, MAX_WORKERS
                )
            }
            Self::InvalidParameter { name, value } => {
                write!(f, "Invalid parameter '{}': {}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidPathCount(0);
        assert!(err.to_string().contains("Invalid path count 0"));

        let err = ConfigError::InvalidStepCount(0);
        assert!(err.to_string().contains("Invalid step count 0"));

        let err = ConfigError::InvalidWorkerCount(0);
        assert!(err.to_string().contains("Invalid worker count 0"));

        let err = ConfigError::InvalidParameter {
            name: "volatility",
            value: "must be non-negative".to_string(),
        };
        assert!(err.to_string().contains("volatility"));
    }
}
