//! Line protocol spoken with the parameter server.
//!
//! ```text
//! client -> server   GET <TICKER> <years>\n
//! server -> client   <mu> <sigma> <S0>\n      on success
//! server -> client   ERROR <message>\n        on failure
//! ```
//!
//! `mu` and `sigma` are the mean and standard deviation of the ticker's
//! daily log returns over the lookback window, `S0` its last close.

use std::fmt;

use crate::error::FetchError;

/// Prefix of a rejection reply.
pub const ERROR_PREFIX: &str = "ERROR";

/// Request for one ticker's parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterRequest {
    ticker: String,
    years: u32,
}

impl ParameterRequest {
    /// Creates a request. The ticker is trimmed and upper-cased.
    pub fn new(ticker: &str, years: u32) -> Self {
        Self {
            ticker: ticker.trim().to_ascii_uppercase(),
            years,
        }
    }

    /// Normalised ticker symbol.
    #[inline]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Lookback window in years.
    #[inline]
    pub fn years(&self) -> u32 {
        self.years
    }

    /// Wire form of the request, newline terminated.
    pub fn encode(&self) -> String {
        format!("GET {} {}\n", self.ticker, self.years)
    }
}

impl fmt::Display for ParameterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GET {} {}", self.ticker, self.years)
    }
}

/// GBM parameters as estimated by the server.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarketParameters {
    /// Drift (`mu`).
    pub drift: f64,
    /// Volatility (`sigma`).
    pub volatility: f64,
    /// Current spot price (`S0`).
    pub spot: f64,
}

/// Decodes one server reply.
///
/// Only the first line is considered. A line starting with `ERROR` is a
/// rejection; otherwise it must hold exactly three finite numbers in the
/// order `mu sigma S0`.
///
/// # Examples
///
/// ```rust
/// use adapter_params::{parse_reply, FetchError};
///
/// let params = parse_reply("0.0004 0.018 187.5\n").unwrap();
/// assert_eq!(params.spot, 187.5);
///
/// assert!(matches!(parse_reply("ERROR No data\n"), Err(FetchError::Rejected(_))));
/// assert!(matches!(parse_reply("0.1 0.2\n"), Err(FetchError::Malformed(_))));
/// ```
pub fn parse_reply(reply: &str) -> Result<MarketParameters, FetchError> {
    let line = reply.lines().next().unwrap_or("");

    if let Some(message) = line.strip_prefix(ERROR_PREFIX) {
        return Err(FetchError::Rejected(message.trim().to_string()));
    }
    if line.trim().is_empty() {
        return Err(FetchError::malformed(line));
    }

    let values = line
        .split_whitespace()
        .map(|token| token.parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(|| FetchError::malformed(line))?;

    match values[..] {
        [drift, volatility, spot] => Ok(MarketParameters {
            drift,
            volatility,
            spot,
        }),
        _ => Err(FetchError::malformed(line)),
    }
}
