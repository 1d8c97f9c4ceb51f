//! Error types for parameter fetching.

use std::net::SocketAddr;

use thiserror::Error;

/// Failure to obtain market parameters from the server.
///
/// Every variant is fatal for the run; nothing is retried.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The connection could not be configured or the request not sent.
    #[error("socket error: {0}")]
    Socket(#[source] std::io::Error),

    /// The server address is not a valid IPv4 address.
    #[error("invalid server address: {0}")]
    InvalidAddress(String),

    /// The TCP connection could not be established.
    #[error("cannot connect to {addr}: {source}")]
    Connect {
        /// Server address.
        addr: SocketAddr,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The server closed the connection without sending a single byte.
    #[error("no response from server")]
    NoResponse,

    /// Reading the reply failed, typically on timeout.
    #[error("failed to read server reply: {0}")]
    Receive(#[source] std::io::Error),

    /// The server answered with an `ERROR` line.
    #[error("server error: {0}")]
    Rejected(String),

    /// The reply was neither a rejection nor three numbers.
    #[error("bad server reply: {0:?}")]
    Malformed(String),
}

impl FetchError {
    /// Create a malformed-reply error
    pub fn malformed(reply: impl Into<String>) -> Self {
        Self::Malformed(reply.into())
    }

    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Socket(_) => 2,
            Self::InvalidAddress(_) => 3,
            Self::Connect { .. } => 4,
            Self::NoResponse | Self::Receive(_) => 5,
            Self::Rejected(_) => 6,
            Self::Malformed(_) => 7,
        }
    }
}
