//! # Parameter Adapter (Layer A: Input)
//!
//! Fetches geometric Brownian motion parameters (drift, volatility, spot)
//! for one ticker from the parameter server over a one-line TCP protocol.
//!
//! The crate is synchronous: one connection per request, closed once the
//! reply line has been read. Failures are reported as [`FetchError`], whose
//! variants distinguish connection problems, missing replies, explicit
//! server rejections and malformed replies.

#![deny(missing_docs)]

pub mod client;
pub mod error;
pub mod protocol;

pub use client::{ParameterClient, ParameterSource, DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT};
pub use error::FetchError;
pub use protocol::{parse_reply, MarketParameters, ParameterRequest};
