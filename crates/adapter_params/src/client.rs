//! Blocking TCP client for the parameter server.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, TcpStream};
use std::time::Duration;

use tracing::debug;

use crate::error::FetchError;
use crate::protocol::{parse_reply, MarketParameters, ParameterRequest};

/// Default TCP connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default timeout for the server reply. Estimation on the server side
/// downloads price history, so this is generous.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on the reply size read from the socket.
const MAX_REPLY_BYTES: u64 = 4096;

/// Anything that can answer a [`ParameterRequest`].
pub trait ParameterSource {
    /// Fetches the GBM parameters for `request`.
    fn fetch(&self, request: &ParameterRequest) -> Result<MarketParameters, FetchError>;
}

/// One-shot client: a fresh connection per request, closed after the reply.
///
/// # Examples
///
/// ```rust,no_run
/// use adapter_params::{ParameterClient, ParameterRequest, ParameterSource};
///
/// let client = ParameterClient::new("127.0.0.1", 9000)?;
/// let params = client.fetch(&ParameterRequest::new("aapl", 5))?;
/// println!("S0={} mu={} sigma={}", params.spot, params.drift, params.volatility);
/// # Ok::<(), adapter_params::FetchError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ParameterClient {
    addr: SocketAddr,
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl ParameterClient {
    /// Creates a client for a dotted-quad IPv4 host.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidAddress` if `host` is not an IPv4 address.
    pub fn new(host: &str, port: u16) -> Result<Self, FetchError> {
        let ip: Ipv4Addr = host
            .parse()
            .map_err(|_| FetchError::InvalidAddress(host.to_string()))?;
        Ok(Self::from_addr(SocketAddr::V4(SocketAddrV4::new(ip, port))))
    }

    /// Creates a client for an already resolved address.
    pub fn from_addr(addr: SocketAddr) -> Self {
        Self {
            addr,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }

    /// Sets the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the reply timeout.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Server address.
    #[inline]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn connect(&self) -> Result<TcpStream, FetchError> {
        let stream = TcpStream::connect_timeout(&self.addr, self.connect_timeout).map_err(
            |source| FetchError::Connect {
                addr: self.addr,
                source,
            },
        )?;
        stream
            .set_read_timeout(Some(self.read_timeout))
            .map_err(FetchError::Socket)?;
        stream.set_nodelay(true).map_err(FetchError::Socket)?;
        Ok(stream)
    }

    fn read_reply(stream: &TcpStream) -> Result<String, FetchError> {
        let mut reader = BufReader::new(stream.take(MAX_REPLY_BYTES));
        let mut raw = Vec::new();
        let n = reader
            .read_until(b'\n', &mut raw)
            .map_err(FetchError::Receive)?;
        if n == 0 {
            return Err(FetchError::NoResponse);
        }
        String::from_utf8(raw).map_err(|e| {
            let text = String::from_utf8_lossy(e.as_bytes());
            FetchError::malformed(text.trim_end())
        })
    }
}

impl ParameterSource for ParameterClient {
    fn fetch(&self, request: &ParameterRequest) -> Result<MarketParameters, FetchError> {
        let mut stream = self.connect()?;

        debug!(addr = %self.addr, request = %request, "sending parameter request");
        stream
            .write_all(request.encode().as_bytes())
            .map_err(FetchError::Socket)?;
        stream.flush().map_err(FetchError::Socket)?;

        let reply = Self::read_reply(&stream)?;
        debug!(addr = %self.addr, reply = reply.trim_end(), "received parameter reply");

        parse_reply(&reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_ipv4_host() {
        for host in ["localhost", "999.0.0.1", "::1", ""] {
            match ParameterClient::new(host, 9000) {
                Err(FetchError::InvalidAddress(h)) => assert_eq!(h, host),
                other => panic!("expected invalid address for {:?}, got {:?}", host, other),
            }
        }
    }

    #[test]
    fn test_builder_sets_timeouts() {
        let client = ParameterClient::new("10.0.0.1", 9000)
            .unwrap()
            .with_connect_timeout(Duration::from_millis(250))
            .with_read_timeout(Duration::from_millis(500));

        assert_eq!(client.addr(), "10.0.0.1:9000".parse().unwrap());
        assert_eq!(client.connect_timeout, Duration::from_millis(250));
        assert_eq!(client.read_timeout, Duration::from_millis(500));
    }
}
