//! The seam between request crafting and the network.

use std::fmt;

use tokio::{
    io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader},
    net::TcpStream,
    runtime::{Builder, Runtime},
    time::timeout,
};
use tracing::{debug, warn};

use crate::{config::Config, error::transport::TransportError, header};

/// Target a raw request is sent to.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Service {
    pub host: String,
    pub port: u16,
    pub secure: bool,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scheme = if self.secure { "https" } else { "http" };
        if self.host.contains(':') {
            write!(f, "{}://[{}]:{}", scheme, self.host, self.port)
        } else {
            write!(f, "{}://{}:{}", scheme, self.host, self.port)
        }
    }
}

/// Sends a complete raw request and returns the complete raw response.
pub trait Transport {
    fn send_raw(&self, service: &Service, request: &[u8]) -> Result<Vec<u8>, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send_raw(&self, service: &Service, request: &[u8]) -> Result<Vec<u8>, TransportError> {
        (**self).send_raw(service, request)
    }
}

/// Blocking plain-text transport driven by its own single threaded runtime.
///
/// Must not be called from within another tokio runtime.
pub struct TcpTransport {
    runtime: Runtime,
    config: Config,
}

impl TcpTransport {
    pub fn new() -> Result<Self, TransportError> {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Result<Self, TransportError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { runtime, config })
    }

    async fn exchange(&self, service: &Service, request: &[u8]) -> Result<Vec<u8>, TransportError> {
        let mut stream = TcpStream::connect((service.host.as_str(), service.port)).await?;
        stream.write_all(request).await?;
        stream.flush().await?;
        read_response(&mut stream, &self.config).await
    }
}

impl Transport for TcpTransport {
    fn send_raw(&self, service: &Service, request: &[u8]) -> Result<Vec<u8>, TransportError> {
        if service.secure {
            return Err(TransportError::TlsUnsupported {
                host: service.host.clone(),
            });
        }

        debug!(%service, size = request.len(), "sending raw request");
        let after = self.config.timeout;
        let res = self
            .runtime
            .block_on(async { timeout(after, self.exchange(service, request)).await })
            .map_err(|_| TransportError::Timeout { after })?;

        if let Err(e) = &res {
            warn!(%service, error = %e, "raw request failed");
        }
        res
    }
}

/// Reads a status line, headers and a body delimited by `Content-Length`,
/// or by the end of the stream when the header is missing.
///
/// Header lines are kept as raw bytes; only their text view, used to find
/// `Content-Length`, is decoded lossily.
async fn read_response(stream: &mut TcpStream, config: &Config) -> Result<Vec<u8>, TransportError> {
    let mut buffer = BufReader::new(stream);
    let mut raw: Vec<u8> = Vec::new();
    let mut headers: Vec<String> = Vec::new();
    let mut line: Vec<u8> = Vec::new();
    let line_limit = config.max_header_size as u64 + 1;

    loop {
        line.clear();
        let n = (&mut buffer).take(line_limit).read_until(b'\n', &mut line).await?;
        if n == 0 {
            if headers.is_empty() {
                return Err(TransportError::MalformedResponse {
                    reason: "connection closed before a status line",
                });
            }
            return Ok(raw);
        }
        if n > config.max_header_size {
            return Err(TransportError::ContentTooLarge {
                subject: "response header line",
                limit: config.max_header_size,
            });
        }

        raw.extend_from_slice(&line);
        let text = String::from_utf8_lossy(&line);
        let trimmed = text.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            if headers.is_empty() {
                return Err(TransportError::MalformedResponse {
                    reason: "empty status line",
                });
            }
            break;
        }
        headers.push(trimmed.to_string());
    }

    let limit = config.max_response_size;
    let too_large = || TransportError::ContentTooLarge {
        subject: "response",
        limit,
    };
    match header::find(&headers[1..], "content-length") {
        Some(length) => {
            let length: usize = length.parse().map_err(|_| TransportError::MalformedResponse {
                reason: "content-length is not a number",
            })?;
            if raw.len().checked_add(length).map_or(true, |total| total > limit) {
                return Err(too_large());
            }
            let mut body = vec![0u8; length];
            buffer.read_exact(&mut body).await?;
            raw.extend_from_slice(&body);
        }
        None => {
            let mut body = Vec::new();
            (&mut buffer)
                .take((limit as u64).saturating_add(1))
                .read_to_end(&mut body)
                .await?;
            if raw.len().saturating_add(body.len()) > limit {
                return Err(too_large());
            }
            raw.extend_from_slice(&body);
        }
    }

    Ok(raw)
}
