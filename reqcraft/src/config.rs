//! Tunables shared by the builder and the tcp transport.

use std::time::Duration;

use crate::standard::Standard;

pub const MAX_HEADER_SIZE: usize = 8190;
pub const MAX_RESPONSE_SIZE: usize = 16 * 1024 * 1024;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Name of the body-kind parameter a promoted GET carries its body in.
pub const BODY_PARAMETER: &str = "body";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Protocol token written on freshly built request lines.
    pub standard: Standard,
    pub body_parameter: String,
    /// Longest header line the builder accepts and the transport reads.
    pub max_header_size: usize,
    pub max_response_size: usize,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            standard: Standard::default(),
            body_parameter: BODY_PARAMETER.to_string(),
            max_header_size: MAX_HEADER_SIZE,
            max_response_size: MAX_RESPONSE_SIZE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    pub fn with_standard(mut self, standard: Standard) -> Self {
        self.standard = standard;
        self
    }

    pub fn with_body_parameter(mut self, name: &str) -> Self {
        self.body_parameter = name.to_string();
        self
    }

    pub fn with_max_header_size(mut self, size: usize) -> Self {
        self.max_header_size = size;
        self
    }

    pub fn with_max_response_size(mut self, size: usize) -> Self {
        self.max_response_size = size;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
