use std::{fmt, str::FromStr};

use crate::{error::frame::FrameError, transport::Service};

use super::{
    authority::{Authority, HTTPS_PORT, HTTP_PORT},
    path::Path,
};

/// Absolute `http` or `https` url.
#[derive(Debug, PartialEq, Clone)]
pub struct Url {
    pub scheme: String,
    pub authority: Authority,
    pub path: Path,
}

impl Url {
    pub fn is_secure(&self) -> bool {
        self.scheme == "https"
    }

    pub fn default_port(&self) -> u16 {
        if self.is_secure() {
            HTTPS_PORT
        } else {
            HTTP_PORT
        }
    }

    pub fn host_header(&self) -> String {
        self.authority.host_header(self.default_port())
    }

    /// Where a request for this url has to be sent.
    pub fn service(&self) -> Service {
        Service {
            host: self.authority.connect_host(),
            port: self.authority.port(),
            secure: self.is_secure(),
        }
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}://{}{}",
            self.scheme,
            self.host_header(),
            self.path
        )
    }
}

impl FromStr for Url {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (scheme, rest) = s.trim().split_once("://").ok_or(FrameError::Invalid {
            subject: "url",
            reason: "expected an absolute url <scheme>://<authority>[path]",
        })?;

        let scheme = scheme.to_ascii_lowercase();
        let default_port = match scheme.as_str() {
            "http" => HTTP_PORT,
            "https" => HTTPS_PORT,
            _ => {
                return Err(FrameError::NotImplemented {
                    subject: format!("scheme {}", scheme),
                })
            }
        };

        let split = rest.find(['/', '?', '#']).unwrap_or(rest.len());
        let (authority, path) = rest.split_at(split);

        Ok(Url {
            scheme,
            authority: Authority::parse(authority, default_port)?,
            path: Path::from_str(path)?,
        })
    }
}
