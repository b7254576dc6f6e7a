use std::{
    fmt,
    net::{Ipv4Addr, Ipv6Addr},
    str::FromStr,
};

use crate::error::frame::FrameError;

pub const HTTP_PORT: u16 = 80;
pub const HTTPS_PORT: u16 = 443;

#[derive(Debug, PartialEq, Clone)]
pub enum Authority {
    Domain { host: String, port: u16 },
    IPv4 { ip: Ipv4Addr, port: u16 },
    IPv6 { ip: Ipv6Addr, port: u16 },
}

impl Authority {
    /// Parses `host[:port]`, falling back to `default_port` when no port is given.
    pub fn parse(input: &str, default_port: u16) -> Result<Self, FrameError> {
        let mut s = input;
        let mut port = default_port;

        //  IPv6address = [ ipv6 ](:port)?
        //  IPv4address = [ dec ].[ dec ].[ dec ].[ dec ](:port)?
        //  Host        = [ host ](:port)?
        if let Some((left, right)) = s.rsplit_once(':') {
            if !right.contains(']') {
                s = left;
                port = str::parse(right)?;
            }
        }

        if s.is_empty() {
            return Err(FrameError::RequiredParam { subject: "host" });
        }

        // '[' => false, ']' => false, '[]' => true, '' => true
        if s.starts_with('[') ^ s.ends_with(']') {
            return Err(FrameError::Invalid {
                subject: "authority",
                reason: "ipv6 host is missing either closing or opening brackets",
            });
        }

        if s.starts_with('[') && s.ends_with(']') {
            return Ok(Self::IPv6 {
                ip: Ipv6Addr::from_str(&s[1..s.len() - 1])?,
                port,
            });
        }

        if s.split('.').count() == 4 {
            if let Ok(ip) = Ipv4Addr::from_str(s) {
                return Ok(Self::IPv4 { ip, port });
            }
        }

        Ok(Self::Domain {
            host: s.to_string(),
            port,
        })
    }

    /// Host as it appears in a url, ipv6 addresses keep their brackets.
    pub fn host(&self) -> String {
        match self {
            Authority::Domain { host, .. } => host.clone(),
            Authority::IPv4 { ip, .. } => ip.to_string(),
            Authority::IPv6 { ip, .. } => format!("[{}]", ip),
        }
    }

    /// Host suitable for a socket connect, ipv6 addresses without brackets.
    pub fn connect_host(&self) -> String {
        match self {
            Authority::IPv6 { ip, .. } => ip.to_string(),
            other => other.host(),
        }
    }

    pub fn port(&self) -> u16 {
        match self {
            Authority::Domain { port, .. }
            | Authority::IPv4 { port, .. }
            | Authority::IPv6 { port, .. } => *port,
        }
    }

    /// Value of a `Host` header, the port is left out when it is the default one.
    pub fn host_header(&self, default_port: u16) -> String {
        if self.port() == default_port {
            self.host()
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host(), self.port())
    }
}

impl FromStr for Authority {
    type Err = FrameError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input, HTTP_PORT)
    }
}
