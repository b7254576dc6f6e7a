use std::{fmt, str::FromStr};

use crate::{error::frame::FrameError, version::Version};

/// Protocol token of a request line, e.g. `HTTP/1.1`.
#[derive(Debug, PartialEq, Clone)]
pub struct Standard {
    pub name: String,
    pub version: Version,
}

impl Default for Standard {
    fn default() -> Self {
        Self {
            name: "HTTP".to_string(),
            version: Version {
                major: 1,
                minor: Some(1),
                patch: None,
            },
        }
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, String::from(self.version.clone()))
    }
}

impl FromStr for Standard {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some(("HTTP", version)) => Ok(Standard {
                name: "HTTP".to_string(),
                version: Version::from_str(version)?,
            }),
            Some(_) => Err(FrameError::NotImplemented {
                subject: format!("protocol of {}", s),
            }),
            None => Err(FrameError::Invalid {
                subject: "standard",
                reason: "format should be <name>/<version>",
            }),
        }
    }
}
