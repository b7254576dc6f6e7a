use crate::error::frame::FrameError;
use std::str::FromStr;

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Version {
    pub major: usize,
    pub minor: Option<usize>,
    pub patch: Option<usize>,
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        let mut res = version.major.to_string();

        if let Some(minor) = version.minor {
            res.push('.');
            res.push_str(&minor.to_string());
        }

        if let Some(patch) = version.patch {
            res.push('.');
            res.push_str(&patch.to_string());
        }
        res
    }
}

impl FromStr for Version {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() > 3 {
            return Err(FrameError::Invalid {
                subject: "version",
                reason: "expected at most <major>.<minor>.<patch>",
            });
        }

        let mut numbers = parts.iter().map(|n| str::parse::<usize>(n));
        Ok(Version {
            major: numbers.next().transpose()?.unwrap_or_default(),
            minor: numbers.next().transpose()?,
            patch: numbers.next().transpose()?,
        })
    }
}
