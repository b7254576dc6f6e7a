use std::{error::Error, net::AddrParseError, num::ParseIntError};

use encoding::error::EncodingError;

#[derive(Debug, PartialEq)]
pub enum FrameError {
    Invalid {
        reason: &'static str,
        subject: &'static str,
    },
    NotImplemented {
        subject: String,
    },
    RequiredParam {
        subject: &'static str,
    },
    ConversionError(String),
    EncodingError(EncodingError),
}

impl std::fmt::Display for FrameError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Invalid { reason, subject } => write!(f, "invalid {}: {}", subject, reason),
            Self::NotImplemented { subject } => write!(f, "not implemented: {}", subject),
            Self::RequiredParam { subject } => write!(f, "missing {}", subject),
            Self::ConversionError(reason) => write!(f, "conversion failed: {}", reason),
            Self::EncodingError(e) => write!(f, "{}", e),
        }
    }
}

impl Error for FrameError {}

impl From<ParseIntError> for FrameError {
    fn from(src: ParseIntError) -> Self {
        Self::ConversionError(src.to_string())
    }
}

impl From<EncodingError> for FrameError {
    fn from(src: EncodingError) -> Self {
        Self::EncodingError(src)
    }
}

impl From<AddrParseError> for FrameError {
    fn from(src: AddrParseError) -> Self {
        Self::ConversionError(src.to_string())
    }
}
