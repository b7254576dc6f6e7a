use std::{error::Error, num::IntErrorKind};

#[derive(Debug, PartialEq)]
pub enum EncodingError {
    PercentHexInvalidStringLength { index: usize },
    PercentInvalidInteger { index: usize, kind: IntErrorKind },
    PercentInvalidUtf8 { valid_up_to: usize },
}

impl std::fmt::Display for EncodingError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::PercentHexInvalidStringLength { index } => {
                write!(f, "truncated percent escape at index {}", index)
            }
            Self::PercentInvalidInteger { index, kind } => {
                write!(f, "invalid percent escape at index {}: {:?}", index, kind)
            }
            Self::PercentInvalidUtf8 { valid_up_to } => {
                write!(f, "decoded bytes are not utf-8 after byte {}", valid_up_to)
            }
        }
    }
}

impl Error for EncodingError {}
