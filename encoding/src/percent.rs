//! Form style percent encoding (`application/x-www-form-urlencoded`).
//!
//! Alphanumerics and `.`, `-`, `*`, `_` pass through, a space becomes `+`
//! and every other byte of the utf-8 representation becomes `%XX`.

use crate::error::EncodingError;
use std::fmt::Write as _;

fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b'*' | b'_')
}

pub fn escape(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b' ' => res.push('+'),
            b if is_unreserved(b) => res.push(b as char),
            _ => {
                res.push('%');
                let _ = write!(res, "{:02X}", b);
            }
        }
    }

    res
}

pub fn unescape(s: &str) -> Result<String, EncodingError> {
    let raw = s.as_bytes();
    let mut res: Vec<u8> = Vec::with_capacity(raw.len());
    let mut i = 0;

    while i < raw.len() {
        match raw[i] {
            b'%' => {
                if i + 2 >= raw.len() {
                    return Err(EncodingError::PercentHexInvalidStringLength { index: i });
                }

                // hex digits may be split multibyte chars in malformed input
                let digits = std::str::from_utf8(&raw[i + 1..i + 3]).map_err(|_| {
                    EncodingError::PercentInvalidInteger {
                        index: i,
                        kind: std::num::IntErrorKind::InvalidDigit,
                    }
                })?;

                match u8::from_str_radix(digits, 16) {
                    Ok(hex) => res.push(hex),
                    Err(e) => {
                        return Err(EncodingError::PercentInvalidInteger {
                            index: i,
                            kind: e.kind().clone(),
                        })
                    }
                }
                i += 3;
            }
            b'+' => {
                res.push(b' ');
                i += 1;
            }
            b => {
                res.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8(res).map_err(|e| EncodingError::PercentInvalidUtf8 {
        valid_up_to: e.utf8_error().valid_up_to(),
    })
}
