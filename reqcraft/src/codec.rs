//! Byte level helpers for callers holding raw request buffers. Each one goes
//! through [`RawRequest`] and hands back the input untouched when it does not
//! parse.

use std::str::FromStr;

use encoding::{error::EncodingError, percent};

use crate::{
    parameter::Parameter,
    request::RawRequest,
    standard::Standard,
    uri::url::Url,
};

pub fn url_encode(s: &str) -> String {
    percent::escape(s)
}

pub fn url_decode(s: &str) -> Result<String, EncodingError> {
    percent::unescape(s)
}

/// Fresh `GET` request for `url`, `None` when the url does not parse.
pub fn build_request(url: &str) -> Option<Vec<u8>> {
    let url = Url::from_str(url).ok()?;
    Some(RawRequest::fresh(&url, &Standard::default()).to_bytes())
}

/// Message from header lines (request line first) and a body.
pub fn build_message<S: AsRef<str>>(headers: &[S], body: &[u8]) -> Vec<u8> {
    RawRequest::from_lines(headers, body.to_vec())
        .map(|request| request.to_bytes())
        .unwrap_or_else(|| body.to_vec())
}

pub fn add_parameter(raw: &[u8], parameter: &Parameter) -> Vec<u8> {
    match RawRequest::parse(raw) {
        Some(mut request) => {
            request.add_parameter(parameter);
            request.to_bytes()
        }
        None => raw.to_vec(),
    }
}

pub fn toggle_request_method(raw: &[u8]) -> Vec<u8> {
    match RawRequest::parse(raw) {
        Some(mut request) => {
            request.toggle_method();
            request.to_bytes()
        }
        None => raw.to_vec(),
    }
}
