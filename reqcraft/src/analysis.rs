//! Read-only inspection of raw request and response bytes.

use std::str::FromStr;

use tracing::warn;

use crate::{
    error::frame::FrameError,
    header,
    method::Method,
    parameter::{Parameter, ParameterKind},
    uri::{
        path::{Path, Query},
        url::Url,
    },
};

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, PartialEq, Clone, Default)]
pub struct RequestInfo {
    /// Request line first, then every header line in wire order.
    pub headers: Vec<String>,
    pub body_offset: usize,
    pub method: Method,
    /// Decoded query parameters followed by form body parameters.
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct ResponseInfo {
    /// Status line first, then every header line in wire order.
    pub headers: Vec<String>,
    pub body_offset: usize,
    pub status_code: Option<u16>,
}

/// Splits a message into its head lines and the offset where the body starts.
/// The head ends at the first blank line, `\r\n\r\n` or `\n\n`. Without one
/// the whole buffer is head and the body is empty.
pub fn split_head(raw: &[u8]) -> (Vec<String>, usize) {
    let crlf = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .map(|pos| (pos, pos + 4));
    let lf = raw
        .windows(2)
        .position(|w| w == b"\n\n")
        .map(|pos| (pos, pos + 2));
    let (head_end, body_offset) = match (crlf, lf) {
        (Some(crlf), Some(lf)) => crlf.min(lf),
        (found, None) | (None, found) => found.unwrap_or((raw.len(), raw.len())),
    };

    let head = String::from_utf8_lossy(&raw[..head_end]);
    let lines = head
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .filter(|line| !line.is_empty())
        .collect();

    (lines, body_offset)
}

fn decode_parameters(query: Result<Query, FrameError>, kind: ParameterKind) -> Vec<Parameter> {
    match query {
        Ok(query) => query
            .iter()
            .map(|(name, value)| Parameter::new(name, value, kind))
            .collect(),
        Err(e) => {
            warn!(error = %e, ?kind, "skipping undecodable parameters");
            Vec::new()
        }
    }
}

/// Query of an origin-form (`/a?x=1`) or absolute-form request target.
fn target_query(target: &str) -> Result<Query, FrameError> {
    let path = match Url::from_str(target) {
        Ok(url) => url.path,
        Err(_) => Path::from_str(target)?,
    };
    path.query()
}

pub fn analyze_request(raw: &[u8]) -> RequestInfo {
    let (headers, body_offset) = split_head(raw);
    let mut tokens = headers.first().map(|l| l.split_whitespace()).into_iter().flatten();

    let method = tokens
        .next()
        .and_then(|m| Method::from_str(m).ok())
        .unwrap_or_default();

    let mut parameters = Vec::new();
    if let Some(target) = tokens.next() {
        parameters.extend(decode_parameters(target_query(target), ParameterKind::Url));
    }

    let is_form = header::find(&headers[headers.len().min(1)..], "content-type")
        .is_some_and(|ct| ct.to_ascii_lowercase().starts_with(FORM_CONTENT_TYPE));
    if is_form {
        let body = String::from_utf8_lossy(&raw[body_offset..]);
        parameters.extend(decode_parameters(Query::from_str(&body), ParameterKind::Body));
    }

    RequestInfo {
        headers,
        body_offset,
        method,
        parameters,
    }
}

pub fn analyze_response(raw: &[u8]) -> ResponseInfo {
    let (headers, body_offset) = split_head(raw);
    let status_code = headers
        .first()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|code| code.parse().ok());

    ResponseInfo {
        headers,
        body_offset,
        status_code,
    }
}
