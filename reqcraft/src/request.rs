//! Structured form of a raw request: request line, verbatim header lines and
//! body bytes. All mutation happens here and bytes are produced once by
//! [`RawRequest::to_bytes`].

use std::{fmt, str::FromStr};

use tracing::{trace, warn};

use crate::{
    analysis::{split_head, FORM_CONTENT_TYPE},
    header,
    method::Method,
    parameter::{Parameter, ParameterKind},
    standard::Standard,
    uri::url::Url,
};

#[derive(Debug, PartialEq, Clone)]
pub enum RequestLine {
    Parsed {
        /// Method token as written, known to [`Method`] or not.
        method: String,
        /// Everything between the method and the protocol token.
        target: String,
        /// Protocol token exactly as it was written.
        version: String,
    },
    /// A first line without a trailing `HTTP/x` token, carried verbatim.
    Opaque(String),
}

impl RequestLine {
    pub fn new(method: Method, target: &str, standard: &Standard) -> Self {
        Self::Parsed {
            method: method.to_string(),
            target: target.to_string(),
            version: standard.to_string(),
        }
    }

    /// `UNDEFINED` for opaque lines and for method tokens outside [`Method`].
    pub fn method(&self) -> Method {
        match self {
            RequestLine::Parsed { method, .. } => Method::from_str(method).unwrap_or_default(),
            RequestLine::Opaque(_) => Method::UNDEFINED,
        }
    }

    /// `POST <path> <version>` for a new target, keeping the protocol token.
    /// A line without one is returned unchanged.
    pub fn retarget_post(&self, path: &str) -> Self {
        match self {
            RequestLine::Parsed { version, .. } => RequestLine::Parsed {
                method: Method::POST.to_string(),
                target: path.to_string(),
                version: version.clone(),
            },
            RequestLine::Opaque(line) => {
                warn!(line = line.as_str(), "request line has no protocol token, leaving it as is");
                self.clone()
            }
        }
    }
}

impl From<&str> for RequestLine {
    /// The last token must be an `HTTP/x` version. The first token is the
    /// method and whatever sits in between is the target, spaces included.
    fn from(line: &str) -> Self {
        let parsed = line
            .trim_end()
            .rsplit_once(char::is_whitespace)
            .filter(|(_, version)| Standard::from_str(version).is_ok())
            .and_then(|(head, version)| {
                let head = head.trim();
                let (method, target) = head.split_once(char::is_whitespace).unwrap_or((head, ""));
                (!method.is_empty()).then(|| RequestLine::Parsed {
                    method: method.to_string(),
                    target: target.trim().to_string(),
                    version: version.to_string(),
                })
            });

        parsed.unwrap_or_else(|| RequestLine::Opaque(line.to_string()))
    }
}

impl fmt::Display for RequestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestLine::Parsed {
                method,
                target,
                version,
            } => write!(f, "{} {} {}", method, target, version),
            RequestLine::Opaque(line) => f.write_str(line),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct RawRequest {
    pub line: RequestLine,
    pub headers: Vec<String>,
    pub body: Vec<u8>,
}

impl RawRequest {
    /// `GET <target> <standard>` with a single `Host` header.
    pub fn fresh(url: &Url, standard: &Standard) -> Self {
        Self {
            line: RequestLine::new(Method::GET, &url.path.target(), standard),
            headers: vec![format!("Host: {}", url.host_header())],
            body: Vec::new(),
        }
    }

    /// Parses raw bytes, `None` when there is not even a request line.
    pub fn parse(raw: &[u8]) -> Option<Self> {
        let (lines, body_offset) = split_head(raw);
        let mut lines = lines.into_iter();
        let line = lines.next()?;

        Some(Self {
            line: RequestLine::from(line.as_str()),
            headers: lines.collect(),
            body: raw[body_offset..].to_vec(),
        })
    }

    /// Message from a header list whose first entry is the request line.
    /// `Content-Length` is brought in line with `body`.
    pub fn from_lines<S: AsRef<str>>(lines: &[S], body: Vec<u8>) -> Option<Self> {
        let (first, rest) = lines.split_first()?;
        let mut request = Self {
            line: RequestLine::from(first.as_ref()),
            headers: rest.iter().map(|h| h.as_ref().to_string()).collect(),
            body,
        };
        request.sync_content_length();
        Some(request)
    }

    /// New POST for `url` derived from `base`: the request line is retargeted,
    /// headers named by `overrides` are replaced and every other base header
    /// is kept in order.
    pub fn derive<S: AsRef<str>>(base: &RawRequest, url: &Url, overrides: &[S], body: Vec<u8>) -> Self {
        let mut request = Self {
            line: base.line.retarget_post(&url.path.raw_path),
            headers: header::merge(&base.headers, overrides),
            body,
        };
        request.sync_content_length();
        request
    }

    pub fn method(&self) -> Method {
        self.line.method()
    }

    /// Swaps GET and POST on the request line, nothing else is touched.
    pub fn toggle_method(&mut self) {
        let current = self.line.method();
        let toggled = current.toggle();
        if toggled == current {
            return;
        }
        if let RequestLine::Parsed { method, .. } = &mut self.line {
            trace!(from = %current, to = %toggled, "toggling request method");
            *method = toggled.to_string();
        }
    }

    pub fn add_parameter(&mut self, parameter: &Parameter) {
        match parameter.kind {
            ParameterKind::Url => self.add_url_parameter(parameter),
            ParameterKind::Body => self.add_body_parameter(parameter),
        }
    }

    fn add_url_parameter(&mut self, parameter: &Parameter) {
        let RequestLine::Parsed { target, .. } = &mut self.line else {
            warn!(name = parameter.name.as_str(), "no request target to add a url parameter to");
            return;
        };

        match target.find('?') {
            None => target.push('?'),
            Some(pos) if pos + 1 < target.len() && !target.ends_with('&') => target.push('&'),
            Some(_) => {}
        }
        target.push_str(&parameter.encoded());
        trace!(name = parameter.name.as_str(), "added url parameter");
    }

    fn add_body_parameter(&mut self, parameter: &Parameter) {
        if !self.body.is_empty() {
            self.body.push(b'&');
        }
        self.body.extend_from_slice(parameter.encoded().as_bytes());

        if header::find(&self.headers, "content-type").is_none() {
            self.headers
                .push(format!("Content-Type: {}", FORM_CONTENT_TYPE));
        }
        self.sync_content_length();
        trace!(name = parameter.name.as_str(), "added body parameter");
    }

    /// Sets `Content-Length` to the body size when there is a body or the
    /// header already exists.
    pub fn sync_content_length(&mut self) {
        if !self.body.is_empty() || header::find(&self.headers, "content-length").is_some() {
            header::set(&mut self.headers, "Content-Length", &self.body.len().to_string());
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut res = Vec::with_capacity(self.body.len() + 256);
        res.extend_from_slice(self.line.to_string().as_bytes());
        res.extend_from_slice(b"\r\n");
        for line in &self.headers {
            res.extend_from_slice(line.as_bytes());
            res.extend_from_slice(b"\r\n");
        }
        res.extend_from_slice(b"\r\n");
        res.extend_from_slice(&self.body);
        res
    }
}
