//! Incremental description of a request and its serialization.
//!
//! Headers, parameters and a body can be supplied in any order as they are
//! discovered; [`RequestBuilder::materialize`] turns the current state into
//! wire bytes and can be called any number of times.
//!
//! Two shapes come out of it:
//!
//! - a fresh request built from the target url alone, used when no header
//!   was supplied or the method is `GET`. A non-empty body is then sent as a
//!   single form encoded body parameter and the request becomes a `POST`.
//! - a request derived from the [`BaseMessage`]: its request line becomes
//!   `POST <path>` for the new target, headers named by the supplied ones
//!   are replaced and all others (cookies, authorization, ...) are kept.
//!
//! Parameters are appended last, in insertion order, in both shapes.

use std::str::FromStr;

use tracing::{debug, warn};

use crate::{
    config::Config,
    header,
    message::BaseMessage,
    method::Method,
    parameter::{Parameter, ParameterKind, ParameterList},
    request::RawRequest,
    uri::url::Url,
};

#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    config: Config,
    base: Option<BaseMessage>,
    target: Option<String>,
    method: Method,
    headers: Vec<String>,
    parameters: ParameterList,
    body: Option<String>,
}

impl RequestBuilder {
    pub fn new(url: &str) -> Self {
        Self {
            target: Some(url.to_string()),
            ..Default::default()
        }
    }

    /// Builder whose header-carrying requests derive from `base`.
    pub fn from_base(base: BaseMessage, url: &str) -> Self {
        Self {
            base: Some(base),
            target: Some(url.to_string()),
            ..Default::default()
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn set_target(&mut self, url: &str) -> &mut Self {
        self.target = Some(url.to_string());
        self
    }

    pub fn set_method(&mut self, method: Method) -> &mut Self {
        self.method = method;
        self
    }

    pub fn set_body(&mut self, body: &str) -> &mut Self {
        self.body = Some(body.to_string());
        self
    }

    /// Appends a raw `Name: value` line. Multi-line or oversized lines are ignored.
    pub fn add_header(&mut self, line: &str) -> &mut Self {
        if header::is_valid(line, self.config.max_header_size) {
            self.headers.push(line.to_string());
        } else {
            warn!(size = line.len(), "ignoring header that is empty, multi-line or too large");
        }
        self
    }

    pub fn set_headers<S: AsRef<str>>(&mut self, lines: &[S]) -> &mut Self {
        self.headers.clear();
        for line in lines {
            self.add_header(line.as_ref());
        }
        self
    }

    /// Adds a query string parameter.
    pub fn add_parameter(&mut self, name: &str, value: &str) -> &mut Self {
        self.add_parameter_of_kind(name, value, ParameterKind::Url)
    }

    pub fn add_parameter_of_kind(&mut self, name: &str, value: &str, kind: ParameterKind) -> &mut Self {
        if name.is_empty() {
            warn!(?kind, "ignoring parameter without a name");
            return self;
        }
        self.parameters.insert(Parameter::new(name, value, kind));
        self
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn parameters(&self) -> &ParameterList {
        &self.parameters
    }

    pub fn base(&self) -> Option<&BaseMessage> {
        self.base.as_ref()
    }

    pub fn target_url(&self) -> Option<Url> {
        let target = self.target.as_deref()?;
        match Url::from_str(target) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(url = target, error = %e, "target is not a usable url");
                None
            }
        }
    }

    /// Structured request for the current state, `None` when no usable
    /// request can be made.
    pub fn build(&self) -> Option<RawRequest> {
        let url = self.target_url()?;

        let mut request = if self.headers.is_empty() || self.method == Method::GET {
            self.fresh(&url)
        } else {
            self.derived(&url)?
        };

        for parameter in &self.parameters {
            request.add_parameter(parameter);
        }
        Some(request)
    }

    pub fn materialize(&self) -> Option<Vec<u8>> {
        self.build().map(|request| request.to_bytes())
    }

    fn fresh(&self, url: &Url) -> RawRequest {
        debug!(%url, "building fresh request");
        let mut request = RawRequest::fresh(url, &self.config.standard);

        if let Some(body) = self.body.as_deref().filter(|b| !b.is_empty()) {
            debug!(size = body.len(), "body present, promoting to POST");
            request.add_parameter(&Parameter::body(&self.config.body_parameter, body));
            request.toggle_method();
        }
        request
    }

    fn derived(&self, url: &Url) -> Option<RawRequest> {
        let Some(base) = self.base.as_ref() else {
            warn!(%url, "headers supplied but there is no base message to derive from");
            return None;
        };
        let Some(original) = base.parsed_request() else {
            warn!(service = %base.service, "base message has no request to derive from");
            return None;
        };

        debug!(%url, overrides = self.headers.len(), "deriving request from base message");
        let body = match &self.body {
            Some(body) => body.as_bytes().to_vec(),
            None => original.body.clone(),
        };
        Some(RawRequest::derive(&original, url, &self.headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{codec::url_decode, standard::Standard, transport::Service};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn text(raw: Vec<u8>) -> String {
        String::from_utf8(raw).unwrap()
    }

    fn base(request: &str) -> BaseMessage {
        BaseMessage::new(
            Service {
                host: "example.com".to_string(),
                port: 80,
                secure: false,
            },
            request.as_bytes(),
        )
    }

    #[test]
    fn test_fresh_get() {
        let builder = RequestBuilder::new("http://example.com/a");
        assert_eq!(
            text(builder.materialize().unwrap()),
            "GET /a HTTP/1.1\r\nHost: example.com\r\n\r\n"
        );
    }

    #[test]
    fn test_body_promotes_to_post() {
        let mut builder = RequestBuilder::new("http://example.com/a");
        builder.set_body("x=1");
        let raw = text(builder.materialize().unwrap());

        assert!(raw.starts_with("POST /a HTTP/1.1\r\n"));
        let (_, body) = raw.split_once("\r\n\r\n").unwrap();
        assert_eq!(body, "body=x%3D1");
        assert_eq!(url_decode(body.strip_prefix("body=").unwrap()).unwrap(), "x=1");
    }

    #[rstest]
    #[case("x=1")]
    #[case("{\"a\": [1, 2]}")]
    #[case("line one\r\nline two & more = %")]
    fn test_promoted_body_decodes_to_original(#[case] body: &str) {
        let mut builder = RequestBuilder::new("http://example.com/a");
        builder.set_method(Method::GET).set_body(body);
        let request = builder.build().unwrap();

        assert_eq!(request.method(), Method::POST);
        let raw = text(request.body);
        let encoded = raw.strip_prefix("body=").unwrap();
        assert_eq!(url_decode(encoded).unwrap(), body);
    }

    #[test]
    fn test_empty_body_stays_get() {
        let mut builder = RequestBuilder::new("http://example.com/a");
        builder.set_body("");
        assert_eq!(builder.build().unwrap().method(), Method::GET);
    }

    #[test]
    fn test_derived_request_overrides_headers() {
        let mut builder = RequestBuilder::from_base(
            base("GET /old HTTP/1.1\r\nCookie: a=b\r\nHost: example.com\r\n\r\n"),
            "http://new.example.com/a",
        );
        builder.add_header("Host: new.example.com");
        let request = builder.build().unwrap();

        assert_eq!(request.line.to_string(), "POST /a HTTP/1.1");
        assert_eq!(request.headers, vec!["Cookie: a=b", "Host: new.example.com"]);
        assert!(request.body.is_empty());
    }

    #[test]
    fn test_derived_request_keeps_unrelated_headers_in_order() {
        let mut builder = RequestBuilder::from_base(
            base("GET /old HTTP/1.1\r\nHost: example.com\r\nCookie: s=1\r\nAuthorization: Bearer t\r\nAccept: */*\r\nUser-Agent: old\r\n\r\n"),
            "http://example.com/api",
        );
        builder
            .set_method(Method::POST)
            .add_header("user-agent: new")
            .add_header("Accept: application/json")
            .set_body("{}");
        let raw = text(builder.materialize().unwrap());

        assert_eq!(
            raw,
            "POST /api HTTP/1.1\r\nHost: example.com\r\nCookie: s=1\r\nAuthorization: Bearer t\r\nuser-agent: new\r\nAccept: application/json\r\nContent-Length: 2\r\n\r\n{}"
        );
        assert_eq!(raw.to_ascii_lowercase().matches("user-agent:").count(), 1);
        assert_eq!(raw.matches("Accept:").count(), 1);
    }

    #[test]
    fn test_derived_request_uses_base_body_without_own_body() {
        let mut builder = RequestBuilder::from_base(
            base("POST /old HTTP/1.1\r\nHost: example.com\r\nContent-Length: 3\r\n\r\nold"),
            "http://example.com/new",
        );
        builder.add_header("X-Flag: 1");
        assert_eq!(
            text(builder.materialize().unwrap()),
            "POST /new HTTP/1.1\r\nHost: example.com\r\nContent-Length: 3\r\nX-Flag: 1\r\n\r\nold"
        );
    }

    #[rstest]
    #[case("PROPFIND /old HTTP/1.1")]
    #[case("GET /old path HTTP/1.1")]
    #[case("get  /old   HTTP/1.1")]
    fn test_derived_request_from_any_versioned_line(#[case] line: &str) {
        let mut builder = RequestBuilder::from_base(
            base(&format!("{}\r\nHost: old.example.com\r\nCookie: a=b\r\n\r\n", line)),
            "http://example.com/a",
        );
        builder.add_header("Host: example.com").add_parameter("q", "1");

        assert_eq!(
            text(builder.materialize().unwrap()),
            "POST /a?q=1 HTTP/1.1\r\nCookie: a=b\r\nHost: example.com\r\n\r\n"
        );
    }

    #[test]
    fn test_derived_request_with_malformed_request_line() {
        let mut builder = RequestBuilder::from_base(
            base("BROKEN LINE\r\nCookie: a=b\r\n\r\n"),
            "http://example.com/a",
        );
        builder.add_header("X-New: 1");
        let request = builder.build().unwrap();
        assert_eq!(request.line.to_string(), "BROKEN LINE");
        assert_eq!(request.headers, vec!["Cookie: a=b", "X-New: 1"]);
    }

    #[test]
    fn test_get_with_headers_builds_fresh() {
        let mut builder = RequestBuilder::new("http://example.com/a");
        builder.set_method(Method::GET).add_header("X-Ignored: 1");
        assert_eq!(
            text(builder.materialize().unwrap()),
            "GET /a HTTP/1.1\r\nHost: example.com\r\n\r\n"
        );
    }

    #[test]
    fn test_parameters_in_insertion_order() {
        let mut builder = RequestBuilder::new("http://example.com/a");
        builder
            .add_parameter("p1", "1")
            .add_parameter("p2", "2")
            .add_parameter("p3", "3")
            .add_parameter("p1", "one");
        let request = builder.build().unwrap();
        assert_eq!(request.line.to_string(), "GET /a?p1=one&p2=2&p3=3 HTTP/1.1");
    }

    #[test]
    fn test_parameter_kinds() {
        let mut builder = RequestBuilder::new("http://example.com/a");
        builder
            .set_body("b")
            .add_parameter("q", "1")
            .add_parameter_of_kind("f", "2", ParameterKind::Body)
            .add_parameter_of_kind("", "dropped", ParameterKind::Url);
        let raw = text(builder.materialize().unwrap());
        assert!(raw.starts_with("POST /a?q=1 HTTP/1.1\r\n"));
        assert!(raw.ends_with("\r\n\r\nbody=b&f=2"));
        assert_eq!(builder.parameters().len(), 2);
    }

    #[rstest]
    #[case(RequestBuilder::default())]
    #[case(RequestBuilder::new("not a url"))]
    #[case(RequestBuilder::new("ftp://example.com/a"))]
    fn test_absent_without_usable_target(#[case] builder: RequestBuilder) {
        assert_eq!(builder.materialize(), None);
    }

    #[test]
    fn test_absent_when_deriving_without_base() {
        let mut builder = RequestBuilder::new("http://example.com/a");
        builder.set_method(Method::POST).add_header("X-A: 1");
        assert_eq!(builder.materialize(), None);

        let mut builder = RequestBuilder::from_base(base(""), "http://example.com/a");
        builder.add_header("X-A: 1");
        assert_eq!(builder.materialize(), None);
    }

    #[test]
    fn test_rejects_multiline_header() {
        let mut builder = RequestBuilder::new("http://example.com/a");
        builder.add_header("X-A: 1\r\nX-Injected: 2").add_header("");
        assert!(builder.headers().is_empty());
    }

    #[test]
    fn test_config_standard_and_body_parameter() {
        let config = Config::default()
            .with_standard(Standard::from_str("HTTP/1.0").unwrap())
            .with_body_parameter("payload");
        let mut builder = RequestBuilder::new("http://example.com/a").with_config(config);
        builder.set_body("a b");

        assert_eq!(
            text(builder.materialize().unwrap()),
            "POST /a HTTP/1.0\r\nHost: example.com\r\nContent-Type: application/x-www-form-urlencoded\r\nContent-Length: 11\r\n\r\npayload=a+b"
        );
    }

    #[test]
    fn test_materialize_is_repeatable() {
        let mut builder = RequestBuilder::new("http://example.com/a");
        builder.set_body("x").add_parameter("p", "1");
        assert_eq!(builder.materialize(), builder.materialize());
    }
}
