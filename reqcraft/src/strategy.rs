//! Stateful GET / POST strategies.
//!
//! A strategy moves through `Uninitialized → Initialized → Sent`. Calls that
//! do not fit the current state are silently ignored: parameters before
//! [`HttpMethod::init`] are dropped, a second `init` keeps the first url and
//! [`HttpMethod::send`] before `init` reports [`ResponseHolder::Incomplete`]
//! without touching the transport. Callers that prefer these mistakes to be
//! compile errors can use [`Unprepared`] and [`Prepared`] directly.

pub mod prepared;

pub use prepared::{Get, MethodKind, Post, Prepared, Unprepared};

use tracing::trace;

use crate::{
    config::Config, error::transport::TransportError, message::BaseMessage,
    response::ResponseHolder, transport::Transport,
};

pub trait HttpMethod {
    /// Points the strategy at `url`. Does nothing once initialized.
    fn init(&mut self, url: &str, headers: &[&str]);

    fn add_request_parameter(&mut self, name: &str, value: &str);

    fn add_body_parameter(&mut self, name: &str, value: &str);

    fn send(&mut self) -> Result<ResponseHolder, TransportError>;

    /// Initializes with `url` when needed, then sends.
    fn send_to(&mut self, url: &str) -> Result<ResponseHolder, TransportError> {
        self.init(url, &[]);
        self.send()
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum State {
    Uninitialized,
    Initialized(Prepared),
    Sent(Prepared),
}

pub struct MethodRequest<M, T> {
    method: Unprepared<M>,
    transport: T,
    state: State,
}

pub type GetRequest<T> = MethodRequest<Get, T>;
pub type PostRequest<T> = MethodRequest<Post, T>;

impl<M: MethodKind, T: Transport> MethodRequest<M, T> {
    pub fn new(transport: T) -> Self {
        Self {
            method: Unprepared::new(),
            transport,
            state: State::Uninitialized,
        }
    }

    pub fn from_base(base: BaseMessage, transport: T) -> Self {
        Self {
            method: Unprepared::from_base(base),
            transport,
            state: State::Uninitialized,
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.method = self.method.with_config(config);
        self
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// The request as it would currently be sent.
    pub fn prepared(&self) -> Option<&Prepared> {
        match &self.state {
            State::Initialized(prepared) | State::Sent(prepared) => Some(prepared),
            State::Uninitialized => None,
        }
    }

    fn initialized(&mut self) -> Option<&mut Prepared> {
        match &mut self.state {
            State::Initialized(prepared) => Some(prepared),
            _ => None,
        }
    }
}

impl<M: MethodKind, T: Transport> HttpMethod for MethodRequest<M, T> {
    fn init(&mut self, url: &str, headers: &[&str]) {
        if !matches!(self.state, State::Uninitialized) {
            trace!(url, "already initialized, ignoring init");
            return;
        }
        if let Some(prepared) = self.method.init(url, headers) {
            self.state = State::Initialized(prepared);
        }
    }

    fn add_request_parameter(&mut self, name: &str, value: &str) {
        match self.initialized() {
            Some(prepared) => prepared.add_request_parameter(name, value),
            None => trace!(name, "not initialized, ignoring request parameter"),
        }
    }

    fn add_body_parameter(&mut self, name: &str, value: &str) {
        match self.initialized() {
            Some(prepared) => prepared.add_body_parameter(name, value),
            None => trace!(name, "not initialized, ignoring body parameter"),
        }
    }

    /// Sending again after a successful send replays the same request.
    fn send(&mut self) -> Result<ResponseHolder, TransportError> {
        let (prepared, sent) = match std::mem::replace(&mut self.state, State::Uninitialized) {
            State::Uninitialized => {
                trace!("not initialized, nothing to send");
                return Ok(ResponseHolder::Incomplete);
            }
            State::Initialized(prepared) => (prepared, false),
            State::Sent(prepared) => (prepared, true),
        };

        let res = prepared.send(&self.transport);
        self.state = match (&res, sent) {
            (Ok(_), _) | (Err(_), true) => State::Sent(prepared),
            (Err(_), false) => State::Initialized(prepared),
        };
        res.map(ResponseHolder::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Service;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        sent: RefCell<Vec<(Service, String)>>,
    }

    impl Transport for Recorder {
        fn send_raw(&self, service: &Service, request: &[u8]) -> Result<Vec<u8>, TransportError> {
            self.sent
                .borrow_mut()
                .push((service.clone(), String::from_utf8_lossy(request).into_owned()));
            Ok(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nok".to_vec())
        }
    }

    struct Unreachable;

    impl Transport for Unreachable {
        fn send_raw(&self, _: &Service, _: &[u8]) -> Result<Vec<u8>, TransportError> {
            Err(TransportError::IOError(std::io::ErrorKind::ConnectionRefused.into()))
        }
    }

    #[test]
    fn test_send_uninitialized_is_incomplete() {
        let recorder = Recorder::default();
        let mut get = GetRequest::new(&recorder);

        assert_eq!(get.send().unwrap(), ResponseHolder::Incomplete);
        assert!(recorder.sent.borrow().is_empty());
    }

    #[test]
    fn test_parameters_before_init_are_ignored() {
        let recorder = Recorder::default();
        let mut get = GetRequest::new(&recorder);
        get.add_request_parameter("early", "1");
        get.add_body_parameter("early", "2");
        get.init("http://example.com/a", &[]);
        get.add_request_parameter("late", "3");

        assert_eq!(
            get.prepared().unwrap().request().line.to_string(),
            "GET /a?late=3 HTTP/1.1"
        );
    }

    #[test]
    fn test_init_is_idempotent() {
        let recorder = Recorder::default();
        let mut post = PostRequest::new(&recorder);
        post.init("http://first.example.com/one", &[]);
        post.add_body_parameter("kept", "yes");
        post.init("http://second.example.com/two", &["X-A: 1"]);

        let prepared = post.prepared().unwrap();
        assert_eq!(prepared.url().to_string(), "http://first.example.com/one");
        assert_eq!(prepared.request().body, b"kept=yes".to_vec());
    }

    #[test]
    fn test_send_moves_to_sent() {
        let recorder = Recorder::default();
        let mut post = PostRequest::new(&recorder);
        let holder = post.send_to("http://example.com/form").unwrap();

        assert_eq!(holder.exchange().unwrap().response_text(), "ok");
        assert!(matches!(post.state(), State::Sent(_)));

        post.add_body_parameter("late", "1");
        post.send().unwrap();

        let sent = recorder.sent.borrow();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], sent[1]);
        assert_eq!(sent[0].0.host, "example.com");
        assert!(sent[0].1.starts_with("POST /form HTTP/1.1\r\n"));
    }

    #[test]
    fn test_transport_failure_keeps_request() {
        let mut get = GetRequest::new(Unreachable);
        get.init("http://example.com/a", &[]);

        assert!(get.send().is_err());
        assert!(matches!(get.state(), State::Initialized(_)));
    }

    #[test]
    fn test_send_to_with_bad_url_is_incomplete() {
        let recorder = Recorder::default();
        let mut get = GetRequest::new(&recorder);
        assert_eq!(get.send_to("not a url").unwrap(), ResponseHolder::Incomplete);
    }

    #[test]
    fn test_polymorphic_over_method() {
        let recorder = Recorder::default();
        let mut methods: Vec<Box<dyn HttpMethod + '_>> = vec![
            Box::new(GetRequest::new(&recorder)),
            Box::new(PostRequest::new(&recorder)),
        ];
        for method in methods.iter_mut() {
            method.init("http://example.com/x", &[]);
            method.add_request_parameter("a", "1");
            assert!(method.send().unwrap().is_complete());
        }

        let sent = recorder.sent.borrow();
        assert!(sent[0].1.starts_with("GET /x?a=1 HTTP/1.1"));
        assert!(sent[1].1.starts_with("POST /x?a=1 HTTP/1.1"));
    }
}
