//! Typed two-step flow: parameters can only be added once a request exists.

use std::{marker::PhantomData, str::FromStr};

use tracing::{debug, trace};

use crate::{
    config::Config,
    error::transport::TransportError,
    header,
    message::BaseMessage,
    parameter::Parameter,
    request::RawRequest,
    response::Exchange,
    transport::{Service, Transport},
    uri::url::Url,
};

/// How a method shapes the initial request for a url.
pub trait MethodKind {
    fn prepare(base: Option<&BaseMessage>, url: &Url, headers: &[&str], config: &Config) -> RawRequest;
}

#[derive(Debug, Clone, Copy)]
pub struct Get;

#[derive(Debug, Clone, Copy)]
pub struct Post;

impl MethodKind for Get {
    /// Fresh request, supplied headers replace same-named defaults.
    fn prepare(_: Option<&BaseMessage>, url: &Url, headers: &[&str], config: &Config) -> RawRequest {
        let mut request = RawRequest::fresh(url, &config.standard);
        for line in headers.iter().filter(|l| header::is_valid(l, config.max_header_size)) {
            header::set_line(&mut request.headers, line);
        }
        request
    }
}

impl MethodKind for Post {
    /// Derived from the base message without its body, or a fresh request
    /// toggled to POST when there is no usable base.
    fn prepare(base: Option<&BaseMessage>, url: &Url, headers: &[&str], config: &Config) -> RawRequest {
        let headers: Vec<&str> = headers
            .iter()
            .copied()
            .filter(|l| header::is_valid(l, config.max_header_size))
            .collect();

        match base.and_then(BaseMessage::parsed_request) {
            Some(original) => {
                trace!(%url, "deriving POST from base message");
                RawRequest::derive(&original, url, &headers, Vec::new())
            }
            None => {
                let mut request = Get::prepare(None, url, &headers, config);
                request.toggle_method();
                request
            }
        }
    }
}

/// A method that has not been pointed at a url yet.
#[derive(Debug, Clone)]
pub struct Unprepared<M> {
    base: Option<BaseMessage>,
    config: Config,
    kind: PhantomData<M>,
}

impl<M: MethodKind> Unprepared<M> {
    pub fn new() -> Self {
        Self {
            base: None,
            config: Config::default(),
            kind: PhantomData,
        }
    }

    pub fn from_base(base: BaseMessage) -> Self {
        Self {
            base: Some(base),
            ..Self::new()
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// `None` when `url` is not a usable absolute url.
    pub fn init(&self, url: &str, headers: &[&str]) -> Option<Prepared> {
        let url = Url::from_str(url).ok()?;
        let request = M::prepare(self.base.as_ref(), &url, headers, &self.config);
        debug!(%url, method = %request.method(), "request initialized");

        Some(Prepared {
            service: url.service(),
            url,
            request,
        })
    }
}

impl<M: MethodKind> Default for Unprepared<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// An initialized request that accepts parameters and can be sent.
#[derive(Debug, PartialEq, Clone)]
pub struct Prepared {
    url: Url,
    service: Service,
    request: RawRequest,
}

impl Prepared {
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn service(&self) -> &Service {
        &self.service
    }

    pub fn request(&self) -> &RawRequest {
        &self.request
    }

    pub fn add_request_parameter(&mut self, name: &str, value: &str) {
        self.request.add_parameter(&Parameter::url(name, value));
    }

    pub fn add_body_parameter(&mut self, name: &str, value: &str) {
        self.request.add_parameter(&Parameter::body(name, value));
    }

    pub fn with_request_parameter(mut self, name: &str, value: &str) -> Self {
        self.add_request_parameter(name, value);
        self
    }

    pub fn with_body_parameter(mut self, name: &str, value: &str) -> Self {
        self.add_body_parameter(name, value);
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.request.to_bytes()
    }

    pub fn send<T: Transport + ?Sized>(&self, transport: &T) -> Result<Exchange, TransportError> {
        let request = self.to_bytes();
        let response = transport.send_raw(&self.service, &request)?;
        debug!(service = %self.service, size = response.len(), "response received");

        Ok(Exchange {
            service: self.service.clone(),
            request,
            response,
        })
    }
}
