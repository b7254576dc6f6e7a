use std::str::FromStr;

use tracing::debug;

use crate::{
    analysis::analyze_response,
    builder::RequestBuilder,
    config::Config,
    error::transport::TransportError,
    request::RawRequest,
    response::{Exchange, ResponseHolder},
    transport::{Service, Transport},
    uri::url::Url,
};

/// Sending capability for anything that owns a [`Transport`].
pub trait WithHttpRequests {
    type Transport: Transport;

    fn transport(&self) -> &Self::Transport;

    /// Plain `GET` for `url`, sent to `service`.
    fn send_url(&self, url: &str, service: &Service) -> Result<ResponseHolder, TransportError> {
        let Ok(url) = Url::from_str(url) else {
            return Ok(ResponseHolder::Incomplete);
        };
        let request = RawRequest::fresh(&url, &Config::default().standard).to_bytes();
        self.send_bytes(request, service)
    }

    /// Materializes `builder` and sends it. A builder that yields no request
    /// is reported as incomplete.
    fn send_builder(&self, builder: &RequestBuilder, service: &Service) -> Result<ResponseHolder, TransportError> {
        match builder.materialize() {
            Some(request) => self.send_bytes(request, service),
            None => {
                debug!(%service, "builder produced no request, nothing sent");
                Ok(ResponseHolder::Incomplete)
            }
        }
    }

    fn send_bytes(&self, request: Vec<u8>, service: &Service) -> Result<ResponseHolder, TransportError> {
        let response = self.transport().send_raw(service, &request)?;
        Ok(ResponseHolder::Success(Exchange {
            service: service.clone(),
            request,
            response,
        }))
    }

    /// Body of a raw response as text.
    fn response_to_string(&self, response: &[u8]) -> String {
        let offset = analyze_response(response).body_offset.min(response.len());
        String::from_utf8_lossy(&response[offset..]).into_owned()
    }
}

pub struct Client<T> {
    transport: T,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }
}

impl<T: Transport> WithHttpRequests for Client<T> {
    type Transport = T;

    fn transport(&self) -> &T {
        &self.transport
    }
}
