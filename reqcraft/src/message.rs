use crate::{request::RawRequest, response::Exchange, transport::Service};

/// A previously observed request, optionally with its response. New requests
/// can be derived from it to carry over cookies and authentication headers.
#[derive(Debug, PartialEq, Clone)]
pub struct BaseMessage {
    pub service: Service,
    pub request: Vec<u8>,
    pub response: Option<Vec<u8>>,
}

impl BaseMessage {
    pub fn new(service: Service, request: &[u8]) -> Self {
        Self {
            service,
            request: request.to_vec(),
            response: None,
        }
    }

    /// Structured view of the request, `None` when it is empty.
    pub fn parsed_request(&self) -> Option<RawRequest> {
        RawRequest::parse(&self.request)
    }
}

impl From<Exchange> for BaseMessage {
    fn from(exchange: Exchange) -> Self {
        Self {
            service: exchange.service,
            request: exchange.request,
            response: Some(exchange.response),
        }
    }
}
