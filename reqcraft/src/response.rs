use crate::{
    analysis::{analyze_request, analyze_response, RequestInfo, ResponseInfo},
    transport::Service,
};

/// A request that was sent together with the response it produced.
#[derive(Debug, PartialEq, Clone)]
pub struct Exchange {
    pub service: Service,
    pub request: Vec<u8>,
    pub response: Vec<u8>,
}

impl Exchange {
    pub fn request_info(&self) -> RequestInfo {
        analyze_request(&self.request)
    }

    pub fn response_info(&self) -> ResponseInfo {
        analyze_response(&self.response)
    }

    pub fn status_code(&self) -> Option<u16> {
        self.response_info().status_code
    }

    pub fn response_body(&self) -> &[u8] {
        let offset = self.response_info().body_offset;
        &self.response[offset.min(self.response.len())..]
    }

    pub fn response_text(&self) -> String {
        String::from_utf8_lossy(self.response_body()).into_owned()
    }
}

/// Outcome of sending through a method strategy.
#[derive(Debug, PartialEq, Clone)]
pub enum ResponseHolder {
    /// Nothing was sent, the strategy had not been initialized.
    Incomplete,
    Success(Exchange),
}

impl ResponseHolder {
    pub fn is_complete(&self) -> bool {
        matches!(self, ResponseHolder::Success(_))
    }

    pub fn exchange(&self) -> Option<&Exchange> {
        match self {
            ResponseHolder::Success(exchange) => Some(exchange),
            ResponseHolder::Incomplete => None,
        }
    }

    pub fn into_exchange(self) -> Option<Exchange> {
        match self {
            ResponseHolder::Success(exchange) => Some(exchange),
            ResponseHolder::Incomplete => None,
        }
    }
}
