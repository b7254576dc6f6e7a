use std::{error::Error, time::Duration};

#[derive(Debug)]
pub enum TransportError {
    IOError(std::io::Error),
    Timeout { after: Duration },
    TlsUnsupported { host: String },
    ContentTooLarge { subject: &'static str, limit: usize },
    MalformedResponse { reason: &'static str },
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::IOError(e) => write!(f, "io error: {}", e),
            Self::Timeout { after } => write!(f, "no response after {:?}", after),
            Self::TlsUnsupported { host } => {
                write!(f, "secure service {} requires tls which is not supported", host)
            }
            Self::ContentTooLarge { subject, limit } => {
                write!(f, "{} exceeds the limit of {} bytes", subject, limit)
            }
            Self::MalformedResponse { reason } => write!(f, "malformed response: {}", reason),
        }
    }
}

impl Error for TransportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::IOError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TransportError {
    fn from(src: std::io::Error) -> Self {
        Self::IOError(src)
    }
}
