pub mod analysis;
pub mod builder;
pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod header;
pub mod message;
pub mod method;
pub mod parameter;
pub mod request;
pub mod response;
pub mod standard;
pub mod strategy;
pub mod transport;
pub mod uri;
pub mod version;

pub use builder::RequestBuilder;
pub use message::BaseMessage;
pub use method::Method;
pub use parameter::{Parameter, ParameterKind};
pub use response::{Exchange, ResponseHolder};
pub use strategy::{GetRequest, HttpMethod, PostRequest};
pub use transport::{Service, TcpTransport, Transport};
