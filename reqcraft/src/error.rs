pub mod frame;
pub mod transport;
