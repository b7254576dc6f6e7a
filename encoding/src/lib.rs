pub mod error;
pub mod percent;
