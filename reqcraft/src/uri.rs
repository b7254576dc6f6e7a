pub mod authority;
pub mod path;
pub mod url;
