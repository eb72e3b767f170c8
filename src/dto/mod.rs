//! JSON shapes exchanged with callers.
pub mod request;
pub use request::*;

pub mod response;
pub use response::*;
