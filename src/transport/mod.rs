//! HTTP transport to the completion service.

pub mod http;

pub use http::{HttpTransport, TransportConfig, TransportError};
