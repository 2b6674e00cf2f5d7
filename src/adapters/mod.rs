// Adapters layer: concrete implementations of the domain ports (HTTP transport, request logger).

pub mod http;
pub mod logger;

pub use http::ReqwestTransport;
pub use logger::TracingRequestLogger;
