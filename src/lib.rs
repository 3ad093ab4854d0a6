//! Employee API proxy library.
//!
//! Exposes an HTTP API for employee records and forwards each request to an
//! upstream employee store, retrying rate-limited calls with exponential
//! backoff.

pub mod config;
pub mod employees;
pub mod envelope;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod upstream;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
