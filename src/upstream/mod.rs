//! Upstream employee store integration.
//!
//! # Data Flow
//! ```text
//! EmployeeService
//!     → EmployeeApi (trait seam)
//!     → client.rs (reqwest, one HTTP call per operation)
//!     → Envelope { data, status, error } unwrapped
//!     → data or UpstreamError (types.rs)
//! ```

pub mod client;
pub mod types;

pub use client::{EmployeeApi, EmployeeClient};
pub use types::{UpstreamError, UpstreamResult};
