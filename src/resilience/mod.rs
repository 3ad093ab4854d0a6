//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Upstream call:
//!     → reqwest client timeout (connect + request deadline, see upstream)
//!     → On 429: retries.rs (wait per backoff.rs, call again)
//!     → Anything else: propagated unchanged
//! ```

pub mod backoff;
pub mod retries;

pub use retries::{retry_on_rate_limit, RetryPolicies, RetryPolicy, UpstreamOperation};
