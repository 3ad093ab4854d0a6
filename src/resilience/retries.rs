//! Retry logic for upstream calls.
//!
//! # Responsibilities
//! - Decide which upstream operations are retried (per-operation switches)
//! - Retry rate-limited calls with exponential backoff
//! - Propagate every other failure on the first occurrence
//!
//! # Design Decisions
//! - Only HTTP 429 is retried: the upstream rejected the call before doing
//!   any work, so even POST/DELETE are safe to repeat
//! - Retrying is an explicit wrapper around a closure, not hidden interception

use std::fmt;
use std::future::Future;
use std::time::Duration;

use crate::config::RetryConfig;
use crate::observability::metrics;
use crate::resilience::backoff::calculate_backoff;
use crate::upstream::UpstreamError;

/// Upstream calls made by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpstreamOperation {
    List,
    Get,
    Create,
    Delete,
}

impl UpstreamOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpstreamOperation::List => "list",
            UpstreamOperation::Get => "get",
            UpstreamOperation::Create => "create",
            UpstreamOperation::Delete => "delete",
        }
    }
}

impl fmt::Display for UpstreamOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Retry parameters applied to one upstream call.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts allowed, the first call included.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub multiplier: f64,
    pub max_delay: Duration,
    pub jitter_ratio: f64,
}

impl RetryPolicy {
    /// Policy that makes exactly one attempt.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            multiplier: 1.0,
            max_delay: Duration::ZERO,
            jitter_ratio: 0.0,
        }
    }

    /// Policy for `operation` as configured.
    pub fn for_operation(config: &RetryConfig, operation: UpstreamOperation) -> Self {
        let enabled = config.enabled
            && match operation {
                UpstreamOperation::List => config.operations.list,
                UpstreamOperation::Get => config.operations.get,
                UpstreamOperation::Create => config.operations.create,
                UpstreamOperation::Delete => config.operations.delete,
            };

        if !enabled {
            return Self::no_retry();
        }

        Self {
            max_attempts: config.max_attempts.max(1),
            base_delay: Duration::from_millis(config.base_delay_ms),
            multiplier: config.multiplier,
            max_delay: Duration::from_millis(config.max_delay_ms),
            jitter_ratio: config.jitter_ratio,
        }
    }

    /// Delay before the retry that follows failed attempt `attempt`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        calculate_backoff(
            attempt,
            self.base_delay.as_millis() as u64,
            self.multiplier,
            self.max_delay.as_millis() as u64,
            self.jitter_ratio,
        )
    }
}

/// Per-operation retry policies, resolved once from configuration.
#[derive(Debug, Clone)]
pub struct RetryPolicies {
    list: RetryPolicy,
    get: RetryPolicy,
    create: RetryPolicy,
    delete: RetryPolicy,
}

impl RetryPolicies {
    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            list: RetryPolicy::for_operation(config, UpstreamOperation::List),
            get: RetryPolicy::for_operation(config, UpstreamOperation::Get),
            create: RetryPolicy::for_operation(config, UpstreamOperation::Create),
            delete: RetryPolicy::for_operation(config, UpstreamOperation::Delete),
        }
    }

    /// Same policy for every operation.
    pub fn uniform(policy: RetryPolicy) -> Self {
        Self {
            list: policy.clone(),
            get: policy.clone(),
            create: policy.clone(),
            delete: policy,
        }
    }

    pub fn get(&self, operation: UpstreamOperation) -> &RetryPolicy {
        match operation {
            UpstreamOperation::List => &self.list,
            UpstreamOperation::Get => &self.get,
            UpstreamOperation::Create => &self.create,
            UpstreamOperation::Delete => &self.delete,
        }
    }
}

impl Default for RetryPolicies {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

/// Only rate limiting is retried.
pub fn is_retryable(error: &UpstreamError) -> bool {
    error.is_rate_limited()
}

/// Run `call`, retrying while upstream answers 429.
///
/// Waits `policy.delay_after(attempt)` between attempts and gives up after
/// `policy.max_attempts` calls, returning the last rate-limit error. Any
/// other error is returned immediately.
pub async fn retry_on_rate_limit<T, F, Fut>(
    policy: &RetryPolicy,
    operation: UpstreamOperation,
    mut call: F,
) -> Result<T, UpstreamError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, UpstreamError>>,
{
    let mut attempt = 1;

    loop {
        match call().await {
            Ok(value) => {
                metrics::record_upstream_call(operation.as_str(), "success");
                return Ok(value);
            }
            Err(e) if is_retryable(&e) && attempt < policy.max_attempts => {
                let delay = policy.delay_after(attempt);
                metrics::record_upstream_retry(operation.as_str());
                tracing::warn!(
                    operation = %operation,
                    attempt,
                    max_attempts = policy.max_attempts,
                    delay = ?delay,
                    "Upstream rate limited, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                if is_retryable(&e) {
                    tracing::error!(
                        operation = %operation,
                        attempts = attempt,
                        "Upstream still rate limited, giving up"
                    );
                    metrics::record_upstream_call(operation.as_str(), "rate_limited");
                } else {
                    metrics::record_upstream_call(operation.as_str(), "error");
                }
                return Err(e);
            }
        }
    }
}
