//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the employee proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address, API mount point).
    pub listener: ListenerConfig,

    /// Upstream employee store connection settings.
    pub upstream: UpstreamConfig,

    /// Inbound timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Retry configuration for upstream calls.
    pub retries: RetryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Request hardening.
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8111").
    pub bind_address: String,

    /// Path the employee API is mounted under.
    pub base_path: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8111".to_string(),
            base_path: "/api/v1/employee".to_string(),
        }
    }
}

/// Upstream employee store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the employee collection.
    pub base_url: String,

    /// Total time allowed for one upstream request, in seconds.
    pub request_timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8112/api/v1/employee".to_string(),
            request_timeout_secs: 10,
            connect_timeout_secs: 5,
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Deadline for handling one inbound request, backoff included. Must
    /// exceed two full backoff sequences.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 300 }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Enable retries.
    pub enabled: bool,

    /// Maximum number of attempts, the first call included.
    pub max_attempts: u32,

    /// Delay before the first retry, in milliseconds.
    pub base_delay_ms: u64,

    /// Growth factor applied to the delay after each attempt.
    pub multiplier: f64,

    /// Upper bound for a single delay in milliseconds.
    pub max_delay_ms: u64,

    /// Random extra delay as a fraction of the computed delay (0.0 = none).
    pub jitter_ratio: f64,

    /// Which upstream operations are retried.
    pub operations: RetryOperations,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: 5,
            base_delay_ms: 5000,
            multiplier: 2.0,
            max_delay_ms: 60_000,
            jitter_ratio: 0.0,
            operations: RetryOperations::default(),
        }
    }
}

/// Per-operation retry switches.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryOperations {
    pub list: bool,
    pub get: bool,
    pub create: bool,
    pub delete: bool,
}

impl Default for RetryOperations {
    fn default() -> Self {
        Self {
            list: true,
            get: true,
            create: true,
            delete: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
    /// Validate employee input before forwarding it upstream.
    pub strict_validation: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 64 * 1024,
            strict_validation: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProxyConfig::default();
        assert_eq!(config.retries.max_attempts, 5);
        assert_eq!(config.retries.base_delay_ms, 5000);
        assert_eq!(config.retries.multiplier, 2.0);
        assert!(config.retries.operations.delete);
        assert_eq!(config.listener.base_path, "/api/v1/employee");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ProxyConfig = toml::from_str(
            r#"
            [upstream]
            base_url = "http://mock:8112/api/v1/employee"

            [retries.operations]
            create = false
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.base_url, "http://mock:8112/api/v1/employee");
        assert_eq!(config.upstream.request_timeout_secs, 10);
        assert!(!config.retries.operations.create);
        assert!(config.retries.operations.list);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8111");
    }
}
