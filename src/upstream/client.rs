//! Reqwest-backed client for the upstream employee store.
//!
//! # Responsibilities
//! - Issue exactly one HTTP call per operation
//! - Unwrap the `{data, status, error}` envelope
//! - Map non-success statuses, timeouts and bad payloads to [`UpstreamError`]
//!
//! Retrying is not done here; see [`crate::resilience::retries`].

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::UpstreamConfig;
use crate::employees::types::{DeleteEmployeeInput, Employee, EmployeeInput};
use crate::envelope::Envelope;
use crate::upstream::types::{status_line, UpstreamError, UpstreamResult};

/// Operations offered by the upstream employee store.
#[async_trait]
pub trait EmployeeApi: Send + Sync {
    /// `GET /`: every employee. Null data yields an empty list.
    async fn list(&self) -> UpstreamResult<Vec<Employee>>;

    /// `GET /{id}`.
    async fn get(&self, id: &str) -> UpstreamResult<Option<Employee>>;

    /// `POST /`.
    async fn create(&self, input: &EmployeeInput) -> UpstreamResult<Option<Employee>>;

    /// `DELETE /` with a `{name}` body. Returns whether upstream deleted it.
    async fn delete_by_name(&self, name: &str) -> UpstreamResult<bool>;
}

/// HTTP client bound to one upstream base URL.
#[derive(Clone, Debug)]
pub struct EmployeeClient {
    client: Client,
    base_url: Url,
}

impl EmployeeClient {
    /// Build a client from configuration.
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let base_url: Url = config.base_url.parse().map_err(|e| {
            UpstreamError::Config(format!("invalid base URL '{}': {}", config.base_url, e))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| UpstreamError::Config(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Base URL of the employee collection.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of a single employee; `id` is encoded as one path segment.
    fn employee_url(&self, id: &str) -> UpstreamResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                UpstreamError::Config(format!("base URL '{}' cannot have a path", self.base_url))
            })?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    /// Send the request and unwrap the envelope's payload.
    async fn exchange<T: DeserializeOwned>(&self, request: RequestBuilder) -> UpstreamResult<Option<T>> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<Envelope<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.error)
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| status_line(status));
            return Err(UpstreamError::Status { status, message });
        }

        if body.is_empty() {
            return Ok(None);
        }

        let envelope: Envelope<T> = serde_json::from_slice(&body)
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;
        Ok(envelope.into_data())
    }
}

#[async_trait]
impl EmployeeApi for EmployeeClient {
    async fn list(&self) -> UpstreamResult<Vec<Employee>> {
        let request = self.client.get(self.base_url.clone());
        Ok(self.exchange(request).await?.unwrap_or_default())
    }

    async fn get(&self, id: &str) -> UpstreamResult<Option<Employee>> {
        let request = self.client.get(self.employee_url(id)?);
        self.exchange(request).await
    }

    async fn create(&self, input: &EmployeeInput) -> UpstreamResult<Option<Employee>> {
        let request = self.client.post(self.base_url.clone()).json(input);
        self.exchange(request).await
    }

    async fn delete_by_name(&self, name: &str) -> UpstreamResult<bool> {
        let body = DeleteEmployeeInput {
            name: name.to_string(),
        };
        let request = self.client.delete(self.base_url.clone()).json(&body);
        Ok(self.exchange(request).await?.unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> EmployeeClient {
        let config = UpstreamConfig {
            base_url: base_url.to_string(),
            ..UpstreamConfig::default()
        };
        EmployeeClient::new(&config).unwrap()
    }

    #[test]
    fn test_employee_url() {
        let c = client("http://localhost:8112/api/v1/employee");
        let url = c.employee_url("4a3a170b-22cd-4ac2-aad1-9bb5b34a1507").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8112/api/v1/employee/4a3a170b-22cd-4ac2-aad1-9bb5b34a1507"
        );
    }

    #[test]
    fn test_employee_url_trailing_slash_and_encoding() {
        let c = client("http://localhost:8112/api/v1/employee/");
        let url = c.employee_url("a b/c").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8112/api/v1/employee/a%20b%2Fc");
    }

    #[test]
    fn test_invalid_base_url() {
        let config = UpstreamConfig {
            base_url: "not a url".to_string(),
            ..UpstreamConfig::default()
        };
        let err = EmployeeClient::new(&config).unwrap_err();
        assert!(matches!(err, UpstreamError::Config(_)));
    }
}
