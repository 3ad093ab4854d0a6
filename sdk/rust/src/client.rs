use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Employee as returned by the proxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub employee_name: Option<String>,
    pub employee_salary: Option<u32>,
    pub employee_age: Option<u32>,
    pub employee_title: Option<String>,
    pub employee_email: Option<String>,
}

/// Body of a create request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeInput {
    pub name: String,
    pub salary: u32,
    pub age: u32,
    pub title: String,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid base URL: {0}")]
    InvalidUrl(String),

    /// Non-success status, with the `error` member of the envelope when present.
    #[error("proxy returned {status}: {message}")]
    Api { status: StatusCode, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
            ClientError::InvalidUrl(_) => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
}

pub struct EmployeeProxyClient {
    client: Client,
    base_url: String,
}

impl EmployeeProxyClient {
    /// `base_url` is the employee collection, e.g. `http://localhost:8111/api/v1/employee`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL extended by `segments`, each percent-encoded as one path segment.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url: Url = self
            .base_url
            .parse()
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn list(&self) -> Result<Vec<Employee>, ClientError> {
        let resp = self.client.get(self.url(&[])?).send().await?;
        json(resp).await
    }

    pub async fn get(&self, id: &str) -> Result<Employee, ClientError> {
        let resp = self.client.get(self.url(&[id])?).send().await?;
        json(resp).await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Employee>, ClientError> {
        let resp = self.client.get(self.url(&["search", query])?).send().await?;
        json(resp).await
    }

    pub async fn highest_salary(&self) -> Result<u32, ClientError> {
        let resp = self.client.get(self.url(&["highestSalary"])?).send().await?;
        json(resp).await
    }

    pub async fn top_ten_earning_names(&self) -> Result<Vec<String>, ClientError> {
        let resp = self
            .client
            .get(self.url(&["topTenHighestEarningEmployeeNames"])?)
            .send()
            .await?;
        json(resp).await
    }

    pub async fn create(&self, input: &EmployeeInput) -> Result<Employee, ClientError> {
        let resp = self.client.post(self.url(&[])?).json(input).send().await?;
        json(resp).await
    }

    /// Returns the deleted employee's name.
    pub async fn delete(&self, id: &str) -> Result<String, ClientError> {
        let resp = self.client.delete(self.url(&[id])?).send().await?;
        let resp = check(resp).await?;
        Ok(resp.text().await?)
    }
}

async fn check(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let text = resp.text().await?;
    let message = serde_json::from_str::<ErrorEnvelope>(&text)
        .ok()
        .and_then(|e| e.error)
        .unwrap_or(text);
    Err(ClientError::Api { status, message })
}

async fn json<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    Ok(check(resp).await?.json().await?)
}
