//! Employee operations backed by the upstream store.
//!
//! Every upstream call goes through [`retry_on_rate_limit`] with the policy
//! configured for that operation. Queries fetch the full list and aggregate
//! in memory.

use std::sync::Arc;
use thiserror::Error;

use crate::employees::query::{self, TOP_EARNERS_LIMIT};
use crate::employees::types::{Employee, EmployeeInput};
use crate::resilience::{retry_on_rate_limit, RetryPolicies, UpstreamOperation};
use crate::upstream::{EmployeeApi, UpstreamError};

/// Errors surfaced by [`EmployeeService`].
#[derive(Debug, Error)]
pub enum EmployeeError {
    /// No employee with the requested identifier.
    #[error("Employee not found")]
    NotFound,

    /// Input rejected before reaching upstream.
    #[error("Invalid employee input: {}", .0.join(", "))]
    InvalidInput(Vec<String>),

    /// Upstream answered successfully but without the expected data.
    #[error("Upstream returned no data for {0}")]
    EmptyResponse(UpstreamOperation),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl EmployeeError {
    /// Not found, whether decided locally or reported by upstream.
    pub fn is_not_found(&self) -> bool {
        match self {
            EmployeeError::NotFound => true,
            EmployeeError::Upstream(e) => e.is_not_found(),
            _ => false,
        }
    }
}

/// Result type for employee operations.
pub type EmployeeResult<T> = Result<T, EmployeeError>;

/// Employee operations over an [`EmployeeApi`].
#[derive(Clone)]
pub struct EmployeeService {
    api: Arc<dyn EmployeeApi>,
    retries: RetryPolicies,
    validate_input: bool,
}

impl EmployeeService {
    pub fn new(api: Arc<dyn EmployeeApi>, retries: RetryPolicies) -> Self {
        Self {
            api,
            retries,
            validate_input: true,
        }
    }

    /// Enable or disable local input validation on create.
    pub fn with_input_validation(mut self, enabled: bool) -> Self {
        self.validate_input = enabled;
        self
    }

    /// Every employee known upstream.
    pub async fn all(&self) -> EmployeeResult<Vec<Employee>> {
        tracing::debug!("Fetching all employees from upstream");
        let employees = retry_on_rate_limit(
            self.retries.get(UpstreamOperation::List),
            UpstreamOperation::List,
            || self.api.list(),
        )
        .await?;
        tracing::info!(count = employees.len(), "Fetched employees");
        Ok(employees)
    }

    /// Employees whose name contains `query`, ignoring case.
    pub async fn search(&self, query: &str) -> EmployeeResult<Vec<Employee>> {
        tracing::debug!(query = %query, "Searching employees by name");
        let employees = self.all().await?;
        let matches = query::search_by_name(&employees, query);
        tracing::info!(query = %query, count = matches.len(), "Employee search complete");
        Ok(matches)
    }

    /// Single employee by identifier.
    pub async fn by_id(&self, id: &str) -> EmployeeResult<Employee> {
        tracing::debug!(id = %id, "Fetching employee by id");
        let employee = retry_on_rate_limit(
            self.retries.get(UpstreamOperation::Get),
            UpstreamOperation::Get,
            || self.api.get(id),
        )
        .await
        .map_err(|e| {
            if e.is_not_found() {
                EmployeeError::NotFound
            } else {
                EmployeeError::Upstream(e)
            }
        })?
        .ok_or(EmployeeError::NotFound)?;

        tracing::info!(id = %employee.id, "Fetched employee");
        Ok(employee)
    }

    /// Highest salary across all employees, 0 when there is none.
    pub async fn highest_salary(&self) -> EmployeeResult<u32> {
        let employees = self.all().await?;
        let highest = query::highest_salary(&employees);
        tracing::info!(highest_salary = highest, "Highest salary computed");
        Ok(highest)
    }

    /// Names of the ten best paid employees, highest first.
    pub async fn top_ten_earning_names(&self) -> EmployeeResult<Vec<String>> {
        let employees = self.all().await?;
        let names = query::top_earning_names(&employees, TOP_EARNERS_LIMIT);
        tracing::info!(count = names.len(), "Top earners computed");
        Ok(names)
    }

    /// Create an employee upstream and return the stored record.
    pub async fn create(&self, input: &EmployeeInput) -> EmployeeResult<Employee> {
        tracing::debug!(name = %input.name, "Creating employee");
        if self.validate_input {
            input.validate().map_err(EmployeeError::InvalidInput)?;
        }

        let employee = retry_on_rate_limit(
            self.retries.get(UpstreamOperation::Create),
            UpstreamOperation::Create,
            || self.api.create(input),
        )
        .await?
        .ok_or(EmployeeError::EmptyResponse(UpstreamOperation::Create))?;

        tracing::info!(id = %employee.id, "Created employee");
        Ok(employee)
    }

    /// Delete the employee with identifier `id`.
    ///
    /// Upstream deletes by name, so the employee is fetched first; a failed
    /// fetch fails the delete with the same error. Returns the deleted name,
    /// or `None` when upstream reports nothing was deleted.
    pub async fn delete_by_id(&self, id: &str) -> EmployeeResult<Option<String>> {
        tracing::debug!(id = %id, "Deleting employee");
        let employee = self.by_id(id).await?;
        let name = employee.name.ok_or(EmployeeError::NotFound)?;

        let deleted = retry_on_rate_limit(
            self.retries.get(UpstreamOperation::Delete),
            UpstreamOperation::Delete,
            || self.api.delete_by_name(&name),
        )
        .await?;

        if deleted {
            tracing::info!(id = %id, name = %name, "Deleted employee");
            Ok(Some(name))
        } else {
            tracing::warn!(id = %id, name = %name, "Upstream did not delete employee");
            Ok(None)
        }
    }
}
