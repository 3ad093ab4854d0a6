//! Employee record types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Allowed employee age range, matching the upstream store's own checks.
pub const MIN_AGE: u32 = 16;
pub const MAX_AGE: u32 = 75;

/// An employee as held by the upstream store.
///
/// Everything but `id` may be missing in upstream payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    #[serde(rename = "employee_name")]
    pub name: Option<String>,
    #[serde(rename = "employee_salary")]
    pub salary: Option<u32>,
    #[serde(rename = "employee_age")]
    pub age: Option<u32>,
    #[serde(rename = "employee_title")]
    pub title: Option<String>,
    #[serde(rename = "employee_email")]
    pub email: Option<String>,
}

/// Fields required to create an employee. The identifier and email are
/// assigned upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInput {
    pub name: String,
    pub salary: u32,
    pub age: u32,
    pub title: String,
}

impl EmployeeInput {
    /// Check the input against the rules the upstream store enforces.
    ///
    /// Returns every violated rule.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push("name must not be blank".to_string());
        }
        if self.salary == 0 {
            errors.push("salary must be greater than zero".to_string());
        }
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            errors.push(format!("age must be between {} and {}", MIN_AGE, MAX_AGE));
        }
        if self.title.trim().is_empty() {
            errors.push("title must not be blank".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Body of the upstream delete call, which is keyed by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteEmployeeInput {
    pub name: String,
}
