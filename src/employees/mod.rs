//! Employee domain: record types, in-memory queries and the service that
//! composes them with the upstream store.

pub mod query;
pub mod service;
pub mod types;

pub use service::{EmployeeError, EmployeeResult, EmployeeService};
pub use types::{DeleteEmployeeInput, Employee, EmployeeInput};
