//! Typed client for the employee proxy's HTTP API.

pub mod client;

pub use client::{ClientError, Employee, EmployeeInput, EmployeeProxyClient};
