//! Employee API handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::employees::{Employee, EmployeeInput};
use crate::http::error::ApiError;
use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

pub async fn health() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "ok",
    })
}

/// `GET {base}`
pub async fn get_all_employees(
    State(state): State<AppState>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    tracing::debug!("getAllEmployees");
    Ok(Json(state.service.all().await?))
}

/// `GET {base}/search/{q}`
pub async fn search_employees(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    tracing::debug!(query = %query, "getEmployeesByNameSearch");
    Ok(Json(state.service.search(&query).await?))
}

/// `GET {base}/{id}`
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, ApiError> {
    tracing::debug!(id = %id, "getEmployeeById");
    Ok(Json(state.service.by_id(&id).await?))
}

/// `GET {base}/highestSalary`
pub async fn highest_salary(State(state): State<AppState>) -> Result<Json<u32>, ApiError> {
    tracing::debug!("getHighestSalaryOfEmployees");
    Ok(Json(state.service.highest_salary().await?))
}

/// `GET {base}/topTenHighestEarningEmployeeNames`
pub async fn top_ten_earning_names(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, ApiError> {
    tracing::debug!("getTopTenHighestEarningEmployeeNames");
    Ok(Json(state.service.top_ten_earning_names().await?))
}

/// `POST {base}`
pub async fn create_employee(
    State(state): State<AppState>,
    body: Result<Json<EmployeeInput>, JsonRejection>,
) -> Result<Json<Employee>, ApiError> {
    let Json(input) = body.map_err(|rejection| match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => ApiError::new(StatusCode::PAYLOAD_TOO_LARGE, rejection.body_text()),
        _ => ApiError::bad_request(rejection.body_text()),
    })?;
    tracing::debug!(name = %input.name, "createEmployee");
    Ok(Json(state.service.create(&input).await?))
}

/// `DELETE {base}/{id}`. Responds with the deleted name as plain text.
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::debug!(id = %id, "deleteEmployeeById");
    match state.service.delete_by_id(&id).await? {
        Some(name) => Ok((StatusCode::OK, name)),
        None => Err(ApiError::not_found()),
    }
}

/// Unknown routes still answer with the error envelope.
pub async fn fallback() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Resource not found")
}

/// Known path, unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}
