//! Shared utilities for integration testing: a programmable upstream
//! employee store and a helper to start the proxy in front of it.

#![allow(dead_code)]

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use uuid::Uuid;

use employee_proxy::config::ProxyConfig;
use employee_proxy::{HttpServer, Shutdown};

const UPSTREAM_PATH: &str = "/api/v1/employee";

/// Mutable state of the mock upstream, inspectable from tests.
#[derive(Default)]
pub struct MockState {
    pub employees: Mutex<Vec<Value>>,
    /// Number of upcoming requests answered with 429.
    pub rate_limit_next: AtomicU32,
    /// Every request received, rate-limited ones included.
    pub calls: AtomicU32,
    pub delete_bodies: Mutex<Vec<Value>>,
    /// Artificial latency added to every response.
    pub delay: Mutex<Option<Duration>>,
}

pub struct MockUpstream {
    pub addr: SocketAddr,
    pub state: Arc<MockState>,
}

impl MockUpstream {
    pub fn base_url(&self) -> String {
        format!("http://{}{}", self.addr, UPSTREAM_PATH)
    }

    pub fn calls(&self) -> u32 {
        self.state.calls.load(Ordering::SeqCst)
    }

    pub fn rate_limit_next(&self, n: u32) {
        self.state.rate_limit_next.store(n, Ordering::SeqCst);
    }
}

pub fn employee_json(name: &str, salary: u32) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "employee_name": name,
        "employee_salary": salary,
        "employee_age": 30,
        "employee_title": "Engineer",
        "employee_email": format!("{}@company.com", name.to_lowercase().replace(' ', ".")),
    })
}

pub fn staff() -> Vec<Value> {
    vec![
        employee_json("Coleman Feest", 75000),
        employee_json("Mel Howell", 85000),
        employee_json("John Coleman", 95000),
    ]
}

fn success(data: Value) -> Json<Value> {
    Json(json!({ "data": data, "status": "Successfully processed request." }))
}

async fn gate(State(state): State<Arc<MockState>>, request: Request, next: Next) -> Response {
    state.calls.fetch_add(1, Ordering::SeqCst);

    let delay = *state.delay.lock().unwrap();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let limited = state
        .rate_limit_next
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok();
    if limited {
        return StatusCode::TOO_MANY_REQUESTS.into_response();
    }

    next.run(request).await
}

async fn list(State(state): State<Arc<MockState>>) -> Json<Value> {
    let employees = state.employees.lock().unwrap().clone();
    success(Value::Array(employees))
}

async fn get_one(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> Response {
    let employees = state.employees.lock().unwrap();
    match employees.iter().find(|e| e["id"] == id.as_str()) {
        Some(employee) => success(employee.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn create(State(state): State<Arc<MockState>>, Json(input): Json<Value>) -> Response {
    if input["age"].as_u64().unwrap_or(0) < 16 {
        let body = json!({ "status": "Failed to process request.", "error": "age must be at least 16" });
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    }

    let employee = json!({
        "id": Uuid::new_v4(),
        "employee_name": input["name"],
        "employee_salary": input["salary"],
        "employee_age": input["age"],
        "employee_title": input["title"],
        "employee_email": "new@company.com",
    });
    state.employees.lock().unwrap().push(employee.clone());
    success(employee).into_response()
}

async fn delete(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Json<Value> {
    state.delete_bodies.lock().unwrap().push(body.clone());
    let mut employees = state.employees.lock().unwrap();
    let before = employees.len();
    employees.retain(|e| e["employee_name"] != body["name"]);
    success(Value::Bool(employees.len() != before))
}

/// Start the mock upstream on an ephemeral port.
pub async fn start_mock_upstream(employees: Vec<Value>) -> MockUpstream {
    let state = Arc::new(MockState::default());
    *state.employees.lock().unwrap() = employees;

    let app = Router::new()
        .route(UPSTREAM_PATH, get(list).post(create).delete(delete))
        .route(&format!("{}/{{id}}", UPSTREAM_PATH), get(get_one))
        .layer(middleware::from_fn_with_state(state.clone(), gate))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream { addr, state }
}

/// Proxy configuration pointing at `upstream`, with millisecond backoff.
pub fn proxy_config(upstream: &MockUpstream) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.upstream.base_url = upstream.base_url();
    config.retries.base_delay_ms = 5;
    config.retries.max_delay_ms = 50;
    config.observability.metrics_enabled = false;
    config
}

/// Start the proxy on an ephemeral port. Returns the employee API base URL.
pub async fn start_proxy(config: ProxyConfig) -> (String, Shutdown) {
    let base_path = config.listener.base_path.clone();
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (format!("http://{}{}", addr, base_path), shutdown)
}
