//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the employee API mounted under the base path
//! - Wire up middleware (request ID, tracing, deadline, body limit, metrics)
//! - Build the upstream client and employee service from configuration
//! - Serve until the shutdown signal fires, then drain

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::employees::EmployeeService;
use crate::http::handlers;
use crate::http::middleware::{request_timeout, track_metrics};
use crate::http::request::{make_request_span, propagate_request_id_layer, set_request_id_layer};
use crate::lifecycle::shutdown::wait_for;
use crate::resilience::RetryPolicies;
use crate::upstream::{EmployeeApi, EmployeeClient, UpstreamError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: EmployeeService,
}

/// HTTP server for the employee proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a server talking to the upstream configured in `config`.
    pub fn new(config: ProxyConfig) -> Result<Self, UpstreamError> {
        let client = EmployeeClient::new(&config.upstream)?;
        tracing::info!(base_url = %client.base_url(), "Upstream client initialized");
        Ok(Self::with_api(config, Arc::new(client)))
    }

    /// Create a server on top of an arbitrary upstream implementation.
    pub fn with_api(config: ProxyConfig, api: Arc<dyn EmployeeApi>) -> Self {
        let service = EmployeeService::new(api, RetryPolicies::from_config(&config.retries))
            .with_input_validation(config.security.strict_validation);
        let router = Self::build_router(&config, AppState { service });
        Self { router, config }
    }

    /// Routes of the employee API, relative to the base path.
    fn employee_routes() -> Router<AppState> {
        Router::new()
            .route(
                "/",
                get(handlers::get_all_employees).post(handlers::create_employee),
            )
            .route("/search/{query}", get(handlers::search_employees))
            .route("/highestSalary", get(handlers::highest_salary))
            .route(
                "/topTenHighestEarningEmployeeNames",
                get(handlers::top_ten_earning_names),
            )
            .route(
                "/{id}",
                get(handlers::get_employee).delete(handlers::delete_employee),
            )
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let deadline = Duration::from_secs(config.timeouts.request_secs);
        let layers = ServiceBuilder::new()
            .layer(set_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(propagate_request_id_layer())
            .layer(middleware::from_fn_with_state(deadline, request_timeout));

        Router::new()
            .route("/health", get(handlers::health))
            .nest(&config.listener.base_path, Self::employee_routes())
            .method_not_allowed_fallback(handlers::method_not_allowed)
            .fallback(handlers::fallback)
            .with_state(state)
            .layer(middleware::from_fn(track_metrics))
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            .layer(layers)
    }

    /// The fully layered router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            base_path = %self.config.listener.base_path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
