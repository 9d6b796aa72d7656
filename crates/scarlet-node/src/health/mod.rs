//! # Health Check Module
//!
//! Probes for process supervisors and load balancers:
//!
//! - **Liveness**: is the process running?
//! - **Readiness**: has startup finished, and can the guest list be read?
//!
//! ## Usage
//!
//! ```rust,ignore
//! use axum::Router;
//! use scarlet_node::health::{health_routes, HealthState};
//!
//! let health_state = HealthState::new(store.clone());
//! health_state.set_ready(true);
//!
//! let app: Router<()> = Router::new()
//!     .merge(health_routes(health_state));
//! ```

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use scarlet_storage::GuestStore;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Health status values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Component is healthy.
    Up,
    /// Component is unhealthy.
    Down,
}

/// Individual component health.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    /// Component status.
    pub status: HealthStatus,
    /// Optional latency in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ComponentHealth {
    /// Create a healthy component with latency.
    pub fn up_with_latency(latency: Duration, details: serde_json::Value) -> Self {
        Self {
            status: HealthStatus::Up,
            latency_ms: Some(latency.as_millis() as u64),
            details: Some(details),
        }
    }

    /// Create an unhealthy component with reason.
    pub fn down_with_reason(reason: &str) -> Self {
        Self {
            status: HealthStatus::Down,
            latency_ms: None,
            details: Some(serde_json::json!({ "reason": reason })),
        }
    }
}

/// Liveness probe response.
#[derive(Debug, Clone, Serialize)]
pub struct LivenessResponse {
    pub status: HealthStatus,
    pub uptime_seconds: u64,
}

/// Readiness component checks.
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessChecks {
    /// Guest list storage health.
    pub storage: ComponentHealth,
}

/// Readiness probe response.
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: HealthStatus,
    pub checks: ReadinessChecks,
}

/// Overall health response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub checks: ReadinessChecks,
}

/// Health state shared by the probe handlers.
#[derive(Clone)]
pub struct HealthState {
    start_time: Instant,
    ready: Arc<AtomicBool>,
    store: Arc<GuestStore>,
}

impl HealthState {
    /// Create a new health state. Not ready until [`set_ready`](Self::set_ready).
    pub fn new(store: Arc<GuestStore>) -> Self {
        Self {
            start_time: Instant::now(),
            ready: Arc::new(AtomicBool::new(false)),
            store,
        }
    }

    /// Get uptime in seconds.
    pub fn uptime(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Set readiness state.
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Check if service is ready.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Reads the guest list and reports how long it took.
    async fn storage_health(&self) -> ComponentHealth {
        let started = Instant::now();
        match self.store.snapshot().await {
            Ok(document) => ComponentHealth::up_with_latency(
                started.elapsed(),
                serde_json::json!({ "guests": document.guests.len() }),
            ),
            Err(e) => {
                tracing::warn!(error = %e, "Storage health check failed");
                ComponentHealth::down_with_reason("guest list unreadable")
            }
        }
    }

    async fn readiness_checks(&self) -> ReadinessChecks {
        ReadinessChecks {
            storage: self.storage_health().await,
        }
    }
}

/// Create health check routes.
pub fn health_routes<S>(state: HealthState) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_handler))
        .route("/health/live", get(liveness_handler))
        .route("/health/ready", get(readiness_handler))
        .with_state(state)
}

fn status_code(status: HealthStatus) -> StatusCode {
    match status {
        HealthStatus::Up => StatusCode::OK,
        HealthStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Overall health handler.
async fn health_handler(State(state): State<HealthState>) -> Response {
    let checks = state.readiness_checks().await;
    let status = if state.is_ready() && checks.storage.status == HealthStatus::Up {
        HealthStatus::Up
    } else {
        HealthStatus::Down
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime(),
        checks,
    };

    (status_code(status), Json(response)).into_response()
}

/// Liveness probe handler.
async fn liveness_handler(State(state): State<HealthState>) -> Response {
    let response = LivenessResponse {
        status: HealthStatus::Up,
        uptime_seconds: state.uptime(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Readiness probe handler.
async fn readiness_handler(State(state): State<HealthState>) -> Response {
    let checks = state.readiness_checks().await;
    let status = if state.is_ready() && checks.storage.status == HealthStatus::Up {
        HealthStatus::Up
    } else {
        HealthStatus::Down
    };

    (status_code(status), Json(ReadinessResponse { status, checks })).into_response()
}
