//! HTTP API for the Scarlet node.
//!
//! Builds the router and owns the error envelope shared by every endpoint:
//!
//! ```json
//! { "message": "guest not found: 3", "code": "NOT_FOUND" }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use scarlet_guests::GuestError;
use scarlet_storage::{GuestStore, StorageError};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::guests_api::guest_routes;
use crate::health::{health_routes, HealthState};
use crate::observability::request_id_layer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Guest list store.
    pub guests: Arc<GuestStore>,
    /// Probe state.
    pub health: HealthState,
}

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Rejected by the guest list rules.
    #[error(transparent)]
    Guest(#[from] GuestError),
    /// Path segment that cannot be a guest id.
    #[error("guest not found: {0}")]
    UnknownId(String),
    /// Request body was not valid JSON of the expected shape.
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    /// Anything else. The detail is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Rule(e) => ApiError::Guest(e),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Guest(e @ GuestError::IdsExhausted) => {
                tracing::error!(error = %e, "Guest id counter exhausted");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("internal error".to_string(), None),
                )
            }
            ApiError::Guest(e) if e.is_not_found() => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(e.to_string(), Some(e.code())),
            ),
            ApiError::Guest(e) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(e.to_string(), Some(e.code())),
            ),
            ApiError::UnknownId(_) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(self.to_string(), Some("NOT_FOUND")),
            ),
            ApiError::InvalidBody(_) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(self.to_string(), Some("INVALID_BODY")),
            ),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("internal error".to_string(), None),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Error envelope.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl ErrorResponse {
    fn new(message: String, code: Option<&'static str>) -> Self {
        Self { message, code }
    }
}

/// Creates the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health_routes(state.health.clone()))
        .merge(guest_routes())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_rule_errors_map_to_client_statuses() {
        let response = ApiError::from(GuestError::NotFound { id: 3 }).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["message"], "guest not found: 3");

        let response = ApiError::from(StorageError::Rule(GuestError::NameRequired)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "NAME_REQUIRED");
    }

    #[tokio::test]
    async fn test_exhausted_ids_is_internal() {
        let response = ApiError::from(GuestError::IdsExhausted).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"message": "internal error"})
        );
    }

    #[tokio::test]
    async fn test_internal_errors_hide_detail() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "/secret/path");
        let response = ApiError::from(StorageError::Io(io)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({"message": "internal error"}));
    }
}
