//! # Guest List API
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/api/scarlet-drive/guests` | List guests with counters |
//! | POST | `/api/scarlet-drive/guests` | Create a guest |
//! | GET | `/api/scarlet-drive/guests/{id}` | Get one guest with the list |
//! | PATCH | `/api/scarlet-drive/guests/{id}` | Update some fields of a guest |
//! | DELETE | `/api/scarlet-drive/guests/{id}` | Delete a guest |
//!
//! Every success response carries the full view (`guests`, `counters`,
//! `limits`, `hosts`) so the page can redraw from a single call.
//!
//! ## Example: Creating a guest
//!
//! ```bash
//! curl -X POST http://localhost:8080/api/scarlet-drive/guests \
//!   -H "Content-Type: application/json" \
//!   -d '{"name": "Ana Silva", "invitedBy": "Diogo", "isPaid": "sim"}'
//! ```

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use scarlet_guests::{GuestInput, GuestRecord, GuestView};
use serde::Serialize;

use crate::api::{ApiError, AppState};

/// Creates the guest list routes.
pub fn guest_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/scarlet-drive/guests",
            get(list_guests).post(create_guest),
        )
        .route(
            "/api/scarlet-drive/guests/{id}",
            get(get_guest).patch(update_guest).delete(delete_guest),
        )
}

/// Response carrying one guest plus the view.
#[derive(Debug, Serialize)]
pub struct GuestResponse {
    pub guest: GuestRecord,
    #[serde(flatten)]
    pub view: GuestView,
}

/// Response for a delete.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: GuestRecord,
    #[serde(flatten)]
    pub view: GuestView,
}

/// Ids are positive integers; anything else cannot name a guest.
fn parse_id(raw: &str) -> Result<u64, ApiError> {
    match raw.parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::UnknownId(raw.to_string())),
    }
}

fn parse_body(payload: Result<Json<GuestInput>, JsonRejection>) -> Result<GuestInput, ApiError> {
    payload
        .map(|Json(input)| input)
        .map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))
}

/// Lists all guests.
async fn list_guests(State(state): State<AppState>) -> Result<Json<GuestView>, ApiError> {
    let document = state.guests.snapshot().await?;
    Ok(Json(GuestView::build(&document)))
}

/// Gets a single guest.
async fn get_guest(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GuestResponse>, ApiError> {
    let id = parse_id(&id)?;
    let document = state.guests.snapshot().await?;
    let guest = document.get(id)?.clone();

    Ok(Json(GuestResponse {
        guest,
        view: GuestView::build(&document),
    }))
}

/// Creates a guest.
async fn create_guest(
    State(state): State<AppState>,
    payload: Result<Json<GuestInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let input = parse_body(payload)?;
    let committed = state.guests.create(input).await?;

    tracing::info!(
        id = committed.value.id,
        invited_by = %committed.value.invited_by,
        "Guest created"
    );

    Ok((
        StatusCode::CREATED,
        Json(GuestResponse {
            view: GuestView::build(&committed.document),
            guest: committed.value,
        }),
    ))
}

/// Updates the fields present in the body.
async fn update_guest(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<GuestInput>, JsonRejection>,
) -> Result<Json<GuestResponse>, ApiError> {
    let id = parse_id(&id)?;
    let input = parse_body(payload)?;
    let committed = state.guests.update(id, input).await?;

    tracing::info!(id, "Guest updated");

    Ok(Json(GuestResponse {
        view: GuestView::build(&committed.document),
        guest: committed.value,
    }))
}

/// Deletes a guest.
async fn delete_guest(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let id = parse_id(&id)?;
    let committed = state.guests.delete(id).await?;

    tracing::info!(id, "Guest deleted");

    Ok(Json(DeletedResponse {
        view: GuestView::build(&committed.document),
        deleted: committed.value,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12").unwrap(), 12);
        for raw in ["0", "-1", "abc", "1.5", ""] {
            let err = parse_id(raw).unwrap_err();
            assert!(matches!(err, ApiError::UnknownId(_)));
        }
    }
}
