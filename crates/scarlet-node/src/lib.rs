//! # Scarlet Node
//!
//! HTTP service for the Scarlet Drive guest list.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                 Scarlet Node                  │
//! ├───────────────────────────────────────────────┤
//! │  HTTP API (axum)                              │
//! │  • /api/scarlet-drive/guests  (CRUD + view)   │
//! │  • /health, /health/live, /health/ready       │
//! ├───────────────────────────────────────────────┤
//! │  GuestStore (scarlet-storage)                 │
//! │  • write serializer  • atomic file replace    │
//! ├───────────────────────────────────────────────┤
//! │  Rules and views (scarlet-guests)             │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run --bin scarlet-node -- --api-addr 127.0.0.1:8080 --data-file ./data/guests.json
//! ```
//!
//! ## Example: Building the router
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use scarlet_node::api::{create_router, AppState};
//! use scarlet_node::health::HealthState;
//! use scarlet_storage::GuestStore;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let guests = Arc::new(GuestStore::open("./data/guests.json").await?);
//! let state = AppState {
//!     health: HealthState::new(guests.clone()),
//!     guests,
//! };
//! let app = create_router(state);
//! # let _ = app;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`api`] - Router, shared state, and the JSON error envelope
//! - [`guests_api`] - Guest list endpoints
//! - [`health`] - Liveness and readiness probes
//! - [`observability`] - Logging setup and request-id middleware
//! - [`config`] - Node configuration

pub mod api;
pub mod config;
pub mod guests_api;
pub mod health;
pub mod observability;
