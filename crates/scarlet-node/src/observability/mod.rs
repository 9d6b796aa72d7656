//! # Observability Module
//!
//! - **Structured Logging**: pretty or JSON logs via `tracing-subscriber`
//! - **Request Tracing**: request IDs propagated through a span per request
//!
//! ## Usage
//!
//! ```rust,ignore
//! use axum::Router;
//! use scarlet_node::observability::{init_logging, request_id_layer};
//!
//! init_logging("info", true);
//!
//! let app: Router<()> = Router::new()
//!     .layer(request_id_layer());
//! ```

mod logging;
pub mod middleware;

pub use logging::{init_logging, LogFormat};
pub use middleware::{request_id_layer, RequestId, REQUEST_ID_HEADER};
