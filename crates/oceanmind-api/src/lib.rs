//! OceanMind API crate - axum HTTP server and route handlers.
//!
//! Provides the REST API consumed by the dashboard UI: snapshot and
//! time-series retrieval, stakeholder insights, conversation turns, and
//! health checks.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
