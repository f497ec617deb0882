//! Gematria API - HTTP service
//!
//! axum router over the engine: stored lookups, value matches, entry CRUD
//! and bulk upsert by phrase, plus health and diagnostics endpoints.

pub mod config;
pub mod error;
pub mod request_id;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::build_router;
pub use state::AppState;
