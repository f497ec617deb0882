//! Router and handlers

pub mod entries;
pub mod gematria;
pub mod system;

use std::sync::Arc;

use axum::extract::Request;
use axum::routing::{get, post, put};
use axum::{middleware, Router};
use gematria_core_types::RequestId;
use gematria_engine::{
    apply_engine_command, apply_engine_query, EngineCommand, EngineCommandResult, EngineQuery,
    EngineQueryResult,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use gematria_core::errors::{ExError, ExErrorKind};

use crate::error::{ApiError, ApiResult};
use crate::request_id::assign_request_id;
use crate::state::AppState;

/// Build the service router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(system::index))
        .route("/health", get(system::health))
        .route("/debug/db", get(system::debug_db))
        .route("/gematria", get(gematria::lookup))
        .route("/gematria/compute", get(gematria::compute))
        .route("/matches", get(gematria::matches))
        .route("/entries", post(entries::create))
        .route(
            "/entries/by-phrase",
            get(entries::get_by_phrase)
                .put(entries::upsert_by_phrase)
                .delete(entries::delete_by_phrase),
        )
        .route("/entries/by-phrase/bulk", put(entries::bulk_upsert))
        .route("/entries/:id", put(entries::update).delete(entries::delete))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(assign_request_id))
                .layer(TraceLayer::new_for_http().make_span_with(|req: &Request| {
                    let request_id = req
                        .extensions()
                        .get::<RequestId>()
                        .map(|id| id.to_string())
                        .unwrap_or_default();
                    tracing::info_span!(
                        "http_request",
                        method = %req.method(),
                        uri = %req.uri(),
                        request_id = %request_id,
                    )
                })),
        )
        .with_state(state)
}

/// Run a write command on the blocking pool
///
/// Engine errors come back tagged with the request's id.
pub(crate) async fn run_command(
    state: &AppState,
    request_id: &RequestId,
    cmd: EngineCommand,
) -> ApiResult<EngineCommandResult> {
    let store = Arc::clone(&state.store);
    let reconciler = state.reconciler;
    let result =
        tokio::task::spawn_blocking(move || apply_engine_command(cmd, store.as_ref(), &reconciler))
            .await?;
    result.map_err(|e| tagged(e, request_id))
}

/// Run a read-only query on the blocking pool
pub(crate) async fn run_query(
    state: &AppState,
    request_id: &RequestId,
    query: EngineQuery,
) -> ApiResult<EngineQueryResult> {
    let store = Arc::clone(&state.store);
    let result =
        tokio::task::spawn_blocking(move || apply_engine_query(query, store.as_ref())).await?;
    result.map_err(|e| tagged(e, request_id))
}

fn tagged(err: ExError, request_id: &RequestId) -> ApiError {
    ApiError::Engine(err.with_request_id(request_id.clone()))
}

/// An engine answer that does not fit the request that produced it
pub(crate) fn unexpected(result: impl std::fmt::Debug) -> ApiError {
    ApiError::Engine(
        ExError::new(ExErrorKind::Internal)
            .with_message(format!("unexpected engine result: {:?}", result)),
    )
}
