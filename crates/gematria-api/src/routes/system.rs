//! Index, health and diagnostics handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use gematria_core_types::RequestId;
use gematria_engine::{EngineQuery, EngineQueryResult, HealthResult};
use serde_json::{json, Value};

use super::{run_query, unexpected};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const ENDPOINTS: [&str; 8] = [
    "/gematria",
    "/gematria/compute",
    "/matches",
    "/entries",
    "/entries/{id}",
    "/entries/by-phrase",
    "/entries/by-phrase/bulk",
    "/health",
];

/// GET /
pub async fn index() -> Json<Value> {
    Json(json!({
        "service": "Gematria API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": ENDPOINTS,
    }))
}

/// GET /health; 503 when the database cannot be reached
pub async fn health(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> ApiResult<(StatusCode, Json<HealthResult>)> {
    match run_query(&state, &request_id, EngineQuery::Health).await? {
        EngineQueryResult::Health(health) => {
            let status = if health.ok {
                StatusCode::OK
            } else {
                StatusCode::SERVICE_UNAVAILABLE
            };
            Ok((status, Json(health)))
        }
        other => Err(unexpected(other)),
    }
}

/// GET /debug/db; hidden unless debug is enabled
pub async fn debug_db(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> ApiResult<Json<Value>> {
    if !state.debug {
        return Err(ApiError::Hidden);
    }
    match run_query(&state, &request_id, EngineQuery::DebugInfo).await? {
        EngineQueryResult::DebugInfo(info) => Ok(Json(json!({
            "ok": true,
            "database": state.database_label,
            "entries_count": info.entries_count,
        }))),
        other => Err(unexpected(other)),
    }
}
