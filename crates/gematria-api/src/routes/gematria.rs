//! Lookup, compute and match handlers

use axum::extract::{Query, State};
use axum::{Extension, Json};
use gematria_core_types::RequestId;
use gematria_engine::{ComputeResult, EngineQuery, EngineQueryResult, LookupResult};
use serde::Deserialize;

use super::entries::{EntryResponse, PhraseParams};
use super::run_query;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Raw `/matches` parameters; parsed here so bad numbers get the JSON error body
#[derive(Debug, Deserialize)]
pub struct MatchesParams {
    pub value: Option<String>,
    pub top: Option<String>,
}

fn parse_int(name: &'static str, raw: Option<String>) -> ApiResult<Option<i64>> {
    raw.map(|raw| {
        raw.trim()
            .parse::<i64>()
            .map_err(|_| ApiError::InvalidParam { name, raw })
    })
    .transpose()
}

/// GET /gematria?phrase=
pub async fn lookup(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<PhraseParams>,
) -> ApiResult<Json<LookupResult>> {
    let phrase = params.require()?;
    match run_query(&state, &request_id, EngineQuery::Lookup { phrase }).await? {
        EngineQueryResult::Lookup(result) => Ok(Json(result)),
        other => Err(super::unexpected(other)),
    }
}

/// GET /gematria/compute?phrase=
pub async fn compute(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<PhraseParams>,
) -> ApiResult<Json<ComputeResult>> {
    let phrase = params.require()?;
    match run_query(&state, &request_id, EngineQuery::Compute { phrase }).await? {
        EngineQueryResult::Compute(result) => Ok(Json(result)),
        other => Err(super::unexpected(other)),
    }
}

/// GET /matches?value=&top=
pub async fn matches(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<MatchesParams>,
) -> ApiResult<Json<Vec<EntryResponse>>> {
    let value = parse_int("value", params.value)?.ok_or(ApiError::MissingParam("value"))?;
    let top = parse_int("top", params.top)?;
    let query = EngineQuery::Matches { value, top };
    match run_query(&state, &request_id, query).await? {
        EngineQueryResult::Matches(entries) => {
            Ok(Json(entries.into_iter().map(EntryResponse::from).collect()))
        }
        other => Err(super::unexpected(other)),
    }
}
