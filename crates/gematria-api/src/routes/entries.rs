//! Entry CRUD and bulk upsert handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use gematria_core::model::{Entry, EntryPatch, NewEntry};
use gematria_core::reconcile::ReconcileReport;
use gematria_core_types::RequestId;
use gematria_engine::{EngineCommand, EngineCommandResult, EngineQuery, EngineQueryResult};
use serde::{Deserialize, Serialize};

use super::{run_command, run_query, unexpected};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Entry as returned by the API; `source` is accepted on input but never stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryResponse {
    pub id: i64,
    pub phrase: String,
    pub value: i64,
    pub source: Option<String>,
}

impl From<Entry> for EntryResponse {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id,
            phrase: entry.phrase,
            value: entry.value,
            source: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PhraseParams {
    pub phrase: Option<String>,
}

impl PhraseParams {
    pub(crate) fn require(self) -> ApiResult<String> {
        self.phrase.ok_or(ApiError::MissingParam("phrase"))
    }
}

/// Body of create and upsert-by-phrase; also one element of a bulk body
#[derive(Debug, Deserialize)]
pub struct EntryWrite {
    #[serde(default)]
    pub phrase: Option<String>,
    pub value: i64,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EntryUpdate {
    #[serde(default)]
    pub phrase: Option<String>,
    #[serde(default)]
    pub value: Option<i64>,
    #[serde(default)]
    pub source: Option<String>,
}

fn entry_of(result: EngineCommandResult) -> ApiResult<Json<EntryResponse>> {
    match result {
        EngineCommandResult::Created(entry)
        | EngineCommandResult::Updated(entry)
        | EngineCommandResult::Deleted(entry)
        | EngineCommandResult::Upserted(entry) => Ok(Json(entry.into())),
        other => Err(unexpected(other)),
    }
}

/// POST /entries
pub async fn create(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(body): Json<EntryWrite>,
) -> ApiResult<(StatusCode, Json<EntryResponse>)> {
    let cmd = EngineCommand::EntryCreate {
        phrase: body.phrase.unwrap_or_default(),
        value: body.value,
    };
    let entry = entry_of(run_command(&state, &request_id, cmd).await?)?;
    Ok((StatusCode::CREATED, entry))
}

/// PUT /entries/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<i64>,
    Json(body): Json<EntryUpdate>,
) -> ApiResult<Json<EntryResponse>> {
    let patch = EntryPatch {
        phrase: body.phrase,
        value: body.value,
    };
    let cmd = EngineCommand::EntryUpdate { id, patch };
    entry_of(run_command(&state, &request_id, cmd).await?)
}

/// DELETE /entries/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<i64>,
) -> ApiResult<Json<EntryResponse>> {
    entry_of(run_command(&state, &request_id, EngineCommand::EntryDelete { id }).await?)
}

/// GET /entries/by-phrase?phrase=
pub async fn get_by_phrase(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<PhraseParams>,
) -> ApiResult<Json<EntryResponse>> {
    let phrase = params.require()?;
    let query = EngineQuery::EntryGetByPhrase { phrase };
    match run_query(&state, &request_id, query).await? {
        EngineQueryResult::Entry(entry) => Ok(Json(entry.into())),
        other => Err(unexpected(other)),
    }
}

/// PUT /entries/by-phrase
pub async fn upsert_by_phrase(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(body): Json<EntryWrite>,
) -> ApiResult<Json<EntryResponse>> {
    let cmd = EngineCommand::EntryUpsertByPhrase {
        phrase: body.phrase.unwrap_or_default(),
        value: body.value,
    };
    entry_of(run_command(&state, &request_id, cmd).await?)
}

/// DELETE /entries/by-phrase?phrase=
pub async fn delete_by_phrase(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<PhraseParams>,
) -> ApiResult<Json<EntryResponse>> {
    let phrase = params.require()?;
    let cmd = EngineCommand::EntryDeleteByPhrase { phrase };
    entry_of(run_command(&state, &request_id, cmd).await?)
}

/// PUT /entries/by-phrase/bulk
pub async fn bulk_upsert(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(body): Json<Vec<EntryWrite>>,
) -> ApiResult<Json<ReconcileReport>> {
    let rows = body
        .into_iter()
        .map(|item| NewEntry {
            phrase: item.phrase.unwrap_or_default(),
            value: item.value,
        })
        .collect();

    let cmd = EngineCommand::BulkUpsert { rows };
    match run_command(&state, &request_id, cmd).await? {
        EngineCommandResult::BulkUpserted(report) => Ok(Json(report)),
        other => Err(unexpected(other)),
    }
}
