//! HTTP error mapping
//!
//! Every failure leaves the service as `{"code": ..., "message": ...}`
//! with a status derived from the error kind.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gematria_core::errors::{ExError, ExErrorKind};
use serde::Serialize;
use thiserror::Error;

/// Result alias for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors a handler can return
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Engine(#[from] ExError),

    #[error("Missing query parameter: {0}")]
    MissingParam(&'static str),

    #[error("Invalid query parameter {name}: {raw:?} is not an integer")]
    InvalidParam { name: &'static str, raw: String },

    #[error("Not found")]
    Hidden,

    #[error("Worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

/// Status code for an error kind
pub fn status_for(kind: ExErrorKind) -> StatusCode {
    match kind {
        ExErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ExErrorKind::NotFound => StatusCode::NOT_FOUND,
        ExErrorKind::Conflict => StatusCode::CONFLICT,
        ExErrorKind::StoreUnavailable | ExErrorKind::SchemaMissing => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        ExErrorKind::Persistence
        | ExErrorKind::Io
        | ExErrorKind::Serialization
        | ExErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn client_message(err: &ExError) -> String {
    match err.kind() {
        ExErrorKind::StoreUnavailable => {
            "Database connection failed. Check DATABASE_URL.".to_string()
        }
        ExErrorKind::SchemaMissing => {
            "Database schema missing. Ensure gematria_entries exists (AUTO_CREATE_TABLES=true)."
                .to_string()
        }
        ExErrorKind::InvalidInput | ExErrorKind::NotFound | ExErrorKind::Conflict => {
            err.message().to_string()
        }
        _ => "Internal server error".to_string(),
    }
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::Engine(err) => (status_for(err.kind()), err.code(), client_message(err)),
            ApiError::MissingParam(_) | ApiError::InvalidParam { .. } => (
                StatusCode::BAD_REQUEST,
                ExErrorKind::InvalidInput.code(),
                self.to_string(),
            ),
            ApiError::Hidden => (
                StatusCode::NOT_FOUND,
                ExErrorKind::NotFound.code(),
                self.to_string(),
            ),
            ApiError::Join(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ExErrorKind::Internal.code(),
                "Internal server error".to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let request_id = match &self {
            ApiError::Engine(err) => err.request_id().map(|id| id.as_str()),
            _ => None,
        };
        if status.is_server_error() {
            tracing::error!(
                status = status.as_u16(),
                err_code = code,
                request_id,
                error = %self,
                "request failed"
            );
        } else {
            tracing::debug!(
                status = status.as_u16(),
                err_code = code,
                request_id,
                error = %self,
                "request rejected"
            );
        }
        (status, Json(ErrorBody { code, message })).into_response()
    }
}
