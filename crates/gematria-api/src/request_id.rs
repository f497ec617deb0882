//! Per-request correlation ids
//!
//! Honours an inbound `x-request-id`, mints one otherwise, stores it in
//! the request extensions for the trace span and echoes it on the response.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use gematria_core_types::RequestId;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Middleware assigning a `RequestId` to every request
pub async fn assign_request_id(mut req: Request, next: Next) -> Response {
    let request_id = RequestId::from_header(
        req.headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok()),
    );
    req.extensions_mut().insert(request_id.clone());

    let mut response = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
