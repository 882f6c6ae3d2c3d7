//! Responses for requests no route handles

use axum::http::{Method, StatusCode, Uri};

use crate::http::error::ApiError;

/// Unknown path: plain-text 404.
pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Known path, unsupported method: JSON 404 naming the endpoint.
pub async fn endpoint_not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::EndpointNotFound {
        method,
        path: uri.path().to_owned(),
    }
}
