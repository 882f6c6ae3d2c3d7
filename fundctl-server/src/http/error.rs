//! API error types with IntoResponse
//!
//! Errors are converted to JSON bodies of the shape
//! `{ "error": string, "message"?: string, "details"?: [...] }`.

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::{ValidationError, ValidationErrors};

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationErrors),

    /// Update body without an `id` (400)
    MissingId { resource: &'static str },

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Unique email constraint hit (400)
    DuplicateEmail { email: String },

    /// Investment references an unknown investor or fund (400)
    MissingReference,

    /// Known path, unsupported method (404)
    EndpointNotFound { method: Method, path: String },

    /// Database error (500, logged)
    Database(DbError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::MissingId { .. }
            | Self::DuplicateEmail { .. }
            | Self::MissingReference => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } | Self::EndpointNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Validation(errors) => json!({
                "error": "Invalid request data",
                "message": "Please check your input fields and types",
                "details": errors.issues(),
            }),
            Self::MissingId { resource } => json!({
                "error": format!("Cannot update {}: 'id' field is missing in request body", resource)
            }),
            Self::NotFound { resource, id } => json!({
                "error": format!("No {} found with id '{}'", resource, id)
            }),
            Self::DuplicateEmail { email } => json!({
                "error": format!("An investor with email '{}' already exists", email)
            }),
            Self::MissingReference => json!({
                "error": "Foreign key constraint failed",
                "message": "Either the investor_id or fund_id does not exist in the database"
            }),
            Self::EndpointNotFound { method, path } => json!({
                "error": format!("Endpoint '{} {}' not found", method, path)
            }),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                json!({
                    "error": "Internal server error",
                    "message": "An unexpected error occurred while processing the request"
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(e: ValidationErrors) -> Self {
        Self::Validation(e)
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e.into())
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::DuplicateEmail { email } => Self::DuplicateEmail { email },
            DbError::MissingReference => Self::MissingReference,
            DbError::Sqlx(_) => Self::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_error_is_400_with_details() {
        let (status, body) =
            body_json(ApiError::from(ValidationError::Empty { field: "name" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request data");
        assert_eq!(body["details"][0]["field"], "name");
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let (status, body) = body_json(ApiError::NotFound {
            resource: "fund",
            id: "abc".into(),
        })
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "No fund found with id 'abc'");
    }

    #[tokio::test]
    async fn duplicate_email_names_the_email() {
        let (status, body) = body_json(ApiError::from(DbError::DuplicateEmail {
            email: "a@x.com".into(),
        }))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("a@x.com"));
        assert!(message.contains("already exists"));
    }

    #[tokio::test]
    async fn missing_reference_is_400() {
        let (status, body) = body_json(ApiError::from(DbError::MissingReference)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Foreign key constraint failed");
    }

    #[tokio::test]
    async fn database_error_is_opaque_500() {
        let (status, body) =
            body_json(ApiError::from(DbError::Sqlx(sqlx::Error::PoolTimedOut))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.to_string().contains("PoolTimedOut"));
        assert!(!body.to_string().contains("pool timed out"));
    }
}
