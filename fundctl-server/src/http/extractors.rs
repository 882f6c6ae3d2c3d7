//! Custom Axum extractors

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::error::ApiError;
use crate::models::ValidationError;

/// JSON body whose decode failures become 400 validation errors.
///
/// Axum's own `Json` rejection answers 415/422 with plain text; request
/// bodies here always fail with the JSON error shape instead.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::from(ValidationError::MalformedBody {
                reason: rejection.body_text(),
            })),
        }
    }
}

/// Resolve a record id taken from a path or an update body.
///
/// Text that is not a UUID cannot name any stored record, so it is
/// answered as not-found.
pub fn record_id(resource: &'static str, raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound {
        resource,
        id: raw.to_owned(),
    })
}
