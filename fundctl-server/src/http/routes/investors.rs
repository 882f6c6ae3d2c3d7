//! Investor endpoints
//!
//! `PUT /investors` replaces the whole record: every field is required,
//! validated with the same rules as creation.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use crate::db::repos::{Investor, InvestorRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{record_id, JsonBody};
use crate::http::server::AppState;
use crate::models::{InvestorRequest, InvestorType};

/// Investor response
#[derive(Debug, Serialize)]
pub struct InvestorResponse {
    pub id: Uuid,
    pub name: String,
    pub investor_type: InvestorType,
    pub email: String,
    pub created_at: String,
}

impl From<Investor> for InvestorResponse {
    fn from(i: Investor) -> Self {
        Self {
            id: i.id,
            name: i.name,
            investor_type: i.investor_type,
            email: i.email,
            created_at: i.created_at.to_rfc3339(),
        }
    }
}

/// GET /investors - list all investors
async fn list_investors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<InvestorResponse>>, ApiError> {
    let investors = InvestorRepo::new(&state.pool).list().await?;
    Ok(Json(investors.into_iter().map(InvestorResponse::from).collect()))
}

/// GET /investors/{id} - get a single investor
async fn get_investor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<InvestorResponse>, ApiError> {
    let id = record_id("investor", &id)?;
    let investor = InvestorRepo::new(&state.pool).get(id).await?;
    Ok(Json(InvestorResponse::from(investor)))
}

/// POST /investors - create a new investor
async fn create_investor(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<InvestorRequest>,
) -> Result<(StatusCode, Json<InvestorResponse>), ApiError> {
    let new = req.validate()?;
    let investor = InvestorRepo::new(&state.pool).create(&new).await?;
    Ok((StatusCode::CREATED, Json(InvestorResponse::from(investor))))
}

/// PUT /investors - replace the investor named by the body's `id`
async fn update_investor(
    State(state): State<Arc<AppState>>,
    JsonBody(mut req): JsonBody<InvestorRequest>,
) -> Result<Json<InvestorResponse>, ApiError> {
    let raw_id = req
        .take_id()
        .ok_or(ApiError::MissingId { resource: "investor" })?;
    let replacement = req.validate()?;
    let id = record_id("investor", &raw_id)?;

    let investor = InvestorRepo::new(&state.pool)
        .update(id, &replacement)
        .await?;
    Ok(Json(InvestorResponse::from(investor)))
}

/// DELETE /investors/{id} - delete an investor and their investments
async fn delete_investor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = record_id("investor", &id)?;
    InvestorRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Investor routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/investors",
            get(list_investors).post(create_investor).put(update_investor),
        )
        .route("/investors/{id}", get(get_investor).delete(delete_investor))
}
