//! Fund endpoints
//!
//! `PUT /funds` is a partial update: only fields present in the body change.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::db::repos::{Fund, FundRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{record_id, JsonBody};
use crate::http::server::AppState;
use crate::models::{CreateFundRequest, FundStatus, UpdateFundRequest};

/// Fund response
#[derive(Debug, Serialize)]
pub struct FundResponse {
    pub id: Uuid,
    pub name: String,
    pub vintage_year: i32,
    pub target_size_usd: Decimal,
    pub status: FundStatus,
    pub created_at: String,
}

impl From<Fund> for FundResponse {
    fn from(f: Fund) -> Self {
        Self {
            id: f.id,
            name: f.name,
            vintage_year: f.vintage_year,
            target_size_usd: f.target_size_usd,
            status: f.status,
            created_at: f.created_at.to_rfc3339(),
        }
    }
}

/// GET /funds - list all funds
async fn list_funds(State(state): State<Arc<AppState>>) -> Result<Json<Vec<FundResponse>>, ApiError> {
    let funds = FundRepo::new(&state.pool).list().await?;
    Ok(Json(funds.into_iter().map(FundResponse::from).collect()))
}

/// GET /funds/{id} - get a single fund
async fn get_fund(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<FundResponse>, ApiError> {
    let id = record_id("fund", &id)?;
    let fund = FundRepo::new(&state.pool).get(id).await?;
    Ok(Json(FundResponse::from(fund)))
}

/// POST /funds - create a new fund
async fn create_fund(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateFundRequest>,
) -> Result<(StatusCode, Json<FundResponse>), ApiError> {
    let new = req.validate()?;
    let fund = FundRepo::new(&state.pool).create(&new).await?;
    Ok((StatusCode::CREATED, Json(FundResponse::from(fund))))
}

/// PUT /funds - update the fund named by the body's `id`
async fn update_fund(
    State(state): State<Arc<AppState>>,
    JsonBody(mut req): JsonBody<UpdateFundRequest>,
) -> Result<Json<FundResponse>, ApiError> {
    let raw_id = req
        .take_id()
        .ok_or(ApiError::MissingId { resource: "fund" })?;
    let changes = req.validate()?;
    let id = record_id("fund", &raw_id)?;

    let fund = FundRepo::new(&state.pool).update(id, &changes).await?;
    Ok(Json(FundResponse::from(fund)))
}

/// DELETE /funds/{id} - delete a fund and its investments
async fn delete_fund(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = record_id("fund", &id)?;
    FundRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Fund routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/funds", get(list_funds).post(create_fund).put(update_fund))
        .route("/funds/{id}", get(get_fund).delete(delete_fund))
}
