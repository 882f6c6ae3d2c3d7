//! Investment endpoints
//!
//! Two creation paths share one validation rule set:
//! - `POST /funds/{id}/investments` takes the fund from the path
//! - `POST /investments` takes it from the body
//!
//! `GET /investments/{id}` looks up one investment; listing by fund is
//! only available under the fund.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::db::repos::{Investment, InvestmentRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{record_id, JsonBody};
use crate::http::server::AppState;
use crate::models::CreateInvestmentRequest;

/// Investment response
#[derive(Debug, Serialize)]
pub struct InvestmentResponse {
    pub id: Uuid,
    pub investor_id: Uuid,
    pub fund_id: Uuid,
    pub amount_usd: Decimal,
    pub investment_date: String,
}

impl From<Investment> for InvestmentResponse {
    fn from(i: Investment) -> Self {
        Self {
            id: i.id,
            investor_id: i.investor_id,
            fund_id: i.fund_id,
            amount_usd: i.amount_usd,
            investment_date: i.investment_date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// GET /funds/{id}/investments - list investments in a fund
async fn list_fund_investments(
    State(state): State<Arc<AppState>>,
    Path(fund_id): Path<String>,
) -> Result<Json<Vec<InvestmentResponse>>, ApiError> {
    let fund_id = record_id("fund", &fund_id)?;
    let investments = InvestmentRepo::new(&state.pool)
        .list_for_fund(fund_id)
        .await?;
    Ok(Json(
        investments.into_iter().map(InvestmentResponse::from).collect(),
    ))
}

/// POST /funds/{id}/investments - record an investment in a fund
async fn create_fund_investment(
    State(state): State<Arc<AppState>>,
    Path(fund_id): Path<String>,
    JsonBody(req): JsonBody<CreateInvestmentRequest>,
) -> Result<(StatusCode, Json<InvestmentResponse>), ApiError> {
    let fund_id = record_id("fund", &fund_id)?;
    let new = req.validate_for_fund(fund_id)?;
    let investment = InvestmentRepo::new(&state.pool).create(&new).await?;
    Ok((StatusCode::CREATED, Json(InvestmentResponse::from(investment))))
}

/// POST /investments - record an investment naming its fund in the body
async fn create_investment(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateInvestmentRequest>,
) -> Result<(StatusCode, Json<InvestmentResponse>), ApiError> {
    let new = req.validate()?;
    let investment = InvestmentRepo::new(&state.pool).create(&new).await?;
    Ok((StatusCode::CREATED, Json(InvestmentResponse::from(investment))))
}

/// GET /investments/{id} - get a single investment
async fn get_investment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<InvestmentResponse>, ApiError> {
    let id = record_id("investment", &id)?;
    let investment = InvestmentRepo::new(&state.pool).get(id).await?;
    Ok(Json(InvestmentResponse::from(investment)))
}

/// DELETE /investments/{id}
async fn delete_investment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = record_id("investment", &id)?;
    InvestmentRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Investment routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/funds/{id}/investments",
            get(list_fund_investments).post(create_fund_investment),
        )
        .route("/investments", post(create_investment))
        .route(
            "/investments/{id}",
            get(get_investment).delete(delete_investment),
        )
}
