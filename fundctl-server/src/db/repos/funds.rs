//! Fund repository
//!
//! Thin translations to single statements on `funds`:
//! - update: COALESCE per column, so omitted fields keep their value
//! - delete: cascades to investments in the store

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::DbError;
use crate::models::{FundChanges, FundStatus, NewFund};

const FUND_COLUMNS: &str = "id, name, vintage_year, target_size_usd, status, created_at";

/// Fund record from database
#[derive(Debug, Clone, FromRow)]
pub struct Fund {
    pub id: Uuid,
    pub name: String,
    pub vintage_year: i32,
    pub target_size_usd: Decimal,
    pub status: FundStatus,
    pub created_at: DateTime<Utc>,
}

/// Fund repository
pub struct FundRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> FundRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every fund, oldest first.
    pub async fn list(&self) -> Result<Vec<Fund>, DbError> {
        let funds = sqlx::query_as::<_, Fund>(&format!(
            "SELECT {FUND_COLUMNS} FROM funds ORDER BY created_at, id"
        ))
        .fetch_all(self.pool)
        .await?;

        tracing::debug!(count = funds.len(), "listed funds");
        Ok(funds)
    }

    /// Get a single fund by ID.
    pub async fn get(&self, id: Uuid) -> Result<Fund, DbError> {
        tracing::debug!(fund_id = %id, "fetching fund");
        sqlx::query_as::<_, Fund>(&format!("SELECT {FUND_COLUMNS} FROM funds WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("fund", id))
    }

    pub async fn create(&self, fund: &NewFund) -> Result<Fund, DbError> {
        let created = sqlx::query_as::<_, Fund>(&format!(
            r#"
            INSERT INTO funds (name, vintage_year, target_size_usd, status)
            VALUES ($1, $2, $3, $4)
            RETURNING {FUND_COLUMNS}
            "#
        ))
        .bind(fund.name.as_str())
        .bind(fund.vintage_year.value())
        .bind(fund.target_size_usd.value())
        .bind(fund.status)
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(fund_id = %created.id, "fund created");
        Ok(created)
    }

    /// Apply a partial update; unsupplied columns are left untouched.
    pub async fn update(&self, id: Uuid, changes: &FundChanges) -> Result<Fund, DbError> {
        let updated = sqlx::query_as::<_, Fund>(&format!(
            r#"
            UPDATE funds SET
                name = COALESCE($2, name),
                vintage_year = COALESCE($3, vintage_year),
                target_size_usd = COALESCE($4, target_size_usd),
                status = COALESCE($5, status)
            WHERE id = $1
            RETURNING {FUND_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.name.as_ref().map(|n| n.as_str()))
        .bind(changes.vintage_year.map(|y| y.value()))
        .bind(changes.target_size_usd.map(|a| a.value()))
        .bind(changes.status)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("fund", id))?;

        tracing::debug!(fund_id = %id, "fund updated");
        Ok(updated)
    }

    /// Delete a fund and, by cascade, its investments.
    pub async fn delete(&self, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM funds WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("fund", id));
        }
        tracing::debug!(fund_id = %id, "fund deleted");
        Ok(())
    }
}
