//! Investor repository
//!
//! Email uniqueness is left to the `investors_email_key` constraint;
//! violations come back as [`DbError::DuplicateEmail`].

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::DbError;
use crate::models::{InvestorType, NewInvestor};

const INVESTOR_COLUMNS: &str = "id, name, investor_type, email, created_at";

/// Investor record from database
#[derive(Debug, Clone, FromRow)]
pub struct Investor {
    pub id: Uuid,
    pub name: String,
    pub investor_type: InvestorType,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Investor repository
pub struct InvestorRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> InvestorRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Investor>, DbError> {
        let investors = sqlx::query_as::<_, Investor>(&format!(
            "SELECT {INVESTOR_COLUMNS} FROM investors ORDER BY created_at, id"
        ))
        .fetch_all(self.pool)
        .await?;

        tracing::debug!(count = investors.len(), "listed investors");
        Ok(investors)
    }

    pub async fn get(&self, id: Uuid) -> Result<Investor, DbError> {
        tracing::debug!(investor_id = %id, "fetching investor");
        sqlx::query_as::<_, Investor>(&format!(
            "SELECT {INVESTOR_COLUMNS} FROM investors WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("investor", id))
    }

    pub async fn create(&self, investor: &NewInvestor) -> Result<Investor, DbError> {
        let created = sqlx::query_as::<_, Investor>(&format!(
            r#"
            INSERT INTO investors (name, investor_type, email)
            VALUES ($1, $2, $3)
            RETURNING {INVESTOR_COLUMNS}
            "#
        ))
        .bind(investor.name.as_str())
        .bind(investor.investor_type)
        .bind(investor.email.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| DbError::on_investor_write(e, investor.email.as_str()))?;

        tracing::debug!(investor_id = %created.id, "investor created");
        Ok(created)
    }

    /// Replace every mutable field of an investor.
    pub async fn update(&self, id: Uuid, investor: &NewInvestor) -> Result<Investor, DbError> {
        let updated = sqlx::query_as::<_, Investor>(&format!(
            r#"
            UPDATE investors SET
                name = $2,
                investor_type = $3,
                email = $4
            WHERE id = $1
            RETURNING {INVESTOR_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(investor.name.as_str())
        .bind(investor.investor_type)
        .bind(investor.email.as_str())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| DbError::on_investor_write(e, investor.email.as_str()))?
        .ok_or_else(|| DbError::not_found("investor", id))?;

        tracing::debug!(investor_id = %id, "investor updated");
        Ok(updated)
    }

    /// Delete an investor and, by cascade, their investments.
    pub async fn delete(&self, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM investors WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("investor", id));
        }
        tracing::debug!(investor_id = %id, "investor deleted");
        Ok(())
    }
}
