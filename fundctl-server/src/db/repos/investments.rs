//! Investment repository
//!
//! References to investors and funds are checked by the foreign keys at
//! insert time; a dangling id surfaces as [`DbError::MissingReference`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::DbError;
use crate::models::NewInvestment;

const INVESTMENT_COLUMNS: &str = "id, investor_id, fund_id, amount_usd, investment_date";

/// Investment record from database
#[derive(Debug, Clone, FromRow)]
pub struct Investment {
    pub id: Uuid,
    pub investor_id: Uuid,
    pub fund_id: Uuid,
    pub amount_usd: Decimal,
    pub investment_date: NaiveDate,
}

/// Investment repository
pub struct InvestmentRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> InvestmentRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All investments recorded against one fund.
    ///
    /// An unknown fund yields an empty list, not an error.
    pub async fn list_for_fund(&self, fund_id: Uuid) -> Result<Vec<Investment>, DbError> {
        let investments = sqlx::query_as::<_, Investment>(&format!(
            r#"
            SELECT {INVESTMENT_COLUMNS}
            FROM investments
            WHERE fund_id = $1
            ORDER BY investment_date, id
            "#
        ))
        .bind(fund_id)
        .fetch_all(self.pool)
        .await?;

        tracing::debug!(fund_id = %fund_id, count = investments.len(), "listed investments");
        Ok(investments)
    }

    pub async fn get(&self, id: Uuid) -> Result<Investment, DbError> {
        tracing::debug!(investment_id = %id, "fetching investment");
        sqlx::query_as::<_, Investment>(&format!(
            "SELECT {INVESTMENT_COLUMNS} FROM investments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("investment", id))
    }

    pub async fn create(&self, investment: &NewInvestment) -> Result<Investment, DbError> {
        let created = sqlx::query_as::<_, Investment>(&format!(
            r#"
            INSERT INTO investments (investor_id, fund_id, amount_usd, investment_date)
            VALUES ($1, $2, $3, $4)
            RETURNING {INVESTMENT_COLUMNS}
            "#
        ))
        .bind(investment.investor_id)
        .bind(investment.fund_id)
        .bind(investment.amount_usd.value())
        .bind(investment.investment_date.value())
        .fetch_one(self.pool)
        .await
        .map_err(DbError::on_investment_write)?;

        tracing::debug!(
            investment_id = %created.id,
            fund_id = %created.fund_id,
            investor_id = %created.investor_id,
            "investment created"
        );
        Ok(created)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM investments WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("investment", id));
        }
        tracing::debug!(investment_id = %id, "investment deleted");
        Ok(())
    }
}
