//! Demo data for local development
//!
//! Inserts two funds, two investors and three investments through the
//! repositories, so the same validation and constraints apply.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::{DbError, FundRepo, InvestmentRepo, InvestorRepo};
use crate::models::{
    CreateFundRequest, CreateInvestmentRequest, InvestorRequest, NewFund, NewInvestor,
    ValidationErrors,
};

/// Seeding failure
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("invalid seed record: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error(transparent)]
    Db(#[from] DbError),
}

/// Counts of inserted records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub funds: usize,
    pub investors: usize,
    pub investments: usize,
}

/// Insert the demo data set.
///
/// Investor emails carry a timestamp so the command can be re-run
/// without tripping the email uniqueness constraint.
pub async fn seed(pool: &PgPool) -> Result<SeedSummary, SeedError> {
    tracing::info!("Seeding database...");
    let stamp = Utc::now().timestamp_millis();

    let funds = FundRepo::new(pool);
    let growth = funds
        .create(&fund("Growth Fund I", 2024, 5_000_000, "Fundraising")?)
        .await?;
    let opportunity = funds
        .create(&fund("Opportunity Fund II", 2023, 10_000_000, "Investing")?)
        .await?;
    tracing::info!("Funds created");

    let investors = InvestorRepo::new(pool);
    let alice = investors
        .create(&investor(
            "Alice Smith",
            "Individual",
            &format!("alice-{stamp}@example.com"),
        )?)
        .await?;
    let capital = investors
        .create(&investor(
            "Big Capital LP",
            "Institution",
            &format!("capital.seed.{stamp}@example.com"),
        )?)
        .await?;
    tracing::info!("Investors created");

    let investments = InvestmentRepo::new(pool);
    let plan = [
        (growth.id, alice.id, 100_000, "2024-01-15"),
        (growth.id, capital.id, 500_000, "2024-02-01"),
        (opportunity.id, capital.id, 1_000_000, "2023-06-10"),
    ];
    for (fund_id, investor_id, amount, date) in plan {
        let new = CreateInvestmentRequest {
            investor_id: Some(investor_id.to_string()),
            fund_id: None,
            amount_usd: Some(Decimal::from(amount)),
            investment_date: Some(date.to_owned()),
        }
        .validate_for_fund(fund_id)?;
        investments.create(&new).await?;
    }
    tracing::info!("Investments created");

    Ok(SeedSummary {
        funds: 2,
        investors: 2,
        investments: plan.len(),
    })
}

fn fund(
    name: &str,
    vintage_year: i64,
    target: i64,
    status: &str,
) -> Result<NewFund, ValidationErrors> {
    CreateFundRequest {
        name: Some(name.to_owned()),
        vintage_year: Some(vintage_year),
        target_size_usd: Some(Decimal::from(target)),
        status: Some(status.to_owned()),
    }
    .validate()
}

fn investor(name: &str, kind: &str, email: &str) -> Result<NewInvestor, ValidationErrors> {
    InvestorRequest {
        id: None,
        name: Some(name.to_owned()),
        investor_type: Some(kind.to_owned()),
        email: Some(email.to_owned()),
    }
    .validate()
}
