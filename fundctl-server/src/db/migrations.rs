//! Schema creation for funds, investors and investments
//!
//! Every statement is idempotent so `run` is safe on each startup.

use sqlx::{PgConnection, PgPool};

/// Advisory lock key serializing concurrent migrators.
const MIGRATION_LOCK_KEY: i64 = 0x66_75_6e_64;

/// Create enum types, tables and indexes if missing.
///
/// Runs in one transaction holding an advisory lock, so concurrent
/// callers apply the schema one after another.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running migrations...");

    let mut tx = pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(MIGRATION_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    create_enum(&mut tx, "fund_status", "'Fundraising', 'Investing', 'Closed'").await?;
    create_enum(
        &mut tx,
        "investor_type",
        "'Individual', 'Institution', 'Family Office'",
    )
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS funds (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name TEXT NOT NULL,
            vintage_year INTEGER NOT NULL,
            target_size_usd NUMERIC NOT NULL,
            status fund_status NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS investors (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name TEXT NOT NULL,
            investor_type investor_type NOT NULL,
            email TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            CONSTRAINT investors_email_key UNIQUE (email)
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS investments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            investor_id UUID NOT NULL REFERENCES investors(id) ON DELETE CASCADE,
            fund_id UUID NOT NULL REFERENCES funds(id) ON DELETE CASCADE,
            amount_usd NUMERIC NOT NULL,
            investment_date DATE NOT NULL
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_investments_fund ON investments(fund_id)")
        .execute(&mut *tx)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_investments_investor ON investments(investor_id)")
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!("Migrations complete");
    Ok(())
}

/// Drop every table and enum type created by [`run`].
pub async fn drop_all(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::warn!("Dropping all tables");

    for table in ["investments", "investors", "funds"] {
        sqlx::query(&format!("DROP TABLE IF EXISTS {} CASCADE", table))
            .execute(pool)
            .await?;
    }
    for ty in ["fund_status", "investor_type"] {
        sqlx::query(&format!("DROP TYPE IF EXISTS {} CASCADE", ty))
            .execute(pool)
            .await?;
    }

    Ok(())
}

// Postgres has no CREATE TYPE IF NOT EXISTS.
async fn create_enum(
    conn: &mut PgConnection,
    name: &str,
    variants: &str,
) -> Result<(), sqlx::Error> {
    let statement = format!(
        r#"
        DO $$ BEGIN
            CREATE TYPE {name} AS ENUM ({variants});
        EXCEPTION
            WHEN duplicate_object THEN NULL;
        END $$
        "#
    );
    sqlx::query(&statement).execute(conn).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pool;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn run_is_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");

        run(&pool).await.expect("first run");
        run(&pool).await.expect("second run");

        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_name IN ('funds', 'investors', 'investments')",
        )
        .fetch_one(&pool)
        .await
        .expect("query failed");
        assert_eq!(count, 3);
    }
}
