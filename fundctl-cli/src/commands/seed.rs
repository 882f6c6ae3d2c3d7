//! Demo data command

use anyhow::{Context, Result};
use clap::Parser;

use fundctl_server::db::{migrations, seed};

use super::database::DatabaseArgs;

#[derive(Parser, Debug)]
pub struct SeedArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Apply the schema and insert the demo funds, investors and investments.
pub async fn run_seed(args: SeedArgs) -> Result<()> {
    let pool = args.database.connect().await?;
    migrations::run(&pool)
        .await
        .context("Failed to apply schema")?;

    let summary = seed::seed(&pool).await.context("Seeding failed")?;
    pool.close().await;

    println!(
        "Seeded {} funds, {} investors, {} investments",
        summary.funds, summary.investors, summary.investments
    );
    Ok(())
}
