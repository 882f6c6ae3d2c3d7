//! Drop every table and enum type
//!
//! Refuses to run when FUNDCTL_ENV is `production`. Asks for
//! confirmation unless `--yes` is given.

use anyhow::{bail, Context, Result};
use clap::Parser;
use inquire::Confirm;

use fundctl_server::db::migrations;

use super::database::DatabaseArgs;

#[derive(Parser, Debug)]
pub struct DestroyArgs {
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Deployment environment
    #[arg(long, env = "FUNDCTL_ENV", default_value = "development")]
    pub env: String,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

pub async fn run_destroy(args: DestroyArgs) -> Result<()> {
    if is_production(&args.env) {
        bail!("Refusing to drop tables in production (FUNDCTL_ENV={})", args.env);
    }

    if !args.yes {
        let confirmed = Confirm::new("Drop all funds, investors and investments?")
            .with_default(false)
            .prompt()
            .context("Confirmation prompt failed")?;
        if !confirmed {
            println!("Aborted");
            return Ok(());
        }
    }

    let pool = args.database.connect().await?;
    migrations::drop_all(&pool)
        .await
        .context("Failed to drop tables")?;
    pool.close().await;

    println!("All tables dropped");
    Ok(())
}

fn is_production(env: &str) -> bool {
    env.trim().eq_ignore_ascii_case("production")
}
