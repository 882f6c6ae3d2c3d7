//! Connection arguments shared by every command

use anyhow::{Context, Result};
use clap::Args;

use fundctl_server::db::{create_pool_with_options, PgPool, DEFAULT_MAX_CONNECTIONS};

#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum connections in the pool
    #[arg(long, env = "FUNDCTL_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl DatabaseArgs {
    /// Open the pool, failing with a hint when no URL was given.
    pub async fn connect(&self) -> Result<PgPool> {
        let database_url = self
            .database_url
            .as_deref()
            .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

        create_pool_with_options(database_url, self.max_connections)
            .await
            .context("Failed to create database pool")
    }
}
