//! HTTP server command for the fund API
//!
//! Applies the schema, then serves until Ctrl+C or SIGTERM.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use fundctl_server::db::migrations;
use fundctl_server::http::{run_server, ServerConfig};

use super::database::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "FUNDCTL_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long, env = "FUNDCTL_CORS_PERMISSIVE")]
    pub cors_permissive: bool,

    /// Skip schema creation on startup
    #[arg(long)]
    pub skip_migrations: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let pool = args.database.connect().await?;

    if !args.skip_migrations {
        migrations::run(&pool)
            .await
            .context("Failed to apply schema")?;
    }

    tracing::info!("Starting fundctl server on {}", args.bind);

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    // Blocks until shutdown
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
