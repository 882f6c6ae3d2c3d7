//! fundctl CLI - venture fund registry service and maintenance
//!
//! This is the main entry point for the fundctl command-line tool, which provides:
//! - The HTTP API for funds, investors and investments (`serve`)
//! - Schema creation (`migrate`)
//! - Demo data for local development (`seed`)
//! - Dropping every table (`destroy`)
//!
//! Settings come from flags, then environment, then a `.env` file in the
//! working directory.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "fundctl",
    author,
    version,
    about = "REST API for venture funds, investors and their investments",
    long_about = "Serve a JSON API over PostgreSQL for tracking venture funds, the investors \
                  committing capital to them, and the investments linking the two."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server (applies the schema first)
    Serve(commands::serve::ServeArgs),
    /// Create enum types, tables and indexes if missing
    Migrate(commands::migrate::MigrateArgs),
    /// Insert demo funds, investors and investments
    Seed(commands::seed::SeedArgs),
    /// Drop all tables and enum types (refused in production)
    Destroy(commands::destroy::DestroyArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; real environment variables still apply
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
        Commands::Seed(args) => commands::run_seed(args).await?,
        Commands::Destroy(args) => commands::run_destroy(args).await?,
    }
    Ok(())
}
