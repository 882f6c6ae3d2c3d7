//! PostgreSQL pool construction
//!
//! One pool per process, opened by the binary and handed to the router.
//! Whoever opens it closes it at shutdown.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long a request waits for a free connection before failing.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Pool sizing and wait limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }
}

impl PoolSettings {
    fn options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections.max(1))
            .acquire_timeout(self.acquire_timeout)
    }

    /// Open the pool and establish its first connection.
    pub async fn connect(&self, database_url: &str) -> Result<PgPool, sqlx::Error> {
        let pool = self.options().connect(database_url).await?;
        tracing::debug!(max_connections = self.max_connections, "database pool ready");
        Ok(pool)
    }
}

/// Open a pool with [`PoolSettings::default`].
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/fundctl").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PoolSettings::default().connect(database_url).await
}

/// Open a pool capped at `max_connections`.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PoolSettings {
        max_connections,
        ..PoolSettings::default()
    }
    .connect(database_url)
    .await
}
