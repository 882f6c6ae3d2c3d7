//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - One explicitly constructed pool, borrowed by every repository
//! - Rely on DB constraints, classify violations - no check-then-insert
//! - One statement per operation; no multi-statement transactions

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repos;
pub mod seed;

pub use error::DbError;
pub use pool::{create_pool, create_pool_with_options, PoolSettings, DEFAULT_MAX_CONNECTIONS};
pub use sqlx::PgPool;
pub use repos::*;
