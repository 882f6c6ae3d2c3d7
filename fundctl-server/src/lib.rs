//! fundctl-server: HTTP API for venture fund records
//!
//! Tracks funds, investors and the investments linking them, stored in
//! PostgreSQL with foreign keys enforcing referential integrity.

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, DbError};
pub use http::{
    build_app, build_router, run_server, ApiError, App, AppState, ServerConfig, ServerError,
};
