//! Command implementations for fundctl CLI

pub mod database;
pub mod destroy;
pub mod migrate;
pub mod seed;
pub mod serve;

// Re-export main dispatcher functions for flat access from main.rs
pub use destroy::run_destroy;
pub use migrate::run_migrate;
pub use seed::run_seed;
pub use serve::run_serve;
