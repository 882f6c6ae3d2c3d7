//! Repository implementations for database access
//!
//! Each repository borrows the pool and holds no other state:
//! - One statement per operation
//! - Constraint violations classified into [`DbError`] variants

pub mod funds;
pub mod investors;
pub mod investments;

pub use super::error::DbError;
pub use funds::{Fund, FundRepo};
pub use investors::{Investor, InvestorRepo};
pub use investments::{Investment, InvestmentRepo};
