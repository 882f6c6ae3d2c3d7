//! Route handlers organized by resource

pub mod health;
pub mod funds;
pub mod investors;
pub mod investments;
pub mod fallback;
