//! Data models.

pub mod amount;
pub mod config;
pub mod receipt;
