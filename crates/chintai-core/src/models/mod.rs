//! Data models: configuration and listing records.

pub mod config;
pub mod listing;
