//! Core library for normalizing scraped Japanese rental listings.
//!
//! This crate provides:
//! - Field parsers for listing text (commute, floors, fees, area, ...)
//! - A loosely typed in-memory table of listing rows
//! - The preprocessing pipeline that turns raw rows into analysis columns
//! - Loading raw per-district CSV files and writing the combined result

pub mod error;
pub mod models;
pub mod parse;
pub mod table;
pub mod pipeline;
pub mod dataset;

pub use error::{ChintaiError, ParseError, Result};
pub use models::config::ChintaiConfig;
pub use models::listing::Listing;
pub use parse::{Field, Architecture, Commute, FloorInfo, AddressParts};
pub use table::{Table, Value};
pub use pipeline::{Pipeline, Stage};
