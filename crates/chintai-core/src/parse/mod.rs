//! Rule-based field parsers for SUUMO rental listings.
//!
//! Every parser targets one narrow text family seen in the listings and is a
//! pure function of its input. Parsers that can fail to find their pattern
//! return [`Field::Missing`]; the pipeline decides which sentinel to store.

pub mod patterns;
pub mod digits;
pub mod address;
pub mod commute;
pub mod age;
pub mod stories;
pub mod floor;
pub mod fee;
pub mod area;
pub mod architecture;

pub use digits::{contains_digit, extract_digit, extract_integers};
pub use address::{split_address, AddressParts};
pub use commute::{parse_commute, Commute};
pub use age::parse_age;
pub use stories::{count_stories, DEFAULT_UNDERGROUND_CAP};
pub use floor::{parse_floor, FloorInfo};
pub use fee::{fee_to_thousands, FREE_FEE};
pub use area::parse_area;
pub use architecture::Architecture;

use serde::Serialize;

/// Outcome of a field parser: either a value or an explicit gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Field<T> {
    /// The pattern was found and converted.
    Parsed(T),
    /// The text does not carry this field.
    Missing,
}

impl<T> Field<T> {
    /// Returns the parsed value or the given sentinel.
    pub fn unwrap_or(self, sentinel: T) -> T {
        match self {
            Field::Parsed(value) => value,
            Field::Missing => sentinel,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Field::Parsed(value) => Field::Parsed(f(value)),
            Field::Missing => Field::Missing,
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Field::Parsed(v),
            None => Field::Missing,
        }
    }
}
