//! Listing column names and the normalized listing record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::parse::Architecture;
use crate::table::Value;

// Raw columns, as written by the scraper
pub const NAME: &str = "name";
pub const ADDRESS: &str = "address";
pub const AGE: &str = "age";
pub const HEIGHT: &str = "height";
pub const FLOOR: &str = "floor";
pub const FLOOR_PLAN: &str = "floor_plan";
pub const AREA: &str = "area";
pub const ARCHITECTURE: &str = "architecture";
pub const RENT: &str = "rent";
pub const ADMIN: &str = "admin";
pub const DEPOSIT: &str = "deposit";
pub const GRATUITY: &str = "gratuity";

/// Added on load from the file name.
pub const DISTRICT: &str = "district";

// Derived columns
pub const PREFECTURE: &str = "prefecture";
pub const STORIES: &str = "stories";
pub const MAISONETTE: &str = "maisonette";

/// Fee columns, all normalized to thousand-yen units.
pub const FEE_COLUMNS: [&str; 4] = [RENT, ADMIN, DEPOSIT, GRATUITY];

/// Raw location descriptor of commute leg `i`.
pub fn location_column(i: usize) -> String {
    format!("location{}", i)
}

pub fn station_column(i: usize) -> String {
    format!("station_{}", i)
}

pub fn walk_time_column(i: usize) -> String {
    format!("walk_time_{}", i)
}

pub fn bus_time_column(i: usize) -> String {
    format!("bus_time_{}", i)
}

/// Columns holding integers once the pipeline has run.
fn is_int_column(column: &str) -> bool {
    let leg = column
        .strip_prefix("walk_time_")
        .or_else(|| column.strip_prefix("bus_time_"));

    FEE_COLUMNS.contains(&column)
        || [AGE, STORIES, FLOOR, MAISONETTE].contains(&column)
        || Architecture::COLUMNS.contains(&column)
        || leg.is_some_and(|i| i.parse::<usize>().is_ok())
}

/// Cell of an interim CSV. Derived numeric columns are typed again; text
/// that does not parse stays text.
pub fn interim_value(column: &str, text: &str) -> Value {
    let typed = if is_int_column(column) {
        text.parse().ok().map(Value::Int)
    } else if column == AREA {
        text.parse().ok().map(Value::Float)
    } else {
        None
    };
    typed.unwrap_or_else(|| Value::text(text))
}

/// One normalized listing, as stored in the interim CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub district: String,
    pub prefecture: Option<String>,
    pub address: Option<String>,

    pub station_0: Option<String>,
    pub walk_time_0: u32,
    pub bus_time_0: u32,
    pub station_1: Option<String>,
    pub walk_time_1: u32,
    pub bus_time_1: u32,
    pub station_2: Option<String>,
    pub walk_time_2: u32,
    pub bus_time_2: u32,

    /// Years since construction; 0 for new builds.
    pub age: u32,
    pub stories: u32,
    pub floor: u32,
    pub maisonette: u8,

    /// Fees in thousand yen. 1 marks a fee quoted without a number.
    pub rent: u32,
    pub admin: u32,
    pub deposit: u32,
    pub gratuity: u32,

    pub floor_plan: Option<String>,
    /// Square metres.
    pub area: f64,
    pub architecture: String,

    /// One-hot structure flags; zero when encoding was disabled.
    #[serde(rename = "RC", default)]
    pub rc: u8,
    #[serde(rename = "ST", default)]
    pub st: u8,
    #[serde(rename = "WD", default)]
    pub wd: u8,
    #[serde(rename = "OT", default)]
    pub ot: u8,
}

/// Aggregate figures for one district.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictSummary {
    pub district: String,
    pub listings: usize,
    /// Mean rent in thousand yen.
    pub mean_rent: f64,
    /// Mean floor area in square metres.
    pub mean_area: f64,
}

/// Per-district counts and means, ordered by district name.
pub fn summarize_by_district(listings: &[Listing]) -> Vec<DistrictSummary> {
    let mut groups: BTreeMap<&str, Vec<&Listing>> = BTreeMap::new();
    for listing in listings {
        groups.entry(listing.district.as_str()).or_default().push(listing);
    }

    groups
        .into_iter()
        .map(|(district, group)| {
            let n = group.len() as f64;
            DistrictSummary {
                district: district.to_string(),
                listings: group.len(),
                mean_rent: group.iter().map(|l| l.rent as f64).sum::<f64>() / n,
                mean_area: group.iter().map(|l| l.area).sum::<f64>() / n,
            }
        })
        .collect()
}
