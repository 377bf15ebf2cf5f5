//! Floor area parsing ("25.5m2").

use super::digits::extract_digit;
use super::Field;

/// Floor area in square metres.
pub fn parse_area(text: &str) -> Field<f64> {
    extract_digit(text)
}
