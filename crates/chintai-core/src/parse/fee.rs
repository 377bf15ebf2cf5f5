//! Fee normalization to thousand-yen units.

use super::digits::{contains_digit, extract_digit};
use super::patterns::{MAN, OKU, OKU_FEE, SEN};
use super::Field;

/// Stored for fees without digits ("-", "なし"), kept apart from a real zero.
pub const FREE_FEE: u32 = 1;

/// One 億 expressed in thousand-yen units.
const OKU_IN_THOUSANDS: f64 = 100_000.0;

/// Convert a fee string to thousand-yen units.
///
/// - no digits: [`FREE_FEE`]
/// - `億` (with an optional `万` remainder): hundred-millions
/// - `万`: ten-thousands, multiplied by 10
/// - `千`: already in thousands
/// - otherwise raw yen, divided by 1000 and truncated
pub fn fee_to_thousands(text: &str) -> u32 {
    if !contains_digit(text) {
        return FREE_FEE;
    }

    if text.contains(OKU) {
        if let Some(thousands) = parse_oku(text) {
            return thousands;
        }
    }

    let Field::Parsed(value) = extract_digit(text) else {
        return FREE_FEE;
    };

    if text.contains(MAN) {
        (value * 10.0).round() as u32
    } else if text.contains(SEN) {
        value as u32
    } else {
        (value / 1000.0) as u32
    }
}

fn parse_oku(text: &str) -> Option<u32> {
    let caps = OKU_FEE.captures(text)?;
    let oku: f64 = caps[1].parse().ok()?;
    let man: f64 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0.0,
    };
    Some((oku * OKU_IN_THOUSANDS + man * 10.0).round() as u32)
}
