//! Floor descriptor parsing ("3階", "3-4階").

use serde::Serialize;

use super::digits::extract_integers;

/// Floor a unit is on and whether it spans two adjacent floors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FloorInfo {
    pub floor: u32,
    pub maisonette: bool,
}

impl FloorInfo {
    pub const GROUND: FloorInfo = FloorInfo {
        floor: 1,
        maisonette: false,
    };
}

/// Parse a floor descriptor.
///
/// No number means the ground floor. A range reports its upper floor and is
/// a maisonette when the two floors are at most one apart.
pub fn parse_floor(text: &str) -> FloorInfo {
    match extract_integers(text).as_slice() {
        [] => FloorInfo::GROUND,
        [floor] => FloorInfo {
            floor: *floor,
            maisonette: false,
        },
        [low, high] => FloorInfo {
            floor: *low.max(high),
            maisonette: low.abs_diff(*high) <= 1,
        },
        floors => FloorInfo {
            floor: floors.iter().copied().max().unwrap_or(1),
            maisonette: false,
        },
    }
}
