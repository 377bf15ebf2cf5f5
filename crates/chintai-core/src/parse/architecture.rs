//! Building structure categories used by the SUUMO search filter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Structure of a building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Architecture {
    /// Reinforced concrete (鉄筋系).
    ReinforcedConcrete,
    /// Steel frame (鉄骨系).
    Steel,
    /// Wood (木造).
    Wood,
    /// Concrete block and everything else (ブロックその他).
    Other,
}

impl Architecture {
    pub const ALL: [Architecture; 4] = [
        Architecture::ReinforcedConcrete,
        Architecture::Steel,
        Architecture::Wood,
        Architecture::Other,
    ];

    /// One-hot column names, in [`Architecture::one_hot`] order.
    pub const COLUMNS: [&'static str; 4] = ["RC", "ST", "WD", "OT"];

    /// The label as it appears in listings.
    pub fn label(self) -> &'static str {
        match self {
            Architecture::ReinforcedConcrete => "鉄筋系",
            Architecture::Steel => "鉄骨系",
            Architecture::Wood => "木造",
            Architecture::Other => "ブロックその他",
        }
    }

    pub fn one_hot(self) -> [u8; 4] {
        match self {
            Architecture::ReinforcedConcrete => [1, 0, 0, 0],
            Architecture::Steel => [0, 1, 0, 0],
            Architecture::Wood => [0, 0, 1, 0],
            Architecture::Other => [0, 0, 0, 1],
        }
    }
}

impl FromStr for Architecture {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "鉄筋系" => Ok(Architecture::ReinforcedConcrete),
            "鉄骨系" => Ok(Architecture::Steel),
            "木造" => Ok(Architecture::Wood),
            "ブロックその他" => Ok(Architecture::Other),
            other => Err(ParseError::UnknownArchitecture(other.to_string())),
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
