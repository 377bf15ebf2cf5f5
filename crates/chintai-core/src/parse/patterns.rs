//! Common regex patterns for listing field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // First numeric run, decimals included ("25.5m2", "12.5万円")
    pub static ref NUMBER: Regex = Regex::new(r"[0-9.]+").unwrap();

    pub static ref INTEGER: Regex = Regex::new(r"[0-9]+").unwrap();

    // Commute legs: "歩5分", "バス10分"
    pub static ref COMMUTE_LEG: Regex = Regex::new(r"(歩|バス)([0-9]+)分").unwrap();

    // Building height: "5階建", "地下1地上5階建"
    pub static ref STORY_SEGMENT: Regex = Regex::new(r"(地[上下])?([0-9]+)").unwrap();

    // Fees quoted in hundred-millions: "1億2000万円", "1.5億円"
    pub static ref OKU_FEE: Regex = Regex::new(r"([0-9.]+)億(?:([0-9.]+)万)?").unwrap();
}

/// Marker for a newly built property in the age column.
pub const NEW_BUILD: &str = "新築";

/// Marker for a single-story building in the height column.
pub const SINGLE_STORY: &str = "平屋";

pub const UNDERGROUND: &str = "地下";
pub const WALK: &str = "歩";
pub const BUS: &str = "バス";

/// Unit markers used in fee columns.
pub const OKU: char = '億';
pub const MAN: char = '万';
pub const SEN: char = '千';
