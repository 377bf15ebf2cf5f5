//! Building height ("5階建", "地下1地上12階建", "平屋").

use super::patterns::{SINGLE_STORY, STORY_SEGMENT, UNDERGROUND};

/// Basement floors counted at most this many times per segment.
pub const DEFAULT_UNDERGROUND_CAP: u32 = 2;

/// Count the stories of a building from its height descriptor.
///
/// Every number counts, optionally prefixed by `地上`/`地下`; an underground
/// segment contributes at most `underground_cap`. Text without digits counts
/// as zero stories.
pub fn count_stories(text: &str, underground_cap: u32) -> u32 {
    if text.trim() == SINGLE_STORY {
        return 1;
    }

    STORY_SEGMENT
        .captures_iter(text)
        .map(|caps| {
            let n: u32 = caps[2].parse().unwrap_or(0);
            match caps.get(1) {
                Some(prefix) if prefix.as_str() == UNDERGROUND => n.min(underground_cap),
                _ => n,
            }
        })
        .fold(0u32, u32::saturating_add)
}
