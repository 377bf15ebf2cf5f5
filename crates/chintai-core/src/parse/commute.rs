//! Station and commute-time parsing.

use serde::Serialize;

use super::patterns::{BUS, COMMUTE_LEG, WALK};
use super::Field;

/// One parsed location descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commute {
    /// Line and station, e.g. "ＪＲ山手線/渋谷駅".
    pub station: Field<String>,
    /// Total minutes on foot over all legs.
    pub walk_minutes: u32,
    /// Total minutes by bus over all legs.
    pub bus_minutes: u32,
}

impl Commute {
    /// The value used for an absent location descriptor.
    pub fn missing() -> Self {
        Self {
            station: Field::Missing,
            walk_minutes: 0,
            bus_minutes: 0,
        }
    }
}

/// Parse a location descriptor such as `"ＪＲ山手線/渋谷駅 歩5分"`.
///
/// The station name runs up to the first whitespace (ideographic space
/// included); every `歩N分` and `バスN分` after it is summed per mode.
pub fn parse_commute(location: Option<&str>) -> Commute {
    let Some(location) = location.map(str::trim).filter(|s| !s.is_empty()) else {
        return Commute::missing();
    };

    let (station, times) = match location.split_once(char::is_whitespace) {
        Some((station, times)) => (station, times),
        None => (location, ""),
    };

    let mut walk_minutes = 0u32;
    let mut bus_minutes = 0u32;

    for caps in COMMUTE_LEG.captures_iter(times) {
        let minutes: u32 = caps[2].parse().unwrap_or(0);
        match &caps[1] {
            WALK => walk_minutes = walk_minutes.saturating_add(minutes),
            BUS => bus_minutes = bus_minutes.saturating_add(minutes),
            _ => {}
        }
    }

    Commute {
        station: Field::Parsed(station.to_string()),
        walk_minutes,
        bus_minutes,
    }
}
