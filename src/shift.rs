use crate::error::ParseTimeError;
use crate::policy::{CoveragePolicy, ZeroLength};
use crate::station::{StationId, station_id};
use crate::time::{MINUTES_PER_DAY, Time, parse_time};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One daily duty window of a station, with the watch crew on it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShiftRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(deserialize_with = "station_id")]
    pub station_id: StationId,
    pub start_hhmm: String,
    pub end_hhmm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commander: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A shift mapped onto absolute minutes from today's midnight.
///
/// `end` is always after `start`. Overnight shifts end on the following day,
/// so `end` may reach up to `start + 1440`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShiftWindow {
    pub start: Time,
    pub end: Time,
    pub overnight: bool,
}

impl ShiftRecord {
    pub fn new(station_id: StationId, start_hhmm: &str, end_hhmm: &str) -> ShiftRecord {
        ShiftRecord {
            id: None,
            station_id,
            start_hhmm: start_hhmm.to_string(),
            end_hhmm: end_hhmm.to_string(),
            commander: None,
            crew: None,
            phone: None,
        }
    }

    /// Normalizes the textual times.
    ///
    /// `Ok(None)` means the shift is well formed but empty under the policy
    /// (a `start == end` shift read as [`ZeroLength::Empty`]).
    pub fn window(&self, policy: &CoveragePolicy) -> Result<Option<ShiftWindow>, ParseTimeError> {
        let start = parse_time(&self.start_hhmm)?.minute_of_day();
        let end = parse_time(&self.end_hhmm)?.minute_of_day();

        if end > start {
            return Ok(Some(ShiftWindow {
                start: Time(start),
                end: Time(end),
                overnight: false,
            }));
        }
        if end == start && policy.zero_length == ZeroLength::Empty {
            return Ok(None);
        }
        Ok(Some(ShiftWindow {
            start: Time(start),
            end: Time(end + MINUTES_PER_DAY),
            overnight: true,
        }))
    }
}

impl fmt::Display for ShiftRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_hhmm, self.end_hhmm)
    }
}

impl fmt::Display for ShiftWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}
