use crate::coverage::{fill_ratio, is_instant, overlap_minutes};
use crate::error::{CoverageResult, ParseTimeError};
use crate::policy::CoveragePolicy;
use crate::shift::ShiftRecord;
use crate::station::{Station, StationId};
use crate::time::{HourSlot, MinuteOfDay};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, warn};

pub type ScheduleMap = HashMap<StationId, Vec<ShiftRecord>>;

/// One cell of the 24h duty grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourFill {
    pub is_active: bool,
    pub fill_ratio: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationStats {
    pub total_stations: usize,
    pub active_stations: usize,
    pub inactive_stations: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StationStatus {
    Active,
    Inactive,
    /// Whatever the directory recorded, e.g. "maintenance".
    Reported(String),
}

/// Where a [`StatusReport`] took its answer from, highest priority first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusSource {
    Schedule,
    Directory,
    Default,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatusReport {
    pub station_id: StationId,
    pub status: StationStatus,
    pub source: StatusSource,
    /// The first shift on watch at `checked_at`, with its crew details.
    pub active_shift: Option<ShiftRecord>,
    pub checked_at: MinuteOfDay,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GridRow {
    pub station_id: StationId,
    pub name: String,
    pub cells: Vec<HourFill>,
}

fn shifts_for<'a>(schedules: &'a ScheduleMap, station_id: &StationId) -> &'a [ShiftRecord] {
    schedules.get(station_id).map(Vec::as_slice).unwrap_or(&[])
}

pub fn group_by_station(shifts: Vec<ShiftRecord>) -> ScheduleMap {
    let mut schedules = ScheduleMap::new();
    for shift in shifts {
        schedules.entry(shift.station_id.clone()).or_default().push(shift);
    }
    schedules
}

pub fn active_shift<'a>(
    shifts: &'a [ShiftRecord],
    now: MinuteOfDay,
    policy: &CoveragePolicy,
) -> Option<&'a ShiftRecord> {
    shifts.iter().find(|s| is_instant(s, now, policy))
}

pub fn is_station_active_now(
    shifts: &[ShiftRecord],
    now: MinuteOfDay,
    policy: &CoveragePolicy,
) -> bool {
    active_shift(shifts, now, policy).is_some()
}

/// Covered minutes are summed across shifts without deduplication, so two
/// overlapping half-hour shifts fill the slot just like one full-hour shift.
pub fn station_fill_at_hour(
    shifts: &[ShiftRecord],
    slot: HourSlot,
    policy: &CoveragePolicy,
) -> HourFill {
    let minutes: u32 = shifts.iter().map(|s| overlap_minutes(s, slot, policy)).sum();
    let fill_ratio = fill_ratio(minutes);
    HourFill {
        is_active: fill_ratio > 0.0,
        fill_ratio,
    }
}

pub fn shifts_at_hour<'a>(
    shifts: &'a [ShiftRecord],
    slot: HourSlot,
    policy: &CoveragePolicy,
) -> Vec<&'a ShiftRecord> {
    shifts
        .iter()
        .filter(|s| overlap_minutes(s, slot, policy) > 0)
        .collect()
}

pub fn malformed_shifts<'a>(
    shifts: &'a [ShiftRecord],
    policy: &CoveragePolicy,
) -> Vec<(&'a ShiftRecord, ParseTimeError)> {
    shifts
        .iter()
        .filter_map(|s| s.window(policy).err().map(|e| (s, e)))
        .collect()
}

fn report_malformed(station_id: &StationId, shifts: &[ShiftRecord], policy: &CoveragePolicy) {
    for (shift, error) in malformed_shifts(shifts, policy) {
        warn!(station = %station_id, shift = %shift, %error, "skipping unreadable shift");
    }
}

pub fn count_active_stations(
    stations: &[Station],
    schedules: &ScheduleMap,
    now: MinuteOfDay,
    policy: &CoveragePolicy,
) -> usize {
    stations
        .iter()
        .filter(|station| {
            let Some(shifts) = schedules.get(&station.id) else {
                debug!(station = %station.id, "no schedule loaded, counted as inactive");
                return false;
            };
            report_malformed(&station.id, shifts, policy);
            let active = is_station_active_now(shifts, now, policy);
            debug!(station = %station.id, shifts = shifts.len(), active, "evaluated station");
            active
        })
        .count()
}

pub fn station_stats(
    stations: &[Station],
    schedules: &ScheduleMap,
    now: MinuteOfDay,
    policy: &CoveragePolicy,
) -> StationStats {
    let total_stations = stations.len();
    let active_stations = count_active_stations(stations, schedules, now, policy);
    let stats = StationStats {
        total_stations,
        active_stations,
        inactive_stations: total_stations - active_stations,
    };
    debug!(
        at = %now,
        total = stats.total_stations,
        active = stats.active_stations,
        inactive = stats.inactive_stations,
        "station stats"
    );
    stats
}

fn reports_in_service(recorded: &str) -> bool {
    let recorded = recorded.trim();
    !recorded.is_empty() && !recorded.eq_ignore_ascii_case("inactive")
}

/// Schedule first, then the directory's own status unless it says inactive.
pub fn station_status(
    station: &Station,
    shifts: Option<&[ShiftRecord]>,
    now: MinuteOfDay,
    policy: &CoveragePolicy,
) -> StatusReport {
    let shifts = shifts.unwrap_or(&[]);
    report_malformed(&station.id, shifts, policy);
    let active_shift = active_shift(shifts, now, policy).cloned();

    let (status, source) = match (&active_shift, &station.status) {
        (Some(_), _) => (StationStatus::Active, StatusSource::Schedule),
        (None, Some(recorded)) if reports_in_service(recorded) => {
            (StationStatus::Reported(recorded.clone()), StatusSource::Directory)
        }
        (None, _) => (StationStatus::Inactive, StatusSource::Default),
    };
    debug!(station = %station.id, at = %now, ?status, ?source, "station status");

    StatusReport {
        station_id: station.id.clone(),
        status,
        source,
        active_shift,
        checked_at: now,
    }
}

pub fn stations_status(
    stations: &[Station],
    schedules: &ScheduleMap,
    now: MinuteOfDay,
    policy: &CoveragePolicy,
) -> BTreeMap<StationId, bool> {
    stations
        .iter()
        .map(|station| {
            let shifts = shifts_for(schedules, &station.id);
            report_malformed(&station.id, shifts, policy);
            (station.id.clone(), is_station_active_now(shifts, now, policy))
        })
        .collect()
}

pub fn shift_grid(
    stations: &[Station],
    schedules: &ScheduleMap,
    policy: &CoveragePolicy,
) -> Vec<GridRow> {
    let rows: Vec<GridRow> = stations
        .iter()
        .map(|station| {
            let shifts = shifts_for(schedules, &station.id);
            report_malformed(&station.id, shifts, policy);
            GridRow {
                station_id: station.id.clone(),
                name: station.name.clone(),
                cells: HourSlot::all()
                    .map(|slot| station_fill_at_hour(shifts, slot, policy))
                    .collect(),
            }
        })
        .collect();
    debug!(stations = rows.len(), "built duty grid");
    rows
}

/// Stations and their schedules as last fetched, with the policy to read them under.
pub struct Roster {
    pub stations: Vec<Station>,
    pub schedules: ScheduleMap,
    pub policy: CoveragePolicy,
}

impl Roster {
    pub fn new(stations: Vec<Station>, shifts: Vec<ShiftRecord>, policy: CoveragePolicy) -> Roster {
        Roster {
            stations,
            schedules: group_by_station(shifts),
            policy,
        }
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> CoverageResult<Self> {
        let data = std::fs::read_to_string(path)?;
        #[derive(Deserialize)]
        struct RawData {
            stations: Vec<Station>,
            #[serde(default)]
            shifts: Vec<ShiftRecord>,
            #[serde(default)]
            policy: CoveragePolicy,
        }
        let raw: RawData = serde_json::from_str(&data)?;

        Ok(Roster::new(raw.stations, raw.shifts, raw.policy))
    }

    pub fn station(&self, station_id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| &*s.id == station_id)
    }

    pub fn shifts(&self, station_id: &StationId) -> &[ShiftRecord] {
        shifts_for(&self.schedules, station_id)
    }

    pub fn is_active(&self, station_id: &StationId, now: MinuteOfDay) -> bool {
        is_station_active_now(self.shifts(station_id), now, &self.policy)
    }

    pub fn fill_at_hour(&self, station_id: &StationId, slot: HourSlot) -> HourFill {
        station_fill_at_hour(self.shifts(station_id), slot, &self.policy)
    }

    pub fn shifts_at_hour(&self, station_id: &StationId, slot: HourSlot) -> Vec<&ShiftRecord> {
        shifts_at_hour(self.shifts(station_id), slot, &self.policy)
    }

    pub fn active_count(&self, now: MinuteOfDay) -> usize {
        count_active_stations(&self.stations, &self.schedules, now, &self.policy)
    }

    pub fn stats(&self, now: MinuteOfDay) -> StationStats {
        station_stats(&self.stations, &self.schedules, now, &self.policy)
    }

    pub fn status(&self, station_id: &str, now: MinuteOfDay) -> Option<StatusReport> {
        self.station(station_id).map(|station| {
            let shifts = self.schedules.get(&station.id).map(Vec::as_slice);
            station_status(station, shifts, now, &self.policy)
        })
    }

    pub fn statuses(&self, now: MinuteOfDay) -> BTreeMap<StationId, bool> {
        stations_status(&self.stations, &self.schedules, now, &self.policy)
    }

    pub fn grid(&self) -> Vec<GridRow> {
        shift_grid(&self.stations, &self.schedules, &self.policy)
    }

    pub fn malformed_shifts(&self) -> Vec<(&ShiftRecord, ParseTimeError)> {
        self.schedules
            .values()
            .flat_map(|shifts| malformed_shifts(shifts, &self.policy))
            .collect()
    }
}
