//! Shift-coverage engine for a station-monitoring dashboard.
//!
//! Given each station's daily duty shifts, answers whether a station is on
//! watch at a minute of the day, how much of an hour slot is covered, and how
//! many stations are active overall. All evaluation is pure; the only I/O is
//! [`Roster::load_from_file`].

pub mod clock;
pub mod coverage;
pub mod error;
pub mod logging;
pub mod policy;
pub mod roster;
pub mod shift;
pub mod station;
pub mod time;

pub use clock::{Clock, FixedClock, SystemClock};
pub use coverage::{is_instant, overlap_minutes, overlap_with_hour_slot};
pub use error::{CoverageError, CoverageResult, ParseTimeError};
pub use policy::{CoveragePolicy, Endpoints, ZeroLength};
pub use roster::roster::{
    GridRow, HourFill, Roster, ScheduleMap, StationStats, StationStatus, StatusReport,
    StatusSource, active_shift, count_active_stations, is_station_active_now, shift_grid,
    shifts_at_hour, station_fill_at_hour, station_stats, station_status, stations_status,
};
pub use shift::{ShiftRecord, ShiftWindow};
pub use station::{Station, StationId};
pub use time::{ClockTime, HourSlot, MinuteOfDay, Time, parse_time};
