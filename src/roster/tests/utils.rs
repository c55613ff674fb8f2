use crate::shift::ShiftRecord;
use crate::station::{Station, StationId};
use crate::time::{HourSlot, MinuteOfDay};
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::strategy::Just;
use std::io;
use std::sync::{Arc, Mutex};

pub fn id(s: &str) -> Arc<str> {
    Arc::from(s)
}

pub fn at(hours: u32, minutes: u32) -> MinuteOfDay {
    MinuteOfDay::from_hm(hours, minutes).unwrap()
}

pub fn hour(h: i64) -> HourSlot {
    HourSlot::new(h).unwrap()
}

pub fn add_station(stations: &mut Vec<Station>, station_id: &str, status: Option<&str>) {
    stations.push(Station {
        id: id(station_id),
        name: format!("Station {}", station_id),
        latitude: 16.0,
        longitude: 108.0,
        elevation: None,
        distance_to_coast: None,
        status: status.map(str::to_string),
        note: None,
    });
}

pub fn add_shift(shifts: &mut Vec<ShiftRecord>, station_id: &str, start: &str, end: &str) {
    shifts.push(ShiftRecord::new(id(station_id), start, end));
}

pub fn add_watch(
    shifts: &mut Vec<ShiftRecord>,
    station_id: &str,
    start: &str,
    end: &str,
    commander: &str,
    phone: &str,
) {
    shifts.push(ShiftRecord {
        commander: Some(commander.to_string()),
        crew: Some(format!("crew of {}", commander)),
        phone: Some(phone.to_string()),
        ..ShiftRecord::new(id(station_id), start, end)
    });
}

pub fn arb_station_id() -> impl Strategy<Value = StationId> {
    prop_oneof![
        Just(Arc::from("ST_1")),
        Just(Arc::from("ST_2")),
        Just(Arc::from("ST_3")),
    ]
}

/// Either spelling of a valid time of day.
pub fn arb_hhmm() -> impl Strategy<Value = String> {
    (0..24u32, 0..60u32, proptest::bool::ANY).prop_map(|(h, m, colon)| {
        if colon {
            format!("{:02}:{:02}", h, m)
        } else {
            format!("{:02}{:02}", h, m)
        }
    })
}

/// Mostly valid shifts, with the odd unreadable time mixed in.
pub fn arb_shift() -> impl Strategy<Value = ShiftRecord> {
    let start = prop_oneof![9 => arb_hhmm(), 1 => Just("xx:00".to_string())];
    (arb_station_id(), start, arb_hhmm()).prop_map(|(station_id, start, end)| ShiftRecord {
        id: None,
        station_id,
        start_hhmm: start,
        end_hhmm: end,
        commander: None,
        crew: None,
        phone: None,
    })
}

#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a subscriber that records warnings, returning what was logged.
pub fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    let logged = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (out, logged)
}
