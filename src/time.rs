use crate::error::{CoverageError, CoverageResult, ParseTimeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

pub const MINUTES_PER_HOUR: u32 = 60;
pub const HOURS_PER_DAY: u32 = 24;
pub const MINUTES_PER_DAY: u32 = MINUTES_PER_HOUR * HOURS_PER_DAY;

/// Minutes since today's midnight. Values past 1439 fall on the following day.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, Hash, Serialize, Deserialize, PartialOrd)]
pub struct Time(pub u32);

impl Time {
    pub(crate) fn is_overlapping(time: &(Time, Time), window: &(Time, Time)) -> bool {
        time.0 < window.1 && time.1 > window.0
    }

    /// Length of the intersection of two half-open intervals, in minutes.
    pub(crate) fn overlap(time: &(Time, Time), window: &(Time, Time)) -> u32 {
        if Time::is_overlapping(time, window) {
            (time.1.min(window.1) - time.0.max(window.0)).0
        } else {
            0
        }
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days = self.0 / MINUTES_PER_DAY;
        let remaining = self.0 % MINUTES_PER_DAY;
        let hours = remaining / MINUTES_PER_HOUR;
        let mins = remaining % MINUTES_PER_HOUR;
        write!(f, "DAY{} {:02}:{:02}", days + 1, hours, mins)
    }
}

impl Add<u32> for Time {
    type Output = Self;

    fn add(self, rhs: u32) -> Self::Output {
        Time(self.0 + rhs)
    }
}

impl Sub<Time> for Time {
    type Output = Self;

    fn sub(self, rhs: Time) -> Self::Output {
        Time(self.0 - rhs.0)
    }
}

/// A decoded wall-clock time of day. Always within 00:00..=23:59.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, Hash, PartialOrd)]
pub struct ClockTime {
    hours: u32,
    minutes: u32,
}

impl ClockTime {
    pub fn new(hours: u32, minutes: u32) -> Option<ClockTime> {
        let valid = hours < HOURS_PER_DAY && minutes < MINUTES_PER_HOUR;
        valid.then_some(ClockTime { hours, minutes })
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn minute_of_day(&self) -> u32 {
        self.hours * MINUTES_PER_HOUR + self.minutes
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

impl FromStr for ClockTime {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time(s)
    }
}

/// Decodes `HH:MM` or `HHMM`.
///
/// A colon selects the split form, where each side is one or two digits.
/// Without a colon the text must be exactly four digits.
pub fn parse_time(text: &str) -> Result<ClockTime, ParseTimeError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseTimeError::Empty);
    }
    let malformed = || ParseTimeError::Malformed(text.to_string());

    let (hh, mm) = match trimmed.split_once(':') {
        Some(parts) => parts,
        None if trimmed.len() == 4 && trimmed.is_ascii() => trimmed.split_at(2),
        None => return Err(malformed()),
    };
    let hours = parse_field(hh).ok_or_else(malformed)?;
    let minutes = parse_field(mm).ok_or_else(malformed)?;

    ClockTime::new(hours, minutes).ok_or_else(|| ParseTimeError::OutOfRange {
        text: text.to_string(),
        hours,
        minutes,
    })
}

fn parse_field(field: &str) -> Option<u32> {
    if field.is_empty() || field.len() > 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// An instant query: a validated minute of the day, 0..=1439.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, Hash, Serialize, PartialOrd)]
pub struct MinuteOfDay(u32);

impl MinuteOfDay {
    pub const MIDNIGHT: MinuteOfDay = MinuteOfDay(0);

    pub fn new(minute: i64) -> CoverageResult<MinuteOfDay> {
        if (0..i64::from(MINUTES_PER_DAY)).contains(&minute) {
            Ok(MinuteOfDay(minute as u32))
        } else {
            Err(CoverageError::InvalidMinuteOfDay(minute))
        }
    }

    pub fn from_hm(hours: u32, minutes: u32) -> CoverageResult<MinuteOfDay> {
        MinuteOfDay::new(i64::from(hours) * 60 + i64::from(minutes))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn time(&self) -> Time {
        Time(self.0)
    }

    pub fn hour(&self) -> HourSlot {
        HourSlot((self.0 / MINUTES_PER_HOUR) as u8)
    }
}

impl From<ClockTime> for MinuteOfDay {
    fn from(value: ClockTime) -> Self {
        MinuteOfDay(value.minute_of_day())
    }
}

impl fmt::Display for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / MINUTES_PER_HOUR, self.0 % MINUTES_PER_HOUR)
    }
}

/// A slot query: hour `h` covers minutes `[h*60, h*60+60)` of today.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, Hash, Serialize, PartialOrd)]
pub struct HourSlot(u8);

impl HourSlot {
    pub fn new(hour: i64) -> CoverageResult<HourSlot> {
        if (0..i64::from(HOURS_PER_DAY)).contains(&hour) {
            Ok(HourSlot(hour as u8))
        } else {
            Err(CoverageError::InvalidHour(hour))
        }
    }

    pub fn all() -> impl Iterator<Item = HourSlot> {
        (0..HOURS_PER_DAY as u8).map(HourSlot)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn window(&self) -> (Time, Time) {
        let start = Time(u32::from(self.0) * MINUTES_PER_HOUR);
        (start, start + MINUTES_PER_HOUR)
    }
}

impl fmt::Display for HourSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_both_forms() {
        assert_eq!(parse_time("08:00"), parse_time("0800"));
        let t = parse_time("0800").unwrap();
        assert_eq!((t.hours(), t.minutes()), (8, 0));
        assert_eq!(parse_time("16:30").unwrap().minute_of_day(), 990);
        assert_eq!(parse_time("8:05").unwrap().minute_of_day(), 485);
        assert_eq!(parse_time(" 2359 ").unwrap().minute_of_day(), 1439);
        assert_eq!("07:45".parse::<ClockTime>(), parse_time("0745"));
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(parse_time(""), Err(ParseTimeError::Empty));
        assert!(matches!(parse_time("xx:00"), Err(ParseTimeError::Malformed(_))));
        assert!(matches!(parse_time("800"), Err(ParseTimeError::Malformed(_))));
        assert!(matches!(parse_time("08000"), Err(ParseTimeError::Malformed(_))));
        assert!(matches!(parse_time("08:00:00"), Err(ParseTimeError::Malformed(_))));
        assert!(matches!(parse_time("08:"), Err(ParseTimeError::Malformed(_))));
        assert!(matches!(parse_time("-1:00"), Err(ParseTimeError::Malformed(_))));
        assert!(matches!(parse_time("ée00"), Err(ParseTimeError::Malformed(_))));
    }

    #[test]
    fn test_parse_out_of_range() {
        assert_eq!(
            parse_time("2500"),
            Err(ParseTimeError::OutOfRange {
                text: "2500".to_string(),
                hours: 25,
                minutes: 0
            })
        );
        assert!(matches!(parse_time("12:60"), Err(ParseTimeError::OutOfRange { .. })));
        assert!(matches!(parse_time("24:00"), Err(ParseTimeError::OutOfRange { .. })));
    }

    #[test]
    fn test_query_bounds() {
        assert!(MinuteOfDay::new(0).is_ok());
        assert!(MinuteOfDay::new(1439).is_ok());
        assert!(matches!(
            MinuteOfDay::new(1440),
            Err(CoverageError::InvalidMinuteOfDay(1440))
        ));
        assert!(matches!(
            MinuteOfDay::new(-1),
            Err(CoverageError::InvalidMinuteOfDay(-1))
        ));
        assert!(HourSlot::new(23).is_ok());
        assert!(matches!(HourSlot::new(24), Err(CoverageError::InvalidHour(24))));
        assert!(matches!(HourSlot::new(-3), Err(CoverageError::InvalidHour(-3))));
        assert_eq!(HourSlot::all().count(), 24);
    }

    #[test]
    fn test_display() {
        assert_eq!(Time(1500).to_string(), "DAY2 01:00");
        assert_eq!(MinuteOfDay::from_hm(7, 5).unwrap().to_string(), "07:05");
        assert_eq!(HourSlot::new(9).unwrap().to_string(), "09:00");
    }

    #[test]
    fn test_overlap() {
        assert_eq!(Time::overlap(&(Time(0), Time(60)), &(Time(30), Time(90))), 30);
        assert_eq!(Time::overlap(&(Time(0), Time(60)), &(Time(60), Time(90))), 0);
        assert_eq!(Time::overlap(&(Time(10), Time(20)), &(Time(0), Time(90))), 10);
    }
}
