use crate::time::MinuteOfDay;
use chrono::{DateTime, FixedOffset, Local, TimeZone, Timelike, Utc};

/// Supplies the instant that "now" queries are evaluated against.
pub trait Clock {
    fn now(&self) -> MinuteOfDay;
}

/// Wall clock, in the machine's local zone or at a fixed UTC offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    offset: Option<FixedOffset>,
}

impl SystemClock {
    pub fn local() -> SystemClock {
        SystemClock { offset: None }
    }

    /// `None` when the offset is beyond ±24h.
    pub fn with_offset_minutes(minutes: i32) -> Option<SystemClock> {
        FixedOffset::east_opt(minutes.checked_mul(60)?).map(|offset| SystemClock {
            offset: Some(offset),
        })
    }
}

impl Clock for SystemClock {
    fn now(&self) -> MinuteOfDay {
        match self.offset {
            Some(offset) => minute_of(&offset.from_utc_datetime(&Utc::now().naive_utc())),
            None => minute_of(&Local::now()),
        }
    }
}

fn minute_of<Tz: TimeZone>(at: &DateTime<Tz>) -> MinuteOfDay {
    // hour() and minute() are bounded by chrono, so the fallback is unreachable.
    MinuteOfDay::from_hm(at.hour(), at.minute()).unwrap_or(MinuteOfDay::MIDNIGHT)
}

/// A clock frozen at one minute.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub MinuteOfDay);

impl Clock for FixedClock {
    fn now(&self) -> MinuteOfDay {
        self.0
    }
}
