//! Single-shift coverage: instant containment and hour-slot overlap.
//!
//! Everything here is infallible. Malformed shifts simply cover nothing;
//! callers that need to report them look at [`ShiftRecord::window`] directly.

use crate::policy::{CoveragePolicy, Endpoints};
use crate::shift::{ShiftRecord, ShiftWindow};
use crate::time::{HourSlot, MINUTES_PER_DAY, MINUTES_PER_HOUR, MinuteOfDay, Time};

impl ShiftWindow {
    fn contains(&self, t: Time, endpoints: Endpoints) -> bool {
        match endpoints {
            Endpoints::Closed => self.start <= t && t <= self.end,
            Endpoints::HalfOpen => self.start <= t && t < self.end,
        }
    }

    /// An overnight shift also covers the early morning, as yesterday's
    /// occurrence running past midnight.
    pub fn covers(&self, now: MinuteOfDay, endpoints: Endpoints) -> bool {
        let t = now.time();
        self.contains(t, endpoints)
            || (self.overnight && self.contains(t + MINUTES_PER_DAY, endpoints))
    }

    /// Minutes of `slot` spent inside the shift.
    ///
    /// Only today's occurrence counts unless `carry_over` is set, in which
    /// case the tail of yesterday's overnight occurrence is added too.
    pub fn overlap_minutes(&self, slot: HourSlot, carry_over: bool) -> u32 {
        let shift = (self.start, self.end);
        let today = Time::overlap(&shift, &slot.window());
        let yesterday = if carry_over && self.overnight {
            let (from, to) = slot.window();
            Time::overlap(&shift, &(from + MINUTES_PER_DAY, to + MINUTES_PER_DAY))
        } else {
            0
        };
        today + yesterday
    }
}

pub fn is_instant(shift: &ShiftRecord, now: MinuteOfDay, policy: &CoveragePolicy) -> bool {
    match shift.window(policy) {
        Ok(Some(window)) => window.covers(now, policy.endpoints),
        _ => false,
    }
}

pub fn overlap_minutes(shift: &ShiftRecord, slot: HourSlot, policy: &CoveragePolicy) -> u32 {
    match shift.window(policy) {
        Ok(Some(window)) => window.overlap_minutes(slot, policy.carry_over),
        _ => 0,
    }
}

/// Fraction of the hour covered by this one shift, in `[0, 1]`.
pub fn overlap_with_hour_slot(shift: &ShiftRecord, slot: HourSlot, policy: &CoveragePolicy) -> f64 {
    fill_ratio(overlap_minutes(shift, slot, policy))
}

pub(crate) fn fill_ratio(minutes: u32) -> f64 {
    (f64::from(minutes) / f64::from(MINUTES_PER_HOUR)).min(1.0)
}
