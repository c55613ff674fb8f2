use crate::coverage::is_instant;
use crate::policy::{CoveragePolicy, Endpoints, ZeroLength};
use crate::roster::roster::{Roster, station_fill_at_hour};
use crate::roster::tests::utils::{add_station, arb_shift};
use crate::time::{HourSlot, MinuteOfDay, parse_time};
use proptest::prelude::*;
use proptest::proptest;

fn arb_policy() -> impl Strategy<Value = CoveragePolicy> {
    let flags = (proptest::bool::ANY, proptest::bool::ANY, proptest::bool::ANY);
    flags.prop_map(|(half_open, empty, carry_over)| CoveragePolicy {
        endpoints: if half_open { Endpoints::HalfOpen } else { Endpoints::Closed },
        zero_length: if empty { ZeroLength::Empty } else { ZeroLength::FullDay },
        carry_over,
    })
}

proptest! {
    #[test]
    fn test_both_spellings_decode_alike(h in 0..24u32, m in 0..60u32) {
        let colon = parse_time(&format!("{:02}:{:02}", h, m)).unwrap();
        let compact = parse_time(&format!("{:02}{:02}", h, m)).unwrap();
        prop_assert_eq!(colon, compact);
        prop_assert_eq!((h, m), (colon.hours(), colon.minutes()));
    }

    #[test]
    fn test_fill_stays_within_bounds(
        shifts in prop::collection::vec(arb_shift(), 0..12),
        policy in arb_policy(),
    ) {
        for slot in HourSlot::all() {
            let fill = station_fill_at_hour(&shifts, slot, &policy);
            prop_assert!((0.0..=1.0).contains(&fill.fill_ratio));
            prop_assert_eq!(fill.is_active, fill.fill_ratio > 0.0);
        }
    }

    #[test]
    fn test_covered_instant_lies_in_an_active_slot(
        shifts in prop::collection::vec(arb_shift(), 1..6),
        minute in 0..1440i64,
    ) {
        // carry-over makes the grid see yesterday's tail as well
        let policy = CoveragePolicy {
            carry_over: true,
            endpoints: Endpoints::HalfOpen,
            ..CoveragePolicy::default()
        };
        let now = MinuteOfDay::new(minute).unwrap();
        if shifts.iter().any(|s| is_instant(s, now, &policy)) {
            prop_assert!(station_fill_at_hour(&shifts, now.hour(), &policy).is_active);
        }
    }

    #[test]
    fn test_repeated_queries_agree(
        shifts in prop::collection::vec(arb_shift(), 0..20),
        minute in 0..1440i64,
        policy in arb_policy(),
    ) {
        let mut stations = Vec::new();
        add_station(&mut stations, "ST_1", None);
        add_station(&mut stations, "ST_2", Some("maintenance"));
        add_station(&mut stations, "ST_3", None);
        let roster = Roster::new(stations, shifts, policy);
        let now = MinuteOfDay::new(minute).unwrap();

        prop_assert_eq!(roster.stats(now), roster.stats(now));
        prop_assert_eq!(roster.statuses(now), roster.statuses(now));
        prop_assert_eq!(roster.grid(), roster.grid());
        prop_assert_eq!(roster.status("ST_2", now), roster.status("ST_2", now));

        let stats = roster.stats(now);
        prop_assert_eq!(stats.total_stations, stats.active_stations + stats.inactive_stations);
        let on_watch = roster.statuses(now).values().filter(|a| **a).count();
        prop_assert_eq!(stats.active_stations, on_watch);
    }
}
