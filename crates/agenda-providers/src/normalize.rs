//! RawEvent to CalendarEvent conversion pipeline.
//!
//! The normalization process:
//! 1. Resolves the IANA time zone of the event
//! 2. Parses the wall-clock start in that zone
//! 3. Adds the ISO 8601 duration to derive the end
//! 4. Converts both to the display time zone
//!
//! Events whose zone or start cannot be resolved are dropped with a warning.
//! A missing or malformed duration counts as zero so the event is kept.

use agenda_core::CalendarEvent;
use chrono::{DateTime, Duration, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::raw_event::RawEvent;

/// Wall-clock start layout used by providers, fractional seconds optional.
const START_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Converts a [`RawEvent`] to a [`CalendarEvent`] displayed in `display_tz`.
///
/// Returns `None` if the time zone name is unknown or the start cannot be
/// parsed or does not exist in that zone (a DST gap).
pub fn normalize_event<D: TimeZone>(raw: &RawEvent, display_tz: &D) -> Option<CalendarEvent> {
    let zone = match raw.time_zone.as_deref().filter(|tz| !tz.is_empty()) {
        Some(name) => match name.parse::<Tz>() {
            Ok(zone) => zone,
            Err(e) => {
                warn!("skipping event {:?}: unknown time zone {:?}: {}", raw.title, name, e);
                return None;
            }
        },
        None => {
            debug!("event {:?} has no time zone, assuming UTC", raw.title);
            Tz::UTC
        }
    };

    if raw.start.is_empty() {
        warn!("skipping event {:?}: no start time", raw.title);
        return None;
    }

    let start = match parse_start(&raw.start, &zone) {
        Some(start) => start,
        None => {
            warn!(
                "skipping event {:?}: cannot parse start {:?} in {}",
                raw.title, raw.start, zone
            );
            return None;
        }
    };

    let duration = parse_duration(raw.duration.as_deref(), &raw.title);
    let end = match start.clone().checked_add_signed(duration) {
        Some(end) => end,
        None => {
            warn!(
                "duration {:?} of event {:?} overflows its start, using zero",
                raw.duration, raw.title
            );
            start.clone()
        }
    };

    let mut event = CalendarEvent::new(
        &raw.id,
        &raw.title,
        start.with_timezone(display_tz).fixed_offset(),
        end.with_timezone(display_tz).fixed_offset(),
    )
    .with_attendees(raw.attendees.clone());

    if let Some(ref description) = raw.description {
        event = event.with_description(description);
    }
    if let Some(ref location) = raw.location {
        event = event.with_location(location);
    }

    Some(event)
}

/// Normalizes a batch, dropping events that fail.
pub fn normalize_events<D: TimeZone>(raws: &[RawEvent], display_tz: &D) -> Vec<CalendarEvent> {
    let events: Vec<_> = raws
        .iter()
        .filter_map(|raw| normalize_event(raw, display_tz))
        .collect();

    if events.len() != raws.len() {
        debug!("normalized {} of {} events", events.len(), raws.len());
    }
    events
}

/// Parses an ISO 8601 duration such as `PT1H30M`.
///
/// Missing or malformed values are zero; the malformed case is logged.
pub fn parse_duration(value: Option<&str>, title: &str) -> Duration {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return Duration::zero();
    };

    let parsed = iso8601::duration(value).map(std::time::Duration::from);
    match parsed.map(Duration::from_std) {
        Ok(Ok(duration)) => duration,
        Ok(Err(e)) => {
            warn!("duration {:?} of event {:?} is out of range, using zero: {}", value, title, e);
            Duration::zero()
        }
        Err(e) => {
            warn!("cannot parse duration {:?} of event {:?}, using zero: {}", value, title, e);
            Duration::zero()
        }
    }
}

fn parse_start(value: &str, zone: &Tz) -> Option<DateTime<Tz>> {
    let naive = NaiveDateTime::parse_from_str(value, START_FORMAT).ok()?;
    zone.from_local_datetime(&naive).earliest()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike, Utc};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn standup() -> RawEvent {
        RawEvent::new("evt-1", "Standup", "2024-01-01T09:00:00")
            .with_time_zone("America/New_York")
            .with_duration("PT1H30M")
    }

    mod times {
        use super::*;

        #[test]
        fn duration_adds_to_start_in_zone() {
            let event = normalize_event(&standup(), &chrono_tz::America::New_York).unwrap();
            assert_eq!(event.start.to_rfc3339(), "2024-01-01T09:00:00-05:00");
            assert_eq!(event.end.to_rfc3339(), "2024-01-01T10:30:00-05:00");
            assert_eq!(event.duration(), Duration::minutes(90));
        }

        #[test]
        fn converted_to_display_zone() {
            let event = normalize_event(&standup(), &utc()).unwrap();
            assert_eq!(event.start.to_rfc3339(), "2024-01-01T14:00:00+00:00");
            assert_eq!(event.end.to_rfc3339(), "2024-01-01T15:30:00+00:00");

            let tokyo = normalize_event(&standup(), &chrono_tz::Asia::Tokyo).unwrap();
            assert_eq!(tokyo.start.to_rfc3339(), "2024-01-01T23:00:00+09:00");
            assert_eq!(tokyo.start, event.start);
        }

        #[test]
        fn display_in_local_zone() {
            let event = normalize_event(&standup(), &chrono::Local).unwrap();
            assert_eq!(
                event.start.with_timezone(&Utc).to_rfc3339(),
                "2024-01-01T14:00:00+00:00"
            );
        }

        #[test]
        fn fractional_seconds_accepted() {
            let raw = RawEvent::new("a", "x", "2024-01-01T09:00:00.500").with_time_zone("UTC");
            let event = normalize_event(&raw, &utc()).unwrap();
            assert_eq!(event.start.nanosecond(), 500_000_000);
        }

        #[test]
        fn missing_zone_is_utc() {
            let raw = RawEvent::new("a", "x", "2024-01-01T09:00:00").with_duration("PT1H");
            let event = normalize_event(&raw, &utc()).unwrap();
            assert_eq!(event.start.to_rfc3339(), "2024-01-01T09:00:00+00:00");
        }

        #[test]
        fn ambiguous_local_time_takes_earliest() {
            // 01:30 happens twice in New York on 2024-11-03
            let raw = RawEvent::new("a", "x", "2024-11-03T01:30:00")
                .with_time_zone("America/New_York");
            let event = normalize_event(&raw, &utc()).unwrap();
            assert_eq!(event.start.to_rfc3339(), "2024-11-03T05:30:00+00:00");
        }
    }

    mod skipped {
        use super::*;

        #[test]
        fn unknown_time_zone() {
            let raw = standup().with_time_zone("Mars/Olympus_Mons");
            assert!(normalize_event(&raw, &utc()).is_none());
        }

        #[test]
        fn unparseable_start() {
            let raw = RawEvent::new("a", "x", "tomorrow at nine").with_time_zone("UTC");
            assert!(normalize_event(&raw, &utc()).is_none());
        }

        #[test]
        fn empty_start() {
            let raw = RawEvent::new("a", "x", "").with_time_zone("UTC");
            assert!(normalize_event(&raw, &utc()).is_none());
        }

        #[test]
        fn start_in_dst_gap() {
            // 02:30 does not exist in New York on 2024-03-10
            let raw = RawEvent::new("a", "x", "2024-03-10T02:30:00")
                .with_time_zone("America/New_York");
            assert!(normalize_event(&raw, &utc()).is_none());
        }

        #[test]
        fn batch_keeps_the_rest() {
            let raws = vec![
                standup(),
                standup().with_time_zone("Not/AZone"),
                RawEvent::new("c", "y", "garbage").with_time_zone("UTC"),
                RawEvent::new("d", "Lunch", "2024-01-01T12:00:00").with_time_zone("UTC"),
            ];
            let events = normalize_events(&raws, &utc());
            let ids: Vec<_> = events.iter().map(|e| e.id.as_str()).collect();
            assert_eq!(ids, vec!["evt-1", "d"]);
        }
    }

    mod durations {
        use super::*;

        #[test]
        fn iso8601_values() {
            assert_eq!(parse_duration(Some("PT15M"), "x"), Duration::minutes(15));
            assert_eq!(parse_duration(Some("PT1H"), "x"), Duration::hours(1));
            assert_eq!(parse_duration(Some("PT45S"), "x"), Duration::seconds(45));
        }

        #[test]
        fn missing_or_malformed_is_zero() {
            assert_eq!(parse_duration(None, "x"), Duration::zero());
            assert_eq!(parse_duration(Some(""), "x"), Duration::zero());
            assert_eq!(parse_duration(Some("ninety minutes"), "x"), Duration::zero());
        }

        #[test]
        fn malformed_duration_keeps_event() {
            let raw = standup().with_duration("1h30");
            let event = normalize_event(&raw, &utc()).unwrap();
            assert_eq!(event.end, event.start);
        }

        #[test]
        fn huge_duration_is_zero() {
            let raw = RawEvent::new("a", "x", "2024-01-01T09:00:00")
                .with_time_zone("UTC")
                .with_duration("P999999Y");
            let event = normalize_event(&raw, &utc()).unwrap();
            assert_eq!(event.start.to_rfc3339(), "2024-01-01T09:00:00+00:00");
            assert_eq!(event.end, event.start);
        }
    }

    #[test]
    fn optional_fields_carried_over() {
        let raw = standup()
            .with_description("daily sync")
            .with_location("Room 4")
            .with_attendees(vec!["alice".to_string()]);
        let event = normalize_event(&raw, &utc()).unwrap();
        assert_eq!(event.id, "evt-1");
        assert_eq!(event.title, "Standup");
        assert_eq!(event.description.as_deref(), Some("daily sync"));
        assert_eq!(event.location.as_deref(), Some("Room 4"));
        assert_eq!(event.attendees, vec!["alice".to_string()]);
    }
}
