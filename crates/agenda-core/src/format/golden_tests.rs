//! Golden tests for agenda output.
//!
//! These tests use insta inline snapshots to keep the rendered document
//! stable. Run `cargo insta review` after intentional changes.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};

use crate::agenda::{AgendaOutcome, process_events};
use crate::event::CalendarEvent;
use crate::format::EventFormatter;

fn at(h: u32, m: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 1, 1, h, m, 0)
        .unwrap()
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn sample_events() -> Vec<CalendarEvent> {
    vec![
        CalendarEvent::new("evt-3", "Lunch", at(12, 0), at(13, 0)),
        CalendarEvent::new("evt-1", "Standup", at(9, 0), at(9, 15))
            .with_description("from work calendar"),
        CalendarEvent::new("evt-2", "Standup", at(9, 0), at(9, 15))
            .with_description("from shared calendar"),
        CalendarEvent::new("evt-4", "Design review", at(14, 30), at(16, 0))
            .with_location("Room 2"),
    ]
}

fn render(formatter: &EventFormatter, events: Vec<CalendarEvent>) -> String {
    match process_events(events) {
        AgendaOutcome::Events(events) => formatter.render_agenda(day(), day(), &events).to_string(),
        AgendaOutcome::NoEvents => "<no events>".to_string(),
    }
}

#[test]
fn default_agenda() {
    let output = render(&EventFormatter::with_defaults(), sample_events());
    insta::assert_snapshot!(output, @r"
    # Today's Meetings (January 1, 2024)

    - 09:00-09:15: Standup
    - 12:00-13:00: Lunch
    - 14:30-16:00: Design review
    ");
}

#[test]
fn detailed_template() {
    let formatter = EventFormatter::new(
        "%-I:%M %p",
        "* {start_time_formatted} **{title}** ({duration})",
    )
    .unwrap();
    let output = render(&formatter, sample_events());
    insta::assert_snapshot!(output, @r"
    # Today's Meetings (January 1, 2024)

    * 9:00 AM **Standup** (15m)
    * 12:00 PM **Lunch** (1h)
    * 2:30 PM **Design review** (1h30m)
    ");
}

#[test]
fn partial_output_on_render_failure() {
    let formatter = EventFormatter::new("%H:%M", "- {title}").unwrap();
    let mut doc = formatter.render_agenda(day(), day(), &sample_events()[..1]);
    assert_eq!(doc.skipped, 0);

    let failing = EventFormatter::new("%H:%M", "- {title} @ {room}").unwrap();
    doc = failing.render_agenda(day(), day(), &sample_events());
    assert_eq!(doc.to_string(), "# Today's Meetings (January 1, 2024)\n");
    assert_eq!(doc.skipped, 4);
}

#[test]
fn no_events() {
    let output = render(&EventFormatter::with_defaults(), Vec::new());
    insta::assert_snapshot!(output, @"<no events>");
}
