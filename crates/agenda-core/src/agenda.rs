//! Event post-processing: deduplication and ordering.
//!
//! Providers can return the same event once per calendar it belongs to, in
//! whatever order their requests completed. [`process_events`] collapses
//! duplicates and sorts by start so the formatter sees a clean day.

use std::collections::HashSet;

use tracing::debug;

use crate::event::CalendarEvent;

/// The result of post-processing a day's events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgendaOutcome {
    /// At least one event remains, deduplicated and sorted by start.
    Events(Vec<CalendarEvent>),
    /// Nothing to show. Not an error.
    NoEvents,
}

impl AgendaOutcome {
    /// Returns the events, empty for [`AgendaOutcome::NoEvents`].
    pub fn events(&self) -> &[CalendarEvent] {
        match self {
            Self::Events(events) => events,
            Self::NoEvents => &[],
        }
    }

    /// Returns true if there is nothing to show.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NoEvents)
    }
}

/// Drops events that repeat an earlier `(title, start)` pair.
///
/// Starts are compared as instants at full precision. The first occurrence
/// wins and relative order is preserved.
pub fn dedup_events(events: Vec<CalendarEvent>) -> Vec<CalendarEvent> {
    let mut seen = HashSet::new();
    let before = events.len();
    let kept: Vec<_> = events
        .into_iter()
        .filter(|event| seen.insert((event.title.clone(), event.start_key())))
        .collect();

    if kept.len() != before {
        debug!("dropped {} duplicate events", before - kept.len());
    }
    kept
}

/// Stable sort by start instant.
pub fn sort_events(events: &mut [CalendarEvent]) {
    events.sort_by_key(|event| event.start);
}

/// Deduplicates, sorts and classifies a fetched event list.
pub fn process_events(events: Vec<CalendarEvent>) -> AgendaOutcome {
    let mut events = dedup_events(events);
    sort_events(&mut events);

    if events.is_empty() {
        AgendaOutcome::NoEvents
    } else {
        AgendaOutcome::Events(events)
    }
}
