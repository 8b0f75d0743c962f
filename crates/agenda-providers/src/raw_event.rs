//! Raw event type from calendar providers.
//!
//! [`RawEvent`] is event data as a backend reports it, before time zone and
//! duration resolution. The start is a wall-clock time without an offset;
//! the zone and the ISO 8601 duration travel beside it. Normalization turns
//! it into an [`agenda_core::CalendarEvent`].

use serde::{Deserialize, Serialize};

/// A calendar event as returned by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Provider event identifier.
    pub id: String,
    /// The event title (may be empty).
    pub title: String,
    /// Wall-clock start, e.g. `2024-01-01T09:00:00`.
    pub start: String,
    /// IANA time zone of `start`. UTC when absent.
    pub time_zone: Option<String>,
    /// ISO 8601 duration, e.g. `PT1H30M`.
    pub duration: Option<String>,
    /// Event description.
    pub description: Option<String>,
    /// Event location.
    pub location: Option<String>,
    /// Attendee names or addresses.
    #[serde(default)]
    pub attendees: Vec<String>,
    /// The calendar this event came from.
    pub calendar_id: Option<String>,
}

impl RawEvent {
    /// Creates a new raw event with required fields.
    pub fn new(id: impl Into<String>, title: impl Into<String>, start: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start: start.into(),
            time_zone: None,
            duration: None,
            description: None,
            location: None,
            attendees: Vec::new(),
            calendar_id: None,
        }
    }

    /// Builder method to set the time zone.
    pub fn with_time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = Some(time_zone.into());
        self
    }

    /// Builder method to set the duration.
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to set attendees.
    pub fn with_attendees(mut self, attendees: Vec<String>) -> Self {
        self.attendees = attendees;
        self
    }

    /// Builder method to set the calendar ID.
    pub fn with_calendar_id(mut self, calendar_id: impl Into<String>) -> Self {
        self.calendar_id = Some(calendar_id.into());
        self
    }
}
