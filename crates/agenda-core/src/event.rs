//! Event types for calendar events.
//!
//! This module provides [`CalendarEvent`], the provider-agnostic
//! representation every calendar provider produces. Once built, an event is
//! plain data that moves by value through post-processing and formatting.

use chrono::{DateTime, Duration, FixedOffset, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A normalized calendar event from any provider.
///
/// Start and end carry an explicit offset. Providers resolve them to the
/// local time zone before handing them out, so display code never has to
/// look at the source zone again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Provider-specific identifier, unique within one fetch.
    pub id: String,
    /// The event title. May be empty.
    pub title: String,
    /// When the event starts.
    pub start: DateTime<FixedOffset>,
    /// When the event ends.
    ///
    /// Not guaranteed to be after `start`: malformed provider data can
    /// produce a zero or negative duration.
    pub end: DateTime<FixedOffset>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Attendee display strings, in provider order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attendees: Vec<String>,
}

impl CalendarEvent {
    /// Creates a new event with the required fields.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
            description: None,
            location: None,
            attendees: Vec::new(),
        }
    }

    /// Returns `end - start`. Can be zero or negative.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Canonical, full-precision string for the start instant.
    ///
    /// Two events whose starts denote the same instant produce the same
    /// key, whatever offset each one carries.
    pub fn start_key(&self) -> String {
        self.start
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Nanos, true)
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
}
