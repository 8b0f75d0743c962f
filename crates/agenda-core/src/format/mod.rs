//! Output formatting for agenda events.
//!
//! This module turns [`CalendarEvent`]s into display text:
//! - [`Template`]: a parsed `{field}` template for one event line
//! - [`EventFormatter`]: binds a template to a `strftime` time format
//! - [`EventFormatter::render_agenda`]: the markdown document for a day
//!
//! # Example
//!
//! ```rust
//! use agenda_core::format::EventFormatter;
//!
//! let formatter = EventFormatter::new("%H:%M", "- {start_time_formatted}: {title}").unwrap();
//! // let line = formatter.format_event(&event)?;
//! ```

mod template;

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDate};
use thiserror::Error;
use tracing::warn;

use crate::event::CalendarEvent;
use crate::time::{format_duration, format_long_date};

pub use template::{Template, TemplateContext};

/// Default time format: 24-hour `HH:MM`.
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M";

/// Default event line template.
pub const DEFAULT_EVENT_TEMPLATE: &str =
    "- {start_time_formatted}-{end_time_formatted}: {title}";

/// Errors from building or applying a formatter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The template or time format is invalid.
    #[error("failed to parse event template: {message}")]
    TemplateParse { message: String },

    /// Rendering failed for one event.
    #[error("failed to render event template: {message}")]
    TemplateRender { message: String },
}

impl FormatError {
    /// Creates a template parse error.
    pub fn template_parse(message: impl Into<String>) -> Self {
        Self::TemplateParse {
            message: message.into(),
        }
    }

    /// Creates a template render error.
    pub fn template_render(message: impl Into<String>) -> Self {
        Self::TemplateRender {
            message: message.into(),
        }
    }
}

/// A rendered agenda for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaDocument {
    /// The markdown heading line.
    pub heading: String,
    /// One rendered line per event that formatted successfully.
    pub lines: Vec<String>,
    /// Number of events skipped because rendering failed.
    pub skipped: usize,
}

impl std::fmt::Display for AgendaDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.heading)?;
        for line in &self.lines {
            write!(f, "\n{}", line)?;
        }
        Ok(())
    }
}

/// Formats events with a user template and time format.
///
/// Formatting is pure: it reads the event and the formatter and returns a
/// new string.
#[derive(Debug, Clone)]
pub struct EventFormatter {
    time_format: String,
    template: Template,
}

impl EventFormatter {
    /// Creates a formatter, validating both the time format and the template.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::TemplateParse`] if the template does not parse
    /// or the time format contains an unknown `strftime` specifier.
    pub fn new(time_format: &str, template: &str) -> Result<Self, FormatError> {
        if StrftimeItems::new(time_format).any(|item| matches!(item, Item::Error)) {
            return Err(FormatError::template_parse(format!(
                "invalid time format {:?}",
                time_format
            )));
        }

        Ok(Self {
            time_format: time_format.to_string(),
            template: Template::parse(template)?,
        })
    }

    /// Creates a formatter with the default time format and template.
    pub fn with_defaults() -> Self {
        Self {
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            template: Template::parse(DEFAULT_EVENT_TEMPLATE).expect("valid default template"),
        }
    }

    /// Returns the time format.
    pub fn time_format(&self) -> &str {
        &self.time_format
    }

    /// Returns the parsed template.
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Renders a single event.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::TemplateRender`] if the template references a
    /// field the event context does not define.
    pub fn format_event(&self, event: &CalendarEvent) -> Result<String, FormatError> {
        let context = self.context_for(event)?;
        self.template.render(&context)
    }

    /// Renders the agenda document for `date`.
    ///
    /// The heading says "Today's Meetings" when `date == today`. Events that
    /// fail to render are logged and left out; the rest still render.
    pub fn render_agenda(
        &self,
        date: NaiveDate,
        today: NaiveDate,
        events: &[CalendarEvent],
    ) -> AgendaDocument {
        let heading = if date == today {
            format!("# Today's Meetings ({})", format_long_date(date))
        } else {
            format!("# Meetings ({})", format_long_date(date))
        };

        let mut lines = Vec::with_capacity(events.len());
        let mut skipped = 0;
        for event in events {
            match self.format_event(event) {
                Ok(line) => lines.push(line),
                Err(e) => {
                    warn!("failed to format event {:?}: {}", event.title, e);
                    skipped += 1;
                }
            }
        }

        AgendaDocument {
            heading,
            lines,
            skipped,
        }
    }

    /// Builds the template context for an event.
    fn context_for(&self, event: &CalendarEvent) -> Result<TemplateContext, FormatError> {
        let mut context = TemplateContext::new();
        context.insert("id", event.id.clone());
        context.insert("title", event.title.clone());
        context.insert(
            "description",
            event.description.clone().unwrap_or_default(),
        );
        context.insert("location", event.location.clone().unwrap_or_default());
        context.insert("attendees", event.attendees.join(", "));
        context.insert("start_time", event.start.to_rfc3339());
        context.insert("end_time", event.end.to_rfc3339());
        context.insert("start_time_formatted", self.format_time(&event.start)?);
        context.insert("end_time_formatted", self.format_time(&event.end)?);
        context.insert("duration", format_duration(event.duration()));
        Ok(context)
    }

    fn format_time(&self, dt: &DateTime<FixedOffset>) -> Result<String, FormatError> {
        let mut out = String::new();
        write!(out, "{}", dt.format(&self.time_format)).map_err(|_| {
            FormatError::template_render(format!(
                "time format {:?} cannot format {}",
                self.time_format, dt
            ))
        })?;
        Ok(out)
    }
}

#[cfg(test)]
mod golden_tests;
