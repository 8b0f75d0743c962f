//! Core types: events, day windows, templates, formatting, post-processing

pub mod agenda;
pub mod event;
pub mod format;
pub mod time;
pub mod tracing;

pub use agenda::{AgendaOutcome, dedup_events, process_events, sort_events};
pub use event::CalendarEvent;
pub use format::{
    AgendaDocument, DEFAULT_EVENT_TEMPLATE, DEFAULT_TIME_FORMAT, EventFormatter, FormatError,
    Template,
};
pub use time::{DayWindow, format_duration, format_long_date};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
