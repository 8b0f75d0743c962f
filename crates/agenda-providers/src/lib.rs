//! CalendarProvider trait and implementations.
//!
//! This crate provides the abstraction layer for calendar backends:
//!
//! - [`CalendarProvider`] - The core trait that all calendar backends implement
//! - [`ProviderConfig`] - Per-provider connection settings
//! - [`create_provider`] - Builds a provider from its configured name
//! - [`RawEvent`] - Provider-agnostic raw event data
//! - [`normalize_event`] - Converts raw events to [`agenda_core::CalendarEvent`]
//! - [`ProviderError`] - Error types for provider operations
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Morgen API     │
//! └────────┬────────┘
//!          │ calendars/list, events/list
//!          ▼
//! ┌─────────────────┐
//! │ MorgenProvider  │
//! └────────┬────────┘
//!          │
//!          ▼
//!   ┌─────────────┐
//!   │  RawEvent   │
//!   └──────┬──────┘
//!          │
//!          ▼ normalize_event()
//!   ┌──────────────────┐
//!   │  CalendarEvent   │
//!   └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use agenda_providers::create_provider;
//!
//! let provider = create_provider(&config.provider, &config.providers)?;
//! let events = provider.events_for_date(date).await?;
//! ```

pub mod config;
pub mod error;
pub mod factory;
#[cfg(feature = "morgen")]
pub mod morgen;
pub mod normalize;
pub mod provider;
pub mod raw_event;

// Re-export main types at crate root
pub use config::{
    API_KEY_PLACEHOLDER, DEFAULT_TIMEOUT_SECS, MORGEN_API_KEY_ENV, MORGEN_BASE_URL,
    ProviderConfig,
};
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use factory::{available_providers, create_provider};
pub use normalize::{normalize_event, normalize_events, parse_duration};
pub use provider::{BoxFuture, CalendarInfo, CalendarProvider, ErrorProvider};
pub use raw_event::RawEvent;
