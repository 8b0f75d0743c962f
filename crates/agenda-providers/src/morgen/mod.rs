//! Morgen provider.
//!
//! Talks to the Morgen v3 REST API, which aggregates the calendars of every
//! account connected in Morgen.
//!
//! # Fetch Flow
//!
//! 1. Read the API key from the configured environment variable
//! 2. `GET {base_url}/calendars/list`
//! 3. Drop unreadable calendars and calendars on the ignore list
//! 4. Group the rest by account
//! 5. `GET {base_url}/events/list` once per account, concurrently
//! 6. Normalize the raw events to the local time zone
//!
//! Any failed request fails the whole fetch.
//!
//! # Example
//!
//! ```ignore
//! use agenda_providers::ProviderConfig;
//! use agenda_providers::morgen::MorgenProvider;
//!
//! let provider = MorgenProvider::new(ProviderConfig::morgen_default())?;
//! let events = provider.events_for_date(today).await?;
//! ```

mod client;
mod provider;

pub use client::{ApiCalendar, ApiRights, MorgenClient};
pub use provider::MorgenProvider;
