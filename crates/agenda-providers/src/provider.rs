//! CalendarProvider trait definition.
//!
//! This module defines the [`CalendarProvider`] trait, the core abstraction
//! for calendar backends. A provider turns a calendar day into a list of
//! canonical [`CalendarEvent`]s; callers never see the backend's wire types.

use std::future::Future;
use std::pin::Pin;

use agenda_core::CalendarEvent;
use chrono::NaiveDate;

use crate::error::{ProviderError, ProviderResult};

/// Information about a calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarInfo {
    /// Unique identifier for the calendar.
    pub id: String,
    /// Human-readable name of the calendar.
    pub name: String,
    /// The account that owns the calendar.
    pub account_id: String,
    /// Whether the user may read events from this calendar.
    pub can_read: bool,
    /// Whether the calendar name is on the ignore list.
    pub ignored: bool,
}

impl CalendarInfo {
    /// Creates a readable, non-ignored calendar.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        account_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            account_id: account_id.into(),
            can_read: true,
            ignored: false,
        }
    }

    /// Builder method to set read permission.
    pub fn with_can_read(mut self, can_read: bool) -> Self {
        self.can_read = can_read;
        self
    }

    /// Builder method to mark as ignored.
    pub fn with_ignored(mut self, ignored: bool) -> Self {
        self.ignored = ignored;
        self
    }

    /// Returns true if events from this calendar are aggregated.
    pub fn is_included(&self) -> bool {
        self.can_read && !self.ignored
    }
}

/// A boxed future for async trait methods.
///
/// Boxed futures keep the trait object-safe so the factory can hand out
/// `Box<dyn CalendarProvider>`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The core abstraction for calendar providers.
///
/// # Implementation Notes
///
/// - Implementations must be `Send + Sync`
/// - Construction must not perform network I/O
/// - Credentials are resolved at fetch time, before the first request
/// - Any failed request aborts the whole fetch; there are no partial results
/// - The order of returned events is unspecified
pub trait CalendarProvider: Send + Sync {
    /// Returns the stable identifier of this provider (e.g., "morgen").
    fn name(&self) -> &str;

    /// Fetches all events of `date`, from local midnight to the next local midnight.
    ///
    /// Events that cannot be normalized (unknown time zone, unparseable
    /// start) are dropped with a warning.
    ///
    /// # Errors
    ///
    /// Returns a `MissingCredential` error if the API key is not set, or a
    /// request error if any HTTP request fails.
    fn events_for_date(&self, date: NaiveDate)
    -> BoxFuture<'_, ProviderResult<Vec<CalendarEvent>>>;

    /// Lists every calendar visible to the user, including excluded ones.
    fn list_calendars(&self) -> BoxFuture<'_, ProviderResult<Vec<CalendarInfo>>>;
}

/// A provider that always returns an error.
///
/// This is useful for testing or as a placeholder when a provider
/// fails to initialize.
#[derive(Debug)]
pub struct ErrorProvider {
    name: String,
    error: ProviderError,
}

impl ErrorProvider {
    /// Creates a new error provider.
    pub fn new(name: impl Into<String>, error: ProviderError) -> Self {
        Self {
            name: name.into(),
            error,
        }
    }

    fn error(&self) -> ProviderError {
        // ProviderError is not Clone because of the boxed source.
        ProviderError::new(self.error.code(), self.error.message()).with_provider(&self.name)
    }
}

impl CalendarProvider for ErrorProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn events_for_date(
        &self,
        _date: NaiveDate,
    ) -> BoxFuture<'_, ProviderResult<Vec<CalendarEvent>>> {
        let error = self.error();
        Box::pin(async move { Err(error) })
    }

    fn list_calendars(&self) -> BoxFuture<'_, ProviderResult<Vec<CalendarInfo>>> {
        let error = self.error();
        Box::pin(async move { Err(error) })
    }
}
