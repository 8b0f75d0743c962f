//! Morgen provider implementation.
//!
//! This module implements the [`CalendarProvider`] trait for Morgen.

use std::collections::BTreeMap;

use agenda_core::{CalendarEvent, DayWindow};
use chrono::{Local, NaiveDate};
use futures_util::future::try_join_all;
use tracing::{debug, info};

use crate::config::ProviderConfig;
use crate::error::{ProviderError, ProviderResult};
use crate::normalize::normalize_events;
use crate::provider::{BoxFuture, CalendarInfo, CalendarProvider};

use super::client::MorgenClient;

/// Morgen calendar provider.
///
/// Aggregates events across every readable, non-ignored calendar of every
/// account connected to Morgen. One events request is made per account.
#[derive(Debug)]
pub struct MorgenProvider {
    client: MorgenClient,
}

impl MorgenProvider {
    /// The name this provider is registered under.
    pub const NAME: &'static str = "morgen";

    /// Creates a new Morgen provider.
    ///
    /// The API key is not read here; see [`ProviderConfig::api_key`].
    pub fn new(config: ProviderConfig) -> ProviderResult<Self> {
        config.validate()?;
        let client = MorgenClient::new(config)?;
        Ok(Self { client })
    }

    fn config(&self) -> &ProviderConfig {
        self.client.config()
    }

    async fn calendars(&self, api_key: &str) -> ProviderResult<Vec<CalendarInfo>> {
        let calendars = self
            .client
            .list_calendars(api_key)
            .await?
            .into_iter()
            .map(|cal| {
                let ignored = self.config().is_ignored(&cal.name);
                CalendarInfo::new(cal.id, cal.name, cal.account_id)
                    .with_can_read(cal.my_rights.may_read_items)
                    .with_ignored(ignored)
            })
            .collect();
        Ok(calendars)
    }

    async fn all_calendars(&self) -> ProviderResult<Vec<CalendarInfo>> {
        let api_key = self.config().api_key()?;
        self.calendars(&api_key).await
    }

    async fn fetch_day(&self, date: NaiveDate) -> ProviderResult<Vec<CalendarEvent>> {
        let api_key = self.config().api_key()?;
        let window = DayWindow::for_date(date, &Local).ok_or_else(|| {
            ProviderError::configuration(format!("no local day window for {}", date))
        })?;

        let calendars = self.calendars(&api_key).await?;
        let accounts = group_by_account(&calendars);
        if accounts.is_empty() {
            info!("no readable calendars, nothing to fetch");
            return Ok(Vec::new());
        }

        debug!(
            "fetching {} from {} to {} across {} accounts",
            date,
            window.start_rfc3339(),
            window.end_rfc3339(),
            accounts.len()
        );

        let requests = accounts.iter().map(|(account_id, calendar_ids)| {
            self.client
                .list_events(&api_key, &window, account_id, calendar_ids)
        });
        let raw: Vec<_> = try_join_all(requests).await?.into_iter().flatten().collect();

        Ok(normalize_events(&raw, &Local))
    }
}

/// Groups included calendars by owning account.
///
/// Accounts iterate in id order; calendar ids keep listing order.
fn group_by_account(calendars: &[CalendarInfo]) -> BTreeMap<String, Vec<String>> {
    let mut accounts: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for cal in calendars {
        if !cal.is_included() {
            debug!(
                "skipping calendar {:?} (readable: {}, ignored: {})",
                cal.name, cal.can_read, cal.ignored
            );
            continue;
        }
        accounts
            .entry(cal.account_id.clone())
            .or_default()
            .push(cal.id.clone());
    }
    accounts
}

impl CalendarProvider for MorgenProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn events_for_date(
        &self,
        date: NaiveDate,
    ) -> BoxFuture<'_, ProviderResult<Vec<CalendarEvent>>> {
        Box::pin(async move {
            self.fetch_day(date)
                .await
                .map_err(|e| e.with_provider(Self::NAME))
        })
    }

    fn list_calendars(&self) -> BoxFuture<'_, ProviderResult<Vec<CalendarInfo>>> {
        Box::pin(async move {
            self.all_calendars()
                .await
                .map_err(|e| e.with_provider(Self::NAME))
        })
    }
}
