//! Morgen REST API client.
//!
//! This module provides a low-level HTTP client for the Morgen v3 API,
//! handling header resolution, request building, and response parsing.

use std::collections::BTreeMap;

use agenda_core::DayWindow;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::{ProviderError, ProviderResult};
use crate::raw_event::RawEvent;

const CALENDARS_PATH: &str = "calendars/list";
const EVENTS_PATH: &str = "events/list";

/// Morgen API client.
#[derive(Debug)]
pub struct MorgenClient {
    http_client: reqwest::Client,
    config: ProviderConfig,
}

impl MorgenClient {
    /// Creates a client with the configured per-request timeout.
    ///
    /// No request is made here.
    pub fn new(config: ProviderConfig) -> ProviderResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                ProviderError::configuration(format!("failed to create HTTP client: {}", e))
                    .with_source(e)
            })?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Returns the configuration this client was built from.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Lists every calendar of every connected account.
    pub async fn list_calendars(&self, api_key: &str) -> ProviderResult<Vec<ApiCalendar>> {
        let list: Envelope<CalendarList> = self.get(CALENDARS_PATH, api_key, &[]).await?;
        debug!("listed {} calendars", list.data.calendars.len());
        Ok(list.data.calendars)
    }

    /// Lists the events of one account's calendars within `window`.
    pub async fn list_events(
        &self,
        api_key: &str,
        window: &DayWindow,
        account_id: &str,
        calendar_ids: &[String],
    ) -> ProviderResult<Vec<RawEvent>> {
        let query = [
            ("start", window.start_rfc3339()),
            ("end", window.end_rfc3339()),
            ("accountId", account_id.to_string()),
            ("calendarIds", calendar_ids.join(",")),
        ];
        let list: Envelope<EventList> = self.get(EVENTS_PATH, api_key, &query).await?;

        debug!(
            "fetched {} events for account {} ({} calendars)",
            list.data.events.len(),
            account_id,
            calendar_ids.len()
        );
        Ok(list.data.events.into_iter().map(RawEvent::from).collect())
    }

    /// Builds the request headers with the API key substituted.
    fn headers(&self, api_key: &str) -> ProviderResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (name, value) in self.config.resolve_headers(api_key) {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                ProviderError::configuration(format!("invalid header name {:?}: {}", name, e))
            })?;
            // The resolved value holds the key; keep it out of the message.
            let header_value = HeaderValue::from_str(&value).map_err(|e| {
                ProviderError::configuration(format!("invalid value for header {}: {}", name, e))
            })?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        api_key: &str,
        query: &[(&str, String)],
    ) -> ProviderResult<T> {
        let url = self.config.endpoint(path);
        let headers = self.headers(api_key)?;

        let mut request = self.http_client.get(&url).headers(headers);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(|e| {
            let err = if e.is_timeout() {
                ProviderError::network(format!("request to {} timed out", url))
            } else if e.is_connect() {
                ProviderError::network(format!("connection failed: {}", e))
            } else {
                ProviderError::network(format!("request failed: {}", e))
            };
            err.with_source(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::http_status(status.as_u16(), &body));
        }

        let body = response.text().await.map_err(|e| {
            ProviderError::network(format!("failed to read response: {}", e)).with_source(e)
        })?;

        serde_json::from_str(&body).map_err(|e| {
            ProviderError::invalid_response(format!("failed to parse {} response: {}", path, e))
                .with_source(e)
        })
    }
}

// Morgen API response types

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct CalendarList {
    #[serde(default)]
    calendars: Vec<ApiCalendar>,
}

#[derive(Debug, Deserialize)]
struct EventList {
    #[serde(default)]
    events: Vec<ApiEvent>,
}

/// A calendar as listed by the Morgen API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCalendar {
    /// Calendar identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Owning account.
    pub account_id: String,
    /// Permissions of the API key owner.
    #[serde(default)]
    pub my_rights: ApiRights,
    /// Display color.
    pub color: Option<String>,
}

/// Calendar permissions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRights {
    /// Whether events can be read.
    #[serde(default)]
    pub may_read_items: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEvent {
    id: Option<String>,
    title: Option<String>,
    start: Option<String>,
    duration: Option<String>,
    time_zone: Option<String>,
    description: Option<String>,
    location: Option<String>,
    calendar_id: Option<String>,
    participants: Option<BTreeMap<String, ApiParticipant>>,
}

#[derive(Debug, Deserialize)]
struct ApiParticipant {
    name: Option<String>,
    email: Option<String>,
}

impl From<ApiEvent> for RawEvent {
    fn from(event: ApiEvent) -> Self {
        let attendees = event
            .participants
            .unwrap_or_default()
            .into_values()
            .filter_map(|p| p.name.filter(|n| !n.is_empty()).or(p.email))
            .collect();

        Self {
            id: event.id.unwrap_or_default(),
            title: event.title.unwrap_or_default(),
            start: event.start.unwrap_or_default(),
            time_zone: event.time_zone,
            duration: event.duration,
            description: event.description,
            location: event.location,
            attendees,
            calendar_id: event.calendar_id,
        }
    }
}
