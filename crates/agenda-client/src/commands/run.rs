//! The default command: print the agenda for one day.

use agenda_core::{AgendaOutcome, EventFormatter, format_long_date, process_events};
use agenda_providers::create_provider;
use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::ClientResult;

/// Fetches, post-processes and prints the agenda for `date` (default: today).
///
/// The template is validated before the provider is built, so a bad
/// template fails without any network traffic.
pub async fn run(config: &Config, date: Option<NaiveDate>) -> ClientResult<()> {
    let formatter = EventFormatter::new(&config.time_format, &config.event_template)?;
    let provider = create_provider(&config.provider, &config.providers)?;

    let today = Local::now().date_naive();
    let date = date.unwrap_or(today);
    info!(
        "provider={} date={} time_format={:?} template={:?}",
        provider.name(),
        date,
        config.time_format,
        config.event_template
    );

    let events = provider.events_for_date(date).await?;
    debug!("provider returned {} events", events.len());

    println!("{}", render(&formatter, date, today, process_events(events)));
    Ok(())
}

/// Renders the post-processed outcome as the text printed on stdout.
pub fn render(
    formatter: &EventFormatter,
    date: NaiveDate,
    today: NaiveDate,
    outcome: AgendaOutcome,
) -> String {
    match outcome {
        AgendaOutcome::NoEvents => no_events_message(date, today),
        AgendaOutcome::Events(events) => {
            let document = formatter.render_agenda(date, today, &events);
            if document.skipped > 0 {
                info!("{} events could not be formatted", document.skipped);
            }
            document.to_string()
        }
    }
}

/// The informational line printed when a day has no events.
pub fn no_events_message(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "No events found for today.".to_string()
    } else {
        format!("No events found for {}.", format_long_date(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_core::CalendarEvent;
    use chrono::{FixedOffset, TimeZone};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
    }

    fn event(id: &str, title: &str, h: u32) -> CalendarEvent {
        let tz = FixedOffset::east_opt(0).unwrap();
        let start = tz.with_ymd_and_hms(2024, 1, 2, h, 0, 0).unwrap();
        CalendarEvent::new(id, title, start, start + chrono::Duration::minutes(30))
    }

    #[test]
    fn no_events_today() {
        let out = render(
            &EventFormatter::with_defaults(),
            day(),
            day(),
            process_events(Vec::new()),
        );
        assert_eq!(out, "No events found for today.");
    }

    #[test]
    fn no_events_other_day() {
        let today = day().succ_opt().unwrap();
        assert_eq!(
            no_events_message(day(), today),
            "No events found for January 2, 2024."
        );
    }

    #[test]
    fn events_are_deduped_and_sorted() {
        let events = vec![
            event("b", "Review", 15),
            event("a", "Standup", 9),
            event("a2", "Standup", 9),
        ];
        let out = render(
            &EventFormatter::with_defaults(),
            day(),
            day(),
            process_events(events),
        );
        assert_eq!(
            out,
            "# Today's Meetings (January 2, 2024)\n\n- 09:00-09:30: Standup\n- 15:00-15:30: Review"
        );
    }

    #[tokio::test]
    async fn bad_template_fails_before_provider_lookup() {
        let mut config = Config::default();
        config.event_template = "{title".to_string();
        config.provider = "not-configured".to_string();

        let err = run(&config, Some(day())).await.unwrap_err();
        assert!(matches!(err, crate::error::ClientError::Format(_)));
    }

    #[tokio::test]
    async fn unknown_provider_is_reported() {
        let mut config = Config::default();
        config.provider = "not-configured".to_string();

        let err = run(&config, Some(day())).await.unwrap_err();
        assert!(err.to_string().contains("not-configured"));
    }
}
