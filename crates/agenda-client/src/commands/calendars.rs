//! `agenda calendars`: show which calendars feed the agenda.

use agenda_providers::{CalendarInfo, create_provider};

use crate::config::Config;
use crate::error::ClientResult;

/// Lists every calendar of the selected provider.
pub async fn list(config: &Config) -> ClientResult<()> {
    let provider = create_provider(&config.provider, &config.providers)?;
    let calendars = provider.list_calendars().await?;

    if calendars.is_empty() {
        println!("No calendars found.");
        return Ok(());
    }
    for calendar in &calendars {
        println!("{}", calendar_line(calendar));
    }
    Ok(())
}

/// One line per calendar: `[x]` included, `[ ]` excluded with the reason.
pub fn calendar_line(calendar: &CalendarInfo) -> String {
    let mark = if calendar.is_included() { "[x]" } else { "[ ]" };
    let mut line = format!(
        "{} {} (id: {}, account: {})",
        mark, calendar.name, calendar.id, calendar.account_id
    );
    if !calendar.can_read {
        line.push_str(" - not readable");
    }
    if calendar.ignored {
        line.push_str(" - ignored");
    }
    line
}
