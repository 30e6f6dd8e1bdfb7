//! The `next` command: show the next event of a calendar.

use std::path::Path;

use chrono::NaiveDate;
use nextevent_core::{Calendar, CalendarEntry, CalendarType, Clock, SystemClock};
use nextevent_providers::CalendarService;
use tracing::debug;

use crate::cli::NextFormat;
use crate::config::SkillConfig;
use crate::error::{SkillError, SkillResult};
use crate::ssml::{DEFAULT_CALENDAR_NAME, render_next_event};

/// Printed when the calendar has nothing coming up.
pub const NO_UPCOMING_TEXT: &str = "No upcoming events";

/// Prints the next event of `calendar_name`.
pub async fn run(
    config: &SkillConfig,
    calendar_name: &str,
    feed_file: Option<&Path>,
    format: NextFormat,
) -> SkillResult<()> {
    let calendar_type = CalendarType::from_name(calendar_name);
    if calendar_type.is_none() {
        return Err(SkillError::Config(format!(
            "unknown calendar: {} (known: {})",
            calendar_name,
            CalendarType::SUPPORTED.map(|c| c.as_str()).join(", ")
        )));
    }

    let fetcher = super::fetcher(config, feed_file).await?;
    let service = CalendarService::with_sources(fetcher, config.feed_sources()?);
    let zone = config.zone()?;
    let instant = SystemClock.now();
    debug!(zone = %zone, now = %zone.localize(instant), "Selecting next event");

    let calendar = service.get_calendar(calendar_type).await?;
    let output = match calendar.next_entry(zone.localize(instant)) {
        Some(entry) => render(&calendar, entry, format, zone.today(instant))?,
        None => NO_UPCOMING_TEXT.to_string(),
    };
    println!("{}", output);
    Ok(())
}

/// Renders one entry in the requested format.
pub fn render(
    calendar: &Calendar,
    entry: &CalendarEntry,
    format: NextFormat,
    today: NaiveDate,
) -> SkillResult<String> {
    match format {
        NextFormat::Text => Ok(render_text(calendar, entry)),
        NextFormat::Ssml => Ok(render_next_event(calendar.name(), entry, today)),
        NextFormat::Json => Ok(serde_json::to_string_pretty(entry)?),
    }
}

fn render_text(calendar: &Calendar, entry: &CalendarEntry) -> String {
    let mut lines = vec![
        entry.name.clone(),
        format!(
            "  Calendar: {}",
            calendar.name().unwrap_or(DEFAULT_CALENDAR_NAME)
        ),
    ];

    let start = entry.start.format("%a %b %-d %Y %I:%M %p");
    lines.push(match entry.end {
        Some(end) => format!("  When:     {} - {}", start, end.format("%I:%M %p")),
        None => format!("  When:     {}", start),
    });
    if let Some(ref location) = entry.location {
        lines.push(format!("  Where:    {}", location));
    }
    if let Some(ref link) = entry.link {
        lines.push(format!("  Link:     {}", link));
    }
    if let Some(ref description) = entry.description {
        lines.push(format!("  {}", description));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn dt(d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, 2, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn entry() -> CalendarEntry {
        CalendarEntry::new("Plano Housing Authority Board Meeting", dt(26, 18, 30))
            .with_end(Some(dt(26, 23, 59)))
            .with_location(Some("1740 Avenue G".to_string()))
            .with_link("http://www.plano.gov/Calendar.aspx?EID=11923".parse().ok())
    }

    fn calendar() -> Calendar {
        Calendar::new(
            Some("City Council & Commissions Meetings".to_string()),
            vec![entry()],
        )
    }

    #[test]
    fn text_format() {
        let output = render(&calendar(), &entry(), NextFormat::Text, dt(25, 0, 0).date()).unwrap();
        insta::assert_snapshot!(output, @r"
        Plano Housing Authority Board Meeting
          Calendar: City Council & Commissions Meetings
          When:     Tue Feb 26 2019 06:30 PM - 11:59 PM
          Where:    1740 Avenue G
          Link:     http://www.plano.gov/Calendar.aspx?EID=11923
        ");
    }

    #[test]
    fn ssml_format() {
        let output = render(&calendar(), &entry(), NextFormat::Ssml, dt(25, 0, 0).date()).unwrap();
        assert!(output.starts_with("<speak><s>The next event in the City Council &amp; Commissions Meetings calendar"));
        assert!(output.contains("tomorrow"));
    }

    #[test]
    fn json_format() {
        let output = render(&calendar(), &entry(), NextFormat::Json, dt(25, 0, 0).date()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["name"], "Plano Housing Authority Board Meeting");
        assert_eq!(value["start"], "2019-02-26T18:30:00");
        assert_eq!(value["end"], "2019-02-26T23:59:00");
    }
}
