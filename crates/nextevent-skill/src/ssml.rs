//! SSML rendering of the next calendar event.
//!
//! The spoken answer has the shape:
//!
//! ```text
//! <speak>
//!   <s>The next event in the {calendar} calendar is titled: "{name}".</s>
//!   <s>It starts at {time} {date}.</s>
//!   <s>It lasts until {time}.</s>
//!   <s>Here's the description:</s> <s>{description}</s>
//! </speak>
//! ```
//!
//! without the line breaks. The end sentence is left out when the entry has
//! no end time and the description sentences when it has no description.

use chrono::{Days, NaiveDate, NaiveDateTime};
use nextevent_core::CalendarEntry;

/// Spoken in place of a missing calendar name.
pub const DEFAULT_CALENDAR_NAME: &str = "City of Plano";

/// Escapes text for inclusion in SSML markup.
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Renders a time of day as a `say-as` element.
///
/// `11:59 PM` and `12:00 AM` are both read as "midnight" since feeds use
/// `11:59 PM` for events running to the end of the day.
pub fn say_time(time: NaiveDateTime) -> String {
    let text = time.format("%I:%M %p").to_string();
    let spoken = match text.as_str() {
        "11:59 PM" | "12:00 AM" => "midnight",
        "12:00 PM" => "noon",
        other => other,
    };
    format!("<say-as interpret-as=\"time\">{spoken}</say-as>")
}

/// Renders a date relative to `today`.
pub fn say_date(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "today".to_string()
    } else if today.checked_add_days(Days::new(1)) == Some(date) {
        "tomorrow".to_string()
    } else {
        format!(
            "on <say-as interpret-as=\"date\" format=\"md\">{}</say-as>",
            date.format("%m%d")
        )
    }
}

/// Renders the SSML answer for the next event of a calendar.
///
/// `today` is the civil date the listener is in; it decides between "today",
/// "tomorrow" and a spoken month and day.
pub fn render_next_event(
    calendar_name: Option<&str>,
    entry: &CalendarEntry,
    today: NaiveDate,
) -> String {
    let calendar_name = calendar_name.unwrap_or(DEFAULT_CALENDAR_NAME);

    let mut sentences = vec![
        format!(
            "<s>The next event in the {} calendar is titled: \"{}\".</s>",
            escape(calendar_name),
            escape(&entry.name)
        ),
        format!(
            "<s>It starts at {} {}.</s>",
            say_time(entry.start),
            say_date(entry.start.date(), today)
        ),
    ];

    if let Some(end) = entry.end {
        sentences.push(format!("<s>It lasts until {}.</s>", say_time(end)));
    }

    if let Some(description) = entry
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
    {
        sentences.push("<s>Here's the description:</s>".to_string());
        sentences.push(format!("<s>{}</s>", escape(description)));
    }

    format!("<speak>{}</speak>", sentences.join(" "))
}
