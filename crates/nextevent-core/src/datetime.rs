//! Date and time extraction for feed items.
//!
//! Feed items carry the event date (`February 26, 2019`) and the event time
//! range (`09:30 AM - 10:00 AM`) as separate text fields. This module joins
//! them into a start/end pair.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::extract::non_blank;

/// Regex for a 12-hour time range such as `06:30 PM - 11:59 PM`.
static TIME_RANGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<start>\d{2}:\d{2} (?:AM|PM)) - (?P<end>\d{2}:\d{2} (?:AM|PM))")
        .expect("Invalid time range regex")
});

/// English date shapes accepted in front of a `hh:mm AM` time.
///
/// `%B` and `%A` also accept abbreviated month and weekday names.
const DATE_TIME_FORMATS: [&str; 3] = [
    "%B %d, %Y %I:%M %p",
    "%A, %B %d, %Y %I:%M %p",
    "%m/%d/%Y %I:%M %p",
];

/// Parses an event's date and time range into start and end timestamps.
///
/// Returns `(None, None)` when either field is blank, when the date is a
/// range (contains `-`), or when the time field has no `hh:mm AM - hh:mm PM`
/// range. Otherwise start and end are parsed independently, so one side can
/// be `None` while the other is set.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use nextevent_core::datetime::parse_date_text;
///
/// let (start, end) = parse_date_text(Some("January 1, 2019"), Some("06:00 AM - 08:00 PM"));
/// let day = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
/// assert_eq!(start, day.and_hms_opt(6, 0, 0));
/// assert_eq!(end, day.and_hms_opt(20, 0, 0));
/// ```
pub fn parse_date_text(
    date_text: Option<&str>,
    time_text: Option<&str>,
) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
    let (Some(date_text), Some(time_text)) = (non_blank(date_text), non_blank(time_text)) else {
        return (None, None);
    };

    // Multi-day ranges are not supported
    if date_text.contains('-') {
        return (None, None);
    }

    let Some(captures) = TIME_RANGE_REGEX.captures(time_text) else {
        return (None, None);
    };

    let date = date_text.split_whitespace().collect::<Vec<_>>().join(" ");
    let start = captures
        .name("start")
        .and_then(|time| parse_date_time(&date, time.as_str()));
    let end = captures
        .name("end")
        .and_then(|time| parse_date_time(&date, time.as_str()));

    (start, end)
}

/// Parses `"{date} {time}"` against the accepted date shapes.
fn parse_date_time(date: &str, time: &str) -> Option<NaiveDateTime> {
    let text = format!("{date} {time}");
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&text, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn parses_two_times() {
        let (start, end) = parse_date_text(Some("January 1, 2019"), Some("06:00 AM - 08:00 PM"));
        assert_eq!(start, Some(dt(2019, 1, 1, 6, 0)));
        assert_eq!(end, Some(dt(2019, 1, 1, 20, 0)));
    }

    #[test]
    fn parses_feed_shaped_fields() {
        let (start, end) = parse_date_text(Some(" February 26, 2019 "), Some("06:30 PM - 11:59 PM"));
        assert_eq!(start, Some(dt(2019, 2, 26, 18, 30)));
        assert_eq!(end, Some(dt(2019, 2, 26, 23, 59)));
    }

    #[test]
    fn noon_and_midnight() {
        let (start, end) = parse_date_text(Some("March 5, 2019"), Some("12:00 AM - 12:00 PM"));
        assert_eq!(start, Some(dt(2019, 3, 5, 0, 0)));
        assert_eq!(end, Some(dt(2019, 3, 5, 12, 0)));
    }

    #[test]
    fn accepts_other_english_shapes() {
        let expected = Some(dt(2019, 3, 5, 15, 0));
        for date in [
            "Mar 5, 2019",
            "March 05, 2019",
            "Tuesday, March 5, 2019",
            "3/5/2019",
            "March   5,  2019",
        ] {
            let (start, _) = parse_date_text(Some(date), Some("03:00 PM - 04:00 PM"));
            assert_eq!(start, expected, "{date}");
        }
    }

    #[test]
    fn date_range_is_rejected() {
        for time in ["06:00 AM - 08:00 PM", "garbage", ""] {
            assert_eq!(
                parse_date_text(Some("February 26, 2019 - March 1, 2019"), Some(time)),
                (None, None)
            );
        }
        assert_eq!(
            parse_date_text(Some("2019-02-26"), Some("06:00 AM - 08:00 PM")),
            (None, None)
        );
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert_eq!(parse_date_text(None, Some("06:00 AM - 08:00 PM")), (None, None));
        assert_eq!(parse_date_text(Some("January 1, 2019"), None), (None, None));
        assert_eq!(parse_date_text(Some("  "), Some("06:00 AM - 08:00 PM")), (None, None));
        assert_eq!(parse_date_text(Some("January 1, 2019"), Some(" ")), (None, None));
    }

    #[test]
    fn unmatched_time_pattern_is_rejected() {
        for time in ["All Day", "6:00 AM - 8:00 PM", "06:00 AM", "06:00 - 08:00"] {
            assert_eq!(
                parse_date_text(Some("January 1, 2019"), Some(time)),
                (None, None),
                "{time}"
            );
        }
    }

    #[test]
    fn start_and_end_fail_independently() {
        let (start, end) = parse_date_text(Some("January 1, 2019"), Some("09:30 AM - 13:75 PM"));
        assert_eq!(start, Some(dt(2019, 1, 1, 9, 30)));
        assert_eq!(end, None);

        let (start, end) = parse_date_text(Some("January 1, 2019"), Some("99:00 AM - 10:00 AM"));
        assert_eq!(start, None);
        assert_eq!(end, Some(dt(2019, 1, 1, 10, 0)));
    }

    #[test]
    fn unparseable_date_yields_nothing() {
        assert_eq!(
            parse_date_text(Some("Someday soon"), Some("06:00 AM - 08:00 PM")),
            (None, None)
        );
        assert_eq!(
            parse_date_text(Some("February 30, 2019"), Some("06:00 AM - 08:00 PM")),
            (None, None)
        );
    }
}
