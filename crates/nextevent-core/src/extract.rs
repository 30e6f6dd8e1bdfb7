//! Text extraction for individual feed fields.
//!
//! Each function cleans one loosely-formatted fragment of a feed item and
//! returns `None` when the fragment is missing, blank or unusable. None of
//! them fail: an unusable field simply drops out.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Prefix the municipal feed puts in front of every channel title.
pub const CALENDAR_NAME_PREFIX: &str = "Plano, TX - Calendar - ";

/// Title fragments that mark an item as a cancellation notice.
const CANCELLATION_MARKERS: [&str; 3] = ["cancellation", "cancelation", "cancelled"];

/// Regex matching any markup tag.
static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<.*?>").expect("Invalid tag regex"));

/// Regex for the free-text part of an event description.
static DESCRIPTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Description:\s*(?P<description>\S.*)").expect("Invalid description regex")
});

/// Extracts the calendar name from the channel title.
///
/// The municipal prefix is removed when something follows it.
///
/// # Example
///
/// ```
/// use nextevent_core::extract::parse_calendar_name;
///
/// let name = parse_calendar_name(Some("Plano, TX - Calendar - City Council & Commissions Meetings"));
/// assert_eq!(name.as_deref(), Some("City Council & Commissions Meetings"));
/// ```
pub fn parse_calendar_name(raw: Option<&str>) -> Option<String> {
    let title = non_blank(raw)?;

    // A trimmed bare prefix has lost its trailing space.
    if title == CALENDAR_NAME_PREFIX.trim_end() {
        return None;
    }

    let title = match title.strip_prefix(CALENDAR_NAME_PREFIX) {
        Some(rest) => rest.trim(),
        None => title,
    };

    (!title.is_empty()).then(|| title.to_string())
}

/// Extracts an event name, rejecting cancellation notices.
pub fn parse_event_name(raw: Option<&str>) -> Option<String> {
    let title = non_blank(raw)?;
    let lowered = title.to_lowercase();

    if CANCELLATION_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
    {
        return None;
    }

    Some(title.to_string())
}

/// Extracts the free-text description from an item's HTML description.
///
/// Item descriptions repeat the event date, time and location as labelled
/// HTML. Only text after a `Description:` label is kept; descriptions
/// without one yield `None`.
pub fn parse_description(raw_html: Option<&str>) -> Option<String> {
    let html = raw_html?;
    let stripped = strip_tags(html);

    let captures = DESCRIPTION_REGEX.captures(&stripped)?;
    let description = captures.name("description")?.as_str().trim();

    (!description.is_empty()).then(|| description.to_string())
}

/// Parses an absolute link.
pub fn parse_link(raw: Option<&str>) -> Option<Url> {
    let raw = non_blank(raw)?;
    Url::parse(raw).ok()
}

/// Replaces every markup tag with a single space.
pub fn strip_tags(html: &str) -> String {
    TAG_REGEX.replace_all(html, " ").into_owned()
}

/// Trims the input and discards it when nothing is left.
pub(crate) fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}
