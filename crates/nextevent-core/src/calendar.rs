//! Calendar types.
//!
//! This module provides the types produced by the feed parser:
//! - [`Calendar`]: A named, chronologically ordered collection of entries
//! - [`CalendarEntry`]: A single event extracted from one feed item
//! - [`CalendarType`]: The identifier used to pick a feed source

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use url::Url;

/// The kind of calendar a user can ask about.
///
/// `None` is the "no valid selection" sentinel produced when a spoken
/// calendar name does not match anything known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalendarType {
    /// No calendar matched.
    #[default]
    None,
    /// City council and commission meetings.
    Meetings,
}

impl CalendarType {
    /// Every variant that maps to a real calendar.
    pub const SUPPORTED: [CalendarType; 1] = [CalendarType::Meetings];

    /// Resolves a free-text calendar name.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Anything unrecognised resolves to [`CalendarType::None`].
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        Self::SUPPORTED
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
            .unwrap_or(Self::None)
    }

    /// Returns the canonical name of this calendar type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Meetings => "Meetings",
        }
    }

    /// Returns true if this is the `None` sentinel.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for CalendarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single event taken from a calendar feed.
///
/// An entry always has a non-empty name and a start time; feed items
/// missing either never become entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEntry {
    /// The event title.
    pub name: String,
    /// When the event starts, in the feed's civil time.
    pub start: NaiveDateTime,
    /// When the event ends, if the feed gave a parseable end time.
    pub end: Option<NaiveDateTime>,
    /// Free-text location.
    pub location: Option<String>,
    /// The extra description text attached to the event.
    pub description: Option<String>,
    /// Link to the event page.
    pub link: Option<Url>,
}

impl CalendarEntry {
    /// Creates a new entry with the required fields.
    pub fn new(name: impl Into<String>, start: NaiveDateTime) -> Self {
        Self {
            name: name.into(),
            start,
            end: None,
            location: None,
            description: None,
            link: None,
        }
    }

    /// Builder method to set the end time.
    pub fn with_end(mut self, end: Option<NaiveDateTime>) -> Self {
        self.end = end;
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location;
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Builder method to set the link.
    pub fn with_link(mut self, link: Option<Url>) -> Self {
        self.link = link;
        self
    }

    /// Returns true if the entry starts strictly after `now`.
    pub fn starts_after(&self, now: NaiveDateTime) -> bool {
        self.start > now
    }
}

/// A named calendar with its entries sorted by start time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCalendar")]
pub struct Calendar {
    name: Option<String>,
    entries: Vec<CalendarEntry>,
}

/// Deserialized form of [`Calendar`], sorted on conversion.
#[derive(Deserialize)]
struct RawCalendar {
    name: Option<String>,
    entries: Vec<CalendarEntry>,
}

impl From<RawCalendar> for Calendar {
    fn from(raw: RawCalendar) -> Self {
        Self::new(raw.name, raw.entries)
    }
}

impl Calendar {
    /// Creates a calendar, ordering the entries by start time.
    ///
    /// The sort is stable: entries sharing a start time keep their order.
    pub fn new(name: Option<String>, mut entries: Vec<CalendarEntry>) -> Self {
        entries.sort_by_key(|entry| entry.start);
        Self { name, entries }
    }

    /// The calendar title, if the feed had one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The entries, in ascending start order.
    pub fn entries(&self) -> &[CalendarEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the calendar holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
