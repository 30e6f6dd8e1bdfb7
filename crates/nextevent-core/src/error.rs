//! Error types for calendar parsing.

use thiserror::Error;

use crate::calendar::CalendarType;

/// Result type for calendar operations.
pub type CalendarResult<T> = Result<T, CalendarError>;

/// Errors raised while turning a feed into a [`Calendar`](crate::Calendar).
///
/// Per-item problems (cancelled events, missing times, date ranges) are not
/// errors; those items are left out of the calendar.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// The feed text is not well-formed XML.
    #[error("malformed feed: {reason}")]
    MalformedFeed {
        reason: String,
        #[source]
        source: Option<quick_xml::Error>,
    },

    /// The calendar type has no known feed.
    #[error("unsupported calendar type: {0}")]
    UnsupportedCalendarType(CalendarType),
}

impl CalendarError {
    /// Creates a malformed feed error without an underlying XML error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedFeed {
            reason: reason.into(),
            source: None,
        }
    }

    /// Returns true if the feed could not be parsed.
    pub fn is_malformed_feed(&self) -> bool {
        matches!(self, Self::MalformedFeed { .. })
    }
}

impl From<quick_xml::Error> for CalendarError {
    fn from(err: quick_xml::Error) -> Self {
        Self::MalformedFeed {
            reason: err.to_string(),
            source: Some(err),
        }
    }
}
