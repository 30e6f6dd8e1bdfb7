//! Upcoming event selection.

use chrono::NaiveDateTime;

use crate::calendar::{Calendar, CalendarEntry};

/// Returns the entries that start strictly after `now`, in calendar order.
///
/// The iterator borrows the calendar and is evaluated lazily; calling this
/// again starts over. An entry starting exactly at `now` is not upcoming.
pub fn future_entries(
    calendar: &Calendar,
    now: NaiveDateTime,
) -> impl Iterator<Item = &CalendarEntry> + '_ {
    calendar
        .entries()
        .iter()
        .filter(move |entry| entry.starts_after(now))
}

impl Calendar {
    /// Returns the entries starting strictly after `now`.
    pub fn future_entries(&self, now: NaiveDateTime) -> impl Iterator<Item = &CalendarEntry> + '_ {
        future_entries(self, now)
    }

    /// Returns the first entry starting strictly after `now`.
    pub fn next_entry(&self, now: NaiveDateTime) -> Option<&CalendarEntry> {
        self.future_entries(now).next()
    }
}
