//! Calendar service: fetch a feed by calendar type and parse it.

use chrono::NaiveDateTime;
use nextevent_core::{Calendar, CalendarEntry, CalendarType, parse_contents};
use tracing::{debug, instrument};

use crate::error::ProviderResult;
use crate::fetch::FeedFetcher;
use crate::sources::FeedSources;

/// Looks up, fetches and parses calendar feeds.
#[derive(Debug, Clone)]
pub struct CalendarService<F> {
    fetcher: F,
    sources: FeedSources,
}

impl<F: FeedFetcher> CalendarService<F> {
    /// Creates a service over the default feed sources.
    pub fn new(fetcher: F) -> Self {
        Self::with_sources(fetcher, FeedSources::default())
    }

    /// Creates a service with explicit feed sources.
    pub fn with_sources(fetcher: F, sources: FeedSources) -> Self {
        Self { fetcher, sources }
    }

    /// Returns the feed sources.
    pub fn sources(&self) -> &FeedSources {
        &self.sources
    }

    /// Fetches and parses the calendar for `calendar_type`.
    ///
    /// # Errors
    ///
    /// Fails with `UnsupportedCalendarType` when the type has no feed, with
    /// the fetcher's error when fetching fails, and with `MalformedFeed` when
    /// the feed is not well-formed XML.
    #[instrument(skip(self), fields(fetcher = self.fetcher.name()))]
    pub async fn get_calendar(&self, calendar_type: CalendarType) -> ProviderResult<Calendar> {
        let url = self.sources.url_for(calendar_type)?;
        let raw = self.fetcher.fetch(url).await?;
        let calendar = parse_contents(&raw)?;

        debug!(
            calendar = ?calendar.name(),
            entries = calendar.len(),
            "Loaded calendar"
        );
        Ok(calendar)
    }

    /// Fetches the calendar and returns its first entry starting after `now`.
    ///
    /// `Ok(None)` means the feed had no upcoming entries.
    pub async fn next_entry(
        &self,
        calendar_type: CalendarType,
        now: NaiveDateTime,
    ) -> ProviderResult<Option<(Calendar, CalendarEntry)>> {
        let calendar = self.get_calendar(calendar_type).await?;
        let next = calendar.next_entry(now).cloned();
        Ok(next.map(|entry| (calendar, entry)))
    }
}
