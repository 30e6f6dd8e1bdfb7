//! Feed URL lookup by calendar type.

use std::collections::BTreeMap;

use nextevent_core::{CalendarError, CalendarType};
use tracing::debug;
use url::Url;

use crate::error::{ProviderError, ProviderResult};

/// The City Council & Commissions Meetings feed.
pub const MEETINGS_FEED_URL: &str =
    "http://plano.gov/RSSFeed.aspx?ModID=58&CID=City-Council-Commissions-Meetings-56";

/// Maps each calendar type to the URL of its feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSources {
    urls: BTreeMap<CalendarKey, String>,
}

/// `CalendarType` is not `Ord`; key the table by its canonical name.
type CalendarKey = &'static str;

impl Default for FeedSources {
    fn default() -> Self {
        let mut urls = BTreeMap::new();
        urls.insert(CalendarType::Meetings.as_str(), MEETINGS_FEED_URL.to_string());
        Self { urls }
    }
}

impl FeedSources {
    /// Creates a table with no feeds at all.
    pub fn empty() -> Self {
        Self {
            urls: BTreeMap::new(),
        }
    }

    /// Returns the feed URL for `calendar`.
    ///
    /// # Errors
    ///
    /// Fails with an `UnsupportedCalendarType` error for
    /// [`CalendarType::None`] and for any type without a feed.
    pub fn url_for(&self, calendar: CalendarType) -> ProviderResult<&str> {
        if calendar.is_none() {
            return Err(CalendarError::UnsupportedCalendarType(calendar).into());
        }
        self.urls
            .get(calendar.as_str())
            .map(String::as_str)
            .ok_or_else(|| CalendarError::UnsupportedCalendarType(calendar).into())
    }

    /// Points `calendar` at a different feed.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if `calendar` is `None` or `url` is not
    /// an absolute URL.
    pub fn with_override(mut self, calendar: CalendarType, url: &str) -> ProviderResult<Self> {
        if calendar.is_none() {
            return Err(ProviderError::configuration(
                "cannot assign a feed to the None calendar",
            ));
        }
        let parsed = Url::parse(url.trim()).map_err(|e| {
            ProviderError::configuration(format!("invalid feed URL for {}: {}", calendar, url))
                .with_source(e)
        })?;

        debug!(calendar = %calendar, url = %parsed, "Overriding feed URL");
        self.urls.insert(calendar.as_str(), parsed.to_string());
        Ok(self)
    }

    /// Applies overrides keyed by calendar name, as found in configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` for an unknown calendar name or an
    /// invalid URL.
    pub fn with_overrides<'a, I>(self, overrides: I) -> ProviderResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        overrides.into_iter().try_fold(self, |sources, (name, url)| {
            let calendar = CalendarType::from_name(name);
            if calendar.is_none() {
                return Err(ProviderError::configuration(format!(
                    "unknown calendar in feed overrides: {}",
                    name
                )));
            }
            sources.with_override(calendar, url)
        })
    }

    /// Iterates over configured `(calendar, url)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (CalendarType, &str)> + '_ {
        self.urls
            .iter()
            .map(|(name, url)| (CalendarType::from_name(name), url.as_str()))
    }
}
