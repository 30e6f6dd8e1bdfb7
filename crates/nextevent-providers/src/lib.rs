//! Feed fetching and the calendar service.
//!
//! This crate connects calendar types to parsed calendars:
//!
//! - [`FeedFetcher`] - The capability that returns raw feed text for a URL
//! - [`HttpFetcher`] - Fetches feeds over HTTP (feature `http`)
//! - [`FeedSources`] - Maps each calendar type to its feed URL
//! - [`CalendarService`] - Looks up, fetches and parses a calendar
//! - [`ProviderError`] - Error types for all of the above
//!
//! # Architecture
//!
//! ```text
//!   CalendarType
//!        │
//!        ▼ FeedSources::url_for()
//!   ┌──────────┐
//!   │   URL    │
//!   └────┬─────┘
//!        │
//!        ▼ FeedFetcher::fetch()
//!   ┌──────────┐
//!   │ raw text │
//!   └────┬─────┘
//!        │
//!        ▼ parse_contents()
//!   ┌──────────┐
//!   │ Calendar │
//!   └──────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use nextevent_providers::{CalendarService, HttpConfig, HttpFetcher};
//!
//! let service = CalendarService::new(HttpFetcher::new(&HttpConfig::default())?);
//! let calendar = service.get_calendar(CalendarType::Meetings).await?;
//! ```

pub mod error;
pub mod fetch;
#[cfg(feature = "http")]
pub mod http;
pub mod service;
pub mod sources;

// Re-export main types at crate root
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use fetch::{BoxFuture, ErrorFetcher, FeedFetcher, StaticFetcher};
#[cfg(feature = "http")]
pub use http::{HttpConfig, HttpFetcher};
pub use service::CalendarService;
pub use sources::{FeedSources, MEETINGS_FEED_URL};
