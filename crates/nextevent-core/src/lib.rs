//! Core types: calendars, feed parsing, event selection, civil time

pub mod calendar;
pub mod datetime;
pub mod error;
pub mod extract;
pub mod feed;
pub mod select;
pub mod time;
pub mod tracing;


pub use calendar::{Calendar, CalendarEntry, CalendarType};
pub use datetime::parse_date_text;
pub use error::{CalendarError, CalendarResult};
pub use feed::parse_contents;
pub use select::future_entries;
pub use time::{CivilZone, Clock, FixedClock, SystemClock, UnknownZoneError};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
