//! Clock capability and civil time zones.
//!
//! This module provides [`Clock`] for reading the current instant, and
//! [`CivilZone`] for viewing an instant as wall-clock time in a named zone.
//! Feed timestamps are civil times without an offset, so comparisons against
//! "now" go through the zone the feed publishes in.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

/// The zone the municipal calendar publishes in.
pub const DEFAULT_ZONE: Tz = chrono_tz::America::Chicago;

/// A source of the current instant.
pub trait Clock: Send + Sync {
    /// Returns the current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Creates a clock that always reports `instant`.
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Creates a clock from a wall-clock time in `zone`.
    ///
    /// Returns `None` if the wall-clock time does not exist in the zone
    /// (skipped by a DST transition).
    pub fn at_civil(zone: CivilZone, local: NaiveDateTime) -> Option<Self> {
        zone.from_local(local).map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Error returned for an unknown time zone name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown time zone: {name}")]
pub struct UnknownZoneError {
    name: String,
}

/// A named civil time zone, such as US Central.
///
/// Conversions are pure functions of the instant and the zone's rules and
/// are recomputed on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilZone(Tz);

impl Default for CivilZone {
    fn default() -> Self {
        Self(DEFAULT_ZONE)
    }
}

impl CivilZone {
    /// Wraps a `chrono-tz` zone.
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Looks up a zone by IANA name (e.g. `America/Chicago`).
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a known zone.
    pub fn from_name(name: &str) -> Result<Self, UnknownZoneError> {
        Tz::from_str(name.trim())
            .map(Self)
            .map_err(|_| UnknownZoneError {
                name: name.to_string(),
            })
    }

    /// Returns the IANA name of the zone.
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Returns the underlying `chrono-tz` zone.
    pub fn tz(&self) -> Tz {
        self.0
    }

    /// Returns the wall-clock time of `instant` in this zone.
    pub fn localize(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.0).naive_local()
    }

    /// Returns the civil date of `instant` in this zone.
    pub fn today(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.localize(instant).date()
    }

    /// Maps a wall-clock time in this zone back to UTC.
    ///
    /// Ambiguous times (repeated by a DST transition) resolve to the earlier
    /// instant; times skipped by a transition return `None`.
    pub fn from_local(&self, local: NaiveDateTime) -> Option<DateTime<Utc>> {
        self.0
            .from_local_datetime(&local)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Returns the wall-clock "now" of `clock` in this zone.
    pub fn now(&self, clock: &dyn Clock) -> NaiveDateTime {
        self.localize(clock.now())
    }
}

impl fmt::Display for CivilZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
