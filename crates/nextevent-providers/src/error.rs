//! Error types for feed fetching and calendar lookups.
//!
//! Every failure on the way from a [`CalendarType`](nextevent_core::CalendarType)
//! to a parsed calendar is reported as a [`ProviderError`], classified by a
//! [`ProviderErrorCode`].

use std::fmt;

use nextevent_core::CalendarError;
use thiserror::Error;

/// What went wrong while getting a calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorCode {
    /// Transport failure: connect, timeout, DNS.
    NetworkError,
    /// The feed host answered with a 5xx status.
    ServerError,
    /// The feed host rejected the request (4xx other than 404).
    BadRequest,
    /// No feed at the URL (404), or no canned body for it.
    NotFound,
    /// The body could not be read as text.
    InvalidResponse,
    /// The feed text is not well-formed XML.
    MalformedFeed,
    /// The calendar type has no feed URL.
    UnsupportedCalendarType,
    /// A feed override or fetcher setting is unusable.
    ConfigurationError,
}

impl ProviderErrorCode {
    /// Snake-case name used in messages and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkError => "network_error",
            Self::ServerError => "server_error",
            Self::BadRequest => "bad_request",
            Self::NotFound => "not_found",
            Self::InvalidResponse => "invalid_response",
            Self::MalformedFeed => "malformed_feed",
            Self::UnsupportedCalendarType => "unsupported_calendar_type",
            Self::ConfigurationError => "configuration_error",
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed fetch or calendar lookup.
#[derive(Debug, Error)]
pub struct ProviderError {
    code: ProviderErrorCode,
    message: String,
    /// Name of the fetcher that failed ("http", "static", ...).
    provider: Option<String>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider: None,
            source: None,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::NetworkError, message)
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::ServerError, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::BadRequest, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::NotFound, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InvalidResponse, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::ConfigurationError, message)
    }

    /// Tags the error with the fetcher that produced it.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Attaches the underlying cause.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn code(&self) -> ProviderErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.provider {
            Some(ref provider) => write!(f, "[{}] {}: {}", provider, self.code, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

impl From<CalendarError> for ProviderError {
    fn from(err: CalendarError) -> Self {
        let code = match err {
            CalendarError::MalformedFeed { .. } => ProviderErrorCode::MalformedFeed,
            CalendarError::UnsupportedCalendarType(_) => ProviderErrorCode::UnsupportedCalendarType,
        };
        Self::new(code, err.to_string()).with_source(err)
    }
}

/// Result alias for feed fetching and calendar lookups.
pub type ProviderResult<T> = Result<T, ProviderError>;
