//! Skill configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/nextevent/config.toml` by default. Every key is optional:
//!
//! ```toml
//! debug = false
//!
//! [feeds]
//! meetings = "http://plano.gov/RSSFeed.aspx?ModID=58&CID=City-Council-Commissions-Meetings-56"
//!
//! [clock]
//! timezone = "America/Chicago"
//!
//! [http]
//! timeout_secs = 30
//! user_agent = "nextevent/0.1.0"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use nextevent_core::CivilZone;
use nextevent_core::time::DEFAULT_ZONE;
use nextevent_providers::FeedSources;
#[cfg(feature = "http")]
use nextevent_providers::HttpConfig;
use serde::{Deserialize, Serialize};

use crate::error::{SkillError, SkillResult};

/// Configuration for the nextevent skill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillConfig {
    /// Debug mode.
    pub debug: bool,

    /// Feed URL overrides, keyed by calendar name.
    pub feeds: BTreeMap<String, String>,

    /// Clock settings.
    pub clock: ClockSettings,

    /// HTTP settings.
    pub http: HttpSettings,
}

/// Clock settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockSettings {
    /// IANA name of the zone the calendar publishes in.
    pub timezone: String,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_ZONE.name().to_string(),
        }
    }
}

/// HTTP settings for feed fetching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// User agent sent with feed requests.
    pub user_agent: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: None,
        }
    }
}

impl SkillConfig {
    /// Loads configuration from the default path.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> SkillResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> SkillResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SkillError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> SkillResult<Self> {
        toml::from_str(content)
            .map_err(|e| SkillError::Config(format!("failed to parse config: {}", e)))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nextevent")
    }

    /// Returns the configured civil zone.
    pub fn zone(&self) -> SkillResult<CivilZone> {
        CivilZone::from_name(&self.clock.timezone).map_err(|e| SkillError::Config(e.to_string()))
    }

    /// Returns the feed sources with configured overrides applied.
    pub fn feed_sources(&self) -> SkillResult<FeedSources> {
        Ok(FeedSources::default()
            .with_overrides(self.feeds.iter().map(|(name, url)| (name.as_str(), url.as_str())))?)
    }

    /// Returns the HTTP fetcher configuration.
    #[cfg(feature = "http")]
    pub fn http_config(&self) -> HttpConfig {
        let config = HttpConfig::default()
            .with_timeout(std::time::Duration::from_secs(self.http.timeout_secs));
        match self.http.user_agent {
            Some(ref agent) => config.with_user_agent(agent),
            None => config,
        }
    }

    /// Checks that every setting can be used.
    pub fn validate(&self) -> SkillResult<()> {
        self.zone()?;
        self.feed_sources()?;
        if self.http.timeout_secs == 0 {
            return Err(SkillError::Config(
                "http.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
