//! Subcommand implementations.

pub mod config;
pub mod handle;
pub mod next;

use std::path::Path;

use nextevent_providers::{FeedFetcher, StaticFetcher};
use tracing::debug;

use crate::config::SkillConfig;
use crate::error::SkillResult;

/// Builds the fetcher for a command: a local feed file when given, HTTP
/// otherwise.
pub(crate) async fn fetcher(
    config: &SkillConfig,
    feed_file: Option<&Path>,
) -> SkillResult<Box<dyn FeedFetcher>> {
    if let Some(path) = feed_file {
        debug!(path = %path.display(), "Serving feed from file");
        let body = tokio::fs::read_to_string(path).await?;
        return Ok(Box::new(StaticFetcher::always(body)));
    }
    http_fetcher(config)
}

#[cfg(feature = "http")]
fn http_fetcher(config: &SkillConfig) -> SkillResult<Box<dyn FeedFetcher>> {
    let fetcher = nextevent_providers::HttpFetcher::new(&config.http_config())?;
    Ok(Box::new(fetcher))
}

#[cfg(not(feature = "http"))]
fn http_fetcher(_config: &SkillConfig) -> SkillResult<Box<dyn FeedFetcher>> {
    Err(nextevent_providers::ProviderError::configuration(
        "built without HTTP support; pass a feed file",
    )
    .into())
}
