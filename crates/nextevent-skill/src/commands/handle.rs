//! The `handle` command: answer one skill request.

use std::path::Path;

use nextevent_providers::{CalendarService, FeedFetcher};
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use crate::config::SkillConfig;
use crate::envelope::SkillRequest;
use crate::error::SkillResult;
use crate::handler::SkillHandler;

/// Reads a request from `request_path` (stdin when `None`) and prints the
/// JSON response.
pub async fn run(config: &SkillConfig, request_path: Option<&Path>) -> SkillResult<()> {
    let input = match request_path {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut input = String::new();
            tokio::io::stdin().read_to_string(&mut input).await?;
            input
        }
    };

    let fetcher = super::fetcher(config, None).await?;
    let service = CalendarService::with_sources(fetcher, config.feed_sources()?);
    let handler = SkillHandler::new(service).with_zone(config.zone()?);

    let output = respond(&handler, &input).await?;
    println!("{}", output);
    Ok(())
}

/// Parses `input` as a skill request, handles it and returns the response
/// as JSON.
pub async fn respond<F: FeedFetcher>(handler: &SkillHandler<F>, input: &str) -> SkillResult<String> {
    let request: SkillRequest = serde_json::from_str(input)?;
    info!(request = request.request.kind(), "Handling skill request");

    let response = handler.handle(&request).await?;
    debug!(speech = ?response.speech(), "Responding");

    Ok(serde_json::to_string(&response)?)
}
