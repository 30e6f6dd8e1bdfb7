//! nextevent CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use nextevent_core::{TracingConfig, init_tracing};
use tracing::debug;

use nextevent_skill::cli::{Cli, Command, ConfigAction};
use nextevent_skill::commands;
use nextevent_skill::config::SkillConfig;
use nextevent_skill::error::SkillResult;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> SkillResult<()> {
    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(SkillConfig::default_path);
    let config = match cli.config {
        Some(ref path) => SkillConfig::load_from(path)?,
        None => SkillConfig::load()?,
    };

    // Initialize tracing
    let tracing_config = if cli.debug || config.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::cli()
    };
    init_tracing(tracing_config)?;
    debug!(config = %config_path.display(), "Loaded configuration");

    match cli.command {
        Command::Handle { request } => commands::handle::run(&config, request.as_deref()).await,
        Command::Next {
            calendar,
            feed_file,
            format,
        } => commands::next::run(&config, &calendar, feed_file.as_deref(), format).await,
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config, &config_path),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(&config_path),
        },
    }
}
