//! Configuration commands.

use std::path::Path;

use crate::config::SkillConfig;
use crate::error::{SkillError, SkillResult};

/// Dump the current configuration to stdout.
pub fn dump(config: &SkillConfig, path: &Path) -> SkillResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| SkillError::Config(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", path.display());
    println!("{}", toml_str);

    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &SkillConfig) -> SkillResult<()> {
    config.validate()?;

    let sources = config.feed_sources()?;
    for (calendar, url) in sources.iter() {
        println!("{}: {}", calendar, url);
    }
    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path(path: &Path) -> SkillResult<()> {
    println!("config: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = SkillConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(SkillConfig::parse(&text).unwrap(), config);
    }

    #[test]
    fn validate_rejects_bad_zone() {
        let config = SkillConfig::parse("[clock]\ntimezone = \"Nowhere/Town\"\n").unwrap();
        assert!(validate(&config).is_err());
    }
}
