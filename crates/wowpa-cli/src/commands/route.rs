//! Route command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use wowpa_core::{ChannelRouter, ParsedState, RouterConfig};

pub fn load_config(path: &Path) -> Result<RouterConfig> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let config: RouterConfig = toml::from_str(&content)
        .with_context(|| format!("Invalid router config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Route one state through a fresh router and describe the decision.
pub fn decide(config: &RouterConfig, context: &str, identity: &str) -> String {
    let mut router = ChannelRouter::new(config);
    let raw_context = format!("{}\0{}", config.plugin_name, context);
    let state = ParsedState::parse(&raw_context, identity, &config.plugin_name);

    match router.route(&state) {
        Some(channel) => router
            .tree()
            .path(channel)
            .unwrap_or_else(|| format!("channel {}", channel)),
        None => "unchanged".to_string(),
    }
}

pub fn run(config_path: &Path, context: &str, identity: &str) -> Result<()> {
    let config = load_config(config_path)?;
    println!("{}", decide(&config, context, identity));
    Ok(())
}
