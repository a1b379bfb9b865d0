//! Config command - print the resolved trail configuration

use anyhow::{Context, Result};
use std::path::Path;
use wisp_particles::TrailConfig;

pub fn run(path: Option<&str>) -> Result<()> {
    let config = load(path)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

/// Resolve config from an optional path, with environment overrides
pub fn load(path: Option<&str>) -> Result<TrailConfig> {
    match path {
        Some(p) => TrailConfig::load(Some(Path::new(p)))
            .with_context(|| format!("Failed to load config {p}")),
        None => TrailConfig::load(None).context("Failed to resolve config"),
    }
}
