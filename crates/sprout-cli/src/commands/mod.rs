//! CLI command implementations.

pub mod info;
pub mod list;
#[cfg(feature = "device")]
pub mod play;
pub mod render;
pub mod sequence;
pub mod set;

use std::path::Path;

use anyhow::{Context, Result};
use sprout_engine::EngineConfig;
use sprout_spec::Catalog;

/// Loads a catalog file, or the built-in garden catalog.
pub fn load_catalog(path: Option<&str>) -> Result<Catalog> {
    let Some(path) = path else {
        return Ok(Catalog::garden());
    };
    let catalog = Catalog::from_path(Path::new(path))
        .with_context(|| format!("Failed to load catalog: {}", path))?;
    for warning in catalog.warnings() {
        eprintln!(
            "{} [{}] {}: {}",
            colored::Colorize::yellow("warning"),
            warning.code,
            warning.sound,
            warning.message
        );
    }
    Ok(catalog)
}

/// Loads an engine config file, or the defaults.
pub fn load_config(path: Option<&str>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_path(Path::new(path))
            .with_context(|| format!("Failed to load config: {}", path)),
        None => Ok(EngineConfig::default()),
    }
}
