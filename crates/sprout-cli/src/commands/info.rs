//! Info command implementation
//!
//! Prints engine debug info and the effective mixer settings.

use anyhow::{Context, Result};
use colored::Colorize;
use sprout_engine::settings::{keys, setting_value};
use sprout_engine::{
    CaptureBackend, EngineConfig, JsonFileStore, MemoryStore, SettingsStore, SoundEngine,
};
use sprout_spec::Catalog;
use std::process::ExitCode;

/// Run the info command
///
/// # Arguments
/// * `catalog` - Catalog the engine is built with
/// * `settings` - Settings file to read (default: built-in defaults)
/// * `json` - Print machine-readable JSON
pub fn run(catalog: Catalog, settings: Option<&str>, json: bool) -> Result<ExitCode> {
    let config = EngineConfig::default();
    match settings {
        Some(path) => {
            let engine = SoundEngine::offline(config, catalog, JsonFileStore::open(path))
                .context("Failed to create engine")?;
            report(&engine, json)
        }
        None => {
            let engine = SoundEngine::offline(config, catalog, MemoryStore::new())
                .context("Failed to create engine")?;
            report(&engine, json)
        }
    }
}

fn report<S: SettingsStore>(engine: &SoundEngine<CaptureBackend, S>, json: bool) -> Result<ExitCode> {
    let info = engine.debug_info();

    if json {
        let settings: serde_json::Map<String, serde_json::Value> = keys::ALL
            .iter()
            .filter_map(|&key| {
                setting_value(engine.settings(), key).map(|v| (key.to_string(), v.into()))
            })
            .collect();
        let value = serde_json::json!({
            "debug_info": info,
            "settings": settings,
            "music": engine.music_state(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Sound engine".cyan().bold());
    println!("  sounds:        {}", info.sound_count);
    println!("  master volume: {:.2}", info.master_volume);
    println!("  audio enabled: {}", info.audio_enabled);
    println!("  debug mode:    {}", info.debug_mode);
    println!("  available:     {}", info.available_sounds.join(", "));

    println!("\n{}", "Settings".cyan().bold());
    for key in keys::ALL {
        let value = setting_value(engine.settings(), key).unwrap_or_default();
        println!("  {:<40} {}", key, value.green());
    }
    Ok(ExitCode::SUCCESS)
}
