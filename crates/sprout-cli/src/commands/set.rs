//! Set command implementation
//!
//! Changes one persisted setting through the engine, so the value is
//! validated and clamped the same way the running app would.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use sprout_engine::settings::{keys, setting_value};
use sprout_engine::{CaptureBackend, EngineConfig, JsonFileStore, SettingsStore, SoundEngine};
use sprout_spec::{Catalog, SoundCategory};
use std::process::ExitCode;

fn parse_volume(key: &str, value: &str) -> Result<f64> {
    let volume: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("{} expects a number between 0 and 1, got '{}'", key, value))?;
    if !volume.is_finite() {
        bail!("{} expects a finite number, got '{}'", key, value);
    }
    Ok(volume)
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim() {
        "true" | "on" | "1" => Ok(true),
        "false" | "off" | "0" => Ok(false),
        _ => bail!("{} expects true or false, got '{}'", key, value),
    }
}

/// Applies `value` to the setting stored under `key`.
pub fn apply<S: SettingsStore>(
    engine: &mut SoundEngine<CaptureBackend, S>,
    key: &str,
    value: &str,
) -> Result<()> {
    let category_volume = |category| (keys::volume(category) == key).then_some(category);
    let category_enabled = |category| (keys::enabled(category) == key).then_some(category);

    if key == keys::MASTER_VOLUME {
        engine.set_master_volume(parse_volume(key, value)?);
    } else if key == keys::SOUND_ENABLED {
        engine.set_enabled(parse_flag(key, value)?);
    } else if key == keys::VARIATIONS_ENABLED {
        engine.set_audio_variations_enabled(parse_flag(key, value)?);
    } else if key == keys::DEBUG_MODE {
        engine.enable_debug_mode(parse_flag(key, value)?);
    } else if key == keys::MUSIC_AUTOPLAY {
        engine.set_music_autoplay(parse_flag(key, value)?);
    } else if key == keys::SOUND_EFFECTS_VOLUME {
        engine.set_sound_effects_volume(parse_volume(key, value)?);
    } else if key == keys::SOUND_EFFECTS_ENABLED {
        engine.set_sound_effects_enabled(parse_flag(key, value)?);
    } else if let Some(category) = SoundCategory::ALL.into_iter().find_map(category_volume) {
        engine.set_category_volume(category, parse_volume(key, value)?);
    } else if let Some(category) = SoundCategory::ALL.into_iter().find_map(category_enabled) {
        engine.set_category_enabled(category, parse_flag(key, value)?);
    } else {
        bail!("unknown setting '{}' (known: {})", key, keys::ALL.join(", "));
    }
    Ok(())
}

/// Run the set command
///
/// # Arguments
/// * `settings` - Settings file to edit; created if missing
/// * `key` - Storage key, e.g. `taskgarden_master_volume`
/// * `value` - New value
pub fn run(settings: &str, key: &str, value: &str) -> Result<ExitCode> {
    let store = JsonFileStore::open(settings);
    let mut engine = SoundEngine::offline(EngineConfig::default(), Catalog::garden(), store)
        .context("Failed to create engine")?;
    apply(&mut engine, key, value)?;

    let stored = setting_value(engine.settings(), key).unwrap_or_default();
    println!(
        "{} {} = {} ({})",
        "SUCCESS".green().bold(),
        key,
        stored,
        settings
    );
    Ok(ExitCode::SUCCESS)
}
