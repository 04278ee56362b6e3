//! Play command implementation
//!
//! Auditions a sound through the default output device.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use sprout_engine::{DeviceBackend, EngineConfig, JsonFileStore, Playback, SoundEngine};
use sprout_spec::{Catalog, SoundId};
use std::process::ExitCode;
use std::time::{Duration, Instant};

/// Engine tick while waiting for playback to finish.
const TICK: Duration = Duration::from_millis(10);

/// Run the play command
///
/// # Arguments
/// * `catalog` - Catalog to play from
/// * `config` - Engine config
/// * `id` - Sound id, e.g. `plant_water`
/// * `settings` - Settings file whose volumes apply
pub fn run(catalog: Catalog, config: EngineConfig, id: &str, settings: &str) -> Result<ExitCode> {
    let id: SoundId = id.parse()?;
    let length = catalog
        .get(id)
        .map_or(Duration::from_secs(5), |def| Duration::from_secs_f64(def.duration.max(0.0)));

    let backend = DeviceBackend::new(config.sample_rate);
    let mut engine = SoundEngine::new(config, catalog, backend, JsonFileStore::open(settings))
        .context("Failed to create engine")?;
    if !engine.ensure_ready() {
        bail!("no audio output available");
    }

    match engine.play(id) {
        Playback::Started(_) => println!("{} {}", "Playing:".cyan().bold(), id),
        Playback::Skipped(reason) => {
            println!("{} {} ({})", "Skipped:".yellow().bold(), id, reason);
            return Ok(ExitCode::from(1));
        }
    }

    let start = Instant::now();
    let mut last = start;
    while start.elapsed() < length + Duration::from_millis(200) {
        std::thread::sleep(TICK);
        let now = Instant::now();
        engine.advance(now - last);
        last = now;
    }
    Ok(ExitCode::SUCCESS)
}
