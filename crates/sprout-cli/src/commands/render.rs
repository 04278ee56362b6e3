//! Render command implementations
//!
//! Renders catalog sounds offline to 16-bit mono WAV files.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use sprout_spec::{Catalog, SoundId};
use sprout_synth::rng::sound_rng;
use sprout_synth::{render_sound, RenderedSound, WavResult};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

/// Seed used when none is given, so renders are reproducible by default.
pub const DEFAULT_SEED: u32 = 42;

/// Render options shared by `render` and `render-all`.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub seed: u32,
    pub sample_rate: u32,
    /// Overrides the definition volume.
    pub volume: Option<f64>,
}

fn render_one(catalog: &Catalog, id: SoundId, options: &RenderOptions) -> Result<RenderedSound> {
    let Some(def) = catalog.get(id) else {
        bail!("'{}' has no definition in this catalog", id);
    };
    let volume = options.volume.unwrap_or(def.volume);
    let mut rng = sound_rng(options.seed, id);
    render_sound(def, volume, options.sample_rate, &mut rng)
        .with_context(|| format!("Failed to render {}", id))
}

fn write(sound: &RenderedSound, path: &Path) -> Result<WavResult> {
    let wav = WavResult::from_sound(sound);
    wav.save(path)
        .with_context(|| format!("Failed to write: {}", path.display()))?;
    Ok(wav)
}

/// Run the render command
///
/// # Arguments
/// * `catalog` - Catalog to render from
/// * `id` - Sound id, e.g. `ui_click`
/// * `output` - Output WAV path
/// * `options` - Seed, sample rate, and volume override
pub fn run(catalog: &Catalog, id: &str, output: &str, options: &RenderOptions) -> Result<ExitCode> {
    let id: SoundId = id.parse()?;
    if !id.is_one_shot() {
        bail!("'{}' is the music loop and cannot be rendered", id);
    }

    let sound = render_one(catalog, id, options)?;
    let wav = write(&sound, Path::new(output))?;

    println!(
        "{} {} -> {} ({:.2} s, peak {:.3})",
        "Rendered:".cyan().bold(),
        id,
        output,
        sound.duration_secs(),
        sound.peak()
    );
    println!("{} {}", "PCM hash:".dimmed(), wav.pcm_hash);
    Ok(ExitCode::SUCCESS)
}

/// Run the render-all command
///
/// Writes `<id>.wav` for every one-shot in the catalog.
pub fn run_all(catalog: &Catalog, out_dir: &str, options: &RenderOptions) -> Result<ExitCode> {
    let out_dir = Path::new(out_dir);
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create directory: {}", out_dir.display()))?;

    let mut failures = 0;
    let mut count = 0;
    for def in catalog.iter() {
        if !def.id.is_one_shot() {
            continue;
        }
        let path = out_dir.join(format!("{}.wav", def.id));
        match render_one(catalog, def.id, options).and_then(|sound| write(&sound, &path)) {
            Ok(_) => {
                println!("  {} {}", "ok".green(), path.display());
                count += 1;
            }
            Err(e) => {
                println!("  {} {}: {:#}", "FAIL".red().bold(), def.id, e);
                failures += 1;
            }
        }
    }

    println!(
        "\n{} {} sounds to {}",
        "Rendered".green().bold(),
        count,
        out_dir.display()
    );
    if failures > 0 {
        println!("{} {} failed", "ERROR".red().bold(), failures);
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}
