//! Sequence command implementation
//!
//! Plays a growth or XP sequence through an offline engine and writes the
//! mixed output to a WAV file.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use sprout_engine::{EngineConfig, MemoryStore, Sequence, SoundEngine};
use sprout_spec::Catalog;
use sprout_synth::WavResult;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

/// Which sequence to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    /// Water, grow, XP, and stage-up from `stage`.
    Growth { stage: Option<u32> },
    /// XP sparkle and streak fanfare above the threshold.
    Xp { amount: u32 },
}

/// Time from the sequence start until its last sound has finished.
fn sequence_length(catalog: &Catalog, sequence: &Sequence) -> Duration {
    sequence
        .cues()
        .iter()
        .map(|cue| {
            let secs = catalog.get(cue.sound).map_or(0.0, |def| def.duration);
            cue.at + Duration::from_secs_f64(secs.max(0.0))
        })
        .max()
        .unwrap_or(Duration::ZERO)
}

/// Run the sequence command
///
/// # Arguments
/// * `catalog` - Catalog to render from
/// * `config` - Engine config; its seed and sample rate are used
/// * `kind` - Sequence to play
/// * `output` - Output WAV path
pub fn run(
    catalog: Catalog,
    config: EngineConfig,
    kind: SequenceKind,
    output: &str,
) -> Result<ExitCode> {
    let sample_rate = config.sample_rate;
    let mut engine = SoundEngine::offline(config, catalog, MemoryStore::new())
        .context("Failed to create engine")?;
    if !engine.ensure_ready() {
        bail!("offline output could not be started");
    }

    let sequence = match kind {
        SequenceKind::Growth { stage } => engine.play_growth_sequence(stage),
        SequenceKind::Xp { amount } => engine.play_xp_gain_sequence(amount),
    };
    let length = sequence_length(engine.catalog(), &sequence);
    engine.advance(length);

    let wav = WavResult::from_samples(engine.backend().output(), sample_rate);
    let path = Path::new(output);
    wav.save(path)
        .with_context(|| format!("Failed to write: {}", path.display()))?;

    println!(
        "{} {} cues -> {} ({:.2} s)",
        "Rendered:".cyan().bold(),
        sequence.len(),
        output,
        length.as_secs_f64()
    );
    for cue in sequence.cues() {
        println!("  {:>6} ms  {}", cue.at.as_millis(), cue.sound);
    }
    println!("{} {}", "PCM hash:".dimmed(), wav.pcm_hash);
    Ok(ExitCode::SUCCESS)
}
