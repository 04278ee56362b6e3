//! Synthesis recipes and the parameters each one requires.

use serde::{Deserialize, Serialize};

/// A named synthesis recipe.
///
/// Every recipe belongs to one [`AlgorithmFamily`]; the family decides the
/// overall shape (single tone, stack, sweep, cascade, burst, texture) and the
/// recipe fixes waveform, filter, and timing constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Plain sine tone with a 10 ms attack.
    Tone,
    /// Sine through a narrow band-pass at its own frequency.
    Chime,
    /// Three sine overtones through a high-pass, gain 1/harmonic.
    CrystalClick,
    /// Triangle chord through a low-pass, 15 ms stagger.
    HarmonicButton,
    /// Triangle chord with a held sustain before the tail.
    VictoryChord,
    /// Triangle notes 200 ms apart through a peaking filter.
    GrandFanfare,
    /// Sine notes sorted ascending, 100 ms apart.
    AscensionTheme,
    /// Sine segments crossfading through the frequency set.
    Crossfade,
    /// Exponential sine sweep with a tracking low-pass.
    EtherealSweep,
    /// Triangle stack, or a triangle sweep when only a base frequency is given.
    OrganicBloom,
    /// Triangle notes descending through the set.
    CascadeDown,
    /// Triangle notes in reversed order.
    CascadeUp,
    /// Sine bell notes through a peaking filter at the octave.
    TriumphBells,
    /// Harmonic sparkle burst through a high-pass.
    CrystalSparkle,
    /// Jittered triangle cluster through a low-pass.
    LeafRustle,
    /// Spaced sine droplets through a low-pass.
    RainDrops,
    /// Alternating triangle/sine band-passed layers with random entry.
    NatureSymphony,
}

/// The generation strategy a recipe implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmFamily {
    Tone,
    HarmonicStack,
    Sweep,
    Cascade,
    ParticleBurst,
    Texture,
}

/// Parameters a recipe cannot render without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Renders from nothing (440 Hz default).
    Nothing,
    /// Needs a base frequency or a non-empty frequency set.
    AnyFrequency,
    /// Needs a non-empty frequency set.
    FrequencySet,
    /// Needs both a base and an end frequency.
    SweepRange,
}

impl Algorithm {
    /// Every recipe.
    pub const ALL: [Algorithm; 17] = [
        Algorithm::Tone,
        Algorithm::Chime,
        Algorithm::CrystalClick,
        Algorithm::HarmonicButton,
        Algorithm::VictoryChord,
        Algorithm::GrandFanfare,
        Algorithm::AscensionTheme,
        Algorithm::Crossfade,
        Algorithm::EtherealSweep,
        Algorithm::OrganicBloom,
        Algorithm::CascadeDown,
        Algorithm::CascadeUp,
        Algorithm::TriumphBells,
        Algorithm::CrystalSparkle,
        Algorithm::LeafRustle,
        Algorithm::RainDrops,
        Algorithm::NatureSymphony,
    ];

    /// Returns the family this recipe belongs to.
    pub fn family(&self) -> AlgorithmFamily {
        match self {
            Algorithm::Tone | Algorithm::Chime => AlgorithmFamily::Tone,
            Algorithm::CrystalClick
            | Algorithm::HarmonicButton
            | Algorithm::VictoryChord
            | Algorithm::GrandFanfare
            | Algorithm::AscensionTheme
            | Algorithm::Crossfade => AlgorithmFamily::HarmonicStack,
            Algorithm::EtherealSweep | Algorithm::OrganicBloom => AlgorithmFamily::Sweep,
            Algorithm::CascadeDown | Algorithm::CascadeUp | Algorithm::TriumphBells => {
                AlgorithmFamily::Cascade
            }
            Algorithm::CrystalSparkle => AlgorithmFamily::ParticleBurst,
            Algorithm::LeafRustle | Algorithm::RainDrops | Algorithm::NatureSymphony => {
                AlgorithmFamily::Texture
            }
        }
    }

    /// Returns what the recipe needs from a definition.
    pub fn requirement(&self) -> Requirement {
        match self {
            Algorithm::Tone => Requirement::Nothing,
            Algorithm::Chime
            | Algorithm::CrystalClick
            | Algorithm::OrganicBloom
            | Algorithm::CrystalSparkle
            | Algorithm::LeafRustle
            | Algorithm::RainDrops => Requirement::AnyFrequency,
            Algorithm::EtherealSweep => Requirement::SweepRange,
            Algorithm::HarmonicButton
            | Algorithm::VictoryChord
            | Algorithm::GrandFanfare
            | Algorithm::AscensionTheme
            | Algorithm::Crossfade
            | Algorithm::CascadeDown
            | Algorithm::CascadeUp
            | Algorithm::TriumphBells
            | Algorithm::NatureSymphony => Requirement::FrequencySet,
        }
    }

    /// Returns the snake_case name of this recipe.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Tone => "tone",
            Algorithm::Chime => "chime",
            Algorithm::CrystalClick => "crystal_click",
            Algorithm::HarmonicButton => "harmonic_button",
            Algorithm::VictoryChord => "victory_chord",
            Algorithm::GrandFanfare => "grand_fanfare",
            Algorithm::AscensionTheme => "ascension_theme",
            Algorithm::Crossfade => "crossfade",
            Algorithm::EtherealSweep => "ethereal_sweep",
            Algorithm::OrganicBloom => "organic_bloom",
            Algorithm::CascadeDown => "cascade_down",
            Algorithm::CascadeUp => "cascade_up",
            Algorithm::TriumphBells => "triumph_bells",
            Algorithm::CrystalSparkle => "crystal_sparkle",
            Algorithm::LeafRustle => "leaf_rustle",
            Algorithm::RainDrops => "rain_drops",
            Algorithm::NatureSymphony => "nature_symphony",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
