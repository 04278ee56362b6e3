//! Synthesis recipes.
//!
//! A recipe turns a [`SoundDefinition`] and an effective volume into a
//! [`SoundPlan`]: a list of [`Voice`]s, each an oscillator with an optional
//! filter stage and a gain curve, placed at an offset inside the sound.
//! Planning is pure; randomness comes only from the `Pcg32` passed in.
//!
//! Recipes are grouped by family:
//! - `tone` - single tone and band-passed chime
//! - `stack` - harmonic stacks and chords
//! - `sweep` - exponential frequency sweeps
//! - `cascade` - staggered note sequences
//! - `burst` - sparkle particle bursts
//! - `texture` - jittered rustle, rain, and symphony clusters

pub mod burst;
pub mod cascade;
pub mod stack;
pub mod sweep;
pub mod texture;
pub mod tone;

use rand_pcg::Pcg32;
use tracing::debug;

use sprout_spec::{Algorithm, SoundDefinition, SoundId};

use crate::envelope::GainCurve;
use crate::filter::FilterSpec;
use crate::oscillator::Waveform;

/// Frequency sweep curve types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepCurve {
    /// Linear interpolation.
    Linear,
    /// Exponential interpolation (perceptually linear for pitch).
    Exponential,
}

impl SweepCurve {
    /// Interpolates between start and end values.
    ///
    /// # Arguments
    /// * `start` - Starting value
    /// * `end` - Ending value
    /// * `t` - Progress (0.0 to 1.0)
    pub fn interpolate(&self, start: f64, end: f64, t: f64) -> f64 {
        match self {
            SweepCurve::Linear => start + (end - start) * t,
            SweepCurve::Exponential => {
                if start <= 0.0 || end <= 0.0 {
                    // Fall back to linear for non-positive values
                    start + (end - start) * t
                } else {
                    start * (end / start).powf(t)
                }
            }
        }
    }
}

/// A frequency that may move over the life of a voice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencySweep {
    /// Starting frequency in Hz.
    pub start_freq: f64,
    /// Ending frequency in Hz.
    pub end_freq: f64,
    /// Sweep curve type.
    pub curve: SweepCurve,
}

impl FrequencySweep {
    /// Creates a new frequency sweep.
    pub fn new(start_freq: f64, end_freq: f64, curve: SweepCurve) -> Self {
        Self {
            start_freq,
            end_freq,
            curve,
        }
    }

    /// A frequency that does not move.
    pub fn constant(freq: f64) -> Self {
        Self::new(freq, freq, SweepCurve::Exponential)
    }

    /// An exponential sweep.
    pub fn exponential(start_freq: f64, end_freq: f64) -> Self {
        Self::new(start_freq, end_freq, SweepCurve::Exponential)
    }

    /// Gets the frequency at a progress point (0.0 to 1.0).
    pub fn at(&self, t: f64) -> f64 {
        self.curve
            .interpolate(self.start_freq, self.end_freq, t.clamp(0.0, 1.0))
    }

    /// Returns true when start and end are equal.
    pub fn is_constant(&self) -> bool {
        self.start_freq == self.end_freq
    }
}

/// One oscillator chain: oscillator, optional filter, gain curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Voice {
    /// Oscillator waveform.
    pub waveform: Waveform,
    /// Oscillator frequency over the voice's life.
    pub frequency: FrequencySweep,
    /// Filter between oscillator and gain.
    pub filter: Option<FilterSpec>,
    /// Gain automation, timed from the voice start.
    pub gain: GainCurve,
    /// Offset from the start of the sound in seconds.
    pub start: f64,
    /// Time until the oscillator stops, in seconds.
    pub duration: f64,
}

impl Voice {
    /// Creates an unfiltered voice at a fixed frequency.
    pub fn new(waveform: Waveform, frequency: f64, gain: GainCurve) -> Self {
        let duration = gain.end_time();
        Self {
            waveform,
            frequency: FrequencySweep::constant(frequency),
            filter: None,
            gain,
            start: 0.0,
            duration,
        }
    }

    /// Sweeps the frequency exponentially to `end` over the voice.
    pub fn sweeping_to(mut self, end: f64) -> Self {
        self.frequency = FrequencySweep::exponential(self.frequency.start_freq, end);
        self
    }

    /// Adds a filter stage.
    pub fn filtered(mut self, filter: FilterSpec) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Places the voice at an offset inside the sound.
    pub fn starting_at(mut self, start: f64) -> Self {
        self.start = start.max(0.0);
        self
    }

    /// Sets how long the oscillator runs.
    pub fn lasting(mut self, duration: f64) -> Self {
        self.duration = duration.max(0.0);
        self
    }

    /// Offset at which the voice stops.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Everything needed to render one triggered sound.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundPlan {
    /// Sound being played.
    pub id: SoundId,
    /// Recipe that produced the voices.
    pub algorithm: Algorithm,
    /// True when the declared recipe could not run and a tone was used.
    pub fell_back: bool,
    /// The voices to sum.
    pub voices: Vec<Voice>,
}

impl SoundPlan {
    /// Length of the sound in seconds.
    pub fn duration(&self) -> f64 {
        self.voices.iter().map(Voice::end).fold(0.0, f64::max)
    }

    /// Highest envelope gain of any single voice.
    pub fn peak_gain(&self) -> f64 {
        self.voices.iter().map(|v| v.gain.peak()).fold(0.0, f64::max)
    }

    /// Gain each voice's envelope ends on.
    pub fn terminal_gains(&self) -> Vec<f64> {
        self.voices.iter().map(|v| v.gain.terminal_value()).collect()
    }
}

/// Plans a definition at an effective volume.
///
/// `volume` is the already-mixed gain (master, category, and definition
/// volume multiplied together). Definitions missing a parameter their recipe
/// needs are planned as a single tone.
pub fn plan(def: &SoundDefinition, volume: f64, rng: &mut Pcg32) -> SoundPlan {
    let volume = if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    };
    let algorithm = def.effective_algorithm();
    let fell_back = algorithm != def.algorithm;
    if fell_back {
        debug!(
            sound = %def.id,
            declared = %def.algorithm,
            "missing synthesis parameter, planning single tone"
        );
    }

    let voices = match algorithm {
        Algorithm::Tone => tone::tone(def, volume),
        Algorithm::Chime => tone::chime(def, volume),
        Algorithm::CrystalClick => stack::crystal_click(def, volume),
        Algorithm::HarmonicButton => stack::harmonic_button(def, volume),
        Algorithm::VictoryChord => stack::victory_chord(def, volume),
        Algorithm::GrandFanfare => stack::grand_fanfare(def, volume),
        Algorithm::AscensionTheme => stack::ascension_theme(def, volume),
        Algorithm::Crossfade => stack::crossfade(def, volume),
        Algorithm::EtherealSweep => sweep::ethereal_sweep(def, volume),
        Algorithm::OrganicBloom => sweep::organic_bloom(def, volume),
        Algorithm::CascadeDown => cascade::cascade(def, volume, false),
        Algorithm::CascadeUp => cascade::cascade(def, volume, true),
        Algorithm::TriumphBells => cascade::triumph_bells(def, volume),
        Algorithm::CrystalSparkle => burst::crystal_sparkle(def, volume),
        Algorithm::LeafRustle => texture::leaf_rustle(def, volume, rng),
        Algorithm::RainDrops => texture::rain_drops(def, volume, rng),
        Algorithm::NatureSymphony => texture::nature_symphony(def, volume, rng),
    };

    SoundPlan {
        id: def.id,
        algorithm,
        fell_back,
        voices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::DECAY_FLOOR;
    use crate::rng::create_rng;
    use sprout_spec::Catalog;

    #[test]
    fn test_sweep_curve_linear() {
        let curve = SweepCurve::Linear;
        assert!((curve.interpolate(100.0, 200.0, 0.0) - 100.0).abs() < 0.01);
        assert!((curve.interpolate(100.0, 200.0, 0.5) - 150.0).abs() < 0.01);
        assert!((curve.interpolate(100.0, 200.0, 1.0) - 200.0).abs() < 0.01);
    }

    #[test]
    fn test_sweep_curve_exponential() {
        let curve = SweepCurve::Exponential;
        assert!((curve.interpolate(100.0, 400.0, 0.0) - 100.0).abs() < 0.01);
        // Geometric mean at 0.5
        assert!((curve.interpolate(100.0, 400.0, 0.5) - 200.0).abs() < 1.0);
        assert!((curve.interpolate(100.0, 400.0, 1.0) - 400.0).abs() < 0.01);
    }

    #[test]
    fn test_sweep_progress_is_clamped() {
        let sweep = FrequencySweep::exponential(220.0, 880.0);
        assert_eq!(sweep.at(-1.0), 220.0);
        assert!((sweep.at(2.0) - 880.0).abs() < 1e-9);
        assert!(FrequencySweep::constant(440.0).is_constant());
    }

    #[test]
    fn test_every_catalog_plan_ends_on_floor() {
        let catalog = Catalog::garden();
        let mut rng = create_rng(1);
        for def in catalog.iter() {
            let plan = plan(def, 1.0, &mut rng);
            assert!(!plan.voices.is_empty(), "{} has no voices", def.id);
            for terminal in plan.terminal_gains() {
                assert!(terminal > 0.0, "{} ends at zero", def.id);
                assert!((terminal - DECAY_FLOOR).abs() < 1e-12, "{} ends at {}", def.id, terminal);
            }
        }
    }

    #[test]
    fn test_plan_clamps_volume() {
        let catalog = Catalog::garden();
        let def = catalog.get(SoundId::UiHover).unwrap();
        let mut rng = create_rng(1);
        assert!(plan(def, 5.0, &mut rng).peak_gain() <= 1.0);
        assert!(plan(def, f64::NAN, &mut rng).peak_gain() <= DECAY_FLOOR);
    }

    #[test]
    fn test_voice_builder() {
        let voice = Voice::new(Waveform::Sine, 440.0, GainCurve::new().decay_to_floor(0.5))
            .sweeping_to(880.0)
            .starting_at(0.25);
        assert_eq!(voice.duration, 0.5);
        assert_eq!(voice.end(), 0.75);
        assert!(!voice.frequency.is_constant());
    }
}
