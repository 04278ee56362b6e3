//! Single-tone recipes.

use sprout_spec::SoundDefinition;

use crate::envelope::Envelope;
use crate::filter::FilterSpec;
use crate::oscillator::Waveform;

use super::Voice;

/// Attack of the basic tone.
pub const TONE_ATTACK: f64 = 0.01;

/// Q of the chime's band-pass.
pub const CHIME_Q: f64 = 8.0;

/// One sine at the definition's first frequency (440 Hz when it has none).
///
/// This is also the fallback for every recipe whose parameters are missing.
pub fn tone(def: &SoundDefinition, volume: f64) -> Vec<Voice> {
    let curve = Envelope::new(TONE_ATTACK, volume).curve(def.duration);
    vec![Voice::new(Waveform::Sine, def.fallback_frequency(), curve).lasting(def.duration)]
}

/// A sine isolated by a narrow band-pass centred on itself.
pub fn chime(def: &SoundDefinition, volume: f64) -> Vec<Voice> {
    let freq = def.fallback_frequency();
    let curve = Envelope::new(TONE_ATTACK, volume).curve(def.duration);
    vec![Voice::new(Waveform::Sine, freq, curve)
        .filtered(FilterSpec::bandpass(freq, CHIME_Q))
        .lasting(def.duration)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_spec::{Algorithm, SoundId};

    #[test]
    fn test_tone_defaults_to_440() {
        let def = SoundDefinition::new(SoundId::UiError, Algorithm::Tone, 0.4, 0.5);
        let voices = tone(&def, 0.5);
        assert_eq!(voices.len(), 1);
        assert_eq!(voices[0].frequency.start_freq, 440.0);
        assert_eq!(voices[0].duration, 0.4);
        assert!((voices[0].gain.value_at(TONE_ATTACK) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_chime_is_band_passed() {
        let def = SoundDefinition::new(SoundId::UiHover, Algorithm::Chime, 0.08, 0.5)
            .with_frequency(880.0);
        let voices = chime(&def, 0.5);
        let filter = voices[0].filter.unwrap();
        assert_eq!(filter.cutoff.start_freq, 880.0);
        assert_eq!(filter.q, CHIME_Q);
    }
}
