//! Staggered note sequences.

use sprout_spec::SoundDefinition;

use crate::envelope::Envelope;
use crate::filter::FilterSpec;
use crate::oscillator::Waveform;

use super::Voice;

/// Fraction of a note length between cascade note starts.
pub const CASCADE_SPACING: f64 = 0.5;

/// Fraction of a note length between bell starts.
pub const BELL_SPACING: f64 = 0.3;

/// Triangle notes through the set, each `duration / N` long, started half a
/// note apart. `reversed` plays the set back to front.
pub fn cascade(def: &SoundDefinition, volume: f64, reversed: bool) -> Vec<Voice> {
    let mut freqs = def.frequencies().to_vec();
    if reversed {
        freqs.reverse();
    }
    let n = freqs.len() as f64;
    let note = def.duration / n;
    let gain = volume / n;

    freqs
        .iter()
        .enumerate()
        .map(|(i, &freq)| {
            let curve = Envelope::new(0.02, gain).curve(note);
            Voice::new(Waveform::Triangle, freq, curve)
                .filtered(FilterSpec::lowpass(freq * 3.0, 1.0))
                .starting_at(i as f64 * note * CASCADE_SPACING)
                .lasting(note)
        })
        .collect()
}

/// Sine bells with an octave peaking boost, rung 0.3 notes apart and
/// ringing for two notes each.
pub fn triumph_bells(def: &SoundDefinition, volume: f64) -> Vec<Voice> {
    let freqs = def.frequencies();
    let n = freqs.len() as f64;
    let note = def.duration / n;
    let gain = volume / n;

    freqs
        .iter()
        .enumerate()
        .map(|(i, &freq)| {
            let curve = Envelope::new(0.05, gain).curve(note * 2.0);
            Voice::new(Waveform::Sine, freq, curve)
                .filtered(FilterSpec::peaking(freq * 2.0, 5.0, 6.0))
                .starting_at(i as f64 * note * BELL_SPACING)
                .lasting(note * 2.0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_spec::{Algorithm, SoundId};

    fn dropdown() -> SoundDefinition {
        SoundDefinition::new(SoundId::UiDropdownOpen, Algorithm::CascadeDown, 0.2, 0.4)
            .with_frequencies([880.0, 659.25, 523.25, 392.0])
    }

    #[test]
    fn test_cascade_offsets() {
        let voices = cascade(&dropdown(), 0.4, false);
        let starts: Vec<f64> = voices.iter().map(|v| v.start).collect();
        // note = 0.05, spacing 0.025
        for (i, start) in starts.iter().enumerate() {
            assert!((start - i as f64 * 0.025).abs() < 1e-12);
        }
        assert!(voices.iter().all(|v| (v.duration - 0.05).abs() < 1e-12));
    }

    #[test]
    fn test_cascade_up_reverses_order() {
        let down: Vec<f64> = cascade(&dropdown(), 0.4, false)
            .iter()
            .map(|v| v.frequency.start_freq)
            .collect();
        let up: Vec<f64> = cascade(&dropdown(), 0.4, true)
            .iter()
            .map(|v| v.frequency.start_freq)
            .collect();
        let mut reversed = down.clone();
        reversed.reverse();
        assert_eq!(up, reversed);
    }

    #[test]
    fn test_bells_ring_two_notes() {
        let def = SoundDefinition::new(SoundId::UiSuccess, Algorithm::TriumphBells, 0.8, 0.6)
            .with_frequencies([523.25, 659.25, 783.99, 1046.5]);
        let voices = triumph_bells(&def, 0.6);
        assert!((voices[0].duration - 0.4).abs() < 1e-12);
        assert!((voices[1].start - 0.06).abs() < 1e-12);
        assert!((voices[0].gain.peak() - 0.15).abs() < 1e-12);
    }
}
