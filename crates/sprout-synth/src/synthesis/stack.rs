//! Harmonic stacks and chords.
//!
//! Summed layers are scaled down to keep the mix out of clipping: overtone
//! layers by `1/harmonic`, chord notes by `1/N`.

use sprout_spec::SoundDefinition;

use crate::envelope::Envelope;
use crate::filter::FilterSpec;
use crate::oscillator::Waveform;

use super::Voice;

/// Overtone count of the crystal click.
pub const CLICK_HARMONICS: usize = 3;

/// High-pass cutoff that gives the click its brightness.
pub const CLICK_HIGHPASS: f64 = 800.0;

/// Stagger between button chord notes.
pub const BUTTON_STAGGER: f64 = 0.015;

/// Stagger between fanfare notes.
pub const FANFARE_STAGGER: f64 = 0.2;

/// Stagger between ascension notes.
pub const ASCENSION_STAGGER: f64 = 0.1;

/// Overtones 1..=3 of one frequency through a high-pass, gain `volume/h`.
pub fn crystal_click(def: &SoundDefinition, volume: f64) -> Vec<Voice> {
    let freq = def.fallback_frequency();
    (1..=CLICK_HARMONICS)
        .map(|h| {
            let curve = Envelope::new(0.005, volume / h as f64).curve(def.duration);
            Voice::new(Waveform::Sine, freq * h as f64, curve)
                .filtered(FilterSpec::highpass(CLICK_HIGHPASS, 3.0))
                .lasting(def.duration)
        })
        .collect()
}

/// Soft triangle chord, notes 15 ms apart.
pub fn harmonic_button(def: &SoundDefinition, volume: f64) -> Vec<Voice> {
    let freqs = def.frequencies();
    let gain = volume / freqs.len() as f64;
    freqs
        .iter()
        .enumerate()
        .map(|(i, &freq)| {
            let curve = Envelope::new(0.03, gain).curve(def.duration);
            Voice::new(Waveform::Triangle, freq, curve)
                .filtered(FilterSpec::lowpass(2000.0, 1.0))
                .starting_at(i as f64 * BUTTON_STAGGER)
                .lasting(def.duration)
        })
        .collect()
}

/// Triangle chord struck together, eased to 80% before the tail.
pub fn victory_chord(def: &SoundDefinition, volume: f64) -> Vec<Voice> {
    let freqs = def.frequencies();
    let gain = volume / freqs.len() as f64;
    let d = def.duration;
    freqs
        .iter()
        .map(|&freq| {
            let curve = Envelope::new(0.1, gain).curve_with_hold(gain * 0.8, d * 0.8, d);
            Voice::new(Waveform::Triangle, freq, curve)
                .filtered(FilterSpec::lowpass(freq * 3.0, 1.0))
                .lasting(d)
        })
        .collect()
}

/// Triangle notes 200 ms apart, each boosted half an octave up.
pub fn grand_fanfare(def: &SoundDefinition, volume: f64) -> Vec<Voice> {
    let freqs = def.frequencies();
    let gain = volume / freqs.len() as f64;
    let d = def.duration;
    freqs
        .iter()
        .enumerate()
        .map(|(i, &freq)| {
            let curve = Envelope::new(0.1, gain).curve_with_hold(gain * 2.0 / 3.0, d * 0.8, d);
            Voice::new(Waveform::Triangle, freq, curve)
                .filtered(FilterSpec::peaking(freq * 1.5, 3.0, 6.0))
                .starting_at(i as f64 * FANFARE_STAGGER)
                .lasting(d)
        })
        .collect()
}

/// Sine notes sorted low to high, 100 ms apart, each half the sound long.
pub fn ascension_theme(def: &SoundDefinition, volume: f64) -> Vec<Voice> {
    let mut freqs = def.frequencies().to_vec();
    freqs.sort_by(|a, b| a.total_cmp(b));
    let gain = volume / freqs.len() as f64;
    let note = def.duration / 2.0;
    freqs
        .iter()
        .enumerate()
        .map(|(i, &freq)| {
            let curve = Envelope::new(0.05, gain).curve(note - 0.2);
            Voice::new(Waveform::Sine, freq, curve)
                .starting_at(i as f64 * ASCENSION_STAGGER)
                .lasting(note)
        })
        .collect()
}

/// Sine segments handing over from one frequency to the next.
pub fn crossfade(def: &SoundDefinition, volume: f64) -> Vec<Voice> {
    let freqs = def.frequencies();
    let segment = def.duration / freqs.len() as f64;
    freqs
        .iter()
        .enumerate()
        .map(|(i, &freq)| {
            let curve = Envelope::new(0.05, volume / 2.0).curve(segment);
            Voice::new(Waveform::Sine, freq, curve)
                .starting_at(i as f64 * segment)
                .lasting(segment + 0.1)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_spec::{Algorithm, SoundId};

    #[test]
    fn test_click_gains_fall_with_harmonic() {
        let def = SoundDefinition::new(SoundId::UiClick, Algorithm::CrystalClick, 0.12, 0.6)
            .with_frequency(600.0);
        let voices = crystal_click(&def, 0.6);
        let peaks: Vec<f64> = voices.iter().map(|v| v.gain.peak()).collect();
        assert!((peaks[0] - 0.6).abs() < 1e-12);
        assert!((peaks[1] - 0.3).abs() < 1e-12);
        assert!((peaks[2] - 0.2).abs() < 1e-12);
        assert_eq!(voices[2].frequency.start_freq, 1800.0);
    }

    #[test]
    fn test_chord_scales_by_note_count() {
        let def = SoundDefinition::new(SoundId::UiButton, Algorithm::HarmonicButton, 0.15, 0.7)
            .with_frequencies([523.25, 659.25, 783.99]);
        let voices = harmonic_button(&def, 0.6);
        let total: f64 = voices.iter().map(|v| v.gain.peak()).sum();
        assert!((total - 0.6).abs() < 1e-9);
        assert!((voices[2].start - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_ascension_sorts_notes() {
        let def = SoundDefinition::new(SoundId::LevelUp, Algorithm::AscensionTheme, 2.0, 0.75)
            .with_frequencies([392.0, 261.63, 329.63]);
        let voices = ascension_theme(&def, 0.75);
        let freqs: Vec<f64> = voices.iter().map(|v| v.frequency.start_freq).collect();
        assert_eq!(freqs, vec![261.63, 329.63, 392.0]);
        assert!(voices.iter().all(|v| v.duration == 1.0));
    }

    #[test]
    fn test_fanfare_stagger() {
        let def = SoundDefinition::new(SoundId::Achievement, Algorithm::GrandFanfare, 3.0, 0.8)
            .with_frequencies([130.81, 261.63, 329.63]);
        let voices = grand_fanfare(&def, 0.8);
        let starts: Vec<f64> = voices.iter().map(|v| v.start).collect();
        assert_eq!(starts, vec![0.0, 0.2, 0.4]);
    }

    #[test]
    fn test_crossfade_segments_follow_each_other() {
        let def = SoundDefinition::new(SoundId::UiTabSwitch, Algorithm::Crossfade, 0.2, 0.3)
            .with_frequencies([440.0, 554.37]);
        let voices = crossfade(&def, 0.3);
        assert_eq!(voices[0].start, 0.0);
        assert!((voices[1].start - 0.1).abs() < 1e-12);
        assert!((voices[0].gain.peak() - 0.15).abs() < 1e-12);
    }
}
