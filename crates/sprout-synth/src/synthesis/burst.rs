//! Sparkle particle bursts.

use sprout_spec::SoundDefinition;

use crate::envelope::Envelope;
use crate::filter::FilterSpec;
use crate::oscillator::Waveform;

use super::Voice;

/// Harmonic multiples fired per frequency.
pub const PARTICLE_HARMONICS: usize = 3;

/// Delay between successive harmonics of one frequency.
pub const HARMONIC_STEP: f64 = 0.01;

/// Delay between successive frequencies.
pub const FREQUENCY_STEP: f64 = 0.005;

/// No particle starts later than this after the first.
pub const MAX_BURST_SPREAD: f64 = 0.03;

/// Length of one particle.
pub const PARTICLE_LENGTH: f64 = 0.1;

/// High-pass cutoff of every particle.
pub const BURST_HIGHPASS: f64 = 800.0;

/// Fires harmonics 1..=3 of every frequency in a tight high-passed burst.
///
/// Particle `h` of frequency `i` starts at `i * 5 ms + (h - 1) * 10 ms`,
/// capped at 30 ms, with gain `0.6 * volume / h`.
pub fn crystal_sparkle(def: &SoundDefinition, volume: f64) -> Vec<Voice> {
    let freqs: Vec<f64> = if def.frequencies().is_empty() {
        vec![def.fallback_frequency()]
    } else {
        def.frequencies().to_vec()
    };

    let mut voices = Vec::with_capacity(freqs.len() * PARTICLE_HARMONICS);
    for (i, &freq) in freqs.iter().enumerate() {
        for h in 1..=PARTICLE_HARMONICS {
            let start = (i as f64 * FREQUENCY_STEP + (h - 1) as f64 * HARMONIC_STEP)
                .min(MAX_BURST_SPREAD);
            let curve = Envelope::new(0.02, volume * 0.6 / h as f64).curve(PARTICLE_LENGTH);
            voices.push(
                Voice::new(Waveform::Sine, freq * h as f64, curve)
                    .filtered(FilterSpec::highpass(BURST_HIGHPASS, 3.0))
                    .starting_at(start)
                    .lasting(PARTICLE_LENGTH),
            );
        }
    }
    voices
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_spec::{Algorithm, SoundId};

    #[test]
    fn test_single_frequency_burst() {
        let def = SoundDefinition::new(SoundId::XpGain, Algorithm::CrystalSparkle, 0.4, 0.45)
            .with_frequency(1760.0);
        let voices = crystal_sparkle(&def, 0.45);
        assert_eq!(voices.len(), 3);

        let freqs: Vec<f64> = voices.iter().map(|v| v.frequency.start_freq).collect();
        assert_eq!(freqs, vec![1760.0, 3520.0, 5280.0]);
        assert!(voices
            .iter()
            .all(|v| v.filter.map(|f| f.cutoff.start_freq) == Some(BURST_HIGHPASS)));
    }

    #[test]
    fn test_burst_spread_is_bounded() {
        let def = SoundDefinition::new(SoundId::XpGain, Algorithm::CrystalSparkle, 0.4, 0.45)
            .with_frequencies([880.0, 1320.0, 1760.0, 2640.0, 3520.0]);
        let voices = crystal_sparkle(&def, 0.45);
        let first = voices.iter().map(|v| v.start).fold(f64::INFINITY, f64::min);
        let last = voices.iter().map(|v| v.start).fold(0.0, f64::max);
        assert_eq!(voices.len(), 15);
        assert!(last - first <= MAX_BURST_SPREAD + 1e-12);
    }
}
