//! Frequency sweeps.
//!
//! Pitch always moves exponentially so equal times cover equal musical
//! intervals.

use sprout_spec::SoundDefinition;

use crate::envelope::Envelope;
use crate::filter::FilterSpec;
use crate::oscillator::Waveform;

use super::Voice;

/// Stagger between bloom notes when the bloom is a chord.
pub const BLOOM_STAGGER: f64 = 0.1;

/// Sine sweep from base to end frequency with a low-pass tracking it.
///
/// The gain swells for the first fifth, eases to 80% by four fifths, then
/// decays.
pub fn ethereal_sweep(def: &SoundDefinition, volume: f64) -> Vec<Voice> {
    let (start, end) = match (def.base_frequency, def.end_frequency) {
        (Some(start), Some(end)) => (start, end),
        _ => return super::tone::tone(def, volume),
    };
    let d = def.duration;
    let curve = Envelope::new(d * 0.2, volume).curve_with_hold(volume * 0.8, d * 0.8, d);

    vec![Voice::new(Waveform::Sine, start, curve)
        .sweeping_to(end)
        .filtered(FilterSpec::lowpass(start * 2.0, 2.0).sweeping(start * 2.0, end * 1.5))
        .lasting(d)]
}

/// Organic swell.
///
/// With a frequency set this is a soft triangle chord entering 100 ms per
/// note; with a single base frequency it is a triangle sweep to the end
/// frequency (an octave up when none is given).
pub fn organic_bloom(def: &SoundDefinition, volume: f64) -> Vec<Voice> {
    let d = def.duration;
    let freqs = def.frequencies();

    if !freqs.is_empty() {
        let gain = volume / freqs.len() as f64;
        return freqs
            .iter()
            .enumerate()
            .map(|(i, &freq)| {
                let curve = Envelope::new(0.1, gain).curve(d);
                Voice::new(Waveform::Triangle, freq, curve)
                    .filtered(FilterSpec::lowpass(freq * 2.0, 0.8))
                    .starting_at(i as f64 * BLOOM_STAGGER)
                    .lasting(d)
            })
            .collect();
    }

    let start = def.fallback_frequency();
    let end = def.end_frequency.unwrap_or(start * 2.0);
    let curve = Envelope::new(0.01, volume).curve(d - 0.1);
    vec![Voice::new(Waveform::Triangle, start, curve)
        .sweeping_to(end)
        .lasting(d)]
}
