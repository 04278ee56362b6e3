//! Randomized textures.
//!
//! Natural noises (rustling leaves, rain) are approximated by clusters of
//! short filtered tones with jittered pitch and entry time. All jitter is
//! drawn from the caller's RNG.

use rand::Rng;
use rand_pcg::Pcg32;

use sprout_spec::SoundDefinition;

use crate::envelope::Envelope;
use crate::filter::FilterSpec;
use crate::oscillator::Waveform;

use super::Voice;

/// Lowest frequency jitter may push a tone to.
const MIN_JITTERED_FREQ: f64 = 20.0;

/// Tones in a leaf rustle.
pub const RUSTLE_TONES: usize = 5;

/// Droplets in a rain shower.
pub const RAIN_DROPS: usize = 8;

/// Length of one droplet.
pub const DROP_LENGTH: f64 = 0.15;

fn jitter(rng: &mut Pcg32, freq: f64, spread: f64) -> f64 {
    (freq + rng.gen_range(-spread..spread)).max(MIN_JITTERED_FREQ)
}

/// Five triangles within ±20 Hz of the base, entering in the first 100 ms.
pub fn leaf_rustle(def: &SoundDefinition, volume: f64, rng: &mut Pcg32) -> Vec<Voice> {
    let base = def.fallback_frequency();
    let d = def.duration;
    (0..RUSTLE_TONES)
        .map(|_| {
            let freq = jitter(rng, base, 20.0);
            let start = rng.gen_range(0.0..0.1_f64.min(d));
            let curve = Envelope::new(0.02, volume * 0.3).curve(d);
            Voice::new(Waveform::Triangle, freq, curve)
                .filtered(FilterSpec::lowpass(400.0, 1.0))
                .starting_at(start)
                .lasting(d)
        })
        .collect()
}

/// Eight sine droplets within ±50 Hz of the base, spread evenly over the
/// duration with up to 100 ms of extra delay each.
pub fn rain_drops(def: &SoundDefinition, volume: f64, rng: &mut Pcg32) -> Vec<Voice> {
    let base = def.fallback_frequency();
    let d = def.duration;
    let latest = (d - DROP_LENGTH).max(0.0);
    (0..RAIN_DROPS)
        .map(|i| {
            let freq = jitter(rng, base, 50.0);
            let start = (i as f64 * d / RAIN_DROPS as f64 + rng.gen_range(0.0..0.1)).min(latest);
            let curve = Envelope::new(0.02, volume * 0.5).curve(DROP_LENGTH);
            Voice::new(Waveform::Sine, freq, curve)
                .filtered(FilterSpec::lowpass(600.0, 1.0))
                .starting_at(start)
                .lasting(DROP_LENGTH)
        })
        .collect()
}

/// Alternating triangle and sine layers, each band-passed at its own note,
/// detuned by up to ±5 Hz and entering within the first 200 ms.
pub fn nature_symphony(def: &SoundDefinition, volume: f64, rng: &mut Pcg32) -> Vec<Voice> {
    let freqs = def.frequencies();
    let gain = volume / freqs.len() as f64;
    let d = def.duration;
    freqs
        .iter()
        .enumerate()
        .map(|(i, &freq)| {
            let waveform = if i % 2 == 0 {
                Waveform::Triangle
            } else {
                Waveform::Sine
            };
            let detuned = jitter(rng, freq, 5.0);
            let start = rng.gen_range(0.0..0.2_f64.min(d));
            let curve = Envelope::new(0.2, gain).curve(d);
            Voice::new(waveform, detuned, curve)
                .filtered(FilterSpec::bandpass(freq, 3.0))
                .starting_at(start)
                .lasting(d)
        })
        .collect()
}
