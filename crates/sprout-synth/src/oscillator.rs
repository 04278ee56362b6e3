//! Periodic waveform generation.
//!
//! Waveforms are evaluated from a normalized phase in `[0, 1)`. A
//! [`PhaseAccumulator`] advances the phase by `frequency / sample_rate` each
//! sample, so frequency can change per sample without discontinuities.

use std::f64::consts::PI;

/// Two times pi.
pub const TWO_PI: f64 = 2.0 * PI;

/// Oscillator waveform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Sawtooth,
    Square,
}

impl Waveform {
    /// Evaluates the waveform at a normalized phase.
    #[inline]
    pub fn sample(&self, phase: f64) -> f64 {
        match self {
            Waveform::Sine => sine(phase),
            Waveform::Triangle => triangle(phase),
            Waveform::Sawtooth => sawtooth(phase),
            Waveform::Square => square(phase),
        }
    }
}

/// Sine wave, starting at zero and rising.
#[inline]
pub fn sine(phase: f64) -> f64 {
    (phase * TWO_PI).sin()
}

/// Triangle wave, starting at zero and rising, peaking at a quarter cycle.
#[inline]
pub fn triangle(phase: f64) -> f64 {
    if phase < 0.25 {
        4.0 * phase
    } else if phase < 0.75 {
        2.0 - 4.0 * phase
    } else {
        4.0 * phase - 4.0
    }
}

/// Sawtooth wave, rising from -1 to 1 over the cycle.
#[inline]
pub fn sawtooth(phase: f64) -> f64 {
    2.0 * phase - 1.0
}

/// Square wave with a 50% duty cycle.
#[inline]
pub fn square(phase: f64) -> f64 {
    if phase < 0.5 {
        1.0
    } else {
        -1.0
    }
}

/// Tracks oscillator phase across samples.
#[derive(Debug, Clone)]
pub struct PhaseAccumulator {
    phase: f64,
    sample_rate: f64,
}

impl PhaseAccumulator {
    /// Creates an accumulator at phase zero.
    pub fn new(sample_rate: f64) -> Self {
        Self {
            phase: 0.0,
            sample_rate,
        }
    }

    /// Returns the current phase, then advances it by one sample at `frequency`.
    #[inline]
    pub fn advance(&mut self, frequency: f64) -> f64 {
        let current = self.phase;
        self.phase += frequency / self.sample_rate;
        self.phase -= self.phase.floor();
        current
    }

    /// Current phase in `[0, 1)`.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Resets the phase to zero.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waveforms_start_at_expected_values() {
        assert!(sine(0.0).abs() < 1e-12);
        assert!(triangle(0.0).abs() < 1e-12);
        assert_eq!(sawtooth(0.0), -1.0);
        assert_eq!(square(0.0), 1.0);
    }

    #[test]
    fn test_triangle_shape() {
        assert!((triangle(0.25) - 1.0).abs() < 1e-12);
        assert!(triangle(0.5).abs() < 1e-12);
        assert!((triangle(0.75) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_waveforms_stay_in_range() {
        for waveform in [
            Waveform::Sine,
            Waveform::Triangle,
            Waveform::Sawtooth,
            Waveform::Square,
        ] {
            for i in 0..1000 {
                let s = waveform.sample(i as f64 / 1000.0);
                assert!((-1.0..=1.0).contains(&s), "{:?} out of range: {}", waveform, s);
            }
        }
    }

    #[test]
    fn test_phase_accumulator_wraps() {
        let mut acc = PhaseAccumulator::new(100.0);
        // 25 Hz at 100 Hz sample rate: quarter cycle per sample
        let phases: Vec<f64> = (0..5).map(|_| acc.advance(25.0)).collect();
        assert_eq!(phases, vec![0.0, 0.25, 0.5, 0.75, 0.0]);
    }

    #[test]
    fn test_sine_period() {
        let sample_rate = 48_000.0;
        let mut acc = PhaseAccumulator::new(sample_rate);
        let samples: Vec<f64> = (0..480).map(|_| sine(acc.advance(100.0))).collect();

        // One full 100 Hz cycle is 480 samples; count rising zero crossings
        let crossings = samples
            .windows(2)
            .filter(|w| w[0] < 0.0 && w[1] >= 0.0)
            .count();
        assert_eq!(crossings, 0);
        assert!(acc.phase() < 1e-9 || acc.phase() > 1.0 - 1e-9);
    }
}
