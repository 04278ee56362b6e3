//! Biquad filters.
//!
//! The four responses the recipes use (lowpass, highpass, bandpass,
//! peaking) with coefficients from the Audio EQ Cookbook. A [`FilterSpec`]
//! describes a filter whose cutoff may sweep over the life of a voice; the
//! renderer turns it into a [`BiquadFilter`] and refreshes the coefficients
//! every [`COEFF_UPDATE_INTERVAL`] samples while sweeping.

use std::f64::consts::PI;

use crate::synthesis::FrequencySweep;

/// Samples between coefficient refreshes for a swept cutoff.
pub const COEFF_UPDATE_INTERVAL: usize = 32;

/// Biquad filter coefficients, normalized by `a0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

/// Keeps the cutoff inside (0, Nyquist) so the cookbook formulas stay stable.
fn omega(frequency: f64, sample_rate: f64) -> f64 {
    let frequency = frequency.clamp(1.0, sample_rate * 0.49);
    2.0 * PI * frequency / sample_rate
}

impl BiquadCoeffs {
    fn normalized(b0: f64, b1: f64, b2: f64, a0: f64, a1: f64, a2: f64) -> Self {
        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }

    /// Creates lowpass filter coefficients.
    ///
    /// # Arguments
    /// * `cutoff` - Cutoff frequency in Hz
    /// * `q` - Q factor (resonance), 0.707 is Butterworth
    /// * `sample_rate` - Audio sample rate in Hz
    pub fn lowpass(cutoff: f64, q: f64, sample_rate: f64) -> Self {
        let q = q.max(0.5);
        let omega = omega(cutoff, sample_rate);
        let cos_omega = omega.cos();
        let alpha = omega.sin() / (2.0 * q);

        Self::normalized(
            (1.0 - cos_omega) / 2.0,
            1.0 - cos_omega,
            (1.0 - cos_omega) / 2.0,
            1.0 + alpha,
            -2.0 * cos_omega,
            1.0 - alpha,
        )
    }

    /// Creates highpass filter coefficients.
    ///
    /// # Arguments
    /// * `cutoff` - Cutoff frequency in Hz
    /// * `q` - Q factor (resonance)
    /// * `sample_rate` - Audio sample rate in Hz
    pub fn highpass(cutoff: f64, q: f64, sample_rate: f64) -> Self {
        let q = q.max(0.5);
        let omega = omega(cutoff, sample_rate);
        let cos_omega = omega.cos();
        let alpha = omega.sin() / (2.0 * q);

        Self::normalized(
            (1.0 + cos_omega) / 2.0,
            -(1.0 + cos_omega),
            (1.0 + cos_omega) / 2.0,
            1.0 + alpha,
            -2.0 * cos_omega,
            1.0 - alpha,
        )
    }

    /// Creates bandpass filter coefficients (constant 0 dB peak gain).
    ///
    /// # Arguments
    /// * `center` - Center frequency in Hz
    /// * `q` - Q factor (bandwidth = center / Q)
    /// * `sample_rate` - Audio sample rate in Hz
    pub fn bandpass(center: f64, q: f64, sample_rate: f64) -> Self {
        let q = q.max(0.5);
        let omega = omega(center, sample_rate);
        let alpha = omega.sin() / (2.0 * q);

        Self::normalized(alpha, 0.0, -alpha, 1.0 + alpha, -2.0 * omega.cos(), 1.0 - alpha)
    }

    /// Creates a peaking EQ filter.
    ///
    /// # Arguments
    /// * `frequency` - Center frequency in Hz
    /// * `q` - Q factor
    /// * `db_gain` - Boost (positive) or cut (negative) in dB
    /// * `sample_rate` - Audio sample rate in Hz
    pub fn peaking(frequency: f64, q: f64, db_gain: f64, sample_rate: f64) -> Self {
        let q = q.max(0.5);
        let a = 10.0_f64.powf(db_gain / 40.0);
        let omega = omega(frequency, sample_rate);
        let cos_omega = omega.cos();
        let alpha = omega.sin() / (2.0 * q);

        Self::normalized(
            1.0 + alpha * a,
            -2.0 * cos_omega,
            1.0 - alpha * a,
            1.0 + alpha / a,
            -2.0 * cos_omega,
            1.0 - alpha / a,
        )
    }
}

/// Biquad filter state.
#[derive(Debug, Clone)]
pub struct BiquadFilter {
    coeffs: BiquadCoeffs,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl BiquadFilter {
    /// Creates a new biquad filter with the given coefficients.
    pub fn new(coeffs: BiquadCoeffs) -> Self {
        Self {
            coeffs,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Updates the filter coefficients, keeping the delay lines.
    pub fn set_coeffs(&mut self, coeffs: BiquadCoeffs) {
        self.coeffs = coeffs;
    }

    /// Resets the filter state.
    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }

    /// Processes a single sample through the filter.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let c = &self.coeffs;
        let output =
            c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Processes a buffer of samples in place.
    pub fn process_buffer(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}

/// Filter response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Lowpass,
    Highpass,
    Bandpass,
    Peaking,
}

/// A filter stage in a voice's chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    /// Response type.
    pub kind: FilterKind,
    /// Cutoff (or center) frequency over the voice's life.
    pub cutoff: FrequencySweep,
    /// Q factor.
    pub q: f64,
    /// Boost in dB; only used by [`FilterKind::Peaking`].
    pub gain_db: f64,
}

impl FilterSpec {
    /// Fixed-cutoff lowpass.
    pub fn lowpass(cutoff: f64, q: f64) -> Self {
        Self::fixed(FilterKind::Lowpass, cutoff, q, 0.0)
    }

    /// Fixed-cutoff highpass.
    pub fn highpass(cutoff: f64, q: f64) -> Self {
        Self::fixed(FilterKind::Highpass, cutoff, q, 0.0)
    }

    /// Fixed-center bandpass.
    pub fn bandpass(center: f64, q: f64) -> Self {
        Self::fixed(FilterKind::Bandpass, center, q, 0.0)
    }

    /// Fixed-center peaking boost.
    pub fn peaking(center: f64, q: f64, gain_db: f64) -> Self {
        Self::fixed(FilterKind::Peaking, center, q, gain_db)
    }

    fn fixed(kind: FilterKind, cutoff: f64, q: f64, gain_db: f64) -> Self {
        Self {
            kind,
            cutoff: FrequencySweep::constant(cutoff),
            q,
            gain_db,
        }
    }

    /// Replaces the cutoff with an exponential sweep.
    pub fn sweeping(mut self, start: f64, end: f64) -> Self {
        self.cutoff = FrequencySweep::exponential(start, end);
        self
    }

    /// Coefficients at a given progress through the voice (0.0 to 1.0).
    pub fn coeffs_at(&self, progress: f64, sample_rate: f64) -> BiquadCoeffs {
        let cutoff = self.cutoff.at(progress);
        match self.kind {
            FilterKind::Lowpass => BiquadCoeffs::lowpass(cutoff, self.q, sample_rate),
            FilterKind::Highpass => BiquadCoeffs::highpass(cutoff, self.q, sample_rate),
            FilterKind::Bandpass => BiquadCoeffs::bandpass(cutoff, self.q, sample_rate),
            FilterKind::Peaking => {
                BiquadCoeffs::peaking(cutoff, self.q, self.gain_db, sample_rate)
            }
        }
    }

    /// Returns true when the coefficients change over time.
    pub fn is_swept(&self) -> bool {
        !self.cutoff.is_constant()
    }
}
