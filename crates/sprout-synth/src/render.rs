//! Offline rendering of sound plans to sample buffers.
//!
//! Every voice is rendered into a shared mono f64 buffer, summed, and
//! soft-clipped before conversion to f32.

use rand_pcg::Pcg32;

use sprout_spec::{SoundDefinition, SoundId};

use crate::error::{check_sample_rate, SynthResult};
use crate::filter::{BiquadFilter, COEFF_UPDATE_INTERVAL};
use crate::oscillator::PhaseAccumulator;
use crate::synthesis::{plan, SoundPlan, Voice};

/// Level above which summed voices are compressed.
pub const SOFT_CLIP_THRESHOLD: f64 = 0.9;

/// A rendered one-shot ready to hand to an audio output.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSound {
    /// Sound the samples belong to.
    pub id: SoundId,
    /// Mono samples in `[-1, 1]`.
    pub samples: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl RenderedSound {
    /// Length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0_f32, |acc, s| acc.max(s.abs()))
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true when there are no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Adds one voice into `out`, starting at the voice's offset.
///
/// Swept filters are refreshed every [`COEFF_UPDATE_INTERVAL`] samples.
/// Samples that would land past the end of `out` are dropped.
pub fn render_voice(voice: &Voice, sample_rate: u32, out: &mut [f64]) {
    let sr = sample_rate as f64;
    let offset = (voice.start * sr).round() as usize;
    let num_samples = (voice.duration * sr).ceil() as usize;
    if offset >= out.len() || num_samples == 0 {
        return;
    }

    let mut phase = PhaseAccumulator::new(sr);
    let mut filter = voice
        .filter
        .map(|spec| BiquadFilter::new(spec.coeffs_at(0.0, sr)));
    let swept = voice.filter.is_some_and(|spec| spec.is_swept());

    let end = (offset + num_samples).min(out.len());
    for (i, slot) in out[offset..end].iter_mut().enumerate() {
        let t = i as f64 / sr;
        let progress = t / voice.duration;
        let osc = voice.waveform.sample(phase.advance(voice.frequency.at(progress)));

        let shaped = match (&mut filter, voice.filter) {
            (Some(stage), Some(spec)) => {
                if swept && i % COEFF_UPDATE_INTERVAL == 0 {
                    stage.set_coeffs(spec.coeffs_at(progress, sr));
                }
                stage.process(osc)
            }
            _ => osc,
        };

        *slot += shaped * voice.gain.value_at(t);
    }
}

/// Renders a plan to samples.
pub fn render_plan(plan: &SoundPlan, sample_rate: u32) -> SynthResult<RenderedSound> {
    check_sample_rate(sample_rate)?;

    let num_samples = (plan.duration() * sample_rate as f64).ceil() as usize;
    let mut mix = vec![0.0; num_samples];
    for voice in &plan.voices {
        render_voice(voice, sample_rate, &mut mix);
    }

    let samples = mix
        .into_iter()
        .map(|s| soft_clip(s, SOFT_CLIP_THRESHOLD) as f32)
        .collect();

    Ok(RenderedSound {
        id: plan.id,
        samples,
        sample_rate,
    })
}

/// Plans and renders a definition at an effective volume.
pub fn render_sound(
    def: &SoundDefinition,
    volume: f64,
    sample_rate: u32,
    rng: &mut Pcg32,
) -> SynthResult<RenderedSound> {
    render_plan(&plan(def, volume, rng), sample_rate)
}

/// Applies soft clipping to prevent harsh distortion.
///
/// Samples above the threshold are compressed smoothly toward 1.0.
pub fn soft_clip(sample: f64, threshold: f64) -> f64 {
    let abs = sample.abs();
    if abs <= threshold {
        sample
    } else {
        let excess = abs - threshold;
        let compressed = threshold + (1.0 - threshold) * (1.0 - (-excess * 3.0).exp());
        sample.signum() * compressed
    }
}
