//! In-memory backend.

use sprout_synth::RenderedSound;

use crate::context::ContextState;
use crate::error::{EngineError, EngineResult};
use crate::music::MusicTrack;
use crate::output::OutputMixer;

use super::{AudioBackend, BackendEvent};

/// Records everything the engine sends and mixes it offline.
///
/// Open and resume outcomes are configurable so lifecycle behavior under an
/// autoplay policy can be reproduced.
#[derive(Debug)]
pub struct CaptureBackend {
    mixer: OutputMixer,
    open_state: Option<ContextState>,
    resume_allowed: bool,
    open_calls: usize,
    resume_calls: usize,
    submitted: Vec<RenderedSound>,
    output: Vec<f32>,
    music_starts: usize,
    music_stops: usize,
    music_rate: Option<f64>,
    music_volume: Option<f64>,
    rate_history: Vec<f64>,
}

impl CaptureBackend {
    /// Creates a backend that opens straight into `Running`.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            mixer: OutputMixer::new(sample_rate),
            open_state: Some(ContextState::Running),
            resume_allowed: true,
            open_calls: 0,
            resume_calls: 0,
            submitted: Vec::new(),
            output: Vec::new(),
            music_starts: 0,
            music_stops: 0,
            music_rate: None,
            music_volume: None,
            rate_history: Vec::new(),
        }
    }

    /// Opens suspended, like a host with an autoplay policy.
    pub fn opening_suspended(mut self) -> Self {
        self.open_state = Some(ContextState::Suspended);
        self
    }

    /// Fails to open.
    pub fn failing_open(mut self) -> Self {
        self.open_state = None;
        self
    }

    /// Rejects resume until [`set_resume_allowed`](Self::set_resume_allowed).
    pub fn rejecting_resume(mut self) -> Self {
        self.resume_allowed = false;
        self
    }

    /// Whether the next resume succeeds.
    pub fn set_resume_allowed(&mut self, allowed: bool) {
        self.resume_allowed = allowed;
    }

    pub fn open_calls(&self) -> usize {
        self.open_calls
    }

    pub fn resume_calls(&self) -> usize {
        self.resume_calls
    }

    /// Every one-shot submitted so far, in order.
    pub fn submitted(&self) -> &[RenderedSound] {
        &self.submitted
    }

    /// Everything rendered so far.
    pub fn output(&self) -> &[f32] {
        &self.output
    }

    /// Takes the rendered output, leaving it empty.
    pub fn take_output(&mut self) -> Vec<f32> {
        std::mem::take(&mut self.output)
    }

    pub fn music_starts(&self) -> usize {
        self.music_starts
    }

    pub fn music_stops(&self) -> usize {
        self.music_stops
    }

    /// True while a music loop is active.
    pub fn music_playing(&self) -> bool {
        self.mixer.is_music_playing()
    }

    /// Last rate sent for the music loop.
    pub fn music_rate(&self) -> Option<f64> {
        self.music_rate
    }

    /// Last volume sent for the music loop.
    pub fn music_volume(&self) -> Option<f64> {
        self.music_volume
    }

    /// Every rate the music loop has played at, starting rate first.
    pub fn rate_history(&self) -> &[f64] {
        &self.rate_history
    }
}

impl AudioBackend for CaptureBackend {
    fn open(&mut self) -> EngineResult<ContextState> {
        self.open_calls += 1;
        self.open_state
            .ok_or_else(|| EngineError::OutputUnavailable("capture backend set to fail".into()))
    }

    fn resume(&mut self) -> EngineResult<()> {
        self.resume_calls += 1;
        if self.resume_allowed {
            Ok(())
        } else {
            Err(EngineError::ResumeRejected("not allowed to start".into()))
        }
    }

    fn sample_rate(&self) -> u32 {
        self.mixer.sample_rate()
    }

    fn submit(&mut self, sound: RenderedSound) {
        self.submitted.push(sound.clone());
        self.mixer.add_sound(sound);
    }

    fn start_music(&mut self, track: &MusicTrack, rate: f64, volume: f64) {
        self.music_starts += 1;
        self.music_rate = Some(rate);
        self.music_volume = Some(volume);
        self.rate_history.push(rate);
        self.mixer.start_music(track, rate, volume);
    }

    fn set_music_rate(&mut self, rate: f64) {
        self.music_rate = Some(rate);
        self.rate_history.push(rate);
        self.mixer.set_music_rate(rate);
    }

    fn set_music_volume(&mut self, volume: f64) {
        self.music_volume = Some(volume);
        self.mixer.set_music_volume(volume);
    }

    fn stop_music(&mut self) {
        self.music_stops += 1;
        self.mixer.stop_music();
    }

    fn render(&mut self, frames: usize) {
        let start = self.output.len();
        self.output.resize(start + frames, 0.0);
        self.mixer.mix(&mut self.output[start..]);
    }

    fn poll_events(&mut self) -> Vec<BackendEvent> {
        self.mixer.take_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_spec::SoundId;

    #[test]
    fn test_records_and_mixes_submissions() {
        let mut backend = CaptureBackend::new(100);
        backend.submit(RenderedSound {
            id: SoundId::UiClick,
            samples: vec![0.5; 3],
            sample_rate: 100,
        });
        backend.render(5);
        assert_eq!(backend.submitted().len(), 1);
        assert_eq!(backend.output(), &[0.5, 0.5, 0.5, 0.0, 0.0]);
        assert_eq!(backend.take_output().len(), 5);
        assert!(backend.output().is_empty());
    }

    #[test]
    fn test_configurable_open() {
        let mut backend = CaptureBackend::new(100).failing_open();
        let err = backend.open().unwrap_err();
        assert_eq!(err.code(), "ENGINE_002");

        let mut backend = CaptureBackend::new(100).opening_suspended();
        assert_eq!(backend.open().unwrap(), ContextState::Suspended);
    }
}
