//! Backend for environments without audio support.

use sprout_synth::RenderedSound;

use crate::config::DEFAULT_SAMPLE_RATE;
use crate::context::ContextState;
use crate::error::{EngineError, EngineResult};
use crate::music::MusicTrack;

use super::{AudioBackend, BackendEvent};

/// A backend whose output never opens.
#[derive(Debug, Default)]
pub struct NullBackend {
    open_calls: usize,
}

impl NullBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_calls(&self) -> usize {
        self.open_calls
    }
}

impl AudioBackend for NullBackend {
    fn open(&mut self) -> EngineResult<ContextState> {
        self.open_calls += 1;
        Err(EngineError::OutputUnavailable(
            "audio is not supported in this environment".into(),
        ))
    }

    fn resume(&mut self) -> EngineResult<()> {
        Err(EngineError::ResumeRejected("no output".into()))
    }

    fn sample_rate(&self) -> u32 {
        DEFAULT_SAMPLE_RATE
    }

    fn submit(&mut self, _sound: RenderedSound) {}

    fn start_music(&mut self, _track: &MusicTrack, _rate: f64, _volume: f64) {}

    fn set_music_rate(&mut self, _rate: f64) {}

    fn set_music_volume(&mut self, _volume: f64) {}

    fn stop_music(&mut self) {}

    fn render(&mut self, _frames: usize) {}

    fn poll_events(&mut self) -> Vec<BackendEvent> {
        Vec::new()
    }
}
