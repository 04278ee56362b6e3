//! Audio output backends.
//!
//! The engine renders every sound itself and hands finished buffers to an
//! [`AudioBackend`]. Backends own the output context (open/resume), play the
//! music loop, and report loop-end events back to the engine.
//!
//! - [`CaptureBackend`] - in-memory output for tests and offline renders
//! - [`NullBackend`] - an environment with no audio support
//! - `DeviceBackend` - the default system device (`device` feature)

mod capture;
#[cfg(feature = "device")]
mod device;
mod null;

pub use capture::CaptureBackend;
#[cfg(feature = "device")]
pub use device::DeviceBackend;
pub use null::NullBackend;

use sprout_synth::RenderedSound;

use crate::context::ContextState;
use crate::error::EngineResult;
use crate::music::MusicTrack;

/// Something the output reports back to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendEvent {
    /// The music loop reached its end and started over.
    MusicLoopEnded,
}

/// An audio output the engine can drive.
pub trait AudioBackend {
    /// Constructs the output context and reports its initial state.
    fn open(&mut self) -> EngineResult<ContextState>;

    /// Asks a suspended context to start running.
    fn resume(&mut self) -> EngineResult<()>;

    /// Rate sounds should be rendered at.
    fn sample_rate(&self) -> u32;

    /// Queues a rendered one-shot for immediate playback.
    fn submit(&mut self, sound: RenderedSound);

    /// Starts looping `track` from its beginning.
    fn start_music(&mut self, track: &MusicTrack, rate: f64, volume: f64);

    /// Changes the music playback rate.
    fn set_music_rate(&mut self, rate: f64);

    /// Changes the music volume.
    fn set_music_volume(&mut self, volume: f64);

    /// Stops the music loop.
    fn stop_music(&mut self);

    /// Produces `frames` samples of output.
    fn render(&mut self, frames: usize);

    /// Drains events raised since the last poll.
    fn poll_events(&mut self) -> Vec<BackendEvent>;
}
