//! Default system output device through cpal.
//!
//! The host pumps [`AudioBackend::render`] from its frame or timer loop; mixed
//! samples go through a ring buffer to the cpal callback, which fills any
//! shortfall with silence.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use ringbuf::{
    traits::{Consumer, Producer, Split},
    HeapRb,
};
use tracing::{debug, error};

use sprout_synth::RenderedSound;

use crate::context::ContextState;
use crate::error::{EngineError, EngineResult};
use crate::music::MusicTrack;
use crate::output::OutputMixer;

use super::{AudioBackend, BackendEvent};

/// Ring buffer length in seconds of audio.
const RING_BUFFER_SECS: f64 = 0.1;

struct DeviceOutput {
    producer: ringbuf::HeapProd<f32>,
    stream: cpal::Stream,
    channels: usize,
}

/// Plays through the default output device.
pub struct DeviceBackend {
    mixer: OutputMixer,
    output: Option<DeviceOutput>,
    block: Vec<f32>,
    interleaved: Vec<f32>,
}

impl DeviceBackend {
    /// Creates a backend; the device is opened on [`AudioBackend::open`].
    ///
    /// `sample_rate` is used until the device reports its own rate.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            mixer: OutputMixer::new(sample_rate),
            output: None,
            block: Vec::new(),
            interleaved: Vec::new(),
        }
    }
}

impl std::fmt::Debug for DeviceBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceBackend")
            .field("sample_rate", &self.mixer.sample_rate())
            .field("open", &self.output.is_some())
            .finish()
    }
}

fn unavailable(context: &str, e: impl std::fmt::Display) -> EngineError {
    EngineError::OutputUnavailable(format!("{}: {}", context, e))
}

impl AudioBackend for DeviceBackend {
    fn open(&mut self) -> EngineResult<ContextState> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| EngineError::OutputUnavailable("no output device".into()))?;
        let config = device
            .default_output_config()
            .map_err(|e| unavailable("no default output config", e))?;

        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;
        let capacity = ((sample_rate as f64 * RING_BUFFER_SECS) as usize * channels).max(1024);
        let (producer, mut consumer) = HeapRb::<f32>::new(capacity).split();

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => device
                .build_output_stream(
                    &config.into(),
                    move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                        let popped = consumer.pop_slice(data);
                        data[popped..].fill(0.0);
                    },
                    |err| error!("audio stream error: {}", err),
                    None,
                )
                .map_err(|e| unavailable("failed to build stream", e))?,
            cpal::SampleFormat::I16 => {
                let mut scratch: Vec<f32> = vec![0.0; 4096];
                device
                    .build_output_stream(
                        &config.into(),
                        move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
                            if scratch.len() < data.len() {
                                scratch.resize(data.len(), 0.0);
                            }
                            let popped = consumer.pop_slice(&mut scratch[..data.len()]);
                            for (out, &s) in data.iter_mut().zip(&scratch[..popped]) {
                                *out = (s * 32767.0).clamp(-32768.0, 32767.0) as i16;
                            }
                            data[popped..].fill(0);
                        },
                        |err| error!("audio stream error: {}", err),
                        None,
                    )
                    .map_err(|e| unavailable("failed to build stream", e))?
            }
            cpal::SampleFormat::U16 => {
                let mut scratch: Vec<f32> = vec![0.0; 4096];
                device
                    .build_output_stream(
                        &config.into(),
                        move |data: &mut [u16], _: &cpal::OutputCallbackInfo| {
                            if scratch.len() < data.len() {
                                scratch.resize(data.len(), 0.0);
                            }
                            let popped = consumer.pop_slice(&mut scratch[..data.len()]);
                            for (out, &s) in data.iter_mut().zip(&scratch[..popped]) {
                                *out = (s * 32767.0 + 32768.0).clamp(0.0, 65535.0) as u16;
                            }
                            data[popped..].fill(32768);
                        },
                        |err| error!("audio stream error: {}", err),
                        None,
                    )
                    .map_err(|e| unavailable("failed to build stream", e))?
            }
            other => {
                return Err(EngineError::OutputUnavailable(format!(
                    "unsupported sample format: {:?}",
                    other
                )))
            }
        };

        debug!(sample_rate, channels, "audio device opened");
        self.mixer = OutputMixer::new(sample_rate);
        self.output = Some(DeviceOutput {
            producer,
            stream,
            channels,
        });
        Ok(ContextState::Suspended)
    }

    fn resume(&mut self) -> EngineResult<()> {
        let output = self
            .output
            .as_ref()
            .ok_or_else(|| EngineError::ResumeRejected("device not open".into()))?;
        output
            .stream
            .play()
            .map_err(|e| EngineError::ResumeRejected(e.to_string()))?;
        debug!("audio stream started");
        Ok(())
    }

    fn sample_rate(&self) -> u32 {
        self.mixer.sample_rate()
    }

    fn submit(&mut self, sound: RenderedSound) {
        self.mixer.add_sound(sound);
    }

    fn start_music(&mut self, track: &MusicTrack, rate: f64, volume: f64) {
        self.mixer.start_music(track, rate, volume);
    }

    fn set_music_rate(&mut self, rate: f64) {
        self.mixer.set_music_rate(rate);
    }

    fn set_music_volume(&mut self, volume: f64) {
        self.mixer.set_music_volume(volume);
    }

    fn stop_music(&mut self) {
        self.mixer.stop_music();
    }

    fn render(&mut self, frames: usize) {
        let Some(output) = &mut self.output else {
            return;
        };

        self.block.resize(frames, 0.0);
        self.mixer.mix(&mut self.block);

        self.interleaved.clear();
        for &s in &self.block {
            self.interleaved
                .extend(std::iter::repeat(s).take(output.channels));
        }

        let pushed = output.producer.push_slice(&self.interleaved);
        if pushed < self.interleaved.len() {
            debug!(
                dropped = self.interleaved.len() - pushed,
                "audio buffer overflow"
            );
        }
    }

    fn poll_events(&mut self) -> Vec<BackendEvent> {
        self.mixer.take_events()
    }
}
