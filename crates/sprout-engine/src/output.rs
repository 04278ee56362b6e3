//! Software output mixer shared by the capture and device backends.
//!
//! Sums every active one-shot with the looping music track into mono
//! blocks. Finished one-shots are dropped; the music position wraps and
//! reports a [`BackendEvent::MusicLoopEnded`] each time it does.

use sprout_synth::RenderedSound;
use tracing::debug;

use crate::backend::BackendEvent;
use crate::music::MusicTrack;

#[derive(Debug)]
struct ActiveSound {
    samples: Vec<f32>,
    position: usize,
}

#[derive(Debug)]
struct LoopingTrack {
    track: MusicTrack,
    position: f64,
    rate: f64,
    volume: f64,
}

/// Mixes one-shots and the music loop at a fixed output rate.
#[derive(Debug)]
pub struct OutputMixer {
    sample_rate: u32,
    sounds: Vec<ActiveSound>,
    music: Option<LoopingTrack>,
    events: Vec<BackendEvent>,
}

impl OutputMixer {
    /// Creates an empty mixer.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            sounds: Vec::new(),
            music: None,
            events: Vec::new(),
        }
    }

    /// Output sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Queues a one-shot. It starts at the next mixed sample.
    pub fn add_sound(&mut self, sound: RenderedSound) {
        if sound.sample_rate != self.sample_rate {
            debug!(
                sound = %sound.id,
                rate = sound.sample_rate,
                output_rate = self.sample_rate,
                "sound rendered at a different rate, playing unresampled"
            );
        }
        self.sounds.push(ActiveSound {
            samples: sound.samples,
            position: 0,
        });
    }

    /// Number of one-shots still playing.
    pub fn active_sounds(&self) -> usize {
        self.sounds.len()
    }

    /// Starts (or replaces) the music loop from its beginning.
    pub fn start_music(&mut self, track: &MusicTrack, rate: f64, volume: f64) {
        self.music = Some(LoopingTrack {
            track: track.clone(),
            position: 0.0,
            rate,
            volume,
        });
    }

    /// Changes the rate of the music loop.
    pub fn set_music_rate(&mut self, rate: f64) {
        if let Some(music) = &mut self.music {
            music.rate = rate;
        }
    }

    /// Changes the volume of the music loop.
    pub fn set_music_volume(&mut self, volume: f64) {
        if let Some(music) = &mut self.music {
            music.volume = volume;
        }
    }

    /// Stops the music loop.
    pub fn stop_music(&mut self) {
        self.music = None;
    }

    /// True while a music loop is active.
    pub fn is_music_playing(&self) -> bool {
        self.music.is_some()
    }

    /// Mixes the next `out.len()` samples, overwriting `out`.
    pub fn mix(&mut self, out: &mut [f32]) {
        out.fill(0.0);

        for sound in &mut self.sounds {
            let remaining = &sound.samples[sound.position..];
            let n = remaining.len().min(out.len());
            for (slot, &s) in out[..n].iter_mut().zip(remaining) {
                *slot += s;
            }
            sound.position += n;
        }
        self.sounds.retain(|s| s.position < s.samples.len());

        if let Some(music) = &mut self.music {
            let len = music.track.samples.len();
            if len > 0 {
                let step =
                    music.rate * music.track.sample_rate as f64 / self.sample_rate as f64;
                for slot in out.iter_mut() {
                    let index = music.position.floor() as usize % len;
                    let frac = (music.position - music.position.floor()) as f32;
                    let a = music.track.samples[index];
                    let b = music.track.samples[(index + 1) % len];
                    *slot += (a + (b - a) * frac) * music.volume as f32;

                    music.position += step;
                    if music.position >= len as f64 {
                        music.position -= len as f64;
                        self.events.push(BackendEvent::MusicLoopEnded);
                    }
                }
            }
        }

        for slot in out.iter_mut() {
            *slot = slot.clamp(-1.0, 1.0);
        }
    }

    /// Drains events raised since the last call.
    pub fn take_events(&mut self) -> Vec<BackendEvent> {
        std::mem::take(&mut self.events)
    }
}
