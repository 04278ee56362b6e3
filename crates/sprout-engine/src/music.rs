//! Background music.
//!
//! One decoded track loops for as long as music is on. Each loop iteration
//! plays at a playback rate drawn from a [`RateBand`], so the bed never
//! repeats exactly.

use std::path::Path;
use std::sync::Arc;

use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;
use tracing::{debug, info, warn};

use sprout_spec::MusicAsset;

use crate::backend::AudioBackend;
use crate::error::{EngineError, EngineResult};

/// A decoded mono music track.
#[derive(Debug, Clone, PartialEq)]
pub struct MusicTrack {
    /// Display name.
    pub name: String,
    /// Mono samples in `[-1, 1]`.
    pub samples: Arc<Vec<f32>>,
    /// Sample rate of `samples` in Hz.
    pub sample_rate: u32,
}

impl MusicTrack {
    /// Wraps already-decoded samples.
    pub fn from_samples(name: impl Into<String>, samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            name: name.into(),
            samples: Arc::new(samples),
            sample_rate,
        }
    }

    /// Length of one loop iteration at rate 1.0, in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Decodes a WAV file, averaging channels down to mono.
    pub fn load_wav(name: &str, path: &Path) -> EngineResult<Self> {
        let decode_err = |message: String| EngineError::MusicDecode {
            path: path.to_path_buf(),
            message,
        };

        let mut reader = hound::WavReader::open(path).map_err(|e| decode_err(e.to_string()))?;
        let spec = reader.spec();

        let interleaved: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(|e| decode_err(e.to_string()))?,
            hound::SampleFormat::Int => {
                if !(8..=32).contains(&spec.bits_per_sample) {
                    return Err(decode_err(format!(
                        "unsupported bit depth {}",
                        spec.bits_per_sample
                    )));
                }
                let scale = 1.0 / (1_i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 * scale))
                    .collect::<Result<_, _>>()
                    .map_err(|e| decode_err(e.to_string()))?
            }
        };

        let channels = spec.channels.max(1) as usize;
        let samples: Vec<f32> = interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect();
        if samples.is_empty() {
            return Err(decode_err("no samples".to_string()));
        }

        Ok(Self::from_samples(name, samples, spec.sample_rate))
    }

    /// Decodes the first candidate of `asset` that loads.
    pub fn load_first(asset: &MusicAsset) -> Option<Self> {
        for path in &asset.candidates {
            match Self::load_wav(&asset.name, path) {
                Ok(track) => {
                    info!(path = %path.display(), secs = track.duration_secs(), "music track loaded");
                    return Some(track);
                }
                Err(e) => debug!(error = %e, "music candidate skipped"),
            }
        }
        None
    }
}

/// Inclusive range playback rates are drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateBand {
    pub min: f64,
    pub max: f64,
}

impl RateBand {
    /// Creates a band; the bounds are swapped if given in reverse.
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Draws a rate uniformly from the band.
    pub fn draw(&self, rng: &mut Pcg32) -> f64 {
        if self.min >= self.max {
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        }
    }

    /// True when `rate` lies inside the band.
    pub fn contains(&self, rate: f64) -> bool {
        (self.min..=self.max).contains(&rate)
    }
}

impl Default for RateBand {
    fn default() -> Self {
        Self::new(0.9, 1.1)
    }
}

/// Snapshot of the background music state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BackgroundMusicState {
    /// Music category enable flag.
    pub enabled: bool,
    /// Music category volume.
    pub volume: f64,
    /// True while a loop is active.
    pub is_playing: bool,
    /// Rate of the current loop iteration.
    pub current_playback_rate: f64,
}

/// Owns the single music loop.
#[derive(Debug)]
pub struct MusicPlayer {
    asset: MusicAsset,
    band: RateBand,
    track: Option<MusicTrack>,
    load_attempted: bool,
    playing: bool,
    rate: f64,
}

impl MusicPlayer {
    /// Creates a player that loads `asset` on first start.
    pub fn new(asset: MusicAsset, band: RateBand) -> Self {
        Self {
            asset,
            band,
            track: None,
            load_attempted: false,
            playing: false,
            rate: 1.0,
        }
    }

    /// Uses an already-decoded track instead of loading the asset.
    pub fn with_track(mut self, track: MusicTrack) -> Self {
        self.track = Some(track);
        self.load_attempted = true;
        self
    }

    /// True while a loop is active.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Rate of the current loop iteration.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// The band rates are drawn from.
    pub fn band(&self) -> RateBand {
        self.band
    }

    /// The loaded track, if any.
    pub fn track(&self) -> Option<&MusicTrack> {
        self.track.as_ref()
    }

    fn draw_rate(&self, variations: bool, rng: &mut Pcg32) -> f64 {
        if variations {
            self.band.draw(rng)
        } else {
            1.0
        }
    }

    /// Starts the loop. No-op when already playing or when no track loads.
    ///
    /// Returns true when a new loop was started.
    pub fn start<B: AudioBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        volume: f64,
        variations: bool,
        rng: &mut Pcg32,
    ) -> bool {
        if self.playing {
            return false;
        }
        if !self.load_attempted {
            self.load_attempted = true;
            self.track = MusicTrack::load_first(&self.asset);
            if self.track.is_none() {
                warn!(music = %self.asset.name, "no music candidate could be loaded, music disabled");
            }
        }
        let Some(track) = &self.track else {
            return false;
        };

        self.rate = self.draw_rate(variations, rng);
        backend.start_music(track, self.rate, volume);
        self.playing = true;
        debug!(music = %track.name, rate = self.rate, volume, "music started");
        true
    }

    /// Stops the loop. Idempotent.
    pub fn stop<B: AudioBackend + ?Sized>(&mut self, backend: &mut B) {
        if self.playing {
            backend.stop_music();
            self.playing = false;
            debug!("music stopped");
        }
    }

    /// Draws the rate for the next loop iteration.
    pub fn on_loop_end<B: AudioBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        variations: bool,
        rng: &mut Pcg32,
    ) {
        if !self.playing {
            return;
        }
        self.rate = self.draw_rate(variations, rng);
        backend.set_music_rate(self.rate);
        debug!(rate = self.rate, "music loop restarted");
    }

    /// Applies a new volume to the active loop.
    pub fn set_volume<B: AudioBackend + ?Sized>(&mut self, backend: &mut B, volume: f64) {
        if self.playing {
            backend.set_music_volume(volume);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CaptureBackend;
    use sprout_synth::rng::create_rng;

    fn player() -> MusicPlayer {
        MusicPlayer::new(MusicAsset::new("test", vec![]), RateBand::default())
            .with_track(MusicTrack::from_samples("test", vec![0.1; 64], 44100))
    }

    #[test]
    fn test_rate_band_draws_inside() {
        let band = RateBand::new(1.1, 0.9);
        assert_eq!(band.min, 0.9);
        let mut rng = create_rng(1);
        for _ in 0..500 {
            assert!(band.contains(band.draw(&mut rng)));
        }
        assert_eq!(RateBand::new(1.0, 1.0).draw(&mut rng), 1.0);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut backend = CaptureBackend::new(44100);
        let mut music = player();
        let mut rng = create_rng(1);
        assert!(music.start(&mut backend, 0.2, true, &mut rng));
        assert!(!music.start(&mut backend, 0.2, true, &mut rng));
        assert_eq!(backend.music_starts(), 1);
        assert!(music.band().contains(music.rate()));
    }

    #[test]
    fn test_variations_off_plays_at_unit_rate() {
        let mut backend = CaptureBackend::new(44100);
        let mut music = player();
        let mut rng = create_rng(1);
        music.start(&mut backend, 0.2, false, &mut rng);
        music.on_loop_end(&mut backend, false, &mut rng);
        assert_eq!(music.rate(), 1.0);
        assert_eq!(backend.music_rate(), Some(1.0));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut backend = CaptureBackend::new(44100);
        let mut music = player();
        let mut rng = create_rng(1);
        music.start(&mut backend, 0.2, true, &mut rng);
        music.stop(&mut backend);
        music.stop(&mut backend);
        assert!(!music.is_playing());
        assert_eq!(backend.music_stops(), 1);
    }

    #[test]
    fn test_missing_asset_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let asset = MusicAsset::new("missing", vec![dir.path().join("nope.wav")]);
        let mut music = MusicPlayer::new(asset, RateBand::default());
        let mut backend = CaptureBackend::new(44100);
        assert!(!music.start(&mut backend, 0.2, true, &mut create_rng(1)));
        assert!(!music.is_playing());
        assert_eq!(backend.music_starts(), 0);
    }

    #[test]
    fn test_load_wav_downmixes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bed.wav");
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 22050,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for _ in 0..100 {
            writer.write_sample(16384_i16).unwrap();
            writer.write_sample(0_i16).unwrap();
        }
        writer.finalize().unwrap();

        let track = MusicTrack::load_wav("bed", &path).unwrap();
        assert_eq!(track.sample_rate, 22050);
        assert_eq!(track.samples.len(), 100);
        assert!((track.samples[0] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_load_first_skips_bad_candidates() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.wav");
        std::fs::write(&bad, b"not audio").unwrap();
        let good = dir.path().join("good.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(&good, spec).unwrap();
        writer.write_sample(0.5_f32).unwrap();
        writer.finalize().unwrap();

        let asset = MusicAsset::new("bed", vec![dir.path().join("missing.wav"), bad, good]);
        let track = MusicTrack::load_first(&asset).unwrap();
        assert_eq!(track.samples.as_slice(), &[0.5]);
    }
}
