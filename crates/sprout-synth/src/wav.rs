//! Deterministic WAV file writer.
//!
//! Rendered sounds are written as mono 16-bit PCM with no timestamps or
//! variable metadata, so the same seed always produces the same file.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::error::SynthResult;
use crate::render::RenderedSound;

/// WAV file format parameters.
#[derive(Debug, Clone, Copy)]
pub struct WavFormat {
    /// Number of channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample (always 16).
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Creates a mono WAV format.
    pub fn mono(sample_rate: u32) -> Self {
        Self {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
        }
    }

    fn block_align(&self) -> u16 {
        self.channels * (self.bits_per_sample / 8)
    }

    fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }
}

/// Writes a complete WAV file to a writer.
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    let data_size = pcm_data.len() as u32;
    let file_size = 36 + data_size; // RIFF size excludes the 8-byte header

    writer.write_all(b"RIFF")?;
    writer.write_all(&file_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?;
    writer.write_all(&1u16.to_le_bytes())?; // PCM
    writer.write_all(&format.channels.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&format.byte_rate().to_le_bytes())?;
    writer.write_all(&format.block_align().to_le_bytes())?;
    writer.write_all(&format.bits_per_sample.to_le_bytes())?;

    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(pcm_data)?;

    Ok(())
}

/// Converts f32 samples to little-endian 16-bit PCM, clipping to `[-1, 1]`.
pub fn samples_to_pcm16(samples: &[f32]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * 32767.0).round() as i16;
        pcm.extend_from_slice(&value.to_le_bytes());
    }
    pcm
}

/// A rendered sound encoded as a WAV file.
#[derive(Debug)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the PCM data only.
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples.
    pub num_samples: usize,
}

impl WavResult {
    /// Encodes a rendered sound.
    pub fn from_sound(sound: &RenderedSound) -> Self {
        Self::from_samples(&sound.samples, sound.sample_rate)
    }

    /// Encodes mono samples in `[-1, 1]`.
    pub fn from_samples(samples: &[f32], sample_rate: u32) -> Self {
        let pcm = samples_to_pcm16(samples);
        let pcm_hash = blake3::hash(&pcm).to_hex().to_string();
        let mut wav_data = Vec::with_capacity(44 + pcm.len());
        // Writing into a Vec cannot fail
        let _ = write_wav(&mut wav_data, &WavFormat::mono(sample_rate), &pcm);

        Self {
            wav_data,
            pcm_hash,
            sample_rate,
            num_samples: samples.len(),
        }
    }

    /// Writes the file to disk.
    pub fn save(&self, path: &Path) -> SynthResult<()> {
        fs::write(path, &self.wav_data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_spec::SoundId;

    fn sound(samples: Vec<f32>) -> RenderedSound {
        RenderedSound {
            id: SoundId::UiClick,
            samples,
            sample_rate: 44100,
        }
    }

    #[test]
    fn test_header_layout() {
        let result = WavResult::from_sound(&sound(vec![0.0; 10]));
        let wav = &result.wav_data;
        assert_eq!(wav.len(), 44 + 20);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(u16::from_le_bytes([wav[22], wav[23]]), 1);
        assert_eq!(u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]), 44100);
        assert_eq!(u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]), 20);
    }

    #[test]
    fn test_pcm_conversion_clips() {
        let pcm = samples_to_pcm16(&[1.0, -1.0, 2.0, 0.0]);
        let values: Vec<i16> = pcm
            .chunks(2)
            .map(|c| i16::from_le_bytes([c[0], c[1]]))
            .collect();
        assert_eq!(values, vec![32767, -32767, 32767, 0]);
    }

    #[test]
    fn test_pcm_hash_is_stable() {
        let a = WavResult::from_sound(&sound(vec![0.1, 0.2, -0.3]));
        let b = WavResult::from_sound(&sound(vec![0.1, 0.2, -0.3]));
        let c = WavResult::from_sound(&sound(vec![0.1, 0.2, 0.3]));
        assert_eq!(a.pcm_hash, b.pcm_hash);
        assert_ne!(a.pcm_hash, c.pcm_hash);
        assert_eq!(a.pcm_hash.len(), 64);
    }
}
