//! Engine configuration.
//!
//! Every field has a default, so `{}` is a valid config file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use sprout_spec::{MusicAsset, DEFAULT_MUSIC_NAME};

use crate::error::{EngineError, EngineResult};

/// Default output sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Upper bound for a music playback rate.
pub const MAX_PLAYBACK_RATE: f64 = 4.0;

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Sample rate sounds are rendered at.
    pub sample_rate: u32,
    /// RNG seed. A random seed is drawn when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    /// Background music settings.
    pub music: MusicConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            seed: None,
            music: MusicConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a config from JSON.
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a config file.
    pub fn from_path(path: &Path) -> EngineResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Returns a copy with a fixed seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks ranges that serde cannot express.
    pub fn validate(&self) -> EngineResult<()> {
        if self.sample_rate == 0 {
            return Err(EngineError::invalid_config("sample_rate must be positive"));
        }
        self.music.validate()
    }
}

/// Background music configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MusicConfig {
    /// Candidate files for the music track, tried in order. Empty means the
    /// catalog's candidates.
    pub asset_paths: Vec<PathBuf>,
    /// Lowest playback rate drawn per loop.
    pub rate_min: f64,
    /// Highest playback rate drawn per loop.
    pub rate_max: f64,
    /// Delay before music starts after being enabled, in milliseconds.
    pub start_delay_ms: u64,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            asset_paths: Vec::new(),
            rate_min: 0.9,
            rate_max: 1.1,
            start_delay_ms: 500,
        }
    }
}

impl MusicConfig {
    /// Delay before a scheduled music start.
    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    /// The asset to load: configured paths when present, otherwise `fallback`.
    pub fn asset(&self, fallback: &MusicAsset) -> MusicAsset {
        if self.asset_paths.is_empty() {
            fallback.clone()
        } else {
            MusicAsset::new(DEFAULT_MUSIC_NAME, self.asset_paths.clone())
        }
    }

    fn validate(&self) -> EngineResult<()> {
        let in_range = |r: f64| r > 0.0 && r <= MAX_PLAYBACK_RATE;
        if !in_range(self.rate_min) || !in_range(self.rate_max) {
            return Err(EngineError::invalid_config(format!(
                "music rate band {}..{} must lie in (0, {}]",
                self.rate_min, self.rate_max, MAX_PLAYBACK_RATE
            )));
        }
        if self.rate_min > self.rate_max {
            return Err(EngineError::invalid_config(format!(
                "music rate_min {} exceeds rate_max {}",
                self.rate_min, self.rate_max
            )));
        }
        Ok(())
    }
}
