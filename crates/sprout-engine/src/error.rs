//! Error types for the playback engine.
//!
//! None of these reach a caller of `play*`: the engine turns them into
//! logged degradations. They surface from configuration loading, settings
//! stores, and backends used directly.

use std::path::PathBuf;

use thiserror::Error;

use sprout_spec::SpecError;
use sprout_synth::SynthError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur in the engine or its collaborators.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Engine configuration failed validation.
    #[error("invalid engine config: {message}")]
    InvalidConfig {
        /// What is wrong.
        message: String,
    },

    /// The audio output could not be constructed.
    #[error("audio output unavailable: {0}")]
    OutputUnavailable(String),

    /// The audio output refused to resume.
    #[error("audio output refused to resume: {0}")]
    ResumeRejected(String),

    /// A settings store could not be read or written.
    #[error("settings store error: {0}")]
    Settings(String),

    /// The music asset could not be decoded.
    #[error("failed to decode music '{path}': {message}")]
    MusicDecode {
        /// Candidate path that failed.
        path: PathBuf,
        /// Decoder message.
        message: String,
    },

    /// Catalog error.
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// Rendering error.
    #[error(transparent)]
    Synth(#[from] SynthError),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Creates an invalid config error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Returns a stable error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::InvalidConfig { .. } => "ENGINE_001",
            EngineError::OutputUnavailable(_) => "ENGINE_002",
            EngineError::ResumeRejected(_) => "ENGINE_003",
            EngineError::Settings(_) => "ENGINE_004",
            EngineError::MusicDecode { .. } => "ENGINE_005",
            EngineError::Spec(e) => e.code(),
            EngineError::Synth(e) => e.code(),
            EngineError::Json(_) => "ENGINE_006",
            EngineError::Io(_) => "ENGINE_007",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(EngineError::invalid_config("x").code(), "ENGINE_001");
        assert_eq!(
            EngineError::OutputUnavailable("no device".into()).code(),
            "ENGINE_002"
        );
        let err: EngineError = SynthError::InvalidSampleRate { rate: 0 }.into();
        assert_eq!(err.code(), "SYNTH_001");
    }

    #[test]
    fn test_music_decode_display() {
        let err = EngineError::MusicDecode {
            path: PathBuf::from("assets/Virtual-Bloom.wav"),
            message: "not a WAV file".into(),
        };
        let text = err.to_string();
        assert!(text.contains("Virtual-Bloom.wav"));
        assert!(text.contains("not a WAV file"));
    }
}
