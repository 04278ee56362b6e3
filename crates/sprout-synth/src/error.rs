//! Error types for rendering and export.

use thiserror::Error;

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Errors that can occur while rendering or exporting a sound.
#[derive(Debug, Error)]
pub enum SynthError {
    /// Invalid sample rate.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SynthError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Returns a stable error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            SynthError::InvalidSampleRate { .. } => "SYNTH_001",
            SynthError::InvalidParameter { .. } => "SYNTH_002",
            SynthError::Io(_) => "SYNTH_003",
        }
    }
}

/// Checks that a sample rate can be rendered at.
pub fn check_sample_rate(rate: u32) -> SynthResult<()> {
    if (8_000..=192_000).contains(&rate) {
        Ok(())
    } else {
        Err(SynthError::InvalidSampleRate { rate })
    }
}
