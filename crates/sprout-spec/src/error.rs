//! Error types for sound definitions and catalog building.

use thiserror::Error;

/// Error codes for catalog validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: Two definitions share the same sound id
    DuplicateSoundId,
    /// E002: A one-shot definition was registered under the music id
    MusicIdNotOneShot,
    /// E003: Unknown sound id string
    UnknownSoundId,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::DuplicateSoundId => "E001",
            ErrorCode::MusicIdNotOneShot => "E002",
            ErrorCode::UnknownSoundId => "E003",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for definitions that had to be degraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Required parameter missing, definition falls back to a single tone
    FallbackToTone,
    /// W002: Duration was not a positive finite number, or exceeded the cap
    InvalidDuration,
    /// W003: Volume outside 0..=1, clamped
    VolumeClamped,
    /// W004: Non-positive or non-finite frequency dropped
    InvalidFrequency,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::FallbackToTone => "W001",
            WarningCode::InvalidDuration => "W002",
            WarningCode::VolumeClamped => "W003",
            WarningCode::InvalidFrequency => "W004",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A catalog validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Sound id the error refers to, if any.
    pub sound: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            sound: None,
        }
    }

    /// Creates a new validation error attached to a sound id.
    pub fn for_sound(code: ErrorCode, message: impl Into<String>, sound: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            sound: Some(sound.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref sound) = self.sound {
            write!(f, "{}: {} (sound {})", self.code, self.message, sound)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A warning recorded while sanitizing a definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// Sound id the warning refers to.
    pub sound: String,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>, sound: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            sound: sound.into(),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} (sound {})", self.code, self.message, self.sound)
    }
}

/// Top-level error type for catalog operations.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Catalog validation failed.
    #[error("catalog validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A string did not name a known sound.
    #[error("unknown sound id '{0}'")]
    UnknownSoundId(String),

    /// A string did not name a known kind for the given category.
    #[error("unknown {category} kind '{kind}'")]
    UnknownKind {
        /// Category the kind was looked up in.
        category: &'static str,
        /// The rejected kind string.
        kind: String,
    },

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpecError {
    /// Returns a stable error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            SpecError::Validation(_) => "SPEC_001",
            SpecError::UnknownSoundId(_) => "SPEC_002",
            SpecError::UnknownKind { .. } => "SPEC_003",
            SpecError::JsonParse(_) => "SPEC_004",
            SpecError::Io(_) => "SPEC_005",
        }
    }
}

/// Result type for catalog operations.
pub type SpecResult<T> = Result<T, SpecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::DuplicateSoundId.to_string(), "E001");
        assert_eq!(WarningCode::FallbackToTone.to_string(), "W001");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::for_sound(ErrorCode::DuplicateSoundId, "registered twice", "ui_click");
        assert_eq!(err.to_string(), "E001: registered twice (sound ui_click)");

        let err = ValidationError::new(ErrorCode::UnknownSoundId, "no such sound");
        assert_eq!(err.to_string(), "E003: no such sound");
    }

    #[test]
    fn test_spec_error_codes() {
        let err = SpecError::UnknownSoundId("boing".to_string());
        assert_eq!(err.code(), "SPEC_002");
        assert!(err.to_string().contains("boing"));

        let err = SpecError::UnknownKind {
            category: "plant",
            kind: "prune".to_string(),
        };
        assert_eq!(err.code(), "SPEC_003");
        assert!(err.to_string().contains("plant"));
    }
}
