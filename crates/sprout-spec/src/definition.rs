//! Sound definitions and their sanitizing rules.

use serde::{Deserialize, Serialize};

use crate::algorithm::{Algorithm, Requirement};
use crate::error::{ValidationWarning, WarningCode};
use crate::sound::SoundId;

/// Frequency used when a definition names none at all.
pub const FALLBACK_FREQUENCY: f64 = 440.0;

/// Duration substituted for a non-positive or non-finite duration.
pub const FALLBACK_DURATION: f64 = 0.25;

/// Longest duration a one-shot effect may have, in seconds.
pub const MAX_DURATION: f64 = 3.5;

/// One catalog entry: which recipe to run and with what parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SoundDefinition {
    /// Catalog id.
    pub id: SoundId,
    /// Synthesis recipe.
    pub algorithm: Algorithm,
    /// Single base frequency in Hz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_frequency: Option<f64>,
    /// Ordered set of frequencies in Hz for stacked or sequenced recipes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_set: Option<Vec<f64>>,
    /// Sweep target frequency in Hz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_frequency: Option<f64>,
    /// Total duration in seconds.
    pub duration: f64,
    /// Definition volume (0.0 to 1.0).
    pub volume: f64,
}

impl SoundDefinition {
    /// Creates a definition with no frequencies.
    pub fn new(id: SoundId, algorithm: Algorithm, duration: f64, volume: f64) -> Self {
        Self {
            id,
            algorithm,
            base_frequency: None,
            frequency_set: None,
            end_frequency: None,
            duration,
            volume,
        }
    }

    /// Sets the base frequency.
    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.base_frequency = Some(frequency);
        self
    }

    /// Sets the frequency set.
    pub fn with_frequencies(mut self, frequencies: impl Into<Vec<f64>>) -> Self {
        self.frequency_set = Some(frequencies.into());
        self
    }

    /// Sets the sweep end frequency.
    pub fn with_end_frequency(mut self, frequency: f64) -> Self {
        self.end_frequency = Some(frequency);
        self
    }

    /// The frequency set, or an empty slice.
    pub fn frequencies(&self) -> &[f64] {
        self.frequency_set.as_deref().unwrap_or(&[])
    }

    /// The base frequency, else the first entry of the set.
    pub fn first_frequency(&self) -> Option<f64> {
        self.base_frequency
            .or_else(|| self.frequencies().first().copied())
    }

    /// The frequency a single-tone fallback plays.
    pub fn fallback_frequency(&self) -> f64 {
        self.first_frequency().unwrap_or(FALLBACK_FREQUENCY)
    }

    /// Returns true when the declared recipe has everything it needs.
    pub fn satisfies_requirement(&self) -> bool {
        match self.algorithm.requirement() {
            Requirement::Nothing => true,
            Requirement::AnyFrequency => self.first_frequency().is_some(),
            Requirement::FrequencySet => !self.frequencies().is_empty(),
            Requirement::SweepRange => {
                self.base_frequency.is_some() && self.end_frequency.is_some()
            }
        }
    }

    /// The recipe that will actually run: the declared one, or [`Algorithm::Tone`]
    /// when a required parameter is missing.
    pub fn effective_algorithm(&self) -> Algorithm {
        if self.satisfies_requirement() {
            self.algorithm
        } else {
            Algorithm::Tone
        }
    }

    /// Returns a copy that is safe to render, plus what had to change.
    ///
    /// Non-finite or non-positive frequencies are dropped, the volume is
    /// clamped, a bad duration is replaced or capped at [`MAX_DURATION`], and
    /// a recipe whose requirement is no longer met is swapped for
    /// [`Algorithm::Tone`].
    pub fn sanitized(&self) -> (SoundDefinition, Vec<ValidationWarning>) {
        let id = self.id.as_str();
        let mut warnings = Vec::new();
        let mut def = self.clone();

        let valid = |f: f64| f.is_finite() && f > 0.0;

        if let Some(f) = def.base_frequency.filter(|f| !valid(*f)) {
            warnings.push(ValidationWarning::new(
                WarningCode::InvalidFrequency,
                format!("base frequency {} dropped", f),
                id,
            ));
            def.base_frequency = None;
        }
        if let Some(f) = def.end_frequency.filter(|f| !valid(*f)) {
            warnings.push(ValidationWarning::new(
                WarningCode::InvalidFrequency,
                format!("end frequency {} dropped", f),
                id,
            ));
            def.end_frequency = None;
        }
        if let Some(set) = def.frequency_set.as_mut() {
            let before = set.len();
            set.retain(|f| valid(*f));
            if set.len() != before {
                warnings.push(ValidationWarning::new(
                    WarningCode::InvalidFrequency,
                    format!("{} entries dropped from frequency set", before - set.len()),
                    id,
                ));
            }
            if set.is_empty() {
                def.frequency_set = None;
            }
        }

        if !(def.duration.is_finite() && def.duration > 0.0) {
            warnings.push(ValidationWarning::new(
                WarningCode::InvalidDuration,
                format!("duration {} replaced by {}", def.duration, FALLBACK_DURATION),
                id,
            ));
            def.duration = FALLBACK_DURATION;
        } else if def.duration > MAX_DURATION {
            warnings.push(ValidationWarning::new(
                WarningCode::InvalidDuration,
                format!("duration {} capped at {}", def.duration, MAX_DURATION),
                id,
            ));
            def.duration = MAX_DURATION;
        }

        if !(0.0..=1.0).contains(&def.volume) {
            let clamped = if def.volume.is_nan() {
                0.0
            } else {
                def.volume.clamp(0.0, 1.0)
            };
            warnings.push(ValidationWarning::new(
                WarningCode::VolumeClamped,
                format!("volume {} clamped to {}", def.volume, clamped),
                id,
            ));
            def.volume = clamped;
        }

        if !def.satisfies_requirement() {
            warnings.push(ValidationWarning::new(
                WarningCode::FallbackToTone,
                format!(
                    "{} is missing a required parameter, playing a {} Hz tone",
                    def.algorithm,
                    def.fallback_frequency()
                ),
                id,
            ));
            def.algorithm = Algorithm::Tone;
        }

        (def, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_without_end_falls_back() {
        let def = SoundDefinition::new(SoundId::UiZoomIn, Algorithm::EtherealSweep, 0.4, 0.5)
            .with_frequency(220.0);
        assert!(!def.satisfies_requirement());
        assert_eq!(def.effective_algorithm(), Algorithm::Tone);
        assert_eq!(def.fallback_frequency(), 220.0);
    }

    #[test]
    fn test_fallback_frequency_defaults_to_440() {
        let def = SoundDefinition::new(SoundId::UiButton, Algorithm::HarmonicButton, 0.15, 0.7);
        assert_eq!(def.effective_algorithm(), Algorithm::Tone);
        assert_eq!(def.fallback_frequency(), FALLBACK_FREQUENCY);
    }

    #[test]
    fn test_first_frequency_prefers_base() {
        let def = SoundDefinition::new(SoundId::UiHover, Algorithm::Chime, 0.1, 0.5)
            .with_frequency(880.0)
            .with_frequencies([1046.5]);
        assert_eq!(def.first_frequency(), Some(880.0));

        let def = SoundDefinition::new(SoundId::UiHover, Algorithm::Chime, 0.1, 0.5)
            .with_frequencies([1046.5, 1318.51]);
        assert_eq!(def.first_frequency(), Some(1046.5));
        assert!(def.satisfies_requirement());
    }

    #[test]
    fn test_sanitized_clamps_and_drops() {
        let def = SoundDefinition::new(SoundId::UiSuccess, Algorithm::TriumphBells, -1.0, 1.7)
            .with_frequencies([0.0, f64::NAN]);
        let (clean, warnings) = def.sanitized();

        assert_eq!(clean.duration, FALLBACK_DURATION);
        assert_eq!(clean.volume, 1.0);
        assert_eq!(clean.frequency_set, None);
        assert_eq!(clean.algorithm, Algorithm::Tone);

        let codes: Vec<_> = warnings.iter().map(|w| w.code).collect();
        assert!(codes.contains(&WarningCode::InvalidFrequency));
        assert!(codes.contains(&WarningCode::InvalidDuration));
        assert!(codes.contains(&WarningCode::VolumeClamped));
        assert!(codes.contains(&WarningCode::FallbackToTone));
    }

    #[test]
    fn test_sanitized_caps_long_duration() {
        let def = SoundDefinition::new(SoundId::UiClick, Algorithm::Tone, 1e15, 0.5)
            .with_frequency(440.0);
        let (clean, warnings) = def.sanitized();
        assert_eq!(clean.duration, MAX_DURATION);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, WarningCode::InvalidDuration);

        let longest = SoundDefinition::new(SoundId::StreakMilestone, Algorithm::Tone, 3.5, 0.5)
            .with_frequency(440.0);
        assert!(longest.sanitized().1.is_empty());
    }

    #[test]
    fn test_sanitized_leaves_valid_definition_alone() {
        let def = SoundDefinition::new(SoundId::UiClick, Algorithm::CrystalClick, 0.12, 0.6)
            .with_frequency(600.0);
        let (clean, warnings) = def.sanitized();
        assert_eq!(clean, def);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_definition_json_shape() {
        let json = r#"{
            "id": "ui_modal_open",
            "algorithm": "ethereal_sweep",
            "base_frequency": 220.0,
            "end_frequency": 880.0,
            "duration": 0.4,
            "volume": 0.5
        }"#;
        let def: SoundDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.id, SoundId::UiModalOpen);
        assert_eq!(def.end_frequency, Some(880.0));
        assert!(def.frequency_set.is_none());

        let bad = r#"{"id":"ui_click","algorithm":"tone","duration":0.1,"volume":0.5,"pan":0}"#;
        assert!(serde_json::from_str::<SoundDefinition>(bad).is_err());
    }
}
