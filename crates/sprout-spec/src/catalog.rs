//! The read-only sound catalog.
//!
//! A [`Catalog`] is built once and never mutated. Each definition is
//! sanitized on the way in; definitions that cannot run their declared recipe
//! are stored as single tones and the reason is kept as a warning.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::algorithm::Algorithm;
use crate::definition::SoundDefinition;
use crate::error::{ErrorCode, SpecError, SpecResult, ValidationError, ValidationWarning};
use crate::sound::{SoundCategory, SoundId};

/// Display name of the bundled music bed.
pub const DEFAULT_MUSIC_NAME: &str = "Virtual-Bloom";

/// The looping music bed and where to look for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MusicAsset {
    /// Display name.
    pub name: String,
    /// Candidate file locations, tried in order.
    pub candidates: Vec<PathBuf>,
}

impl MusicAsset {
    /// Creates an asset with explicit candidate paths.
    pub fn new(name: impl Into<String>, candidates: Vec<PathBuf>) -> Self {
        Self {
            name: name.into(),
            candidates,
        }
    }

    /// Creates an asset looked up as `<name>.wav` under each directory.
    pub fn in_dirs(name: &str, dirs: &[&Path]) -> Self {
        let file = format!("{}.wav", name);
        Self::new(name, dirs.iter().map(|d| d.join(&file)).collect())
    }
}

impl Default for MusicAsset {
    fn default() -> Self {
        Self::in_dirs(
            DEFAULT_MUSIC_NAME,
            &[Path::new("assets"), Path::new("."), Path::new("music")],
        )
    }
}

/// On-disk form of a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogDocument {
    /// One-shot effect definitions.
    pub sounds: Vec<SoundDefinition>,
    /// Music bed; the bundled asset when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music: Option<MusicAsset>,
}

/// Immutable map from sound id to definition, plus the music asset.
#[derive(Debug, Clone)]
pub struct Catalog {
    sounds: BTreeMap<SoundId, SoundDefinition>,
    music: MusicAsset,
    warnings: Vec<ValidationWarning>,
}

impl Catalog {
    /// Starts a catalog builder.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// The catalog shipped with the garden.
    pub fn garden() -> Self {
        let mut sounds = BTreeMap::new();
        let mut warnings = Vec::new();
        for def in garden_definitions() {
            let (clean, mut issues) = def.sanitized();
            warnings.append(&mut issues);
            sounds.insert(clean.id, clean);
        }
        Catalog {
            sounds,
            music: MusicAsset::default(),
            warnings,
        }
    }

    /// Parses a catalog document from JSON.
    pub fn from_json(json: &str) -> SpecResult<Self> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    /// Reads a catalog document from a file.
    pub fn from_path(path: &Path) -> SpecResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Builds a catalog from a parsed document.
    pub fn from_document(doc: CatalogDocument) -> SpecResult<Self> {
        let mut builder = Catalog::builder();
        for def in doc.sounds {
            builder = builder.sound(def);
        }
        if let Some(music) = doc.music {
            builder = builder.music(music);
        }
        builder.build()
    }

    /// Converts back to the on-disk form.
    pub fn to_document(&self) -> CatalogDocument {
        CatalogDocument {
            sounds: self.sounds.values().cloned().collect(),
            music: Some(self.music.clone()),
        }
    }

    /// Looks up a one-shot definition.
    pub fn get(&self, id: SoundId) -> Option<&SoundDefinition> {
        self.sounds.get(&id)
    }

    /// Returns true if the id resolves to a one-shot or to the music bed.
    pub fn contains(&self, id: SoundId) -> bool {
        id == SoundId::BackgroundMusic || self.sounds.contains_key(&id)
    }

    /// The music bed.
    pub fn music(&self) -> &MusicAsset {
        &self.music
    }

    /// Number of entries, counting the music bed.
    pub fn len(&self) -> usize {
        self.sounds.len() + 1
    }

    /// A catalog always holds the music bed, so it is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates one-shot definitions in id order.
    pub fn iter(&self) -> impl Iterator<Item = &SoundDefinition> {
        self.sounds.values()
    }

    /// Iterates one-shot definitions of a category.
    pub fn in_category(&self, category: SoundCategory) -> impl Iterator<Item = &SoundDefinition> {
        self.sounds
            .values()
            .filter(move |def| def.id.category() == category)
    }

    /// Every id name, one-shots first, music last.
    pub fn available_sounds(&self) -> Vec<String> {
        self.sounds
            .keys()
            .chain(std::iter::once(&SoundId::BackgroundMusic))
            .map(|id| id.as_str().to_string())
            .collect()
    }

    /// Warnings recorded while sanitizing definitions.
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::garden()
    }
}

/// Collects definitions and validates them into a [`Catalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    sounds: Vec<SoundDefinition>,
    music: Option<MusicAsset>,
}

impl CatalogBuilder {
    /// Adds a one-shot definition.
    pub fn sound(mut self, def: SoundDefinition) -> Self {
        self.sounds.push(def);
        self
    }

    /// Sets the music asset.
    pub fn music(mut self, music: MusicAsset) -> Self {
        self.music = Some(music);
        self
    }

    /// Validates and freezes the catalog.
    ///
    /// Duplicate ids and one-shots registered under the music id are errors.
    /// Everything else degrades with a warning.
    pub fn build(self) -> SpecResult<Catalog> {
        let mut sounds = BTreeMap::new();
        let mut warnings = Vec::new();

        for def in self.sounds {
            if !def.id.is_one_shot() {
                return Err(SpecError::Validation(ValidationError::for_sound(
                    ErrorCode::MusicIdNotOneShot,
                    "the music id cannot hold a synthesized definition",
                    def.id.as_str(),
                )));
            }
            let (clean, mut issues) = def.sanitized();
            if sounds.insert(clean.id, clean).is_some() {
                return Err(SpecError::Validation(ValidationError::for_sound(
                    ErrorCode::DuplicateSoundId,
                    "sound registered more than once",
                    def.id.as_str(),
                )));
            }
            warnings.append(&mut issues);
        }

        Ok(Catalog {
            sounds,
            music: self.music.unwrap_or_default(),
            warnings,
        })
    }
}

fn def(id: SoundId, algorithm: Algorithm, duration: f64, volume: f64) -> SoundDefinition {
    SoundDefinition::new(id, algorithm, duration, volume)
}

/// The garden's effect recipes.
pub fn garden_definitions() -> Vec<SoundDefinition> {
    use Algorithm as A;
    use SoundId as S;

    vec![
        // UI
        def(S::UiClick, A::CrystalClick, 0.12, 0.6).with_frequency(600.0),
        def(S::UiButton, A::HarmonicButton, 0.15, 0.7).with_frequencies([523.25, 659.25, 783.99]),
        def(S::UiHover, A::Chime, 0.08, 0.5).with_frequency(880.0),
        def(S::UiModalOpen, A::EtherealSweep, 0.4, 0.5)
            .with_frequency(220.0)
            .with_end_frequency(880.0),
        def(S::UiModalClose, A::EtherealSweep, 0.35, 0.4)
            .with_frequency(880.0)
            .with_end_frequency(220.0),
        def(S::UiTabSwitch, A::Crossfade, 0.2, 0.3).with_frequencies([440.0, 554.37]),
        def(S::UiDropdownOpen, A::CascadeDown, 0.25, 0.4)
            .with_frequencies([880.0, 659.25, 523.25, 392.0]),
        def(S::UiDropdownClose, A::CascadeUp, 0.2, 0.35)
            .with_frequencies([392.0, 523.25, 659.25, 880.0]),
        def(S::UiZoomIn, A::EtherealSweep, 0.4, 0.5)
            .with_frequency(220.0)
            .with_end_frequency(880.0),
        def(S::UiZoomOut, A::EtherealSweep, 0.3, 0.4)
            .with_frequency(880.0)
            .with_end_frequency(220.0),
        def(S::UiSuccess, A::TriumphBells, 0.8, 0.6)
            .with_frequencies([523.25, 659.25, 783.99, 1046.5, 1318.51]),
        def(S::UiError, A::Tone, 0.4, 0.5).with_frequencies([277.18, 293.66]),
        def(S::UiNotification, A::Chime, 0.3, 0.4).with_frequencies([1046.5, 1318.51]),
        // Plant
        def(S::PlantClick, A::LeafRustle, 0.2, 0.8).with_frequency(180.0),
        def(S::PlantWater, A::RainDrops, 2.0, 0.5).with_frequency(120.0),
        def(S::PlantGrow, A::OrganicBloom, 1.8, 0.6)
            .with_frequency(110.0)
            .with_end_frequency(440.0),
        def(S::PlantStageUp, A::NatureSymphony, 2.5, 0.7)
            .with_frequencies([146.83, 220.0, 293.66, 440.0, 659.25]),
        def(S::PlantHarvest, A::TriumphBells, 1.2, 0.6)
            .with_frequencies([261.63, 329.63, 392.0, 523.25]),
        def(S::PlantWilt, A::OrganicBloom, 1.5, 0.4)
            .with_frequency(440.0)
            .with_end_frequency(110.0),
        def(S::PlantCreate, A::OrganicBloom, 1.0, 0.55).with_frequency(220.0),
        // Achievement
        def(S::TaskComplete, A::VictoryChord, 1.2, 0.65)
            .with_frequencies([261.63, 329.63, 392.0, 523.25]),
        def(S::TaskCreate, A::TriumphBells, 0.6, 0.5).with_frequencies([440.0, 554.37, 659.25]),
        def(S::TaskDelete, A::Tone, 0.5, 0.3)
            .with_frequency(440.0)
            .with_end_frequency(220.0),
        def(S::XpGain, A::CrystalSparkle, 0.4, 0.45).with_frequency(1760.0),
        def(S::Achievement, A::GrandFanfare, 3.0, 0.8)
            .with_frequencies([130.81, 261.63, 329.63, 392.0, 523.25, 659.25, 783.99]),
        def(S::LevelUp, A::AscensionTheme, 2.0, 0.75).with_frequencies([
            261.63, 293.66, 329.63, 349.23, 392.0, 440.0, 493.88, 523.25,
        ]),
        def(S::StreakMilestone, A::GrandFanfare, 3.5, 0.85)
            .with_frequencies([65.41, 130.81, 261.63, 523.25, 1046.5]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WarningCode;

    #[test]
    fn test_garden_catalog_covers_every_id() {
        let catalog = Catalog::garden();
        for id in SoundId::ALL {
            assert!(catalog.contains(id), "{} missing", id);
        }
        assert_eq!(catalog.len(), SoundId::ALL.len());
        assert!(catalog.warnings().is_empty(), "{:?}", catalog.warnings());
    }

    #[test]
    fn test_garden_definitions_pass_the_builder() {
        let mut builder = Catalog::builder();
        for def in garden_definitions() {
            builder = builder.sound(def);
        }
        let built = builder.build().unwrap();
        assert_eq!(built.to_document(), Catalog::garden().to_document());
    }

    #[test]
    fn test_available_sounds_ends_with_music() {
        let catalog = Catalog::garden();
        let names = catalog.available_sounds();
        assert_eq!(names.len(), catalog.len());
        assert_eq!(names.last().map(String::as_str), Some("background_music"));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = Catalog::builder()
            .sound(def(SoundId::UiClick, Algorithm::Tone, 0.1, 0.5))
            .sound(def(SoundId::UiClick, Algorithm::Tone, 0.2, 0.5))
            .build();
        let err = result.unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_music_id_rejected_as_one_shot() {
        let result = Catalog::builder()
            .sound(def(SoundId::BackgroundMusic, Algorithm::Tone, 1.0, 0.5))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_broken_entry_degrades_without_failing_build() {
        let catalog = Catalog::builder()
            .sound(def(SoundId::UiZoomIn, Algorithm::EtherealSweep, 0.4, 0.5).with_frequency(220.0))
            .sound(def(SoundId::UiClick, Algorithm::CrystalClick, 0.12, 0.6).with_frequency(600.0))
            .build()
            .unwrap();

        let zoom = catalog.get(SoundId::UiZoomIn).unwrap();
        assert_eq!(zoom.algorithm, Algorithm::Tone);
        assert_eq!(catalog.warnings().len(), 1);
        assert_eq!(catalog.warnings()[0].code, WarningCode::FallbackToTone);
        assert_eq!(
            catalog.get(SoundId::UiClick).unwrap().algorithm,
            Algorithm::CrystalClick
        );
    }

    #[test]
    fn test_in_category_filters() {
        let catalog = Catalog::garden();
        assert_eq!(catalog.in_category(SoundCategory::Plant).count(), 7);
        assert_eq!(catalog.in_category(SoundCategory::Music).count(), 0);
    }

    #[test]
    fn test_default_music_candidates() {
        let music = MusicAsset::default();
        assert_eq!(music.name, DEFAULT_MUSIC_NAME);
        assert_eq!(music.candidates[0], Path::new("assets").join("Virtual-Bloom.wav"));
    }
}
