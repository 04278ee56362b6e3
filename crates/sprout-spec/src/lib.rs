//! Sprout Sound Catalog Library
//!
//! This crate holds the data side of the Sprout sound engine: sound ids and
//! their mixer categories, the named synthesis recipes, sound definitions,
//! and the read-only catalog built from them.
//!
//! # Overview
//!
//! - **Sound ids** name every effect the garden can trigger, plus the music bed.
//! - **Definitions** pair an id with a recipe and its parameters
//!   (frequencies, duration, volume).
//! - **The catalog** is built once. Definitions missing a parameter their
//!   recipe needs are stored as single tones instead of failing the build.
//!
//! # Example
//!
//! ```
//! use sprout_spec::{Algorithm, Catalog, SoundDefinition, SoundId};
//!
//! let catalog = Catalog::garden();
//! let click = catalog.get(SoundId::UiClick).unwrap();
//! assert_eq!(click.algorithm, Algorithm::CrystalClick);
//!
//! // A sweep without an end frequency degrades to a tone
//! let custom = Catalog::builder()
//!     .sound(
//!         SoundDefinition::new(SoundId::UiZoomIn, Algorithm::EtherealSweep, 0.4, 0.5)
//!             .with_frequency(220.0),
//!     )
//!     .build()
//!     .unwrap();
//! assert_eq!(custom.get(SoundId::UiZoomIn).unwrap().algorithm, Algorithm::Tone);
//! assert_eq!(custom.warnings().len(), 1);
//! ```
//!
//! # Modules
//!
//! - [`sound`]: Sound ids, categories, and facade kinds
//! - [`algorithm`]: Synthesis recipes, families, and their requirements
//! - [`definition`]: Sound definitions and sanitizing
//! - [`catalog`]: The immutable catalog and the built-in garden recipes
//! - [`error`]: Error and warning types

pub mod algorithm;
pub mod catalog;
pub mod definition;
pub mod error;
pub mod sound;

// Re-export commonly used types at the crate root
pub use algorithm::{Algorithm, AlgorithmFamily, Requirement};
pub use catalog::{
    garden_definitions, Catalog, CatalogBuilder, CatalogDocument, MusicAsset, DEFAULT_MUSIC_NAME,
};
pub use definition::{SoundDefinition, FALLBACK_DURATION, FALLBACK_FREQUENCY, MAX_DURATION};
pub use error::{
    ErrorCode, SpecError, SpecResult, ValidationError, ValidationWarning, WarningCode,
};
pub use sound::{AchievementKind, PlantKind, SoundCategory, SoundId, UiKind};
