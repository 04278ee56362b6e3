//! Sprout Playback Engine
//!
//! This crate turns the sound catalog into playable feedback for a task
//! garden: it owns the output context lifecycle, mixer settings and their
//! persistence, the looping music bed, and timed multi-sound sequences.
//!
//! # Overview
//!
//! - [`SoundEngine`] - the facade hosts talk to
//! - [`backend`] - output backends (in-memory capture, null, system device)
//! - [`context`] - output context state machine
//! - [`mixer`] - per-category volumes and effective gain
//! - [`settings`] - persisted key-value settings
//! - [`music`] - music track loading and per-loop rate variation
//! - [`scheduler`] - growth and XP sequences and delayed actions
//!
//! # Time
//!
//! The engine has no threads of its own. Hosts move time forward with
//! [`SoundEngine::advance`], which fires due sequence cues and pumps the
//! backend.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use sprout_engine::{EngineConfig, MemoryStore, SoundEngine};
//! use sprout_spec::{Catalog, UiKind};
//!
//! let mut engine = SoundEngine::offline(
//!     EngineConfig::default().with_seed(7),
//!     Catalog::garden(),
//!     MemoryStore::new(),
//! )
//! .unwrap();
//!
//! engine.on_user_gesture();
//! assert!(engine.play_ui(UiKind::Click).is_started());
//! engine.advance(Duration::from_millis(200));
//! assert!(!engine.backend().output().is_empty());
//! ```

pub mod backend;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod mixer;
pub mod music;
pub mod output;
pub mod scheduler;
pub mod settings;

pub use backend::{AudioBackend, BackendEvent, CaptureBackend, NullBackend};
#[cfg(feature = "device")]
pub use backend::DeviceBackend;
pub use config::{EngineConfig, MusicConfig};
pub use context::ContextState;
pub use engine::{DebugInfo, Playback, PlaybackToken, SkipReason, SoundEngine};
pub use error::{EngineError, EngineResult};
pub use mixer::MixerSettings;
pub use music::{BackgroundMusicState, MusicTrack};
pub use scheduler::{Cue, Sequence};
pub use settings::{JsonFileStore, MemoryStore, SettingsStore};
