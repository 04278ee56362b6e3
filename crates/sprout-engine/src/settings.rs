//! Persisted settings.
//!
//! Settings live in a flat string key-value namespace. They are read once
//! when the engine is built and each one is rewritten as soon as it changes.
//! A missing or unreadable value falls back to its default without touching
//! the other keys.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use tracing::warn;

use sprout_spec::SoundCategory;

use crate::error::{EngineError, EngineResult};
use crate::mixer::{CategoryLevel, MixerSettings};

/// Stable storage keys.
pub mod keys {
    use sprout_spec::SoundCategory;

    pub const MASTER_VOLUME: &str = "taskgarden_master_volume";
    pub const SOUND_ENABLED: &str = "taskgarden_sound_enabled";
    pub const UI_VOLUME: &str = "taskgarden_ui_volume";
    pub const UI_ENABLED: &str = "taskgarden_ui_enabled";
    pub const PLANT_VOLUME: &str = "taskgarden_plant_volume";
    pub const PLANT_ENABLED: &str = "taskgarden_plant_enabled";
    pub const ACHIEVEMENT_VOLUME: &str = "taskgarden_achievement_volume";
    pub const ACHIEVEMENT_ENABLED: &str = "taskgarden_achievement_enabled";
    pub const MUSIC_VOLUME: &str = "taskgarden_background_music_volume";
    pub const MUSIC_ENABLED: &str = "taskgarden_background_music_enabled";
    pub const SOUND_EFFECTS_VOLUME: &str = "taskgarden_sound_effects_volume";
    pub const SOUND_EFFECTS_ENABLED: &str = "taskgarden_sound_effects_enabled";
    pub const VARIATIONS_ENABLED: &str = "taskgarden_audio_variations_enabled";
    pub const DEBUG_MODE: &str = "taskgarden_debug_mode";
    pub const MUSIC_AUTOPLAY: &str = "taskgarden_background_music";

    /// Every key, in display order.
    pub const ALL: [&str; 15] = [
        MASTER_VOLUME,
        SOUND_ENABLED,
        UI_VOLUME,
        UI_ENABLED,
        PLANT_VOLUME,
        PLANT_ENABLED,
        ACHIEVEMENT_VOLUME,
        ACHIEVEMENT_ENABLED,
        MUSIC_VOLUME,
        MUSIC_ENABLED,
        SOUND_EFFECTS_VOLUME,
        SOUND_EFFECTS_ENABLED,
        VARIATIONS_ENABLED,
        DEBUG_MODE,
        MUSIC_AUTOPLAY,
    ];

    /// Volume key of a category.
    pub fn volume(category: SoundCategory) -> &'static str {
        match category {
            SoundCategory::Ui => UI_VOLUME,
            SoundCategory::Plant => PLANT_VOLUME,
            SoundCategory::Achievement => ACHIEVEMENT_VOLUME,
            SoundCategory::Music => MUSIC_VOLUME,
        }
    }

    /// Enable key of a category.
    pub fn enabled(category: SoundCategory) -> &'static str {
        match category {
            SoundCategory::Ui => UI_ENABLED,
            SoundCategory::Plant => PLANT_ENABLED,
            SoundCategory::Achievement => ACHIEVEMENT_ENABLED,
            SoundCategory::Music => MUSIC_ENABLED,
        }
    }
}

/// A flat string key-value store.
pub trait SettingsStore {
    /// Reads a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Writes a value and persists it.
    fn set(&mut self, key: &str, value: &str) -> EngineResult<()>;
}

/// Store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> EngineResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a JSON object of string values, rewritten on every change.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens a store at `path`.
    ///
    /// A missing file is an empty store. An unreadable or malformed file is
    /// logged and treated as empty; it is replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<BTreeMap<String, serde_json::Value>>(&text) {
                Ok(map) => map
                    .into_iter()
                    .map(|(k, v)| match v {
                        serde_json::Value::String(s) => (k, s),
                        other => (k, other.to_string()),
                    })
                    .collect(),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "settings file is malformed, using defaults");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "settings file is unreadable, using defaults");
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    /// File the store writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> EngineResult<()> {
        let text = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, text).map_err(|e| {
            EngineError::Settings(format!("failed to write {}: {}", self.path.display(), e))
        })
    }
}

impl SettingsStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> EngineResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

fn read_volume<S: SettingsStore + ?Sized>(store: &S, key: &str, default: f64) -> f64 {
    let Some(raw) = store.get(key) else {
        return default;
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v.clamp(0.0, 1.0),
        _ => {
            warn!(key, value = %raw, "ignoring corrupt volume setting");
            default
        }
    }
}

fn read_flag<S: SettingsStore + ?Sized>(store: &S, key: &str, default: bool) -> bool {
    let Some(raw) = store.get(key) else {
        return default;
    };
    match raw.trim() {
        "true" => true,
        "false" => false,
        _ => {
            warn!(key, value = %raw, "ignoring corrupt flag setting");
            default
        }
    }
}

/// Reads every setting, using the default for missing or corrupt values.
///
/// An effect category without its own volume inherits the effects group
/// volume.
pub fn load_settings<S: SettingsStore + ?Sized>(store: &S) -> MixerSettings {
    let defaults = MixerSettings::default();
    let sound_effects = CategoryLevel::new(
        read_volume(store, keys::SOUND_EFFECTS_VOLUME, defaults.sound_effects.volume),
        read_flag(store, keys::SOUND_EFFECTS_ENABLED, defaults.sound_effects.enabled),
    );
    let level = |category: SoundCategory| {
        let default = defaults.category(category);
        let default_volume = if category == SoundCategory::Music {
            default.volume
        } else {
            sound_effects.volume
        };
        CategoryLevel::new(
            read_volume(store, keys::volume(category), default_volume),
            read_flag(store, keys::enabled(category), default.enabled),
        )
    };

    MixerSettings {
        master_volume: read_volume(store, keys::MASTER_VOLUME, defaults.master_volume),
        audio_enabled: read_flag(store, keys::SOUND_ENABLED, defaults.audio_enabled),
        ui: level(SoundCategory::Ui),
        plant: level(SoundCategory::Plant),
        achievement: level(SoundCategory::Achievement),
        music: level(SoundCategory::Music),
        sound_effects,
        variations_enabled: read_flag(store, keys::VARIATIONS_ENABLED, defaults.variations_enabled),
        debug_mode: read_flag(store, keys::DEBUG_MODE, defaults.debug_mode),
        music_autoplay: read_flag(store, keys::MUSIC_AUTOPLAY, defaults.music_autoplay),
    }
}

/// Writes a value, logging instead of failing.
pub fn persist<S: SettingsStore + ?Sized>(store: &mut S, key: &str, value: impl ToString) {
    let value = value.to_string();
    if let Err(e) = store.set(key, &value) {
        warn!(key, code = e.code(), error = %e, "failed to persist setting");
    }
}

/// Looks up the stored string for `key` in `settings`.
///
/// Returns `None` for keys this engine does not know.
pub fn setting_value(settings: &MixerSettings, key: &str) -> Option<String> {
    let value = match key {
        keys::MASTER_VOLUME => settings.master_volume.to_string(),
        keys::SOUND_ENABLED => settings.audio_enabled.to_string(),
        keys::UI_VOLUME => settings.ui.volume.to_string(),
        keys::UI_ENABLED => settings.ui.enabled.to_string(),
        keys::PLANT_VOLUME => settings.plant.volume.to_string(),
        keys::PLANT_ENABLED => settings.plant.enabled.to_string(),
        keys::ACHIEVEMENT_VOLUME => settings.achievement.volume.to_string(),
        keys::ACHIEVEMENT_ENABLED => settings.achievement.enabled.to_string(),
        keys::MUSIC_VOLUME => settings.music.volume.to_string(),
        keys::MUSIC_ENABLED => settings.music.enabled.to_string(),
        keys::SOUND_EFFECTS_VOLUME => settings.sound_effects.volume.to_string(),
        keys::SOUND_EFFECTS_ENABLED => settings.sound_effects.enabled.to_string(),
        keys::VARIATIONS_ENABLED => settings.variations_enabled.to_string(),
        keys::DEBUG_MODE => settings.debug_mode.to_string(),
        keys::MUSIC_AUTOPLAY => settings.music_autoplay.to_string(),
        _ => return None,
    };
    Some(value)
}
