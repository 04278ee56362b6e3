//! Settings persistence integration tests.

use pretty_assertions::assert_eq;

use sprout_engine::settings::{keys, setting_value};
use sprout_engine::{
    EngineConfig, JsonFileStore, MemoryStore, MixerSettings, SettingsStore, SkipReason,
    SoundEngine,
};
use sprout_spec::{Catalog, SoundCategory, SoundId};

fn file_engine(
    path: &std::path::Path,
) -> SoundEngine<sprout_engine::CaptureBackend, JsonFileStore> {
    SoundEngine::offline(
        EngineConfig::default().with_seed(3),
        Catalog::garden(),
        JsonFileStore::open(path),
    )
    .unwrap()
}

#[test]
fn test_every_setting_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let saved = {
        let mut engine = file_engine(&path);
        engine.set_master_volume(0.3);
        engine.set_sound_effects_volume(0.6);
        engine.set_sound_effects_enabled(false);
        engine.set_category_volume(SoundCategory::Ui, 0.25);
        engine.set_category_enabled(SoundCategory::Ui, false);
        engine.set_category_volume(SoundCategory::Plant, 0.5);
        engine.set_category_enabled(SoundCategory::Plant, false);
        engine.set_category_volume(SoundCategory::Achievement, 0.75);
        engine.set_category_enabled(SoundCategory::Achievement, false);
        engine.set_background_music_volume(0.4);
        engine.set_background_music_enabled(false);
        engine.set_audio_variations_enabled(false);
        engine.enable_debug_mode(true);
        engine.set_music_autoplay(true);
        engine.set_enabled(false);
        *engine.settings()
    };

    let engine = file_engine(&path);
    assert_eq!(*engine.settings(), saved);
    assert_ne!(saved, MixerSettings::default());

    assert_eq!(engine.sound_effects_volume(), 0.6);
    assert!(!engine.are_sound_effects_enabled());

    let store = JsonFileStore::open(&path);
    for key in keys::ALL {
        assert_eq!(store.get(key), setting_value(&saved, key), "{}", key);
    }
}

#[test]
fn test_effects_group_keys_from_existing_store() {
    let mut store = MemoryStore::new();
    store.set(keys::SOUND_EFFECTS_VOLUME, "0.7").unwrap();
    store.set(keys::SOUND_EFFECTS_ENABLED, "false").unwrap();

    let mut engine = SoundEngine::offline(EngineConfig::default(), Catalog::garden(), store).unwrap();
    assert_eq!(engine.sound_effects_volume(), 0.7);
    assert!(!engine.are_sound_effects_enabled());
    assert_eq!(engine.category_volume(SoundCategory::Ui), 0.7);
    assert!(engine.ensure_ready());
    assert_eq!(
        engine.play(SoundId::UiClick).skip_reason(),
        Some(SkipReason::Muted)
    );
}

#[test]
fn test_defaults_without_stored_values() {
    let engine = SoundEngine::offline(EngineConfig::default(), Catalog::garden(), MemoryStore::new())
        .unwrap();
    assert_eq!(*engine.settings(), MixerSettings::default());
    assert_eq!(engine.background_music_volume(), 0.2);
    assert!(engine.are_audio_variations_enabled());
    assert!(!engine.music_autoplay());
}

#[test]
fn test_corrupt_value_falls_back_alone() {
    let mut store = MemoryStore::new();
    store.set(keys::MASTER_VOLUME, "loud").unwrap();
    store.set(keys::UI_VOLUME, "0.5").unwrap();
    store.set(keys::DEBUG_MODE, "yes").unwrap();

    let engine = SoundEngine::offline(EngineConfig::default(), Catalog::garden(), store).unwrap();
    assert_eq!(engine.master_volume(), 1.0);
    assert_eq!(engine.category_volume(SoundCategory::Ui), 0.5);
    assert!(!engine.is_debug_mode());
}

#[test]
fn test_malformed_file_uses_defaults_and_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut engine = file_engine(&path);
    assert_eq!(*engine.settings(), MixerSettings::default());
    engine.set_master_volume(0.5);

    let text = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json[keys::MASTER_VOLUME], "0.5");
}

#[test]
fn test_volumes_are_clamped() {
    let mut engine =
        SoundEngine::offline(EngineConfig::default(), Catalog::garden(), MemoryStore::new())
            .unwrap();
    engine.set_master_volume(1.7);
    assert_eq!(engine.master_volume(), 1.0);
    engine.set_category_volume(SoundCategory::Plant, -0.2);
    assert_eq!(engine.category_volume(SoundCategory::Plant), 0.0);
    engine.set_sound_effects_volume(f64::NAN);
    assert_eq!(engine.sound_effects_volume(), 0.0);
    assert_eq!(engine.store().get(keys::UI_VOLUME).as_deref(), Some("0"));
}

#[test]
fn test_sound_effects_group() {
    let mut engine =
        SoundEngine::offline(EngineConfig::default(), Catalog::garden(), MemoryStore::new())
            .unwrap();
    engine.set_sound_effects_volume(0.6);
    for category in SoundCategory::EFFECTS {
        assert_eq!(engine.category_volume(category), 0.6);
    }
    engine.set_category_volume(SoundCategory::Plant, 0.9);
    assert_eq!(engine.sound_effects_volume(), 0.6);
    assert_eq!(
        engine.store().get(keys::SOUND_EFFECTS_VOLUME).as_deref(),
        Some("0.6")
    );

    engine.set_sound_effects_enabled(false);
    assert!(!engine.are_sound_effects_enabled());
    assert!(engine.is_category_enabled(SoundCategory::Ui));
    assert_eq!(engine.effective_gain(SoundId::UiClick), 0.0);
    assert!(engine.effective_gain(SoundId::BackgroundMusic) > 0.0);
    assert!(engine.is_background_music_enabled());

    engine.set_sound_effects_enabled(true);
    assert!(engine.effective_gain(SoundId::UiClick) > 0.0);
}
