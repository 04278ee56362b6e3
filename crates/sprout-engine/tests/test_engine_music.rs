//! Background music integration tests.

use std::time::Duration;

use sprout_engine::settings::keys;
use sprout_engine::{
    CaptureBackend, EngineConfig, MemoryStore, MusicTrack, SettingsStore, SkipReason, SoundEngine,
};
use sprout_spec::{Catalog, SoundId};

type Engine = SoundEngine<CaptureBackend, MemoryStore>;

fn short_track() -> MusicTrack {
    let samples = (0..1024).map(|i| (i as f32 / 1024.0) - 0.5).collect();
    MusicTrack::from_samples("loop", samples, 44100)
}

fn music_engine(store: MemoryStore) -> Engine {
    SoundEngine::offline(EngineConfig::default().with_seed(9), Catalog::garden(), store)
        .unwrap()
        .with_music_track(short_track())
}

fn ready_music_engine() -> Engine {
    let mut engine = music_engine(MemoryStore::new());
    assert!(engine.ensure_ready());
    engine
}

#[test]
fn test_start_twice_keeps_one_loop() {
    let mut engine = ready_music_engine();
    assert!(engine.start_background_music());
    assert!(engine.start_background_music());
    assert_eq!(engine.backend().music_starts(), 1);
    assert!(engine.is_music_playing());

    engine.stop_background_music();
    engine.stop_background_music();
    assert!(!engine.is_music_playing());
    assert_eq!(engine.backend().music_stops(), 1);
}

#[test]
fn test_start_readies_the_context() {
    let mut engine = music_engine(MemoryStore::new());
    assert!(engine.start_background_music());
    assert_eq!(engine.backend().open_calls(), 1);
}

#[test]
fn test_loop_rates_vary_inside_band() {
    let mut engine = ready_music_engine();
    engine.start_background_music();
    engine.advance(Duration::from_secs(3));

    let rates = engine.backend().rate_history();
    assert!(rates.len() > 100, "only {} loops", rates.len());
    assert!(rates.iter().all(|r| (0.9..=1.1).contains(r)));
    let first = rates[0];
    assert!(rates.iter().any(|&r| r != first));

    let state = engine.music_state();
    assert!(state.is_playing);
    assert_eq!(Some(state.current_playback_rate), rates.last().copied());
}

#[test]
fn test_tiny_track_draws_one_rate_per_block() {
    let samples = (0..64).map(|i| (i as f32 / 64.0) - 0.5).collect();
    let mut engine = SoundEngine::offline(
        EngineConfig::default().with_seed(9),
        Catalog::garden(),
        MemoryStore::new(),
    )
    .unwrap()
    .with_music_track(MusicTrack::from_samples("blip", samples, 44100));
    assert!(engine.start_background_music());
    let before = engine.backend().rate_history().len();

    // 4 blocks of 512 frames, each ending several 64-frame loops.
    engine.advance(Duration::from_secs_f64(2048.0 / 44100.0));
    assert_eq!(engine.backend().rate_history().len() - before, 4);
}

#[test]
fn test_variations_off_keeps_unit_rate() {
    let mut engine = ready_music_engine();
    engine.set_audio_variations_enabled(false);
    engine.start_background_music();
    engine.advance(Duration::from_millis(100));
    assert!(engine.backend().rate_history().iter().all(|&r| r == 1.0));
}

#[test]
fn test_volume_changes_apply_immediately() {
    let mut engine = ready_music_engine();
    engine.start_background_music();
    assert_eq!(engine.backend().music_volume(), Some(0.2));

    engine.set_master_volume(0.5);
    assert_eq!(engine.backend().music_volume(), Some(0.1));
    engine.set_background_music_volume(0.8);
    assert_eq!(engine.backend().music_volume(), Some(0.4));
}

#[test]
fn test_enable_schedules_start_after_delay() {
    let mut engine = ready_music_engine();
    engine.set_background_music_enabled(false);
    engine.set_background_music_enabled(true);
    assert_eq!(engine.pending_actions(), 1);
    assert!(!engine.is_music_playing());

    engine.advance(Duration::from_millis(499));
    assert!(!engine.is_music_playing());
    engine.advance(Duration::from_millis(1));
    assert!(engine.is_music_playing());
}

#[test]
fn test_disable_stops_and_cancels() {
    let mut engine = ready_music_engine();
    engine.start_background_music();
    engine.set_background_music_enabled(false);
    assert!(!engine.is_music_playing());

    engine.set_background_music_enabled(true);
    engine.set_background_music_enabled(false);
    engine.advance(Duration::from_secs(1));
    assert!(!engine.is_music_playing());
    assert_eq!(engine.pending_actions(), 0);
}

#[test]
fn test_global_switch_stops_music() {
    let mut engine = ready_music_engine();
    engine.start_background_music();
    engine.set_enabled(false);
    assert!(!engine.is_music_playing());
    assert!(!engine.start_background_music());
}

#[test]
fn test_first_gesture_autoplays() {
    let mut store = MemoryStore::new();
    store.set(keys::MUSIC_AUTOPLAY, "true").unwrap();
    let mut engine = music_engine(store);

    assert!(engine.on_user_gesture());
    assert!(engine.on_user_gesture());
    assert_eq!(engine.pending_actions(), 1);

    engine.advance(Duration::from_millis(600));
    assert!(engine.is_music_playing());
    assert_eq!(engine.backend().music_starts(), 1);
}

#[test]
fn test_gesture_without_autoplay_stays_quiet() {
    let mut engine = music_engine(MemoryStore::new());
    engine.on_user_gesture();
    engine.advance(Duration::from_secs(1));
    assert!(!engine.is_music_playing());
}

#[test]
fn test_play_routes_music() {
    let mut engine = ready_music_engine();
    assert!(engine.play(SoundId::BackgroundMusic).is_started());
    assert!(engine.is_music_playing());
    assert!(engine.backend().submitted().is_empty());
}

#[test]
fn test_missing_track_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = EngineConfig::default().with_seed(1);
    config.music.asset_paths = vec![dir.path().join("missing.wav")];
    let mut engine = SoundEngine::offline(config, Catalog::garden(), MemoryStore::new()).unwrap();
    engine.ensure_ready();

    assert!(!engine.start_background_music());
    assert_eq!(
        engine.play(SoundId::BackgroundMusic).skip_reason(),
        Some(SkipReason::MusicUnavailable)
    );
    assert!(!engine.music_state().is_playing);
}

#[test]
fn test_music_loads_from_configured_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bed.wav");
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 22050,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for i in 0..2205 {
        writer.write_sample(((i % 100) * 100) as i16).unwrap();
    }
    writer.finalize().unwrap();

    let mut config = EngineConfig::default().with_seed(1);
    config.music.asset_paths = vec![path];
    let mut engine = SoundEngine::offline(config, Catalog::garden(), MemoryStore::new()).unwrap();

    assert!(engine.start_background_music());
    engine.advance(Duration::from_millis(50));
    assert!(engine.backend().output().iter().any(|&s| s != 0.0));
}
