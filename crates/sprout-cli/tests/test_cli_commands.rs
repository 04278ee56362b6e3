//! Command integration tests.

use std::process::ExitCode;

use sprout_cli::commands;
use sprout_cli::commands::render::RenderOptions;
use sprout_cli::commands::sequence::SequenceKind;
use sprout_engine::settings::keys;
use sprout_engine::{EngineConfig, JsonFileStore, SettingsStore};
use sprout_spec::{Catalog, SoundId};

fn options() -> RenderOptions {
    RenderOptions {
        seed: 42,
        sample_rate: 22050,
        volume: None,
    }
}

fn wav_samples(path: &std::path::Path) -> (hound::WavSpec, Vec<i16>) {
    let mut reader = hound::WavReader::open(path).unwrap();
    let spec = reader.spec();
    let samples = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    (spec, samples)
}

#[test]
fn test_render_writes_wav() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("click.wav");
    let code = commands::render::run(
        &Catalog::garden(),
        "ui_click",
        path.to_str().unwrap(),
        &options(),
    )
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let (spec, samples) = wav_samples(&path);
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 22050);
    assert_eq!(spec.bits_per_sample, 16);
    assert!(!samples.is_empty());
    assert!(samples.iter().any(|&s| s != 0));
}

#[test]
fn test_render_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.wav");
    let b = dir.path().join("b.wav");
    for path in [&a, &b] {
        commands::render::run(
            &Catalog::garden(),
            "plant_water",
            path.to_str().unwrap(),
            &options(),
        )
        .unwrap();
    }
    assert_eq!(std::fs::read(a).unwrap(), std::fs::read(b).unwrap());
}

#[test]
fn test_render_rejects_unknown_and_music() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("x.wav");
    let out = path.to_str().unwrap();
    assert!(commands::render::run(&Catalog::garden(), "thunder", out, &options()).is_err());
    assert!(
        commands::render::run(&Catalog::garden(), "background_music", out, &options()).is_err()
    );
    assert!(!path.exists());
}

#[test]
fn test_render_all_writes_every_one_shot() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("sounds");
    let code =
        commands::render::run_all(&Catalog::garden(), out.to_str().unwrap(), &options()).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    for id in SoundId::ALL.into_iter().filter(|id| id.is_one_shot()) {
        assert!(out.join(format!("{}.wav", id)).exists(), "{}", id);
    }
}

#[test]
fn test_growth_sequence_render() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grow.wav");
    let config = EngineConfig::default().with_seed(5);
    let code = commands::sequence::run(
        Catalog::garden(),
        config,
        SequenceKind::Growth { stage: Some(4) },
        path.to_str().unwrap(),
    )
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let (spec, samples) = wav_samples(&path);
    assert_eq!(spec.sample_rate, 44100);
    // Stage-up starts at 1.2 s, so the file is longer than that.
    assert!(samples.len() > 44100 * 12 / 10);
    let late = &samples[44100 * 12 / 10..];
    assert!(late.iter().any(|&s| s != 0));
}

#[test]
fn test_set_then_info() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("settings.json");
    let settings_str = settings.to_str().unwrap();

    commands::set::run(settings_str, keys::MASTER_VOLUME, "0.25").unwrap();
    commands::set::run(settings_str, keys::PLANT_ENABLED, "false").unwrap();
    assert!(commands::set::run(settings_str, "taskgarden_unknown", "1").is_err());

    let store = JsonFileStore::open(&settings);
    assert_eq!(store.get(keys::MASTER_VOLUME).as_deref(), Some("0.25"));
    assert_eq!(store.get(keys::PLANT_ENABLED).as_deref(), Some("false"));

    let code = commands::info::run(Catalog::garden(), Some(settings_str), true).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
}

#[test]
fn test_catalog_file_loading() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    let doc = Catalog::garden().to_document();
    std::fs::write(&path, serde_json::to_string(&doc).unwrap()).unwrap();

    let catalog = commands::load_catalog(Some(path.to_str().unwrap())).unwrap();
    assert_eq!(catalog.len(), Catalog::garden().len());
    assert!(commands::load_catalog(Some("/nonexistent/catalog.json")).is_err());
    assert!(commands::load_config(None).is_ok());
}
