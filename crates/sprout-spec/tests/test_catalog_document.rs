//! Catalog document loading integration tests.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use sprout_spec::{Algorithm, Catalog, CatalogDocument, SoundId, WarningCode, MAX_DURATION};

#[test]
fn test_garden_catalog_survives_document_round_trip() {
    let catalog = Catalog::garden();
    let json = serde_json::to_string_pretty(&catalog.to_document()).unwrap();
    let reloaded = Catalog::from_json(&json).unwrap();

    assert_eq!(reloaded.len(), catalog.len());
    for def in catalog.iter() {
        assert_eq!(reloaded.get(def.id), Some(def));
    }
    assert_eq!(reloaded.music(), catalog.music());
}

#[test]
fn test_custom_document_with_music_and_fallbacks() {
    let json = r#"{
        "sounds": [
            { "id": "ui_click", "algorithm": "crystal_click", "base_frequency": 700.0, "duration": 0.1, "volume": 0.5 },
            { "id": "ui_zoom_out", "algorithm": "ethereal_sweep", "base_frequency": 880.0, "duration": 0.3, "volume": 0.4 },
            { "id": "level_up", "algorithm": "ascension_theme", "duration": 2.0, "volume": 0.75 }
        ],
        "music": { "name": "Night-Bloom", "candidates": ["night/Night-Bloom.wav"] }
    }"#;

    let catalog = Catalog::from_json(json).unwrap();
    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.music().name, "Night-Bloom");
    assert_eq!(
        catalog.music().candidates,
        vec![PathBuf::from("night/Night-Bloom.wav")]
    );

    assert_eq!(catalog.get(SoundId::UiClick).unwrap().algorithm, Algorithm::CrystalClick);
    assert_eq!(catalog.get(SoundId::UiZoomOut).unwrap().algorithm, Algorithm::Tone);
    assert_eq!(catalog.get(SoundId::LevelUp).unwrap().algorithm, Algorithm::Tone);

    let fallbacks = catalog
        .warnings()
        .iter()
        .filter(|w| w.code == WarningCode::FallbackToTone)
        .count();
    assert_eq!(fallbacks, 2);
    assert!(catalog.get(SoundId::UiHover).is_none());
}

#[test]
fn test_unknown_fields_are_rejected() {
    let json = r#"{ "sounds": [], "extra": true }"#;
    assert!(serde_json::from_str::<CatalogDocument>(json).is_err());
    assert!(Catalog::from_json(json).is_err());
}

#[test]
fn test_unknown_sound_id_is_a_parse_error() {
    let json = r#"{ "sounds": [
        { "id": "ui_boing", "algorithm": "tone", "duration": 0.1, "volume": 0.5 }
    ] }"#;
    let err = Catalog::from_json(json).unwrap_err();
    assert_eq!(err.code(), "SPEC_004");
}

#[test]
fn test_oversized_duration_is_capped_with_warning() {
    let json = r#"{"sounds":[{"id":"ui_click","algorithm":"tone","base_frequency":440.0,"duration":1e15,"volume":0.5}]}"#;
    let catalog = Catalog::from_json(json).unwrap();

    assert_eq!(catalog.get(SoundId::UiClick).unwrap().duration, MAX_DURATION);
    let codes: Vec<_> = catalog.warnings().iter().map(|w| w.code).collect();
    assert_eq!(codes, vec![WarningCode::InvalidDuration]);
}
