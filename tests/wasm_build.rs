//! WASM build test
//!
//! This module tests that the WASM module can be built and the editor API
//! works end to end against JavaScript values.

use serde_json::Value;
use track_editor_wasm::api::{
    default_waveform_scale, latest_game_version, migrate_song, summarize_waveform, validate_song,
    TrackEditor,
};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

/// Parse a JSON literal into the plain object a host page would pass in
fn js(text: &str) -> JsValue {
    js_sys::JSON::parse(text).unwrap()
}

/// A current-version document with two charts
fn song_js() -> JsValue {
    js(r#"{
        "gameVersion": "beta-2024-12-20",
        "name": "Smoke Test",
        "file": "smoke.mp3",
        "file-no-melody": "",
        "beats-per-minute": 120,
        "length": 30,
        "difficulty": {
            "easy": {
                "notes": [
                    { "beat": 1, "length": 0, "y": 0.25 },
                    { "beat": 2, "length": 1, "y": 0.5 }
                ],
                "intensity": 1
            },
            "hard": { "notes": [], "intensity": 2 }
        }
    }"#)
}

/// A pre-migration document: no game version, no very-hard chart, no ratings
fn legacy_song_js() -> JsValue {
    js(r#"{
        "name": "Legacy Smoke Test",
        "file": "legacy.mp3",
        "file-no-melody": "",
        "beats-per-minute": 95,
        "length": null,
        "difficulty": {
            "easy": { "notes": [ { "beat": 1, "length": null, "y": 0.25 } ] },
            "hard": { "notes": [] }
        }
    }"#)
}

fn to_value(js: JsValue) -> Value {
    serde_wasm_bindgen::from_value(js).unwrap()
}

#[wasm_bindgen_test]
fn test_editor_creation() {
    let _editor = TrackEditor::new();
    // Creation must not panic and must not require a loaded song
}

#[wasm_bindgen_test]
fn test_calls_before_load_are_errors() {
    let mut editor = TrackEditor::new();
    assert!(editor.get_notes().is_err());
    assert!(editor.undo().is_err());
    assert!(editor.get_song_snapshot().is_err());
}

#[wasm_bindgen_test]
fn test_load_song_returns_migrated_document() {
    let mut editor = TrackEditor::new();
    let loaded = to_value(editor.load_song(legacy_song_js()).unwrap());

    assert_eq!(loaded["gameVersion"].as_str(), Some(latest_game_version().as_str()));
    assert!(loaded["difficulty"]["very-hard"].is_object());
    assert_eq!(loaded["difficulty"]["easy"]["intensity"].as_f64(), Some(1.0));
}

#[wasm_bindgen_test]
fn test_get_and_set_notes() {
    let mut editor = TrackEditor::new();
    editor.load_song(song_js()).unwrap();

    assert_eq!(editor.get_notes().unwrap().length(), 2);

    let replacement = js(r#"[
        { "beat": 1, "length": 0, "y": 0.25 },
        { "beat": 2, "length": 1, "y": 0.5 },
        { "beat": 3, "length": 0, "y": 0.75 }
    ]"#);
    let result = to_value(editor.set_notes(replacement).unwrap());

    assert_eq!(result["notes"].as_array().map(Vec::len), Some(3));
    assert_eq!(result["canUndo"].as_bool(), Some(true));
}

#[wasm_bindgen_test]
fn test_undo_redo_round_trip() {
    let mut editor = TrackEditor::new();
    editor.load_song(song_js()).unwrap();

    editor
        .set_notes(js(r#"[ { "beat": 5, "length": 0, "y": 0.5 } ]"#))
        .unwrap();

    let undone = to_value(editor.undo().unwrap());
    assert_eq!(undone["notes"].as_array().map(Vec::len), Some(2));
    assert_eq!(undone["canRedo"].as_bool(), Some(true));

    let redone = to_value(editor.redo().unwrap());
    assert_eq!(redone["notes"].as_array().map(Vec::len), Some(1));
}

#[wasm_bindgen_test]
fn test_select_difficulty() {
    let mut editor = TrackEditor::new();
    editor.load_song(song_js()).unwrap();

    let result = to_value(editor.select_difficulty("hard").unwrap());
    assert_eq!(result["notes"].as_array().map(Vec::len), Some(0));
    assert_eq!(editor.active_difficulty().unwrap(), "hard");

    assert!(editor.select_difficulty("expert").is_err());
}

#[wasm_bindgen_test]
fn test_process_notes_projects_chart() {
    let mut editor = TrackEditor::new();
    editor.load_song(song_js()).unwrap();

    let processed = editor.process_notes(100.0, 200.0, JsValue::NULL).unwrap();
    assert_eq!(processed.length(), 2);

    let first = to_value(processed.get(0));
    assert_eq!(first["x"].as_f64(), Some(100.0));
    assert_eq!(first["y"].as_f64(), Some(50.0));
}

#[wasm_bindgen_test]
fn test_validate_song_reports_violations() {
    let broken = js(r#"{
        "gameVersion": "beta-2024-12-20",
        "name": "",
        "file": "broken.mp3",
        "file-no-melody": "",
        "beats-per-minute": 100,
        "length": 30,
        "difficulty": {
            "easy": { "notes": [], "intensity": 7 },
            "hard": { "notes": [], "intensity": 2 }
        }
    }"#);

    let report = to_value(validate_song(broken).unwrap());
    assert!(report["song"].is_null());
    assert!(!report["violations"].as_array().unwrap().is_empty());

    let report = to_value(validate_song(song_js()).unwrap());
    assert!(report["song"].is_object());
    assert_eq!(report["violations"].as_array().map(Vec::len), Some(0));
}

#[wasm_bindgen_test]
fn test_migrate_song_is_callable_standalone() {
    let migrated = to_value(migrate_song(legacy_song_js()).unwrap());
    assert_eq!(migrated["gameVersion"].as_str(), Some(latest_game_version().as_str()));
}

#[wasm_bindgen_test]
fn test_waveform_summary() {
    let samples = vec![0.5_f32; 256];
    let waveform = to_value(summarize_waveform(&samples, default_waveform_scale()).unwrap());

    assert_eq!(waveform["values"].as_array().map(Vec::len), Some(2));
    assert_eq!(waveform["max"].as_f64(), Some(64.0));
}
