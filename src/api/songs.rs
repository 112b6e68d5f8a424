//! Document-level API operations
//!
//! Pure transforms over song documents: migration to the latest game
//! version, schema validation, and waveform summaries. None of these touch
//! editor session state.

use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::api::helpers::{deserialize, serialize};
use crate::migrate::{self, LATEST_GAME_VERSION};
use crate::models::Song;
use crate::validate::{self, Violation};
use crate::waveform::{self, DEFAULT_WAVEFORM_SCALE};
use crate::{wasm_error, wasm_info, wasm_warn};

/// Outcome of validating a candidate document.
///
/// Mirrors the shape the UI expects: a typed song when the document is
/// clean, otherwise the full violation list.
#[derive(Serialize, Clone, Debug)]
pub struct ValidationReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub song: Option<Song>,
    pub violations: Vec<Violation>,
}

/// Create a fresh song document at the latest game version
#[wasm_bindgen(js_name = createNewSong)]
pub fn create_new_song(name: &str) -> Result<JsValue, JsValue> {
    wasm_info!("createNewSong called: {}", name);
    serialize(&Song::new(name), "Song serialization error")
}

/// Run the migration chain on a song document and return the migrated copy
#[wasm_bindgen(js_name = migrateSong)]
pub fn migrate_song(song_js: JsValue) -> Result<JsValue, JsValue> {
    wasm_info!("migrateSong called");

    let song: Song = deserialize(song_js, "Song deserialization error")?;
    let migrated = migrate::migrate(&song).map_err(|e| {
        wasm_error!("Migration error: {}", e);
        JsValue::from_str(&e.to_string())
    })?;

    serialize(&migrated, "Song serialization error")
}

/// Validate a candidate document and report every violation found
#[wasm_bindgen(js_name = validateSong)]
pub fn validate_song(candidate_js: JsValue) -> Result<JsValue, JsValue> {
    wasm_info!("validateSong called");

    let candidate: Value = deserialize(candidate_js, "Candidate deserialization error")?;
    let report = match validate::validate_song(&candidate) {
        Ok(song) => ValidationReport {
            song: Some(song),
            violations: Vec::new(),
        },
        Err(err) => {
            wasm_warn!("validateSong found {} violation(s)", err.violations.len());
            ValidationReport {
                song: None,
                violations: err.violations,
            }
        }
    };

    serialize(&report, "Validation report serialization error")
}

/// Summarize decoded PCM samples into per-window peaks for the track background
#[wasm_bindgen(js_name = summarizeWaveform)]
pub fn summarize_waveform(samples: &[f32], scale: usize) -> Result<JsValue, JsValue> {
    wasm_info!("summarizeWaveform called: {} samples, scale {}", samples.len(), scale);

    let waveform = waveform::summarize(samples, scale).map_err(|e| {
        wasm_error!("Waveform error: {}", e);
        JsValue::from_str(&e.to_string())
    })?;

    serialize(&waveform, "Waveform serialization error")
}

/// The window size summarizeWaveform expects when the host has no preference
#[wasm_bindgen(js_name = defaultWaveformScale)]
pub fn default_waveform_scale() -> usize {
    DEFAULT_WAVEFORM_SCALE
}

/// The game version current song documents carry
#[wasm_bindgen(js_name = latestGameVersion)]
pub fn latest_game_version() -> String {
    LATEST_GAME_VERSION.to_string()
}
