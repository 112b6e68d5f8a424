//! Editor session API operations
//!
//! `TrackEditor` is the stateful entry point exported to JavaScript. Each
//! instance owns one `EditorSession`; the host constructs an editor per open
//! song instead of sharing module-level state.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::api::helpers::{deserialize, parse_difficulty, serialize, validation_error_value};
use crate::layout;
use crate::migrate;
use crate::models::{DifficultyName, Note, Song};
use crate::session::EditorSession;
use crate::validate;
use crate::{wasm_error, wasm_info, wasm_log};

/// Payload returned by note-mutating calls so the UI can re-render in one pass
#[derive(Serialize, Clone, Debug)]
pub struct NotesResult {
    pub notes: Vec<Note>,
    #[serde(rename = "canUndo")]
    pub can_undo: bool,
    #[serde(rename = "canRedo")]
    pub can_redo: bool,
}

/// Rhythm-track editor session owned by the JavaScript host
#[wasm_bindgen]
pub struct TrackEditor {
    session: Option<EditorSession>,
}

#[wasm_bindgen]
impl TrackEditor {
    /// Create an editor with no song loaded
    #[wasm_bindgen(constructor)]
    pub fn new() -> TrackEditor {
        wasm_info!("TrackEditor created");
        TrackEditor { session: None }
    }

    /// Load a song document: migrate it to the latest game version, validate
    /// it, and open an edit session on the easy chart.
    ///
    /// Returns the migrated song. Throws the violation list when the migrated
    /// document does not validate.
    #[wasm_bindgen(js_name = loadSong)]
    pub fn load_song(&mut self, song_js: JsValue) -> Result<JsValue, JsValue> {
        wasm_info!("loadSong called");

        let song: Song = deserialize(song_js, "Song deserialization error")?;
        let migrated = migrate::migrate(&song).map_err(|e| {
            wasm_error!("Migration error: {}", e);
            JsValue::from_str(&e.to_string())
        })?;

        let value = serde_json::to_value(&migrated).map_err(|e| {
            let msg = format!("Song serialization error: {}", e);
            wasm_error!("{}", msg);
            JsValue::from_str(&msg)
        })?;
        let validated =
            validate::validate_song(&value).map_err(|err| validation_error_value(&err))?;

        let session = EditorSession::open(validated, DifficultyName::Easy).map_err(|e| {
            wasm_error!("Session error: {}", e);
            JsValue::from_str(&e.to_string())
        })?;
        self.session = Some(session);

        serialize(&migrated, "Song serialization error")
    }

    /// Switch the edit session to another difficulty chart.
    /// Pending edits on the current chart are written back to the song first.
    #[wasm_bindgen(js_name = selectDifficulty)]
    pub fn select_difficulty(&mut self, name: &str) -> Result<JsValue, JsValue> {
        wasm_info!("selectDifficulty called: {}", name);

        let difficulty = parse_difficulty(name)?;
        let session = self.require_session_mut()?;
        session.select_difficulty(difficulty).map_err(|e| {
            wasm_error!("Session error: {}", e);
            JsValue::from_str(&e.to_string())
        })?;

        notes_result(session)
    }

    /// Name of the difficulty chart the session is editing
    #[wasm_bindgen(js_name = activeDifficulty)]
    pub fn active_difficulty(&self) -> Result<String, JsValue> {
        let session = self.require_session()?;
        Ok(session.active_difficulty().to_string())
    }

    /// Notes of the active chart
    #[wasm_bindgen(js_name = getNotes)]
    pub fn get_notes(&self) -> Result<js_sys::Array, JsValue> {
        let session = self.require_session()?;

        let result = js_sys::Array::new();
        for note in session.notes() {
            result.push(&serialize(note, "Note serialization error")?);
        }
        Ok(result)
    }

    /// Replace the notes of the active chart, recording an undo boundary
    #[wasm_bindgen(js_name = setNotes)]
    pub fn set_notes(&mut self, notes_js: JsValue) -> Result<JsValue, JsValue> {
        let notes: Vec<Note> = deserialize(notes_js, "Notes deserialization error")?;
        let session = self.require_session_mut()?;
        session.set_notes(notes);
        notes_result(session)
    }

    /// Step the active chart back to the previous undo boundary
    pub fn undo(&mut self) -> Result<JsValue, JsValue> {
        wasm_info!("undo called");

        let session = self.require_session_mut()?;
        if !session.undo() {
            wasm_log!("undo ignored: history is empty");
        }
        notes_result(session)
    }

    /// Reapply the most recently undone edit on the active chart
    pub fn redo(&mut self) -> Result<JsValue, JsValue> {
        wasm_info!("redo called");

        let session = self.require_session_mut()?;
        if !session.redo() {
            wasm_log!("redo ignored: nothing to redo");
        }
        notes_result(session)
    }

    /// Undo/redo availability for the active chart
    #[wasm_bindgen(js_name = getHistoryStatus)]
    pub fn get_history_status(&self) -> Result<JsValue, JsValue> {
        let session = self.require_session()?;
        serialize(&session.history_status(), "History status serialization error")
    }

    /// Project the active chart's notes into track coordinates and SVG paths.
    /// `selected` may be null or undefined when nothing is selected.
    #[wasm_bindgen(js_name = processNotes)]
    pub fn process_notes(
        &self,
        beat_length: f64,
        track_height: f64,
        selected_js: JsValue,
    ) -> Result<js_sys::Array, JsValue> {
        let selected: Vec<Note> = if selected_js.is_undefined() || selected_js.is_null() {
            Vec::new()
        } else {
            deserialize(selected_js, "Selection deserialization error")?
        };

        let session = self.require_session()?;
        let result = js_sys::Array::new();
        for processed in layout::process_notes(session.notes(), beat_length, track_height, &selected)
        {
            result.push(&serialize(&processed, "Processed note serialization error")?);
        }
        Ok(result)
    }

    /// Record the playhead position reported by the host's audio clock
    #[wasm_bindgen(js_name = setPlaybackTime)]
    pub fn set_playback_time(&mut self, seconds: f64, beats: f64) -> Result<(), JsValue> {
        let session = self.require_session_mut()?;
        session.set_playback_time(seconds, beats);
        Ok(())
    }

    /// The most recently recorded playhead position
    #[wasm_bindgen(js_name = getPlaybackTime)]
    pub fn get_playback_time(&self) -> Result<JsValue, JsValue> {
        let session = self.require_session()?;
        serialize(&session.playback_time(), "Playback time serialization error")
    }

    /// The loaded song with live edits to the active chart written back in
    #[wasm_bindgen(js_name = getSongSnapshot)]
    pub fn get_song_snapshot(&self) -> Result<JsValue, JsValue> {
        wasm_info!("getSongSnapshot called");

        let session = self.require_session()?;
        serialize(&session.snapshot_song(), "Song serialization error")
    }

    fn require_session(&self) -> Result<&EditorSession, JsValue> {
        self.session.as_ref().ok_or_else(no_song_loaded)
    }

    fn require_session_mut(&mut self) -> Result<&mut EditorSession, JsValue> {
        self.session.as_mut().ok_or_else(no_song_loaded)
    }
}

impl Default for TrackEditor {
    fn default() -> Self {
        Self::new()
    }
}

fn no_song_loaded() -> JsValue {
    wasm_error!("No song loaded");
    JsValue::from_str("No song loaded")
}

fn notes_result(session: &EditorSession) -> Result<JsValue, JsValue> {
    let status = session.history_status();
    serialize(
        &NotesResult {
            notes: session.notes().to_vec(),
            can_undo: status.can_undo,
            can_redo: status.can_redo,
        },
        "Notes serialization error",
    )
}
