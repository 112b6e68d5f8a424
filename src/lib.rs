//! Rhythm Track Editor WASM Module
//!
//! This is the core WASM module for the rhythm track editor. It owns the
//! versioned Song document model, chart edit history, migrations, and
//! validation, behind a JavaScript-facing API.

pub mod models;
pub mod history;
pub mod migrate;
pub mod validate;
pub mod layout;
pub mod waveform;
pub mod session;
pub mod api;

// Re-export commonly used types
pub use models::{Difficulty, DifficultyName, DifficultySet, Note, Song, Step, Waveform};
pub use history::{HistoryStatus, NoteHistory};
pub use session::{EditorSession, PlaybackTime};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).expect("failed to initialize logger");

    log::info!("Track editor WASM module initialized");
}
