//! Rhythm Track Editor WASM API
//!
//! This module provides the JavaScript-facing API for the track editor.
//! It includes shared utilities for serialization, error handling, and
//! logging, as well as the API operations organized by functional domain.
//!
//! # Module Structure
//!
//! - `helpers`: Shared utilities for serialization, error handling, and logging
//! - `songs`: Document-level operations (migration, validation, waveforms)
//! - `editor`: The `TrackEditor` session exported to the host

pub mod helpers;
pub mod songs;
pub mod editor;

pub use editor::{NotesResult, TrackEditor};
pub use songs::{
    create_new_song, default_waveform_scale, latest_game_version, migrate_song,
    summarize_waveform, validate_song, ValidationReport,
};
