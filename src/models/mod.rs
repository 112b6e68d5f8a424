//! Models module for the track editor
//!
//! This module contains the data structures of the versioned Song
//! document: notes, steps, difficulty charts and the song wrapper.

pub mod note;
pub mod serde_helpers;
pub mod song;

// Re-export commonly used types
pub use note::{size_signature, Note, Step};
pub use song::{
    Difficulty, DifficultyName, DifficultySet, Song, Waveform, DEFAULT_INTENSITY, MAX_INTENSITY,
    MIN_INTENSITY,
};
