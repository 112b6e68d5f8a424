//! Note and step primitives shared by every difficulty's chart.

use serde::{Deserialize, Serialize};

use super::serde_helpers::null_as_zero;

/// One vertex of a multi-segment note, relative to the owning note
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Step {
    /// Beat offset from the owning note's beat
    pub beat: f64,

    /// Vertical track position in the 0..=1 range
    pub y: f64,
}

impl Step {
    /// Create a step vertex
    pub fn new(beat: f64, y: f64) -> Self {
        Self { beat, y }
    }
}

/// A single note on a difficulty's timeline
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Note {
    /// Position on the song timeline, in beats
    pub beat: f64,

    /// Duration in beats; legacy files may hold null, which reads back as 0
    #[serde(default, deserialize_with = "null_as_zero")]
    pub length: f64,

    /// Vertical track position in the 0..=1 range
    pub y: f64,

    /// Polyline vertices for notes that bend across the track; holds at
    /// least 2 entries whenever present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<Step>>,
}

impl Note {
    /// Create a plain note with no steps
    pub fn new(beat: f64, length: f64, y: f64) -> Self {
        Self {
            beat,
            length,
            y,
            steps: None,
        }
    }

    /// Number of steps, 0 when the note has none
    pub fn step_count(&self) -> usize {
        self.steps.as_ref().map_or(0, Vec::len)
    }
}

/// Structural size of a note list: the note count plus every note's step count.
///
/// Two lists with the same size are treated as one editing gesture by the
/// history manager; a list that gained or lost a note or step starts a new one.
pub fn size_signature(notes: &[Note]) -> usize {
    notes.len() + notes.iter().map(Note::step_count).sum::<usize>()
}
