//! Track-space note geometry for the renderer.
//!
//! The UI draws each note as an SVG path across the track. This module turns
//! a note's beat-space coordinates into pixel positions and the path string,
//! leaving the drawing itself to the host.

use serde::Serialize;

use crate::models::{Note, Step};

/// Fill color for notes inside the current selection
pub const SELECTION_COLOR: &str = "var(--selection)";

/// Fill color for unselected notes
pub const TEXT_COLOR: &str = "var(--text-main)";

/// A note with its computed track-space geometry
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ProcessedNote {
    /// Position on the song timeline, in beats
    pub beat: f64,

    /// Duration in beats
    pub length: f64,

    /// Vertical position in track pixels
    pub y: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<Step>>,

    /// Horizontal position in track pixels
    pub x: f64,

    /// Rendered width in track pixels
    pub width: f64,

    /// SVG path of the note body
    pub d: String,

    pub color: String,

    /// The note's stored vertical position, before scaling
    #[serde(rename = "yOriginal")]
    pub y_original: f64,
}

/// Compute the track-space geometry of one note.
///
/// `beat_length` is the pixel width of one beat, `track_height` the pixel
/// height of the track. Notes present in `selected` take the selection color.
pub fn process_note(
    note: &Note,
    beat_length: f64,
    track_height: f64,
    selected: &[Note],
) -> ProcessedNote {
    let x = note.beat * beat_length;
    let y_scale = if note.y.is_finite() { note.y } else { 0.5 };
    let y = y_scale * track_height;
    let width = if note.length.is_finite() {
        note.length * beat_length
    } else {
        0.0
    };

    let mut d = format!("M {},{} L{},{}", x, y, x + width, y);
    if let Some(steps) = &note.steps {
        let points: Vec<String> = steps
            .iter()
            .map(|step| {
                let step_x = (note.beat + step.beat) * beat_length;
                let step_y = step.y * track_height;
                format!("{},{}", step_x, step_y)
            })
            .collect();
        d = format!("M {}", points.join(" L"));
        if d.contains("NaN") {
            log::error!("invalid step geometry: {}", d);
        }
    }

    let color = if selected.contains(note) {
        SELECTION_COLOR
    } else {
        TEXT_COLOR
    };

    ProcessedNote {
        beat: note.beat,
        length: note.length,
        y,
        steps: note.steps.clone(),
        x,
        width,
        d,
        color: color.to_string(),
        y_original: note.y,
    }
}

/// Geometry for a whole chart, in note order
pub fn process_notes(
    notes: &[Note],
    beat_length: f64,
    track_height: f64,
    selected: &[Note],
) -> Vec<ProcessedNote> {
    notes
        .iter()
        .map(|note| process_note(note, beat_length, track_height, selected))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_note_geometry() {
        let note = Note::new(2.0, 1.0, 0.25);
        let processed = process_note(&note, 100.0, 200.0, &[]);

        assert_eq!(processed.x, 200.0);
        assert_eq!(processed.y, 50.0);
        assert_eq!(processed.width, 100.0);
        assert_eq!(processed.d, "M 200,50 L300,50");
        assert_eq!(processed.y_original, 0.25);
        assert_eq!(processed.color, TEXT_COLOR);
    }

    #[test]
    fn test_zero_length_note_collapses_to_a_point() {
        let note = Note::new(2.0, 0.0, 0.25);
        let processed = process_note(&note, 100.0, 200.0, &[]);

        assert_eq!(processed.width, 0.0);
        assert_eq!(processed.d, "M 200,50 L200,50");
    }

    #[test]
    fn test_stepped_note_builds_a_polyline() {
        let mut note = Note::new(1.0, 0.0, 0.5);
        note.steps = Some(vec![Step::new(0.0, 0.5), Step::new(2.0, 1.0)]);
        let processed = process_note(&note, 10.0, 100.0, &[]);

        assert_eq!(processed.d, "M 10,50 L30,100");
    }

    #[test]
    fn test_selected_note_takes_selection_color() {
        let note = Note::new(0.0, 1.0, 0.5);
        let processed = process_note(&note, 10.0, 100.0, &[note.clone()]);
        assert_eq!(processed.color, SELECTION_COLOR);
    }

    #[test]
    fn test_non_finite_y_falls_back_to_midline() {
        let note = Note::new(0.0, 1.0, f64::NAN);
        let processed = process_note(&note, 10.0, 100.0, &[]);
        assert_eq!(processed.y, 50.0);
    }

    #[test]
    fn test_chart_geometry_preserves_note_order() {
        let notes = vec![Note::new(0.0, 1.0, 0.5), Note::new(4.0, 1.0, 0.5)];
        let processed = process_notes(&notes, 10.0, 100.0, &[]);
        assert_eq!(processed.len(), 2);
        assert_eq!(processed[0].x, 0.0);
        assert_eq!(processed[1].x, 40.0);
    }
}
