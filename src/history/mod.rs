//! Snapshot-based undo/redo over a difficulty's live note list.
//!
//! Edits arrive as whole note lists. A list whose structural size matches the
//! live one is coalesced into the open gesture, so a whole drag costs one undo
//! boundary; a list that gained or lost a note or step starts a new gesture.

use serde::Serialize;

use crate::models::{size_signature, Note};

/// Undo/redo availability, reported to the UI after every history operation
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryStatus {
    #[serde(rename = "canUndo")]
    pub can_undo: bool,

    #[serde(rename = "canRedo")]
    pub can_redo: bool,
}

/// History manager for one difficulty's note list.
///
/// Owns the live list for the duration of an edit session. Snapshots are deep
/// copies; the undo stack holds the state left behind at each gesture
/// boundary, most recent last.
#[derive(Debug, Clone, Default)]
pub struct NoteHistory {
    current: Vec<Note>,
    undo_stack: Vec<Vec<Note>>,
    redo_stack: Vec<Vec<Note>>,
}

impl NoteHistory {
    /// Create an empty history manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt `notes` as the live list without recording a history entry.
    /// The adopted state is the undo floor.
    pub fn adopt(notes: Vec<Note>) -> Self {
        Self {
            current: notes,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// The live note list
    pub fn notes(&self) -> &[Note] {
        &self.current
    }

    /// Replace the live note list.
    ///
    /// Takes the list by value: the caller hands over ownership and no alias
    /// to the live state survives outside the manager.
    ///
    /// With `add_to_history`, the outgoing state is pushed as a new undo
    /// boundary unless the incoming list's size signature matches the live
    /// one, in which case the edit coalesces into the open gesture and the
    /// boundary already on the stack stands. `reset_future` clears the redo
    /// stack; ordinary edits pass true, undo and redo pass false to keep the
    /// future alive.
    pub fn set_notes(&mut self, new_notes: Vec<Note>, add_to_history: bool, reset_future: bool) {
        if add_to_history {
            let coalesce = !self.undo_stack.is_empty()
                && size_signature(&new_notes) == size_signature(&self.current);
            if !coalesce {
                self.undo_stack.push(self.current.clone());
            }
        }
        self.current = new_notes;
        if reset_future {
            self.redo_stack.clear();
        }
    }

    /// Step back to the last undo boundary. No-op returning false when there
    /// is none.
    ///
    /// The state being undone moves to the redo stack unless it is an empty
    /// list; an emptied-out chart is never offered for redo.
    pub fn undo(&mut self) -> bool {
        let snapshot = match self.undo_stack.pop() {
            Some(snapshot) => snapshot,
            None => return false,
        };
        let outgoing = self.current.clone();
        self.set_notes(snapshot, false, false);
        if !outgoing.is_empty() {
            self.redo_stack.push(outgoing);
        }
        true
    }

    /// Step forward to the last undone state. No-op returning false when
    /// there is none.
    ///
    /// Re-enters `set_notes` with history recording on, so the restored state
    /// may coalesce with the open gesture instead of pushing a new boundary.
    pub fn redo(&mut self) -> bool {
        let next = match self.redo_stack.pop() {
            Some(next) => next,
            None => return false,
        };
        self.set_notes(next, true, false);
        true
    }

    /// Whether an undo boundary is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether an undone state is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Current undo/redo availability
    pub fn status(&self) -> HistoryStatus {
        HistoryStatus {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Step;

    fn note(beat: f64, y: f64) -> Note {
        Note::new(beat, 1.0, y)
    }

    fn chart(beats: &[f64]) -> Vec<Note> {
        beats.iter().map(|&beat| note(beat, 0.5)).collect()
    }

    /// Drain the undo stack, counting how many boundaries it held
    fn undo_steps(history: &mut NoteHistory) -> usize {
        let mut steps = 0;
        while history.undo() {
            steps += 1;
        }
        steps
    }

    #[test]
    fn test_fresh_manager_is_inert() {
        let mut history = NoteHistory::new();
        assert!(!history.undo());
        assert!(!history.redo());
        assert!(history.notes().is_empty());
        assert_eq!(
            history.status(),
            HistoryStatus {
                can_undo: false,
                can_redo: false
            }
        );
    }

    #[test]
    fn test_set_undo_redo_round_trip() {
        let a = chart(&[0.0, 2.0]);
        let b = chart(&[0.0, 2.0, 4.0]);

        let mut history = NoteHistory::adopt(a.clone());
        history.set_notes(b.clone(), true, true);
        assert_eq!(history.notes(), b.as_slice());

        assert!(history.undo());
        assert_eq!(history.notes(), a.as_slice());
        assert!(history.can_redo());

        assert!(history.redo());
        assert_eq!(history.notes(), b.as_slice());
        assert!(history.can_undo());
    }

    #[test]
    fn test_size_preserving_run_coalesces_into_one_boundary() {
        let start = chart(&[0.0, 2.0, 4.0]);
        let mut history = NoteHistory::adopt(start.clone());

        for i in 1..=5 {
            let mut moved = start.clone();
            moved[0].y = 0.1 * i as f64;
            history.set_notes(moved, true, true);
        }

        assert_eq!(undo_steps(&mut history), 1);
        assert_eq!(history.notes(), start.as_slice());
    }

    #[test]
    fn test_structural_change_opens_a_new_boundary() {
        let two = chart(&[0.0, 2.0]);
        let three = chart(&[0.0, 2.0, 4.0]);
        let four = chart(&[0.0, 2.0, 4.0, 6.0]);

        let mut history = NoteHistory::adopt(two.clone());
        history.set_notes(three.clone(), true, true);
        history.set_notes(four, true, true);

        assert!(history.undo());
        assert_eq!(history.notes(), three.as_slice());
        assert!(history.undo());
        assert_eq!(history.notes(), two.as_slice());
        assert!(!history.undo());
    }

    #[test]
    fn test_step_count_feeds_the_size_signature() {
        let plain = chart(&[0.0, 2.0]);
        let mut bent = plain.clone();
        bent[1].steps = Some(vec![Step::new(0.0, 0.2), Step::new(1.0, 0.8)]);

        let mut history = NoteHistory::adopt(plain.clone());
        // Same note count, but the added steps change the structural size
        history.set_notes(bent, true, true);

        assert!(history.undo());
        assert_eq!(history.notes(), plain.as_slice());
    }

    #[test]
    fn test_undo_of_emptied_chart_offers_no_redo() {
        let full = chart(&[0.0, 2.0]);
        let mut history = NoteHistory::adopt(full.clone());
        history.set_notes(Vec::new(), true, true);

        assert!(history.undo());
        assert_eq!(history.notes(), full.as_slice());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_new_edit_discards_the_future() {
        let mut history = NoteHistory::adopt(chart(&[0.0]));
        history.set_notes(chart(&[0.0, 2.0]), true, true);
        assert!(history.undo());
        assert!(history.can_redo());

        history.set_notes(chart(&[0.0, 4.0]), true, true);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_boundaries_are_isolated_from_later_edits() {
        let original = chart(&[0.0, 2.0]);
        let mut history = NoteHistory::adopt(original.clone());

        let mut grown = original.clone();
        grown.push(note(4.0, 0.25));
        history.set_notes(grown.clone(), true, true);

        // Mutate the live list through further edits
        let mut mutated = grown.clone();
        mutated[0].beat = 99.0;
        mutated[0].y = 0.99;
        history.set_notes(mutated, true, true);

        assert!(history.undo());
        assert!(history.undo());
        assert_eq!(history.notes(), original.as_slice());
    }

    #[test]
    fn test_consecutive_size_changes_each_push() {
        let mut history = NoteHistory::adopt(chart(&[0.0]));
        history.set_notes(chart(&[0.0, 1.0]), true, true);
        history.set_notes(chart(&[0.0, 1.0, 2.0]), true, true);
        history.set_notes(chart(&[0.0, 1.0, 2.0, 3.0]), true, true);
        assert_eq!(undo_steps(&mut history), 3);
    }

    #[test]
    fn test_status_serializes_with_js_field_names() {
        let status = HistoryStatus {
            can_undo: true,
            can_redo: false,
        };
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, r#"{"canUndo":true,"canRedo":false}"#);
    }
}
