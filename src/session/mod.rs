//! Edit session: one open song, one active difficulty, one history manager.
//!
//! All editor state lives in an [`EditorSession`] instance owned by the
//! caller; there is no process-wide document. The history manager holds the
//! active difficulty's live note list and is replaced wholesale on every
//! difficulty switch, so undo and redo never cross charts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::history::{HistoryStatus, NoteHistory};
use crate::models::{DifficultyName, Note, Song};

/// Transport position of the editor's playback cursor
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct PlaybackTime {
    pub seconds: f64,
    pub beats: f64,
}

/// Session misuse errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The requested difficulty has no chart in this song
    #[error("difficulty '{0}' is not present in this song")]
    MissingDifficulty(DifficultyName),
}

/// An open song being edited
#[derive(Debug, Clone)]
pub struct EditorSession {
    song: Song,
    active: DifficultyName,
    history: NoteHistory,
    playback: PlaybackTime,
}

impl EditorSession {
    /// Open `song` for editing on the given difficulty.
    ///
    /// The chart's notes are adopted without a history entry: the opened
    /// state is the undo floor.
    pub fn open(song: Song, difficulty: DifficultyName) -> Result<Self, SessionError> {
        let notes = match song.difficulty.get(difficulty) {
            Some(entry) => entry.notes.clone(),
            None => return Err(SessionError::MissingDifficulty(difficulty)),
        };
        log::debug!("opened song '{}' on {}", song.name, difficulty);
        Ok(Self {
            song,
            active: difficulty,
            history: NoteHistory::adopt(notes),
            playback: PlaybackTime::default(),
        })
    }

    /// The live note list of the active difficulty
    pub fn notes(&self) -> &[Note] {
        self.history.notes()
    }

    /// The difficulty currently being edited
    pub fn active_difficulty(&self) -> DifficultyName {
        self.active
    }

    /// Apply an edited note list to the active difficulty
    pub fn set_notes(&mut self, notes: Vec<Note>) {
        self.history.set_notes(notes, true, true);
    }

    /// Undo the last gesture; false when there is nothing to undo
    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    /// Redo the last undone gesture; false when there is nothing to redo
    pub fn redo(&mut self) -> bool {
        self.history.redo()
    }

    /// Undo/redo availability for the UI
    pub fn history_status(&self) -> HistoryStatus {
        self.history.status()
    }

    /// Switch the active difficulty.
    ///
    /// Live edits are written back to the outgoing chart first, then the
    /// history manager is replaced with a fresh one adopting the incoming
    /// chart. Undo stacks never survive a switch.
    pub fn select_difficulty(&mut self, difficulty: DifficultyName) -> Result<(), SessionError> {
        if self.song.difficulty.get(difficulty).is_none() {
            return Err(SessionError::MissingDifficulty(difficulty));
        }
        self.commit_live_notes();
        self.active = difficulty;
        let notes = self
            .song
            .difficulty
            .get(difficulty)
            .map(|entry| entry.notes.clone())
            .unwrap_or_default();
        self.history = NoteHistory::adopt(notes);
        Ok(())
    }

    /// The document with the live note list written back; the save surface
    pub fn snapshot_song(&self) -> Song {
        let mut song = self.song.clone();
        if let Some(entry) = song.difficulty.get_mut(self.active) {
            entry.notes = self.history.notes().to_vec();
        }
        song
    }

    /// Move the playback cursor
    pub fn set_playback_time(&mut self, seconds: f64, beats: f64) {
        self.playback = PlaybackTime { seconds, beats };
    }

    /// Current playback cursor position
    pub fn playback_time(&self) -> PlaybackTime {
        self.playback
    }

    fn commit_live_notes(&mut self) {
        if let Some(entry) = self.song.difficulty.get_mut(self.active) {
            entry.notes = self.history.notes().to_vec();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    fn song_with_notes() -> Song {
        let mut song = Song::new("Session Test");
        song.difficulty.easy.notes = vec![Note::new(0.0, 1.0, 0.5), Note::new(2.0, 1.0, 0.5)];
        song.difficulty.hard.notes = vec![Note::new(1.0, 0.5, 0.25)];
        song
    }

    #[test]
    fn test_open_adopts_notes_without_history() {
        let song = song_with_notes();
        let session = EditorSession::open(song.clone(), DifficultyName::Easy).unwrap();

        assert_eq!(session.notes(), song.difficulty.easy.notes.as_slice());
        assert!(!session.history_status().can_undo);
    }

    #[test]
    fn test_open_on_absent_difficulty_fails() {
        let mut song = song_with_notes();
        song.difficulty.very_hard = None;

        let err = EditorSession::open(song, DifficultyName::VeryHard).unwrap_err();
        assert_eq!(err, SessionError::MissingDifficulty(DifficultyName::VeryHard));
    }

    #[test]
    fn test_edits_appear_in_the_song_snapshot() {
        let mut session =
            EditorSession::open(song_with_notes(), DifficultyName::Easy).unwrap();
        let mut notes = session.notes().to_vec();
        notes.push(Note::new(4.0, 1.0, 0.75));
        session.set_notes(notes.clone());

        let snapshot = session.snapshot_song();
        assert_eq!(snapshot.difficulty.easy.notes, notes);
        // The other charts are untouched
        assert_eq!(snapshot.difficulty.hard.notes.len(), 1);
    }

    #[test]
    fn test_undo_restores_the_opened_chart() {
        let song = song_with_notes();
        let mut session = EditorSession::open(song.clone(), DifficultyName::Easy).unwrap();
        session.set_notes(vec![Note::new(9.0, 1.0, 0.1)]);

        assert!(session.undo());
        assert_eq!(session.notes(), song.difficulty.easy.notes.as_slice());
        assert!(!session.undo());
    }

    #[test]
    fn test_difficulty_switch_commits_and_discards_history() {
        let mut session =
            EditorSession::open(song_with_notes(), DifficultyName::Easy).unwrap();
        let edited = vec![Note::new(8.0, 2.0, 0.9)];
        session.set_notes(edited.clone());
        assert!(session.history_status().can_undo);

        session.select_difficulty(DifficultyName::Hard).unwrap();
        assert_eq!(session.active_difficulty(), DifficultyName::Hard);
        assert!(!session.history_status().can_undo);

        // The outgoing edits were written back
        session.select_difficulty(DifficultyName::Easy).unwrap();
        assert_eq!(session.notes(), edited.as_slice());
    }

    #[test]
    fn test_switch_to_absent_chart_changes_nothing() {
        let mut song = song_with_notes();
        song.difficulty.very_hard = None;
        let mut session = EditorSession::open(song, DifficultyName::Easy).unwrap();
        session.set_notes(vec![Note::new(5.0, 1.0, 0.5)]);

        assert!(session.select_difficulty(DifficultyName::VeryHard).is_err());
        assert_eq!(session.active_difficulty(), DifficultyName::Easy);
        assert!(session.history_status().can_undo);
    }

    #[test]
    fn test_empty_very_hard_chart_is_editable() {
        let mut song = song_with_notes();
        song.difficulty.very_hard = Some(Difficulty::default());
        let mut session = EditorSession::open(song, DifficultyName::VeryHard).unwrap();

        session.set_notes(vec![Note::new(0.0, 1.0, 0.5)]);
        assert!(session.undo());
        assert!(session.notes().is_empty());
        assert!(session.redo());
        assert_eq!(session.notes().len(), 1);
    }

    #[test]
    fn test_playback_time_round_trips() {
        let mut session =
            EditorSession::open(song_with_notes(), DifficultyName::Easy).unwrap();
        assert_eq!(session.playback_time(), PlaybackTime::default());

        session.set_playback_time(12.5, 25.0);
        assert_eq!(
            session.playback_time(),
            PlaybackTime {
                seconds: 12.5,
                beats: 25.0
            }
        );
    }
}
