//! Song document model: the versioned JSON document the editor edits.
//!
//! Field names follow the persisted wire format, which mixes camelCase
//! (`gameVersion`), kebab-case (`beats-per-minute`) and snake_case
//! (`scoreboard_id`) keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::note::Note;
use super::serde_helpers::null_as_zero;
use crate::migrate::LATEST_GAME_VERSION;

/// Lowest allowed difficulty rating
pub const MIN_INTENSITY: f64 = 1.0;

/// Highest allowed difficulty rating
pub const MAX_INTENSITY: f64 = 3.0;

/// Rating assigned to difficulties that were never rated
pub const DEFAULT_INTENSITY: f64 = 1.0;

/// Difficulty slot names, in track order
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum DifficultyName {
    Easy,
    Hard,
    VeryHard,
}

impl DifficultyName {
    /// All slots in their fixed track order
    pub const ALL: [DifficultyName; 3] = [
        DifficultyName::Easy,
        DifficultyName::Hard,
        DifficultyName::VeryHard,
    ];

    /// The wire name of this slot
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyName::Easy => "easy",
            DifficultyName::Hard => "hard",
            DifficultyName::VeryHard => "very-hard",
        }
    }
}

impl fmt::Display for DifficultyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifficultyName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(DifficultyName::Easy),
            "hard" => Ok(DifficultyName::Hard),
            "very-hard" => Ok(DifficultyName::VeryHard),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

/// One difficulty's note chart and its rating
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Difficulty {
    /// Notes ordered along the timeline
    pub notes: Vec<Note>,

    /// Rating from 1 (easiest) to 3; reads as 0 for documents written
    /// before ratings existed
    #[serde(default)]
    pub intensity: f64,
}

impl Difficulty {
    /// Whether the rating has been set to a value in the allowed range
    pub fn is_rated(&self) -> bool {
        (MIN_INTENSITY..=MAX_INTENSITY).contains(&self.intensity)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            notes: Vec::new(),
            intensity: DEFAULT_INTENSITY,
        }
    }
}

/// The song's difficulty charts in their fixed easy → hard → very-hard order.
///
/// An explicit struct rather than a map: iteration order is part of the
/// contract and never depends on key order in the source file.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DifficultySet {
    pub easy: Difficulty,

    pub hard: Difficulty,

    /// Added by the `alpha-07-01-2024` migration; absent in older documents
    #[serde(rename = "very-hard", default, skip_serializing_if = "Option::is_none")]
    pub very_hard: Option<Difficulty>,
}

impl DifficultySet {
    /// Look up a difficulty slot
    pub fn get(&self, name: DifficultyName) -> Option<&Difficulty> {
        match name {
            DifficultyName::Easy => Some(&self.easy),
            DifficultyName::Hard => Some(&self.hard),
            DifficultyName::VeryHard => self.very_hard.as_ref(),
        }
    }

    /// Mutable difficulty slot lookup
    pub fn get_mut(&mut self, name: DifficultyName) -> Option<&mut Difficulty> {
        match name {
            DifficultyName::Easy => Some(&mut self.easy),
            DifficultyName::Hard => Some(&mut self.hard),
            DifficultyName::VeryHard => self.very_hard.as_mut(),
        }
    }

    /// Iterate the present slots in track order
    pub fn iter(&self) -> impl Iterator<Item = (DifficultyName, &Difficulty)> + '_ {
        [
            (DifficultyName::Easy, Some(&self.easy)),
            (DifficultyName::Hard, Some(&self.hard)),
            (DifficultyName::VeryHard, self.very_hard.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, difficulty)| difficulty.map(|d| (name, d)))
    }

    /// Iterate the present slots mutably, in track order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (DifficultyName, &mut Difficulty)> + '_ {
        [
            (DifficultyName::Easy, Some(&mut self.easy)),
            (DifficultyName::Hard, Some(&mut self.hard)),
            (DifficultyName::VeryHard, self.very_hard.as_mut()),
        ]
        .into_iter()
        .filter_map(|(name, difficulty)| difficulty.map(|d| (name, d)))
    }
}

/// Precomputed audio peak summary rendered behind the track
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Waveform {
    /// Largest value in `values`
    pub max: f64,

    /// Per-window peak amplitudes
    pub values: Vec<f64>,
}

/// A complete song document as persisted on disk
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Song {
    /// Migration version stamp; the migrator raises it to the latest id
    #[serde(rename = "gameVersion", default)]
    pub game_version: String,

    /// Display name
    pub name: String,

    /// Audio file with the full mix
    pub file: String,

    /// Audio file without the melody track; empty when the song has none
    #[serde(rename = "file-no-melody")]
    pub file_no_melody: String,

    /// Source project file for the audio, kept for editing round-trips
    #[serde(rename = "file-editor", default, skip_serializing_if = "Option::is_none")]
    pub file_editor: Option<String>,

    #[serde(rename = "beats-per-minute")]
    pub beats_per_minute: f64,

    /// Note charts per difficulty
    pub difficulty: DifficultySet,

    /// Tutorial timeline; opaque to the model, shape-checked by the validator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tutorial: Option<serde_json::Value>,

    /// Audio peak summary, regenerated whenever the audio changes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waveform: Option<Waveform>,

    /// Song length in seconds; legacy nulls read back as 0
    #[serde(default, deserialize_with = "null_as_zero")]
    pub length: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoreboard_id: Option<String>,
}

impl Song {
    /// Create an empty song at the latest game version
    pub fn new(name: &str) -> Self {
        Self {
            game_version: LATEST_GAME_VERSION.to_string(),
            name: name.to_string(),
            file: String::new(),
            file_no_melody: String::new(),
            file_editor: None,
            beats_per_minute: 120.0,
            difficulty: DifficultySet {
                easy: Difficulty::default(),
                hard: Difficulty::default(),
                very_hard: Some(Difficulty::default()),
            },
            tutorial: None,
            waveform: None,
            length: 0.0,
            scoreboard_id: None,
        }
    }

    /// Parse a song from JSON text, tolerating legacy gaps (missing
    /// `very-hard`, missing `length`, null note lengths)
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Serialize to the persisted JSON format
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
