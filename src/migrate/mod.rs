//! Game-version migrations for song documents.
//!
//! Documents carry a `gameVersion` stamp. Loading runs every registered
//! migration in order on a copy of the document; each step only adds missing
//! fields or normalizes values, so re-running the chain is harmless.

use thiserror::Error;

use crate::models::{Difficulty, Song, DEFAULT_INTENSITY};

/// Version id of the newest migration; freshly migrated documents carry it
pub const LATEST_GAME_VERSION: &str = "beta-2024-12-20";

/// Error from a migration chain run
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MigrationError {
    /// A step refused the document; the chain stopped and the input was
    /// left untouched
    #[error("migration '{version}' failed: {reason}")]
    Step { version: String, reason: String },
}

/// A single named migration step
pub struct Migration {
    /// Version id stamped onto the document after this step succeeds
    pub version: &'static str,
    apply: fn(&mut Song) -> Result<(), String>,
}

/// The migration chain, in the order it runs
pub fn registry() -> Vec<Migration> {
    vec![
        Migration {
            version: "alpha-07-01-2024",
            apply: add_very_hard_and_default_intensity,
        },
        Migration {
            version: "beta-2024-12-20",
            apply: normalize_song_length,
        },
    ]
}

/// Run the full migration chain on a copy of `song`.
///
/// Every step runs regardless of the document's current stamp; steps are
/// idempotent, so an already-migrated document passes through unchanged.
/// A failing step aborts the chain and nothing partial is returned.
pub fn migrate(song: &Song) -> Result<Song, MigrationError> {
    let mut migrated = song.clone();
    for step in registry() {
        (step.apply)(&mut migrated).map_err(|reason| MigrationError::Step {
            version: step.version.to_string(),
            reason,
        })?;
        migrated.game_version = step.version.to_string();
    }
    if migrated.game_version != song.game_version {
        log::debug!(
            "migrated song '{}' from '{}' to '{}'",
            migrated.name,
            song.game_version,
            migrated.game_version
        );
    }
    Ok(migrated)
}

/// `alpha-07-01-2024`: introduce the very-hard difficulty and ratings.
///
/// Adds an empty very-hard chart when the document has none and rates any
/// unrated difficulty at the default intensity. Ratings already in range are
/// left alone.
fn add_very_hard_and_default_intensity(song: &mut Song) -> Result<(), String> {
    if song.difficulty.very_hard.is_none() {
        song.difficulty.very_hard = Some(Difficulty::default());
    }
    for (_, difficulty) in song.difficulty.iter_mut() {
        if !difficulty.is_rated() {
            difficulty.intensity = DEFAULT_INTENSITY;
        }
    }
    Ok(())
}

/// `beta-2024-12-20`: every song carries a length. Missing or null lengths
/// already read back as 0; anything non-finite is normalized to 0 here.
fn normalize_song_length(song: &mut Song) -> Result<(), String> {
    if !song.length.is_finite() {
        song.length = 0.0;
    }
    Ok(())
}
