//! Song validation: a best-effort fix pass, then a schema check.
//!
//! Candidates arrive as raw JSON values because they may be arbitrarily
//! malformed; a typed [`Song`] exists only once validation succeeds.

pub mod schema;

pub use schema::{check_song, Violation};

use serde_json::Value;
use thiserror::Error;

use crate::models::Song;

/// Validation failure carrying every violation found
#[derive(Debug, Clone, Error, PartialEq)]
#[error("song validation failed with {} violation(s)", .violations.len())]
pub struct ValidationError {
    /// Violations in document order
    pub violations: Vec<Violation>,
}

/// Validate a raw candidate document.
///
/// Runs the fix pass on a copy, then the schema check. A candidate whose
/// gross shape the fix pass cannot even walk is checked as-is. On success
/// the fixed document deserializes into a typed [`Song`].
pub fn validate_song(candidate: &Value) -> Result<Song, ValidationError> {
    let fixed = match autofix(candidate) {
        Some(fixed) => fixed,
        None => candidate.clone(),
    };

    let violations = schema::check_song(&fixed);
    if !violations.is_empty() {
        return Err(ValidationError { violations });
    }

    serde_json::from_value(fixed).map_err(|err| ValidationError {
        violations: vec![Violation {
            path: String::new(),
            reason: format!("does not deserialize: {}", err),
        }],
    })
}

/// Best-effort repair of common defects in older files: null note lengths
/// become 0, steps with a null coordinate are discarded, and a steps list
/// left with fewer than 2 vertices is removed outright.
///
/// Returns None when the candidate's shape rules fixing out (no difficulty
/// object, a non-array notes field, null where a note or step belongs); the
/// caller then validates the candidate as-is.
fn autofix(candidate: &Value) -> Option<Value> {
    let mut fixed = candidate.clone();
    let difficulty = fixed.get_mut("difficulty")?.as_object_mut()?;

    for entry in difficulty.values_mut() {
        let notes = entry.get_mut("notes")?.as_array_mut()?;
        for note in notes {
            if note.is_null() {
                return None;
            }
            let fields = match note.as_object_mut() {
                Some(fields) => fields,
                // A non-object note is left for the schema check to report
                None => continue,
            };

            if fields.get("length") == Some(&Value::Null) {
                fields.insert("length".to_string(), Value::from(0));
            }

            let remove_steps = match fields.get_mut("steps") {
                None => false,
                Some(Value::Null) => true,
                Some(Value::Array(steps)) => {
                    if steps.iter().any(Value::is_null) {
                        return None;
                    }
                    steps.retain(|step| match step.as_object() {
                        Some(step) => {
                            step.get("beat") != Some(&Value::Null)
                                && step.get("y") != Some(&Value::Null)
                        }
                        None => true,
                    });
                    steps.len() < 2
                }
                Some(_) => return None,
            };
            if remove_steps {
                fields.remove("steps");
            }
        }
    }

    Some(fixed)
}
