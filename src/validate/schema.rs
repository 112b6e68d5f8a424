//! Schema walk over a raw song document.
//!
//! Checks run on `serde_json::Value` rather than the typed model so that a
//! malformed candidate can be described field by field instead of failing at
//! the first parse error. Every violation carries the dotted path of the
//! offending field.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::{MAX_INTENSITY, MIN_INTENSITY};

/// One schema violation: where and what
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// Dotted path into the document, e.g. `difficulty.easy.notes[3].beat`
    pub path: String,

    /// What the field failed
    pub reason: String,
}

impl Violation {
    fn new(path: &str, reason: &str) -> Self {
        Self {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Keys a song document may carry at the top level
const KNOWN_SONG_KEYS: [&str; 11] = [
    "gameVersion",
    "name",
    "file",
    "file-no-melody",
    "file-editor",
    "beats-per-minute",
    "difficulty",
    "tutorial",
    "waveform",
    "length",
    "scoreboard_id",
];

/// Check a candidate document against the song schema, collecting every
/// violation instead of stopping at the first
pub fn check_song(candidate: &Value) -> Vec<Violation> {
    let mut violations = Vec::new();

    let song = match candidate.as_object() {
        Some(song) => song,
        None => {
            violations.push(Violation::new("", "must be an object"));
            return violations;
        }
    };

    // The audio file fields may be empty: a song without a separate
    // no-melody mix stores an empty string there
    for (key, allow_empty) in [
        ("gameVersion", false),
        ("name", false),
        ("file", true),
        ("file-no-melody", true),
    ] {
        match song.get(key) {
            Some(value) => check_string(value, key, allow_empty, &mut violations),
            None => violations.push(Violation::new(key, "is required")),
        }
    }

    for key in ["file-editor", "scoreboard_id"] {
        if let Some(value) = song.get(key) {
            check_string(value, key, false, &mut violations);
        }
    }

    for key in ["beats-per-minute", "length"] {
        match song.get(key) {
            Some(value) => check_number(value, key, &mut violations),
            None => violations.push(Violation::new(key, "is required")),
        }
    }

    match song.get("difficulty") {
        Some(value) => check_difficulty(value, "difficulty", &mut violations),
        None => violations.push(Violation::new("difficulty", "is required")),
    }

    if let Some(value) = song.get("tutorial") {
        check_tutorial(value, "tutorial", &mut violations);
    }

    if let Some(value) = song.get("waveform") {
        check_waveform(value, "waveform", &mut violations);
    }

    check_unknown_keys(song, "", &KNOWN_SONG_KEYS, &mut violations);

    violations
}

fn check_difficulty(value: &Value, path: &str, out: &mut Vec<Violation>) {
    let set = match value.as_object() {
        Some(set) => set,
        None => {
            out.push(Violation::new(path, "must be an object"));
            return;
        }
    };

    // easy and hard are mandatory charts; very-hard arrives with the alpha
    // migration and stays optional here
    for slot in ["easy", "hard"] {
        let slot_path = format!("{}.{}", path, slot);
        match set.get(slot) {
            Some(entry) => check_difficulty_entry(entry, &slot_path, out),
            None => out.push(Violation::new(&slot_path, "is required")),
        }
    }
    if let Some(entry) = set.get("very-hard") {
        check_difficulty_entry(entry, &format!("{}.very-hard", path), out);
    }

    check_unknown_keys(set, path, &["easy", "hard", "very-hard"], out);
}

fn check_difficulty_entry(value: &Value, path: &str, out: &mut Vec<Violation>) {
    let entry = match value.as_object() {
        Some(entry) => entry,
        None => {
            out.push(Violation::new(path, "must be an object"));
            return;
        }
    };

    let notes_path = format!("{}.notes", path);
    match entry.get("notes") {
        Some(notes) => check_notes(notes, &notes_path, out),
        None => out.push(Violation::new(&notes_path, "is required")),
    }

    let intensity_path = format!("{}.intensity", path);
    match entry.get("intensity") {
        Some(intensity) => check_intensity(intensity, &intensity_path, out),
        None => out.push(Violation::new(&intensity_path, "is required")),
    }

    check_unknown_keys(entry, path, &["notes", "intensity"], out);
}

fn check_intensity(value: &Value, path: &str, out: &mut Vec<Violation>) {
    match value.as_f64() {
        Some(intensity) => {
            if intensity < MIN_INTENSITY {
                out.push(Violation::new(path, "must be greater than or equal to 1"));
            }
            if intensity > MAX_INTENSITY {
                out.push(Violation::new(path, "must be less than or equal to 3"));
            }
        }
        None => out.push(Violation::new(path, "must be a number")),
    }
}

fn check_notes(value: &Value, path: &str, out: &mut Vec<Violation>) {
    let notes = match value.as_array() {
        Some(notes) => notes,
        None => {
            out.push(Violation::new(path, "must be an array"));
            return;
        }
    };

    for (index, note) in notes.iter().enumerate() {
        check_note(note, &format!("{}[{}]", path, index), out);
    }
}

fn check_note(value: &Value, path: &str, out: &mut Vec<Violation>) {
    let note = match value.as_object() {
        Some(note) => note,
        None => {
            out.push(Violation::new(path, "must be an object"));
            return;
        }
    };

    for key in ["beat", "y"] {
        let key_path = format!("{}.{}", path, key);
        match note.get(key) {
            Some(value) => check_number(value, &key_path, out),
            None => out.push(Violation::new(&key_path, "is required")),
        }
    }

    if let Some(length) = note.get("length") {
        check_number(length, &format!("{}.length", path), out);
    }

    if let Some(steps) = note.get("steps") {
        check_steps(steps, &format!("{}.steps", path), out);
    }

    check_unknown_keys(note, path, &["beat", "y", "length", "steps"], out);
}

fn check_steps(value: &Value, path: &str, out: &mut Vec<Violation>) {
    let steps = match value.as_array() {
        Some(steps) => steps,
        None => {
            out.push(Violation::new(path, "must be an array"));
            return;
        }
    };

    // A single vertex is not a polyline
    if steps.len() < 2 {
        out.push(Violation::new(path, "must contain at least 2 items"));
    }

    for (index, step) in steps.iter().enumerate() {
        let step_path = format!("{}[{}]", path, index);
        let step = match step.as_object() {
            Some(step) => step,
            None => {
                out.push(Violation::new(&step_path, "must be an object"));
                continue;
            }
        };

        for key in ["beat", "y"] {
            let key_path = format!("{}.{}", step_path, key);
            match step.get(key) {
                Some(value) => check_number(value, &key_path, out),
                None => out.push(Violation::new(&key_path, "is required")),
            }
        }

        check_unknown_keys(step, &step_path, &["beat", "y"], out);
    }
}

fn check_tutorial(value: &Value, path: &str, out: &mut Vec<Violation>) {
    let tutorial = match value.as_object() {
        Some(tutorial) => tutorial,
        None => {
            out.push(Violation::new(path, "must be an object"));
            return;
        }
    };

    if let Some(text) = tutorial.get("text") {
        let text_path = format!("{}.text", path);
        match text.as_array() {
            Some(entries) => {
                for (index, entry) in entries.iter().enumerate() {
                    // Text entries carry free-form extra keys, so no
                    // unknown-key check here
                    let entry_path = format!("{}[{}]", text_path, index);
                    let entry = match entry.as_object() {
                        Some(entry) => entry,
                        None => {
                            out.push(Violation::new(&entry_path, "must be an object"));
                            continue;
                        }
                    };
                    for key in ["start", "finish"] {
                        let key_path = format!("{}.{}", entry_path, key);
                        match entry.get(key) {
                            Some(value) => check_number(value, &key_path, out),
                            None => out.push(Violation::new(&key_path, "is required")),
                        }
                    }
                    for key in ["text", "textRetry"] {
                        if let Some(value) = entry.get(key) {
                            check_string(value, &format!("{}.{}", entry_path, key), false, out);
                        }
                    }
                }
            }
            None => out.push(Violation::new(&text_path, "must be an array")),
        }
    }

    if let Some(sections) = tutorial.get("sections") {
        let sections_path = format!("{}.sections", path);
        match sections.as_array() {
            Some(entries) => {
                for (index, entry) in entries.iter().enumerate() {
                    let entry_path = format!("{}[{}]", sections_path, index);
                    let entry = match entry.as_object() {
                        Some(entry) => entry,
                        None => {
                            out.push(Violation::new(&entry_path, "must be an object"));
                            continue;
                        }
                    };
                    for key in ["start", "finish"] {
                        let key_path = format!("{}.{}", entry_path, key);
                        match entry.get(key) {
                            Some(value) => check_number(value, &key_path, out),
                            None => out.push(Violation::new(&key_path, "is required")),
                        }
                    }
                    if let Some(fixed_y) = entry.get("fixedY") {
                        check_number(fixed_y, &format!("{}.fixedY", entry_path), out);
                    }
                    if let Some(crank) = entry.get("crankIndicator") {
                        if !crank.is_boolean() {
                            out.push(Violation::new(
                                &format!("{}.crankIndicator", entry_path),
                                "must be a boolean",
                            ));
                        }
                    }
                    check_unknown_keys(
                        entry,
                        &entry_path,
                        &["start", "finish", "fixedY", "crankIndicator"],
                        out,
                    );
                }
            }
            None => out.push(Violation::new(&sections_path, "must be an array")),
        }
    }

    check_unknown_keys(tutorial, path, &["text", "sections"], out);
}

fn check_waveform(value: &Value, path: &str, out: &mut Vec<Violation>) {
    let waveform = match value.as_object() {
        Some(waveform) => waveform,
        None => {
            out.push(Violation::new(path, "must be an object"));
            return;
        }
    };

    let max_path = format!("{}.max", path);
    match waveform.get("max") {
        Some(max) => check_number(max, &max_path, out),
        None => out.push(Violation::new(&max_path, "is required")),
    }

    let values_path = format!("{}.values", path);
    match waveform.get("values") {
        Some(values) => match values.as_array() {
            Some(values) => {
                for (index, value) in values.iter().enumerate() {
                    check_number(value, &format!("{}[{}]", values_path, index), out);
                }
            }
            None => out.push(Violation::new(&values_path, "must be an array")),
        },
        None => out.push(Violation::new(&values_path, "is required")),
    }

    check_unknown_keys(waveform, path, &["max", "values"], out);
}

fn check_string(value: &Value, path: &str, allow_empty: bool, out: &mut Vec<Violation>) {
    match value.as_str() {
        Some(text) => {
            if text.is_empty() && !allow_empty {
                out.push(Violation::new(path, "is not allowed to be empty"));
            }
        }
        None => out.push(Violation::new(path, "must be a string")),
    }
}

fn check_number(value: &Value, path: &str, out: &mut Vec<Violation>) {
    if !value.is_number() {
        out.push(Violation::new(path, "must be a number"));
    }
}

fn check_unknown_keys(
    object: &Map<String, Value>,
    path: &str,
    known: &[&str],
    out: &mut Vec<Violation>,
) {
    for key in object.keys() {
        if !known.contains(&key.as_str()) {
            let key_path = if path.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", path, key)
            };
            out.push(Violation::new(&key_path, "is not allowed"));
        }
    }
}
