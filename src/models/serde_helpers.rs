//! Serde field helpers for the legacy song wire format

use serde::{Deserialize, Deserializer};

/// Deserialize a numeric field that legacy files may hold as null, reading
/// null (or a missing value) as 0
pub fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.unwrap_or(0.0))
}
