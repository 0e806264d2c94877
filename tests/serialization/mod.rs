//! Serialization tests
//!
//! JSON output of converted projects:
//! - Output shape of a full library, determinism, files on disk
//! - Custom workers added to the pipeline

pub mod tests_output;
pub mod tests_workers;

use serde_json::Value;

static MISSING: Value = Value::Null;

/// Follow `path` through nested `children` arrays by name; `null` if any
/// step is missing.
pub fn json_child<'v>(value: &'v Value, path: &[&str]) -> &'v Value {
    path.iter().fold(value, |current, name| {
        current["children"]
            .as_array()
            .and_then(|children| children.iter().find(|c| c["name"] == *name))
            .unwrap_or(&MISSING)
    })
}
