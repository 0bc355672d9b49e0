use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::Value;

/// The fixed survey question bank, loaded once at startup and shared read-only.
///
/// The document is served to clients as-is; the service only requires that it
/// is a JSON object or array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct QuestionBank(Value);

impl QuestionBank {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read question bank at {}", path.display()))?;
        let value: Value = serde_json::from_str(&text)
            .with_context(|| format!("Question bank at {} is not valid JSON", path.display()))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        if !(value.is_object() || value.is_array()) {
            bail!("Question bank must be a JSON object or array");
        }
        Ok(Self(value))
    }

    /// Number of top-level entries (categories for an object, questions for an array).
    pub fn entry_count(&self) -> usize {
        match &self.0 {
            Value::Object(map) => map.len(),
            Value::Array(items) => items.len(),
            _ => 0,
        }
    }
}
