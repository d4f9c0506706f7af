//! User-facing strings, looked up by key from an embedded JSON table.
//!
//! Entries may contain `{{name}}` placeholders filled with [`TextEntry::set`].

use std::collections::HashMap;
use std::fmt;

const EMBEDDED_TEXT: &str = include_str!("text.json");

#[derive(Debug, Clone, Default)]
pub struct TextMap {
    table: HashMap<String, String>,
}

impl TextMap {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            table: serde_json::from_str(json)?,
        })
    }

    /// The table shipped with the binary.
    pub fn embedded() -> Self {
        Self::from_json(EMBEDDED_TEXT).unwrap_or_else(|e| {
            tracing::error!("embedded text table is invalid: {}", e);
            Self::default()
        })
    }

    /// Entry for `key`, or an empty entry when the key is unknown.
    pub fn of(&self, key: &str) -> TextEntry {
        TextEntry(self.table.get(key).cloned().unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEntry(String);

impl TextEntry {
    /// Replace every `{{key}}` placeholder with `value`.
    pub fn set(self, key: &str, value: impl fmt::Display) -> Self {
        let placeholder = format!("{{{{{}}}}}", key);
        TextEntry(self.0.replace(&placeholder, &value.to_string()))
    }
}

impl fmt::Display for TextEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<TextEntry> for String {
    fn from(entry: TextEntry) -> Self {
        entry.0
    }
}
