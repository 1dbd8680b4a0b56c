// Keynorm Code Map
// Physical key code to human-readable glyph table

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use serde::Deserialize;

include!(concat!(env!("OUT_DIR"), "/builtin_code_map.rs"));

static BUILTIN: LazyLock<CodeMap> = LazyLock::new(|| {
    let map = CodeMap::from_entries(
        BUILTIN_ENTRIES
            .iter()
            .map(|&(code, value, shift)| (code, CodeMapEntry::new(value, shift))),
    );
    log::debug!("Builtin code map loaded with {} entries", map.len());
    map
});

/// Errors that can occur when loading a custom code map
#[derive(Debug, thiserror::Error)]
pub enum CodeMapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Code map parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Glyphs for one physical key
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodeMapEntry {
    /// Unshifted glyph
    #[serde(rename = "value")]
    pub base: String,
    /// Shifted glyph, when the key has a distinct one
    #[serde(rename = "shift", default)]
    pub shifted: Option<String>,
}

impl CodeMapEntry {
    /// Create an entry from its unshifted and optional shifted glyph
    pub fn new(base: impl Into<String>, shifted: Option<&str>) -> Self {
        Self {
            base: base.into(),
            shifted: shifted.map(str::to_string),
        }
    }

    /// Glyph to show for this key given the shift state
    pub fn label(&self, shift: bool) -> &str {
        match (&self.shifted, shift) {
            (Some(shifted), true) => shifted,
            _ => &self.base,
        }
    }
}

/// Immutable table from physical key code (`"KeyZ"`) to its glyphs.
///
/// Lookups are exact-match on the code string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct CodeMap {
    entries: HashMap<String, CodeMapEntry>,
}

impl CodeMap {
    /// Shared builtin table (US layout), built on first access
    pub fn builtin() -> &'static CodeMap {
        &BUILTIN
    }

    /// Build a table from `(code, entry)` pairs
    pub fn from_entries<S: Into<String>>(
        entries: impl IntoIterator<Item = (S, CodeMapEntry)>,
    ) -> Self {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Parse a code map from JSON: `{"KeyZ": {"value": "z"}, "Digit1": {"value": "1", "shift": "!"}}`
    pub fn from_json_str(content: &str) -> Result<Self, CodeMapError> {
        let map: CodeMap = serde_json::from_str(content)?;
        log::debug!("Custom code map parsed with {} entries", map.len());
        Ok(map)
    }

    /// Load a code map from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CodeMapError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Entry for a code, exact match only
    pub fn get(&self, code: &str) -> Option<&CodeMapEntry> {
        self.entries.get(code)
    }

    /// Glyph for a code, or `None` if the code is not in the table
    pub fn label(&self, code: &str, shift: bool) -> Option<&str> {
        self.get(code).map(|entry| entry.label(shift))
    }

    /// Glyph for a code, falling back to the raw code string
    pub fn friendly_code<'a>(&'a self, code: &'a str, shift: bool) -> &'a str {
        self.label(code, shift).unwrap_or(code)
    }

    /// Number of codes in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_letters_have_no_shift_variant() {
        let map = CodeMap::builtin();
        assert_eq!(map.label("KeyZ", false), Some("z"));
        assert_eq!(map.label("KeyZ", true), Some("z"));
        assert_eq!(map.get("KeyA").and_then(|e| e.shifted.as_deref()), None);
    }

    #[test]
    fn test_builtin_shift_variants() {
        let map = CodeMap::builtin();
        assert_eq!(map.label("Digit1", false), Some("1"));
        assert_eq!(map.label("Digit1", true), Some("!"));
        assert_eq!(map.label("Slash", true), Some("?"));
        assert_eq!(map.label("Backquote", true), Some("~"));
    }

    #[test]
    fn test_friendly_code_fallback() {
        let map = CodeMap::builtin();
        assert_eq!(map.friendly_code("Foo123", false), "Foo123");
        assert_eq!(map.friendly_code("Foo123", true), "Foo123");
        // Exact match only
        assert_eq!(map.friendly_code("keyz", false), "keyz");
    }

    #[test]
    fn test_from_json_str() {
        let map = CodeMap::from_json_str(
            r#"{"KeyQ": {"value": "a"}, "Digit2": {"value": "é", "shift": "2"}}"#,
        )
        .unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.label("KeyQ", true), Some("a"));
        assert_eq!(map.label("Digit2", true), Some("2"));
        assert_eq!(map.label("KeyZ", false), None);
    }

    #[test]
    fn test_from_json_str_rejects_unknown_entry_fields() {
        let result = CodeMap::from_json_str(r#"{"KeyQ": {"value": "a", "alt": "b"}}"#);
        assert!(matches!(result, Err(CodeMapError::Parse(_))));
    }

    #[test]
    fn test_from_json_str_requires_value() {
        let result = CodeMap::from_json_str(r#"{"KeyQ": {"shift": "Q"}}"#);
        assert!(matches!(result, Err(CodeMapError::Parse(_))));
    }

    #[test]
    fn test_entry_label() {
        let entry = CodeMapEntry::new("-", Some("_"));
        assert_eq!(entry.label(false), "-");
        assert_eq!(entry.label(true), "_");
    }
}
