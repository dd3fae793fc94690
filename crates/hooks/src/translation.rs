//! Localized UI strings.
//!
//! ## Invariants
//! - Missing keys fall back to the English default, then to the key itself.
//! - Loaded language files only override keys; they never remove defaults.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

const ENGLISH: &[(&str, &str)] = &[
    ("Back", "Back"),
    ("Save New", "Save New"),
    ("Cancel", "Cancel"),
    ("Print Preview", "Print Preview"),
];

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("failed to read language file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid language file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// String catalog keyed by the host's English message ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    strings: HashMap<String, String>,
}

impl Default for Translation {
    fn default() -> Self {
        Self::english()
    }
}

impl Translation {
    pub fn english() -> Self {
        Self {
            strings: ENGLISH
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    /// English defaults overridden by a flat JSON object of `key -> text`.
    pub fn from_json_str(json: &str) -> Result<Self, TranslationError> {
        let overrides: HashMap<String, String> = serde_json::from_str(json)?;
        let mut catalog = Self::english();
        catalog.strings.extend(overrides);
        Ok(catalog)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TranslationError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TranslationError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn set(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.strings.insert(key.into(), text.into());
    }

    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.strings.get(key).map(String::as_str).unwrap_or(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_has_back() {
        assert_eq!(Translation::english().get("Back"), "Back");
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        assert_eq!(Translation::english().get("Frobnicate"), "Frobnicate");
    }

    #[test]
    fn overrides_keep_other_defaults() {
        let catalog = Translation::from_json_str(r#"{"Back": "Retour"}"#).unwrap();
        assert_eq!(catalog.get("Back"), "Retour");
        assert_eq!(catalog.get("Cancel"), "Cancel");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let err = Translation::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, TranslationError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("de.json");
        std::fs::write(&path, r#"{"Back": "Zurück"}"#).unwrap();
        assert_eq!(Translation::from_file(&path).unwrap().get("Back"), "Zurück");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Translation::from_file(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, TranslationError::Io { .. }));
    }
}
