//! Internationalized text

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default language used for canonical descriptions.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Language tag → text map. Empty by default, never null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct I18nString(BTreeMap<String, String>);

impl I18nString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(language: impl Into<String>, text: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(language.into(), text.into());
        Self(map)
    }

    /// English text.
    pub fn en(text: impl Into<String>) -> Self {
        Self::create(DEFAULT_LANGUAGE, text)
    }

    /// Returns a copy with the given language set.
    #[must_use]
    pub fn with(mut self, language: impl Into<String>, text: impl Into<String>) -> Self {
        self.0.insert(language.into(), text.into());
        self
    }

    pub fn get(&self, language: &str) -> Option<&str> {
        self.0.get(language).map(String::as_str)
    }

    /// The default-language text, or any text if that language is missing.
    pub fn first_text(&self) -> Option<&str> {
        self.get(DEFAULT_LANGUAGE)
            .or_else(|| self.0.values().next().map(String::as_str))
    }

    /// Entries with blank text do not count.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(|text| text.trim().is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(l, t)| (l.as_str(), t.as_str()))
    }
}

impl From<&str> for I18nString {
    fn from(text: &str) -> Self {
        Self::en(text)
    }
}

impl From<String> for I18nString {
    fn from(text: String) -> Self {
        Self::en(text)
    }
}
