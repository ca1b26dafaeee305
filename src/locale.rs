//! Locale Registry
//!
//! Per-site label strings and section anchors. Adding a locale means adding
//! data here (or loading it from JSON), never touching the extractors.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Labels used by one locale's Wiktionary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Etymology heading label, matched as a prefix ("Etymology 1", ...)
    pub etymology: String,
    /// Pronunciation heading label, matched exactly
    pub pronunciation: String,
    /// Anchor id of the "Derived terms" heading
    pub derived_terms: String,
    /// Anchor id of the "Proverbs" heading
    pub proverbs: String,
    /// Language code -> section name as it appears on this locale's pages
    #[serde(default)]
    pub languages: HashMap<String, String>,
}

impl LocaleConfig {
    fn new(
        etymology: &str,
        pronunciation: &str,
        derived_terms: &str,
        proverbs: &str,
        languages: &[(&str, &str)],
    ) -> Self {
        Self {
            etymology: etymology.to_string(),
            pronunciation: pronunciation.to_string(),
            derived_terms: derived_terms.to_string(),
            proverbs: proverbs.to_string(),
            languages: languages
                .iter()
                .map(|(code, name)| (code.to_string(), name.to_string()))
                .collect(),
        }
    }
}

/// Locale code -> [`LocaleConfig`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleRegistry {
    locales: HashMap<String, LocaleConfig>,
}

static BUILTIN: Lazy<LocaleRegistry> = Lazy::new(LocaleRegistry::builtin);

impl LocaleRegistry {
    /// Registry with the locales supported out of the box: en, tr, es.
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        registry.insert(
            "en",
            LocaleConfig::new(
                "Etymology",
                "Pronunciation",
                "Derived_terms",
                "Proverbs",
                &[
                    ("en", "English"),
                    ("tr", "Turkish"),
                    ("es", "Spanish"),
                    ("de", "German"),
                    ("fr", "French"),
                ],
            ),
        );
        registry.insert(
            "tr",
            LocaleConfig::new(
                "Köken",
                "Söyleniş",
                "Türetilmiş_kavramlar",
                "Atasözleri",
                &[
                    ("tr", "Türkçe"),
                    ("en", "İngilizce"),
                    ("es", "İspanyolca"),
                    ("de", "Almanca"),
                    ("fr", "Fransızca"),
                ],
            ),
        );
        registry.insert(
            "es",
            LocaleConfig::new(
                "Etimología",
                "Pronunciación y escritura",
                "Términos_derivados",
                "Refranes",
                &[
                    ("es", "Español"),
                    ("en", "Inglés"),
                    ("tr", "Turco"),
                    ("de", "Alemán"),
                    ("fr", "Francés"),
                ],
            ),
        );
        registry
    }

    /// Shared read-only instance of [`LocaleRegistry::builtin`].
    pub fn shared() -> &'static LocaleRegistry {
        &BUILTIN
    }

    /// Load a registry from JSON keyed by locale code.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn insert(&mut self, locale: &str, config: LocaleConfig) {
        self.locales.insert(locale.to_string(), config);
    }

    pub fn get(&self, locale: &str) -> Result<&LocaleConfig> {
        self.locales
            .get(locale)
            .ok_or_else(|| Error::UnknownLocale(locale.to_string()))
    }

    /// Section anchor of `language` on `locale` pages, e.g. ("en", "es") -> "Inglés".
    pub fn section_name(&self, language: &str, locale: &str) -> Result<&str> {
        self.get(locale)?
            .languages
            .get(language)
            .map(String::as_str)
            .ok_or_else(|| Error::UnknownLanguagePair {
                language: language.to_string(),
                locale: locale.to_string(),
            })
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_section_names() {
        let registry = LocaleRegistry::shared();
        assert_eq!(registry.section_name("en", "es").unwrap(), "Inglés");
        assert_eq!(registry.section_name("en", "tr").unwrap(), "İngilizce");
        assert_eq!(registry.section_name("tr", "en").unwrap(), "Turkish");
        assert_eq!(registry.get("tr").unwrap().etymology, "Köken");
    }

    #[test]
    fn test_unknown_codes() {
        let registry = LocaleRegistry::builtin();
        assert!(matches!(registry.get("xx"), Err(Error::UnknownLocale(_))));
        assert!(matches!(
            registry.section_name("zz", "en"),
            Err(Error::UnknownLanguagePair { .. })
        ));
    }

    #[test]
    fn test_from_json() {
        let json = r#"
        {
            "de": {
                "etymology": "Herkunft",
                "pronunciation": "Aussprache",
                "derived_terms": "Abgeleitete_Begriffe",
                "proverbs": "Sprichwörter",
                "languages": {"de": "Deutsch", "en": "Englisch"}
            }
        }
        "#;

        let registry = LocaleRegistry::from_json(json).unwrap();
        assert_eq!(registry.section_name("en", "de").unwrap(), "Englisch");
        assert_eq!(registry.locales().collect::<Vec<_>>(), vec!["de"]);

        assert!(matches!(
            LocaleRegistry::from_json("{\"de\": 1}"),
            Err(Error::Config(_))
        ));
    }
}
