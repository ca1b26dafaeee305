//! Output records produced by a scrape.
//!
//! Field names on the wire match the JSON the scraper has always produced:
//! snake_case keys, and `type` for pronunciation kinds and labels.

use serde::{Deserialize, Serialize};

/// Everything extracted for one word in one language on one locale's site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub from_language: String,
    pub to_language: String,
    pub meanings: Vec<Meaning>,
    pub pronunciation: Vec<PronunciationGroup>,
}

impl WordEntry {
    /// Entry for a word that has no section in the requested language.
    pub fn empty(word: &str, from_language: &str, to_language: &str) -> Self {
        Self {
            word: word.to_string(),
            from_language: from_language.to_string(),
            to_language: to_language.to_string(),
            meanings: vec![],
            pronunciation: vec![],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.meanings.is_empty() && self.pronunciation.is_empty()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One part-of-speech block of a language section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meaning {
    pub etymology: Option<String>,
    pub part_of_speech: Option<String>,
    /// Headword / inflection line preceding the definitions
    pub metadata: Option<String>,
    pub definitions: Vec<Definition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub antonyms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_terms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_terms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub see_also: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proverbs: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub text: String,
    pub examples: Vec<Example>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub example: String,
    pub translation: Option<String>,
}

/// Pronunciation values of one kind ("IPA", "Hyphenation", "Audio", or a
/// dialect label read from an audio table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PronunciationGroup {
    #[serde(rename = "type")]
    pub kind: String,
    pub values: Vec<PronunciationValue>,
}

/// A single transcription, hyphenation or audio source.
///
/// For audio the label is the MIME type and the value is the source URI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PronunciationValue {
    #[serde(rename = "type")]
    pub label: String,
    pub value: String,
}

impl PronunciationValue {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}
