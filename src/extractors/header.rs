//! Header classification
//!
//! Decides what a heading inside a language section introduces. Pronunciation
//! and etymology headings are recognized by their localized label; part of
//! speech headings by the shape of what follows them, since their tag level
//! and wording vary between locales.

use super::dom::{heading_label, is_any_of};
use super::section::Section;
use crate::locale::LocaleConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderRole {
    Pronunciation,
    Etymology,
    PartOfSpeech,
    Ignore,
}

/// Nodes that may sit between a part-of-speech heading and its definitions.
const DEFINITION_PREAMBLE: &[&str] = &["table", "p", "div", "pre", "figure"];

/// Classify the node at `idx`. Anything that is not a heading is `Ignore`.
pub fn classify(section: &Section<'_>, idx: usize, locale: &LocaleConfig) -> HeaderRole {
    let Some(heading) = section.heading(idx) else {
        return HeaderRole::Ignore;
    };

    let label = heading_label(heading.element);
    if !locale.pronunciation.is_empty() && label == locale.pronunciation {
        HeaderRole::Pronunciation
    } else if !locale.etymology.is_empty() && label.starts_with(&locale.etymology) {
        // "Etymology 1", "Etymology 2", ...
        HeaderRole::Etymology
    } else if opens_definitions(section, idx) {
        HeaderRole::PartOfSpeech
    } else {
        HeaderRole::Ignore
    }
}

/// Whether the node at `idx` starts a new sense block or pronunciation.
pub fn is_meaning_switcher(section: &Section<'_>, idx: usize, locale: &LocaleConfig) -> bool {
    classify(section, idx, locale) != HeaderRole::Ignore
}

pub fn is_pronunciation_header(section: &Section<'_>, idx: usize, locale: &LocaleConfig) -> bool {
    classify(section, idx, locale) == HeaderRole::Pronunciation
}

pub fn is_part_of_speech_header(section: &Section<'_>, idx: usize, locale: &LocaleConfig) -> bool {
    classify(section, idx, locale) == HeaderRole::PartOfSpeech
}

/// True if the first sibling after `idx` that is not preamble is `ol` or `dl`.
fn opens_definitions(section: &Section<'_>, idx: usize) -> bool {
    for next in idx + 1..section.len() {
        if section.heading(next).is_some() {
            return false;
        }
        let Some(node) = section.get(next) else {
            return false;
        };
        if is_any_of(node, DEFINITION_PREAMBLE) {
            continue;
        }
        return is_any_of(node, &["ol", "dl"]);
    }
    false
}
