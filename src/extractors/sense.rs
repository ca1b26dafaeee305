//! Sense block extraction
//!
//! Rebuilds one [`Meaning`] from the siblings that follow an etymology or
//! part-of-speech heading: etymology paragraphs, the headword line, the
//! definitions list with nested usage examples, and the labeled term lists
//! (synonyms, antonyms, ...) that belong to the same sense.

use std::collections::HashSet;

use scraper::{ElementRef, Selector};

use super::dom::{
    children_named, element_text, has_class, heading_label, is_any_of, is_heading, is_named,
    outermost, text_without,
};
use super::header::{is_meaning_switcher, is_part_of_speech_header, is_pronunciation_header};
use super::section::Section;
use crate::locale::LocaleConfig;
use crate::model::{Definition, Example, Meaning};

/// Nodes skipped between the headword line and the definitions list.
const LIST_PREAMBLE: &[&str] = &["p", "div", "pre", "figure", "table"];

/// Meaning introduced by an etymology heading at `idx`.
///
/// The part-of-speech heading consumed here is recorded in `seen` when it
/// sits at the section's sub-level, so the caller does not visit it again.
pub fn extract_with_etymology(
    section: &Section<'_>,
    idx: usize,
    locale: &LocaleConfig,
    seen: &mut HashSet<String>,
) -> Meaning {
    let mut meaning = Meaning::default();
    let mut next = idx + 1;

    while let Some(paragraph) = section.get(next).filter(|el| is_named(*el, "p")) {
        let text = element_text(paragraph).trim().to_string();
        meaning.etymology = Some(match meaning.etymology.take() {
            Some(previous) => format!("{}\n{}", previous, text),
            None => text,
        });
        next += 1;
    }

    // Some pages put a per-etymology pronunciation block here
    while next < section.len()
        && (is_pronunciation_header(section, next, locale)
            || section.get(next).is_some_and(|el| is_named(el, "ul")))
    {
        next += 1;
    }

    if is_part_of_speech_header(section, next, locale) {
        if let Some(heading) = section.heading(next) {
            let label = heading_label(heading.element);
            if !label.is_empty() {
                meaning.part_of_speech = Some(label.to_lowercase());
            }
            if heading.level == section.sub_level() {
                if let Some(key) = section.key(next) {
                    seen.insert(key);
                }
            }
        }
        fill_definitions(section, next + 1, locale, &mut meaning);
    }

    meaning
}

/// Meaning introduced directly by a part-of-speech heading at `idx`.
pub fn extract_without_etymology(section: &Section<'_>, idx: usize, locale: &LocaleConfig) -> Meaning {
    let mut meaning = Meaning::default();

    let Some(heading) = section.heading(idx) else {
        return meaning;
    };
    let label = heading_label(heading.element);
    if label.is_empty() {
        return meaning;
    }
    meaning.part_of_speech = Some(label.to_lowercase());

    let mut next = idx + 1;
    while section.get(next).is_some_and(|el| is_named(el, "table")) {
        next += 1;
    }
    fill_definitions(section, next, locale, &mut meaning);

    meaning
}

fn fill_definitions(section: &Section<'_>, idx: usize, locale: &LocaleConfig, meaning: &mut Meaning) {
    let mut next = idx;

    if let Some(headword) = section.get(next).filter(|el| is_named(*el, "p")) {
        let text = element_text(headword).trim().to_string();
        if !text.is_empty() {
            meaning.metadata = Some(text);
        }
    }

    while let Some(node) = section.get(next) {
        if is_heading(node) || !is_any_of(node, LIST_PREAMBLE) {
            break;
        }
        next += 1;
    }

    let Some(list) = section.get(next).filter(|el| is_any_of(*el, &["ol", "dl"])) else {
        log::trace!("no definitions list after header");
        return;
    };

    let item_name = if is_named(list, "ol") { "li" } else { "dd" };
    for item in children_named(list, item_name) {
        meaning.definitions.push(read_definition(item));
    }

    if !meaning.definitions.is_empty() {
        collect_term_lists(section, next + 1, locale, meaning);
    }
}

/// Toggle buttons and quotation blocks that must not end up in a gloss.
fn is_decoration(el: ElementRef<'_>) -> bool {
    if el
        .value()
        .classes()
        .any(|c| c.to_ascii_lowercase().contains("toggle"))
    {
        return true;
    }
    if has_class(el, "citation-whole") {
        return true;
    }
    is_named(el, "ul")
        && el
            .descendants()
            .filter_map(ElementRef::wrap)
            .any(|d| has_class(d, "citation-whole"))
}

fn read_definition(item: ElementRef<'_>) -> Definition {
    let examples = outermost(item, &|el| is_named(el, "dl"))
        .into_iter()
        .flat_map(read_examples)
        .collect();

    let text = text_without(item, &|el| is_named(el, "dl") || is_decoration(el));

    Definition {
        text: text.trim().to_string(),
        examples,
    }
}

fn read_examples(list: ElementRef<'_>) -> Vec<Example> {
    let usage_selector = match Selector::parse(".h-usage-example") {
        Ok(s) => s,
        Err(_) => return vec![],
    };

    // Each item carries one encoding; a list may mix both.
    let mut examples = Vec::new();
    for term in children_named(list, "dd") {
        let marked: Vec<ElementRef<'_>> = term.select(&usage_selector).collect();
        if marked.is_empty() {
            examples.extend(read_plain_example(term));
        } else {
            examples.extend(marked.into_iter().filter_map(read_marked_example));
        }
    }
    examples
}

/// `<span class="h-usage-example"><i class="e-example">..</i> <span class="e-translation">..</span></span>`
fn read_marked_example(block: ElementRef<'_>) -> Option<Example> {
    let example_selector = Selector::parse(".e-example").ok()?;
    let translation_selector = Selector::parse(".e-translation").ok()?;

    let example = block
        .select(&example_selector)
        .next()
        .map(|el| element_text(el).trim().to_string())
        .filter(|text| !text.is_empty())?;

    let translation = block
        .select(&translation_selector)
        .next()
        .map(|el| element_text(el).trim().to_string())
        .filter(|text| !text.is_empty());

    Some(Example { example, translation })
}

/// `<dd>example<dl><dd>translation</dd></dl></dd>`
fn read_plain_example(term: ElementRef<'_>) -> Option<Example> {
    let translation = outermost(term, &|el| is_named(el, "dl"))
        .into_iter()
        .find_map(|nested| children_named(nested, "dd").next())
        .map(|dd| element_text(dd).trim().to_string())
        .filter(|text| !text.is_empty());

    let example = text_without(term, &|el| is_named(el, "dl") || is_decoration(el))
        .trim()
        .to_string();
    if example.is_empty() {
        return None;
    }

    Some(Example { example, translation })
}

#[derive(Debug, Clone, Copy)]
enum TermList {
    SeeAlso,
    RelatedTerms,
    Synonyms,
    Antonyms,
    DerivedTerms,
    Proverbs,
}

const TERM_LISTS: [TermList; 6] = [
    TermList::SeeAlso,
    TermList::RelatedTerms,
    TermList::Synonyms,
    TermList::Antonyms,
    TermList::DerivedTerms,
    TermList::Proverbs,
];

impl TermList {
    fn anchor(self, locale: &LocaleConfig) -> &str {
        match self {
            TermList::SeeAlso => "See_also",
            TermList::RelatedTerms => "Related_terms",
            TermList::Synonyms => "Synonyms",
            TermList::Antonyms => "Antonyms",
            TermList::DerivedTerms => &locale.derived_terms,
            TermList::Proverbs => &locale.proverbs,
        }
    }

    fn slot(self, meaning: &mut Meaning) -> &mut Option<Vec<String>> {
        match self {
            TermList::SeeAlso => &mut meaning.see_also,
            TermList::RelatedTerms => &mut meaning.related_terms,
            TermList::Synonyms => &mut meaning.synonyms,
            TermList::Antonyms => &mut meaning.antonyms,
            TermList::DerivedTerms => &mut meaning.derived_terms,
            TermList::Proverbs => &mut meaning.proverbs,
        }
    }
}

fn has_anchor(heading: ElementRef<'_>, anchor: &str) -> bool {
    !anchor.is_empty()
        && heading
            .descendants()
            .filter_map(ElementRef::wrap)
            .any(|el| el.value().id().is_some_and(|id| id.starts_with(anchor)))
}

/// Scan from `start` up to the next meaning switcher for labeled term lists.
fn collect_term_lists(section: &Section<'_>, start: usize, locale: &LocaleConfig, meaning: &mut Meaning) {
    for idx in start..section.len() {
        if is_meaning_switcher(section, idx, locale) {
            break;
        }
        let Some(heading) = section.heading(idx) else {
            continue;
        };
        let Some(list) = section.get(idx + 1).filter(|el| is_named(*el, "ul")) else {
            continue;
        };

        for kind in TERM_LISTS {
            if !has_anchor(heading.element, kind.anchor(locale)) {
                continue;
            }
            let terms: Vec<String> = children_named(list, "li")
                .map(|li| element_text(li).trim().to_string())
                .filter(|text| !text.is_empty())
                .collect();
            if !terms.is_empty() {
                kind.slot(meaning).get_or_insert_with(Vec::new).extend(terms);
            }
        }
    }
}
