//! Pronunciation extraction
//!
//! Reads the list that follows a pronunciation heading:
//! - IPA transcriptions (`span.IPA`), labeled by a preceding dialect qualifier
//! - Hyphenation (`span.Latn` on the "Hyphenation:" line, or `span.hyphenation`)
//! - Audio, either as `table.audiotable` rows or as standalone media players
//!
//! IPA and hyphenation fall back to a link titled with the kind ("IPA") and
//! the text after the colon on its line.

use scraper::{ElementRef, Selector};

use super::dom::{children_named, element_text, has_class, is_any_of};
use super::section::Section;
use crate::model::{PronunciationGroup, PronunciationValue};

const IPA: &str = "IPA";
const HYPHENATION: &str = "Hyphenation";
const AUDIO: &str = "Audio";

/// Classes carrying the dialect text, innermost first.
const QUALIFIER_CONTENT: &[&str] = &["qualifier-content", "ib-content"];
const QUALIFIER_WRAPPER: &[&str] = &["accent-qualifier", "qualifier"];

/// Groups for the pronunciation heading at `idx`. Empty unless the heading is
/// directly followed by a `ul` or `dl`.
pub fn extract_pronunciation(section: &Section<'_>, idx: usize) -> Vec<PronunciationGroup> {
    let Some(container) = section
        .get(idx + 1)
        .filter(|el| is_any_of(*el, &["ul", "dl"]))
    else {
        log::debug!("pronunciation header without a following list");
        return vec![];
    };

    let mut groups = Vec::new();
    push_group(
        &mut groups,
        IPA,
        transcriptions(container, "span.IPA", IPA, &|_| true),
    );
    push_group(
        &mut groups,
        HYPHENATION,
        transcriptions(
            container,
            "span.hyphenation, span.Latn",
            HYPHENATION,
            &is_hyphenation_span,
        ),
    );

    let mut consumed = Vec::new();
    groups.extend(audio_table_groups(container, &mut consumed));
    groups.extend(media_groups(container, &consumed));

    groups
}

fn push_group(groups: &mut Vec<PronunciationGroup>, kind: &str, values: Vec<PronunciationValue>) {
    if !values.is_empty() {
        groups.push(PronunciationGroup {
            kind: kind.to_string(),
            values,
        });
    }
}

fn transcriptions(
    container: ElementRef<'_>,
    css: &str,
    kind: &str,
    accept: &dyn Fn(ElementRef<'_>) -> bool,
) -> Vec<PronunciationValue> {
    let selector = match Selector::parse(css) {
        Ok(s) => s,
        Err(_) => return vec![],
    };

    let styled: Vec<PronunciationValue> = container
        .select(&selector)
        .filter(|span| accept(*span))
        .filter_map(|span| {
            let value = element_text(span).trim().to_string();
            if value.is_empty() {
                return None;
            }
            let label = qualifier_before(span).unwrap_or_else(|| kind.to_string());
            Some(PronunciationValue::new(label, value))
        })
        .collect();

    if !styled.is_empty() {
        return styled;
    }

    linked_value(container, kind).into_iter().collect()
}

/// `Latn` is a generic script class, so it only counts on the line that
/// starts with the hyphenation label.
fn is_hyphenation_span(span: ElementRef<'_>) -> bool {
    if has_class(span, "hyphenation") {
        return true;
    }
    line_of(span).is_some_and(|line| {
        element_text(line)
            .trim_start()
            .starts_with(HYPHENATION)
    })
}

/// Closest list item or paragraph holding `el`.
fn line_of(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| is_any_of(*ancestor, &["li", "dd", "dt", "p"]))
}

/// Text of the nearest qualifier among the preceding siblings of `el`.
fn qualifier_before(el: ElementRef<'_>) -> Option<String> {
    el.prev_siblings()
        .filter_map(ElementRef::wrap)
        .find_map(qualifier_text)
}

fn qualifier_text(el: ElementRef<'_>) -> Option<String> {
    let is_content = |e: ElementRef<'_>| QUALIFIER_CONTENT.iter().any(|c| has_class(e, c));
    let is_wrapper = |e: ElementRef<'_>| QUALIFIER_WRAPPER.iter().any(|c| has_class(e, c));

    let content = el.descendants().filter_map(ElementRef::wrap).find(|e| is_content(*e));
    let source = match content {
        Some(inner) => inner,
        None if is_wrapper(el) => el,
        None => return None,
    };

    let text = element_text(source);
    let label = text
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .trim();
    (!label.is_empty()).then(|| label.to_string())
}

/// `<li><a title="IPA">IPA</a>: /el/</li>` -> "/el/"
fn linked_value(container: ElementRef<'_>, kind: &str) -> Option<PronunciationValue> {
    let selector = Selector::parse(&format!("a[title=\"{}\"]", kind)).ok()?;
    let link = container.select(&selector).next()?;

    let line = line_of(link)?;
    let text = element_text(line);
    let (_, after) = text.split_once(':')?;

    let value = after.trim();
    (!value.is_empty()).then(|| PronunciationValue::new(kind, value))
}

fn sources(el: ElementRef<'_>) -> Vec<PronunciationValue> {
    let selector = match Selector::parse("source") {
        Ok(s) => s,
        Err(_) => return vec![],
    };

    el.select(&selector)
        .filter_map(|source| {
            let src = source.value().attr("src")?;
            let mime = source.value().attr("type").unwrap_or_default();
            Some(PronunciationValue::new(mime, src))
        })
        .collect()
}

/// One group per audio table row, labeled by the row's description cell.
/// Rows that produce a group are pushed to `consumed`.
fn audio_table_groups<'a>(
    container: ElementRef<'a>,
    consumed: &mut Vec<ElementRef<'a>>,
) -> Vec<PronunciationGroup> {
    let row_selector = match Selector::parse("table tr") {
        Ok(s) => s,
        Err(_) => return vec![],
    };

    let mut groups = Vec::new();
    for row in container.select(&row_selector) {
        let cells: Vec<ElementRef<'a>> = children_named(row, "td").collect();

        let file_cell = cells
            .iter()
            .copied()
            .find(|cell| has_class(*cell, "audiofile"))
            .or_else(|| cells.iter().copied().find(|cell| !sources(*cell).is_empty()));
        let Some(file_cell) = file_cell else {
            continue;
        };

        let values = sources(file_cell);
        if values.is_empty() {
            continue;
        }

        let label = cells
            .iter()
            .copied()
            .find(|cell| *cell != file_cell && !has_class(*cell, "audiometa"))
            .map(|cell| {
                element_text(cell)
                    .trim()
                    .trim_end_matches(':')
                    .trim()
                    .to_string()
            })
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| AUDIO.to_string());

        consumed.push(row);
        groups.push(PronunciationGroup { kind: label, values });
    }

    groups
}

/// Standalone `audio`/`video` players outside already consumed table rows.
fn media_groups<'a>(container: ElementRef<'a>, consumed: &[ElementRef<'a>]) -> Vec<PronunciationGroup> {
    let selector = match Selector::parse("audio, video") {
        Ok(s) => s,
        Err(_) => return vec![],
    };

    container
        .select(&selector)
        .filter(|media| {
            !media
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|ancestor| consumed.contains(&ancestor))
        })
        .map(sources)
        .filter(|values| !values.is_empty())
        .map(|values| PronunciationGroup {
            kind: AUDIO.to_string(),
            values,
        })
        .collect()
}
