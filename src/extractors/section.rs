//! Language section isolation
//!
//! A Wiktionary page interleaves sections for many languages at the same
//! depth. [`Section`] is the window of sibling elements belonging to one of
//! them: everything after the language heading up to the next heading of the
//! same or a higher level. Extractors walk it by index, so content of other
//! languages is never reachable.

use scraper::{ElementRef, Html};

use super::dom::{heading_of, Heading};

#[derive(Debug, Clone)]
pub struct Section<'a> {
    nodes: Vec<ElementRef<'a>>,
    level: u8,
}

impl<'a> Section<'a> {
    /// Scope `document` to the section whose heading anchor is `label`.
    ///
    /// Returns `None` when the page has no such section.
    pub fn isolate(document: &'a Html, label: &str) -> Option<Self> {
        let underscored = label.replace(' ', "_");
        // The same id may appear outside a heading (a table of contents
        // entry, say); the first one that sits in a heading wins.
        let heading = document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| {
                el.value()
                    .id()
                    .is_some_and(|id| id == label || id == underscored)
            })
            .find_map(|anchor| {
                heading_of(anchor).or_else(|| {
                    anchor
                        .ancestors()
                        .filter_map(ElementRef::wrap)
                        .find_map(heading_of)
                })
            })?;

        // Newer markup wraps headings in div.mw-heading; the wrapper is what
        // sits among the section's siblings.
        let top = heading
            .element
            .parent()
            .and_then(ElementRef::wrap)
            .filter(|parent| heading_of(*parent).is_some())
            .unwrap_or(heading.element);

        let level = heading.level;
        let nodes = top
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .take_while(|el| !heading_of(*el).is_some_and(|h| h.level <= level))
            .collect();

        Some(Self { nodes, level })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<ElementRef<'a>> {
        self.nodes.get(idx).copied()
    }

    pub fn heading(&self, idx: usize) -> Option<Heading<'a>> {
        self.get(idx).and_then(heading_of)
    }

    /// Serialized markup of the node at `idx`. Headers are deduplicated by
    /// this key rather than by node identity.
    pub fn key(&self, idx: usize) -> Option<String> {
        self.get(idx).map(|el| el.html())
    }

    /// Level of the language heading itself.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Level of the headings directly under the language heading.
    pub fn sub_level(&self) -> u8 {
        self.level + 1
    }

    pub fn nodes(&self) -> &[ElementRef<'a>] {
        &self.nodes
    }
}
