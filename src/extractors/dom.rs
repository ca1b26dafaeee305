//! Element helpers shared by the extractors.
//!
//! Text is read by walking the node tree with exclusion predicates instead of
//! detaching nodes, so one parsed document can be inspected repeatedly.

use scraper::{ElementRef, Node, Selector};

/// A heading element and its level (1-6).
#[derive(Debug, Clone, Copy)]
pub struct Heading<'a> {
    pub element: ElementRef<'a>,
    pub level: u8,
}

fn heading_level(name: &str) -> Option<u8> {
    match name {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Heading carried by a sibling-level node: the node itself for `h1`-`h6`, or
/// the heading inside a `div.mw-heading` wrapper.
pub fn heading_of(el: ElementRef<'_>) -> Option<Heading<'_>> {
    if let Some(level) = heading_level(el.value().name()) {
        return Some(Heading { element: el, level });
    }

    if is_named(el, "div") && has_class(el, "mw-heading") {
        return el.children().filter_map(ElementRef::wrap).find_map(|child| {
            heading_level(child.value().name()).map(|level| Heading {
                element: child,
                level,
            })
        });
    }

    None
}

pub fn is_heading(el: ElementRef<'_>) -> bool {
    heading_of(el).is_some()
}

/// Visible label of a heading, without "[edit]" links.
pub fn heading_label(heading: ElementRef<'_>) -> String {
    if let Ok(selector) = Selector::parse("span.mw-headline") {
        if let Some(span) = heading.select(&selector).next() {
            return element_text(span).trim().to_string();
        }
    }

    text_without(heading, &|el| has_class(el, "mw-editsection"))
        .trim()
        .to_string()
}

pub fn is_named(el: ElementRef<'_>, name: &str) -> bool {
    el.value().name() == name
}

pub fn is_any_of(el: ElementRef<'_>, names: &[&str]) -> bool {
    names.contains(&el.value().name())
}

pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

/// All descendant text.
pub fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Descendant text, skipping every sub-tree whose root matches `skip`.
pub fn text_without(el: ElementRef<'_>, skip: &dyn Fn(ElementRef<'_>) -> bool) -> String {
    let mut out = String::new();
    collect_text(el, skip, &mut out);
    out
}

fn collect_text(el: ElementRef<'_>, skip: &dyn Fn(ElementRef<'_>) -> bool, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    if !skip(child_el) {
                        collect_text(child_el, skip, out);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Descendants matching `pred`, without descending into a match.
pub fn outermost<'a>(el: ElementRef<'a>, pred: &dyn Fn(ElementRef<'a>) -> bool) -> Vec<ElementRef<'a>> {
    let mut found = Vec::new();
    collect_outermost(el, pred, &mut found);
    found
}

fn collect_outermost<'a>(
    el: ElementRef<'a>,
    pred: &dyn Fn(ElementRef<'a>) -> bool,
    found: &mut Vec<ElementRef<'a>>,
) {
    for child in el.children().filter_map(ElementRef::wrap) {
        if pred(child) {
            found.push(child);
        } else {
            collect_outermost(child, pred, found);
        }
    }
}

/// Direct element children with the given tag name.
pub fn children_named<'a>(el: ElementRef<'a>, name: &'a str) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(move |child| is_named(*child, name))
}
