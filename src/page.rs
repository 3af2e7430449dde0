//! Document loader and the small DOM helper surface the parsers rely on.
//!
//! Pages are decoded best-effort (invalid UTF-8 is replaced, never fatal) and
//! handed to `scraper`. Everything downstream only needs tag/class lookup,
//! text extraction, sibling/parent navigation and attribute access.

use crate::error::{ExtractError, Result};
use scraper::{ElementRef, Html};
use std::fs;
use std::path::Path;

/// Read and parse one documentation page.
pub fn load(path: &Path) -> Result<Html> {
    let bytes = fs::read(path).map_err(|source| ExtractError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Html::parse_document(&String::from_utf8_lossy(&bytes)))
}

/// Collapse every whitespace run (including non-breaking spaces) to one space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// All text below `element`, whitespace collapsed.
pub fn text_of(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// True if any class on `element` starts with `prefix` (`memitem:a1f3...`).
pub fn has_class_prefix(element: ElementRef<'_>, prefix: &str) -> bool {
    element.value().classes().any(|class| class.starts_with(prefix))
}

/// Rows of `table` without descending into nested tables.
pub fn direct_rows<'a>(table: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    let mut rows = Vec::new();
    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => rows.extend(
                child
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|e| e.value().name() == "tr"),
            ),
            _ => {}
        }
    }
    rows
}

/// Nearest `tag` element before `element` in document order.
///
/// Ancestors count as preceding, since their start tag comes first.
pub fn preceding<'a>(element: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    let mut node = *element;
    loop {
        for sibling in node.prev_siblings() {
            let found = sibling
                .descendants()
                .filter_map(ElementRef::wrap)
                .filter(|e| e.value().name() == tag)
                .last();
            if found.is_some() {
                return found;
            }
        }
        node = node.parent()?;
        if let Some(parent) = ElementRef::wrap(node) {
            if parent.value().name() == tag {
                return Some(parent);
            }
        }
    }
}
