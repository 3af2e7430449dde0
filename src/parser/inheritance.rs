//! Parent class detection.
//!
//! Reference pages carry no single reliable inheritance signal, so the
//! resolver runs an ordered list of strategies and keeps the first answer.
//! Finding nothing is a normal outcome: the class becomes a root.
//!
//! Diagram layout (who is drawn above whom) is never used on its own. A
//! diagram can show ancestors and descendants together, so a diagram name is
//! only accepted when page text also says members were inherited from it.

use crate::page::text_of;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

const BACK_REFERENCE: &str = "inherited from";

static SEL_LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());
static SEL_DIAGRAM_AREA: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("map area").unwrap());
static SEL_CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

type Strategy = fn(&Html, &str) -> Option<String>;

/// Evaluated in order; the first `Some` wins.
const STRATEGIES: &[(&str, Strategy)] = &[
    ("back-reference", back_reference),
    ("corroborated diagram", corroborated_diagram),
];

/// Resolve the single parent of `class_name`, if the page states one.
pub fn resolve(html: &Html, class_name: &str) -> Option<String> {
    STRATEGIES.iter().find_map(|(label, strategy)| {
        let parent = strategy(html, class_name)?;
        log::debug!("{class_name}: parent {parent} via {label}");
        Some(parent)
    })
}

/// "Public Member Functions inherited from <a>BaseWorld</a>"
///
/// Takes the first link after the phrase, else the first link in the
/// element holding it.
fn back_reference(html: &Html, _class_name: &str) -> Option<String> {
    let phrase = html
        .root_element()
        .descendants()
        .find(|node| {
            node.value()
                .as_text()
                .is_some_and(|text| text.contains(BACK_REFERENCE))
        })?;

    let adjacent = phrase
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "a");
    let link = match adjacent {
        Some(link) => link,
        None => ElementRef::wrap(phrase.parent()?)?.select(&SEL_LINK).next()?,
    };

    let name = text_of(link);
    (!name.is_empty()).then_some(name)
}

/// A diagram name confirmed by an "inherited from ... <name>" table cell.
fn corroborated_diagram(html: &Html, class_name: &str) -> Option<String> {
    let cells: Vec<String> = html.select(&SEL_CELL).map(text_of).collect();

    diagram_candidates(html, class_name)
        .into_iter()
        .find(|candidate| {
            let Some(pattern) = corroboration_pattern(candidate) else {
                return false;
            };
            cells.iter().any(|cell| pattern.is_match(cell))
        })
}

/// Names referenced by the inheritance diagram, excluding the class itself
/// and generic pointer placeholders.
fn diagram_candidates(html: &Html, class_name: &str) -> Vec<String> {
    html.select(&SEL_DIAGRAM_AREA)
        .filter_map(|area| area.value().attr("alt"))
        .map(str::trim)
        .filter(|alt| !alt.is_empty() && *alt != class_name)
        .filter(|alt| !alt.to_lowercase().contains("pointer"))
        .map(str::to_string)
        .collect()
}

fn corroboration_pattern(candidate: &str) -> Option<Regex> {
    Regex::new(&format!(
        r"(?i){BACK_REFERENCE}.*(?:^|[^A-Za-z0-9_]){}(?:$|[^A-Za-z0-9_])",
        regex::escape(candidate)
    ))
    .ok()
}
