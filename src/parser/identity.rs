//! Class identity: the canonical class name of a reference page.

use crate::page::text_of;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

/// "Enfusion Script API: BaseWorld Interface Reference" → "BaseWorld"
static RE_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\s*(\S+)\s+(?:Interface|Class|Struct)\b").unwrap());

static SEL_TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());

static SEL_HEADER_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.headertitle").unwrap());

/// Resolve the class name, or `None` for pages that are not class pages.
pub fn resolve(html: &Html) -> Option<String> {
    from_title(html).or_else(|| from_header(html))
}

fn from_title(html: &Html) -> Option<String> {
    let title = html.select(&SEL_TITLE).next()?;
    let text = text_of(title);
    RE_TITLE.captures(&text).map(|caps| caps[1].to_string())
}

fn from_header(html: &Html) -> Option<String> {
    let header = html.select(&SEL_HEADER_TITLE).next()?;
    text_of(header)
        .split_whitespace()
        .next()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_from_title() {
        let html = Html::parse_document(
            "<html><head><title>Enfusion Script API: BaseWorld Interface Reference</title></head></html>",
        );
        assert_eq!(resolve(&html).as_deref(), Some("BaseWorld"));
    }

    #[test]
    fn name_from_title_struct_kind() {
        let html = Html::parse_document(
            "<title>Arma Reforger Script API: SCR_Pair Struct Reference</title>",
        );
        assert_eq!(resolve(&html).as_deref(), Some("SCR_Pair"));
    }

    #[test]
    fn falls_back_to_header_title() {
        let html = Html::parse_document(concat!(
            "<title>Enfusion Script API: Misc</title>",
            "<div class=\"header\"><div class=\"headertitle\"><div class=\"title\">",
            "  EntityEvent Interface Reference</div></div></div>"
        ));
        assert_eq!(resolve(&html).as_deref(), Some("EntityEvent"));
    }

    #[test]
    fn header_fallback_without_title() {
        let html = Html::parse_document("<div class=\"headertitle\">Widget</div>");
        assert_eq!(resolve(&html).as_deref(), Some("Widget"));
    }

    #[test]
    fn unresolvable_page() {
        let html = Html::parse_document("<title>Enfusion Script API: Main Page</title><p>hi</p>");
        assert_eq!(resolve(&html), None);
    }

    #[test]
    fn empty_header_is_unresolvable() {
        let html = Html::parse_document("<div class=\"headertitle\">   </div>");
        assert_eq!(resolve(&html), None);
    }
}
