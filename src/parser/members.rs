//! Member table walker and method signature parser.
//!
//! Declaration tables come as rows of two kinds: a `memitem` row with the
//! return type and signature, optionally followed by a `memdesc` row with a
//! one-line description. The walker yields each item with its description
//! and the heading of the section it sits in.

use crate::model::MethodRecord;
use crate::page::{collapse_whitespace, direct_rows, has_class_prefix, preceding, text_of};
use crate::parser::params;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::iter::Peekable;
use std::sync::LazyLock;
use std::vec;

static SEL_MEMBER_TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table.memberdecls").unwrap());
static SEL_ITEM_LEFT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td.memItemLeft").unwrap());
static SEL_ITEM_RIGHT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td.memItemRight").unwrap());
static SEL_DOC_LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a.el").unwrap());
static SEL_DESC: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td.mdescRight").unwrap());

// Generator artifacts in front of the return type.
static RE_QUALIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:proto\s+external|proto|external)(?:\s+|$)").unwrap());

static RE_STATIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bstatic\b").unwrap());

/// Link the generator appends to truncated briefs.
const MORE_LINK: &str = "More...";

/// One member declaration with its optional description row.
pub struct MemberRow<'a> {
    pub item: ElementRef<'a>,
    pub description: Option<ElementRef<'a>>,
    /// Text of the nearest preceding `h2`, e.g. "Static Public Member Functions".
    pub section: Option<String>,
}

impl MemberRow<'_> {
    fn in_static_section(&self) -> bool {
        self.section.as_deref().is_some_and(|s| s.contains("Static"))
    }
}

/// Two-state walk over a table's rows: wait for an item row, then take the
/// next row too if it is its description.
pub struct MemberRows<'a> {
    rows: Peekable<vec::IntoIter<ElementRef<'a>>>,
}

impl<'a> MemberRows<'a> {
    pub fn new(table: ElementRef<'a>) -> Self {
        Self {
            rows: direct_rows(table).into_iter().peekable(),
        }
    }
}

impl<'a> Iterator for MemberRows<'a> {
    type Item = MemberRow<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let row = self.rows.next()?;
            if !has_class_prefix(row, "memitem") {
                continue;
            }
            let description = self.rows.next_if(|next| has_class_prefix(*next, "memdesc"));
            let section = preceding(row, "h2").map(text_of);
            return Some(MemberRow {
                item: row,
                description,
                section,
            });
        }
    }
}

/// Every method declared in the page's member tables, in page order.
pub fn walk(html: &Html) -> Vec<MethodRecord> {
    html.select(&SEL_MEMBER_TABLE)
        .flat_map(MemberRows::new)
        .filter_map(|row| {
            let mut method = parse_signature(row.item, row.description)?;
            // Section headings override whatever the row itself said.
            if row.in_static_section() {
                method.is_static = true;
            }
            Some(method)
        })
        .collect()
}

/// Parse one declaration row. Rows without a documented name are dropped.
pub fn parse_signature(
    item: ElementRef<'_>,
    description: Option<ElementRef<'_>>,
) -> Option<MethodRecord> {
    let mut method = MethodRecord::default();

    if let Some(left) = item.select(&SEL_ITEM_LEFT).next() {
        let (return_type, is_static) = parse_return_type(&text_of(left));
        if !return_type.is_empty() {
            method.return_type = return_type;
        }
        method.is_static = is_static;
    }

    let right = item.select(&SEL_ITEM_RIGHT).next()?;
    method.name = right
        .select(&SEL_DOC_LINK)
        .next()
        .map(text_of)
        .filter(|name| !name.is_empty())?;

    let signature = right.text().collect::<String>();
    if let Some(raw) = parameter_substring(&signature) {
        method.parameters = params::parse(raw);
    }

    if let Some(cell) = description.and_then(|row| row.select(&SEL_DESC).next()) {
        let text = text_of(cell);
        method.description = text.trim_end_matches(MORE_LINK).trim_end().to_string();
    }

    Some(method)
}

/// Strip a `static` token and generator qualifiers from a return-type cell.
fn parse_return_type(cell_text: &str) -> (String, bool) {
    let is_static = RE_STATIC.is_match(cell_text);
    let text = collapse_whitespace(&RE_STATIC.replace_all(cell_text, " "));
    (RE_QUALIFIER.replace(&text, "").trim().to_string(), is_static)
}

/// Text between the first `(` and its matching `)`.
///
/// With unbalanced parentheses, runs to the last `)`, or to the end.
fn parameter_substring(signature: &str) -> Option<&str> {
    let open = signature.find('(')?;
    let inner = &signature[open + 1..];
    let mut depth = 0usize;
    for (i, ch) in inner.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' if depth == 0 => return Some(&inner[..i]),
            ')' => depth -= 1,
            _ => {}
        }
    }
    Some(inner.rfind(')').map_or(inner, |close| &inner[..close]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Modifier, VOID};

    fn item_row(anchor: &str, left: &str, right: &str) -> String {
        format!(
            "<tr class=\"memitem:{anchor}\"><td class=\"memItemLeft\" align=\"right\" valign=\"top\">{left}</td>\
             <td class=\"memItemRight\" valign=\"bottom\">{right}</td></tr>"
        )
    }

    fn desc_row(anchor: &str, text: &str) -> String {
        format!(
            "<tr class=\"memdesc:{anchor}\"><td class=\"mdescLeft\">&#160;</td>\
             <td class=\"mdescRight\">{text}</td></tr>"
        )
    }

    fn page(rows: &[String]) -> Html {
        Html::parse_document(&format!(
            "<html><body><table class=\"memberdecls\">{}</table></body></html>",
            rows.concat()
        ))
    }

    #[test]
    fn pairs_item_with_description() {
        let html = page(&[
            "<tr class=\"heading\"><td colspan=\"2\"><h2 class=\"groupheader\">Public Member Functions</h2></td></tr>".to_string(),
            item_row("a1", "proto external <a class=\"el\" href=\"x\">IEntity</a>", "<a class=\"el\" href=\"#a1\">GetParent</a> ()"),
            desc_row("a1", "Returns the parent entity. <a href=\"#a1\">More...</a>"),
            "<tr class=\"separator:a1\"><td class=\"memSeparator\" colspan=\"2\">&#160;</td></tr>".to_string(),
            item_row("a2", "void&#160;", "<a class=\"el\" href=\"#a2\">SetFlags</a> (int flags, bool recursive=false)"),
        ]);
        let methods = walk(&html);
        assert_eq!(methods.len(), 2);

        assert_eq!(methods[0].name, "GetParent");
        assert_eq!(methods[0].return_type, "IEntity");
        assert_eq!(methods[0].description, "Returns the parent entity.");
        assert!(methods[0].parameters.is_empty());
        assert!(!methods[0].is_static);
        assert_eq!(methods[0].access, "public");

        assert_eq!(methods[1].name, "SetFlags");
        assert_eq!(methods[1].description, "");
        assert_eq!(methods[1].parameters.len(), 2);
        assert_eq!(methods[1].parameters[1].name, "recursive");
        assert_eq!(methods[1].parameters[1].ty, "bool");
    }

    #[test]
    fn description_row_not_adjacent_is_ignored() {
        let html = page(&[
            item_row("a1", "int", "<a class=\"el\">A</a> ()"),
            "<tr class=\"separator:a1\"><td>&#160;</td></tr>".to_string(),
            desc_row("a1", "Orphan text"),
        ]);
        let methods = walk(&html);
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].description, "");
    }

    #[test]
    fn static_token_in_return_type() {
        let html = page(&[item_row(
            "a1",
            "static proto <a class=\"el\">BaseWorld</a>",
            "<a class=\"el\">GetWorld</a> ()",
        )]);
        let methods = walk(&html);
        assert!(methods[0].is_static);
        assert_eq!(methods[0].return_type, "BaseWorld");
    }

    #[test]
    fn linked_return_type_keeps_source_spacing() {
        let html = page(&[
            item_row(
                "a1",
                "array&lt;<a class=\"el\">IEntity</a>&gt;&#160;",
                "<a class=\"el\">GetChildren</a> ()",
            ),
            item_row(
                "a2",
                "<a class=\"el\">map</a>&lt; string, int &gt;&#160;",
                "<a class=\"el\">GetCounts</a> ()",
            ),
        ]);
        let methods = walk(&html);
        assert_eq!(methods[0].return_type, "array<IEntity>");
        assert_eq!(methods[1].return_type, "map< string, int >");
    }

    #[test]
    fn static_section_marks_methods_retroactively() {
        let html = page(&[
            "<tr class=\"heading\"><td colspan=\"2\"><h2 class=\"groupheader\">Static Public Member Functions</h2></td></tr>".to_string(),
            item_row("a1", "proto external int", "<a class=\"el\">Count</a> ()"),
        ]);
        let methods = walk(&html);
        assert!(methods[0].is_static);
        assert_eq!(methods[0].return_type, "int");
    }

    #[test]
    fn section_heading_before_table() {
        let html = Html::parse_document(&format!(
            "<h2>Static Public Member Functions</h2><table class=\"memberdecls\">{}</table>\
             <h2>Public Member Functions</h2><table class=\"memberdecls\">{}</table>",
            item_row("a1", "int", "<a class=\"el\">A</a> ()"),
            item_row("a2", "int", "<a class=\"el\">B</a> ()"),
        ));
        let methods = walk(&html);
        assert!(methods[0].is_static);
        assert!(!methods[1].is_static);
    }

    #[test]
    fn nameless_row_dropped_siblings_kept() {
        let html = page(&[
            item_row("a1", "int", "Operator ()"),
            item_row("a2", "int", "<a class=\"el\">Kept</a> (out vector mins, out vector maxs)"),
        ]);
        let methods = walk(&html);
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].name, "Kept");
        assert_eq!(methods[0].parameters[0].modifiers, vec![Modifier::Out]);
    }

    #[test]
    fn missing_return_type_defaults_to_void() {
        let html = page(&[item_row("a1", "proto external&#160;", "<a class=\"el\">Tick</a> ()")]);
        assert_eq!(walk(&html)[0].return_type, VOID);

        let html = page(&[item_row("a1", "", "<a class=\"el\">Tick</a> ()")]);
        assert_eq!(walk(&html)[0].return_type, VOID);

        let html = page(&[item_row("a1", "static", "<a class=\"el\">Tick</a> ()")]);
        let methods = walk(&html);
        assert_eq!(methods[0].return_type, VOID);
        assert!(methods[0].is_static);
    }

    #[test]
    fn non_item_rows_skipped() {
        let html = page(&[
            "<tr class=\"inherit_header pub_methods_classBase\"><td colspan=\"2\">Public Member Functions inherited from <a class=\"el\">Base</a></td></tr>".to_string(),
            "<tr><td><a class=\"el\">Loose</a> ()</td></tr>".to_string(),
        ]);
        assert!(walk(&html).is_empty());
    }

    #[test]
    fn parameter_substring_matches_nested_parens() {
        assert_eq!(parameter_substring("Call (func(int) cb, int n)"), Some("func(int) cb, int n"));
        assert_eq!(parameter_substring("Get ()"), Some(""));
        assert_eq!(parameter_substring("NoParens"), None);
        assert_eq!(parameter_substring("Open (int a"), Some("int a"));
    }

    #[test]
    fn return_type_static_is_a_whole_word() {
        assert_eq!(parse_return_type("StaticMesh"), ("StaticMesh".to_string(), false));
        assert_eq!(parse_return_type("STATIC  ref  Foo"), ("ref Foo".to_string(), true));
        assert_eq!(parse_return_type("external bool"), ("bool".to_string(), false));
        assert_eq!(parse_return_type("proto"), (String::new(), false));
    }
}
