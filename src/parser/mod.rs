//! Parser module: one reference page into one class record.

pub mod identity;
pub mod inheritance;
pub mod members;
pub mod params;

use crate::error::Result;
use crate::model::ClassRecord;
use crate::page::{self, text_of};
use scraper::{Html, Selector};
use std::path::Path;
use std::sync::LazyLock;

/// Class descriptions longer than this are cut.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

static SEL_GROUP_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.ingroups a").unwrap());
static SEL_TEXTBLOCK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.textblock").unwrap());

/// Load and parse a page file. `Ok(None)` means the page is not a class page.
pub fn parse_file(path: &Path) -> Result<Option<ClassRecord>> {
    let html = page::load(path)?;
    let record = parse_page(&html);
    if record.is_none() {
        log::debug!("skipping {}: no class name", path.display());
    }
    Ok(record)
}

/// Assemble a class record from a parsed page.
pub fn parse_page(html: &Html) -> Option<ClassRecord> {
    let name = identity::resolve(html)?;
    let extends = inheritance::resolve(html, &name);

    let module = html
        .select(&SEL_GROUP_LINK)
        .next()
        .map(text_of)
        .unwrap_or_default();

    let description = html
        .select(&SEL_TEXTBLOCK)
        .next()
        .map(|block| truncate_chars(&text_of(block), MAX_DESCRIPTION_CHARS))
        .unwrap_or_default();

    Some(ClassRecord {
        methods: members::walk(html),
        name,
        extends,
        module,
        properties: Vec::new(),
        description,
    })
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}
