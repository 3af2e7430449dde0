//! Parameter list tokenizer.
//!
//! Splits `out notnull IEntity parent, map<string, int> m, int flags = 5`
//! into parameter records. Commas only separate parameters at bracket depth
//! zero, so generic and callback types stay whole.

use crate::model::{Modifier, ParameterRecord};

/// Tokenize a raw parameter substring. Whitespace-only input yields nothing.
pub fn parse(raw: &str) -> Vec<ParameterRecord> {
    split_top_level(raw)
        .into_iter()
        .filter_map(parse_one)
        .collect()
}

/// Split on commas outside `<>`, `[]` and `()`.
///
/// Depth is a plain counter: a stray closer takes it below zero, and commas
/// only split again once a later opener brings it back. `a>b<c, d>` is two
/// parameters.
pub fn split_top_level(raw: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;
    for (i, ch) in raw.char_indices() {
        match ch {
            '<' | '[' | '(' => depth += 1,
            '>' | ']' | ')' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&raw[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&raw[start..]);
    parts
}

/// One top-level token → one parameter, or `None` if nothing usable is left.
fn parse_one(token: &str) -> Option<ParameterRecord> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    let declaration = strip_default(token);
    let (modifiers, rest) = peel_modifiers(declaration);

    let words: Vec<&str> = rest.split_whitespace().collect();
    let (ty, name) = match words.as_slice() {
        [] => return None,
        [ty] => (ty.to_string(), String::new()),
        [ty_words @ .., name] => (ty_words.join(" "), name.to_string()),
    };

    Some(ParameterRecord {
        name,
        ty,
        modifiers,
    })
}

/// Drop a `= default` suffix.
fn strip_default(token: &str) -> &str {
    match token.split_once('=') {
        Some((before, _)) => before.trim(),
        None => token,
    }
}

/// Peel leading modifier keywords until the next word is not one.
///
/// A keyword only counts when something follows it, so a lone `out` is a
/// type. Peeling already-peeled text is a no-op.
pub fn peel_modifiers(token: &str) -> (Vec<Modifier>, &str) {
    let mut modifiers = Vec::new();
    let mut rest = token.trim_start();
    while let Some((word, tail)) = rest.split_once(char::is_whitespace) {
        let Some(modifier) = Modifier::from_keyword(word) else {
            break;
        };
        if !modifiers.contains(&modifier) {
            modifiers.push(modifier);
        }
        rest = tail.trim_start();
    }
    (modifiers, rest)
}
