//! JSON writer for the output documents.
//!
//! Output is pretty-printed with a trailing newline. Maps are ordered, so two
//! runs over the same pages produce identical files.

use crate::error::{ExtractError, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

pub fn render<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

pub fn write<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let out = render(value)?;
    fs::write(path, out).map_err(|source| ExtractError::Write {
        path: path.to_path_buf(),
        source,
    })
}
