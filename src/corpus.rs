//! Corpus aggregation: every class page of one API family, in filename order.

use crate::error::{ExtractError, Result};
use crate::model::ClassRecord;
use crate::parser;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Class reference pages emitted by the generator.
pub const DEFAULT_PATTERN: &str = "interface*.html";

/// Per-class member listings share the page prefix but carry no declarations.
const MEMBERS_SUFFIX: &str = "-members.html";

#[derive(Debug, Default, Clone, Copy)]
pub struct Options {
    /// Parse pages on the rayon pool. Output order is unchanged.
    pub parallel: bool,
    /// Collapse repeated class names, last one wins.
    pub dedup: bool,
}

/// Class pages directly inside `dir` matching `pattern`, sorted.
pub fn discover(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ExtractError::SourceMissing(dir.to_path_buf()));
    }

    let full = Path::new(&glob::Pattern::escape(&dir.to_string_lossy())).join(pattern);
    let mut files: Vec<PathBuf> = glob::glob(&full.to_string_lossy())?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .filter(|path| {
            !path
                .file_name()
                .is_some_and(|name| name.to_string_lossy().ends_with(MEMBERS_SUFFIX))
        })
        .collect();
    // Filename order keeps children lists reproducible.
    files.sort();
    Ok(files)
}

/// Parse `paths` into a corpus.
///
/// Unreadable pages are logged and skipped; pages without a class name are
/// skipped silently. `progress` receives (processed, total) after each page.
pub fn build<F>(paths: &[PathBuf], options: Options, progress: F) -> Vec<ClassRecord>
where
    F: Fn(usize, usize) + Sync,
{
    let total = paths.len();
    let processed = AtomicUsize::new(0);
    let parse_one = |path: &PathBuf| {
        let record = parse_or_warn(path);
        progress(processed.fetch_add(1, Ordering::Relaxed) + 1, total);
        record
    };

    // Indexed collect keeps input order in both modes.
    let parsed: Vec<Option<ClassRecord>> = if options.parallel {
        paths.par_iter().map(&parse_one).collect()
    } else {
        paths.iter().map(&parse_one).collect()
    };

    let corpus: Vec<ClassRecord> = parsed.into_iter().flatten().collect();
    if options.dedup {
        dedup_by_name(corpus)
    } else {
        corpus
    }
}

fn parse_or_warn(path: &Path) -> Option<ClassRecord> {
    match parser::parse_file(path) {
        Ok(record) => record,
        Err(e) => {
            log::warn!("skipping page: {e}");
            None
        }
    }
}

/// Keep one record per class name: the last one seen, at the position of
/// the first.
pub fn dedup_by_name(records: Vec<ClassRecord>) -> Vec<ClassRecord> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<ClassRecord> = Vec::with_capacity(records.len());

    for record in records {
        if let Some(&at) = positions.get(&record.name) {
            log::warn!("duplicate class {}, keeping the later page", record.name);
            unique[at] = record;
        } else {
            positions.insert(record.name.clone(), unique.len());
            unique.push(record);
        }
    }
    unique
}
