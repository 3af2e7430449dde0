//! apimodel: turn generated class reference pages into a structured API model.
//!
//! Reads the HTML reference of two scripting API families, extracts classes,
//! parents, methods and parameters, and writes:
//!
//! - `<family>.json`: every class record of one family
//! - `summary.json`: class and method counts over both families
//! - `inheritance-tree.json`: roots and parent → children lists
//!
//! Example: `apimodel --enfusion docs/enfusion --arma docs/arma -o data/api`

mod corpus;
mod error;
mod model;
mod page;
mod parser;
mod render;
mod summary;
mod tree;

use anyhow::{Context, Result};
use clap::Parser;
use error::ExtractError;
use model::ClassRecord;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_ENFUSION_DOCS: &str = r"D:\SteamLibrary\steamapps\common\Arma Reforger Tools\Workbench\docs\EnfusionScriptAPIPublic\EnfusionScriptAPIPublic";
const DEFAULT_ARMA_DOCS: &str = r"D:\SteamLibrary\steamapps\common\Arma Reforger Tools\Workbench\docs\ArmaReforgerScriptAPIPublic\ArmaReforgerScriptAPIPublic";

/// Print a progress line every this many pages.
const PROGRESS_EVERY: usize = 100;

#[derive(Parser)]
#[command(
    name = "apimodel",
    about = "Extract classes, inheritance and method signatures from generated API reference pages"
)]
struct Cli {
    /// Enfusion Script API reference directory
    #[arg(long, default_value = DEFAULT_ENFUSION_DOCS)]
    enfusion: PathBuf,

    /// Arma Reforger Script API reference directory
    #[arg(long, default_value = DEFAULT_ARMA_DOCS)]
    arma: PathBuf,

    /// Output directory for JSON files (created if missing)
    #[arg(short = 'o', long, default_value = "data/api")]
    output: PathBuf,

    /// Glob matching class pages inside each reference directory
    #[arg(long, default_value = corpus::DEFAULT_PATTERN)]
    pattern: String,

    /// Keep only the last page seen for each class name
    #[arg(long)]
    dedup: bool,

    /// Parse pages in parallel (output order is unchanged)
    #[arg(long)]
    parallel: bool,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short = 'v', long)]
    verbose: bool,
}

/// One API family: a reference directory and the file its corpus goes to.
struct Family<'a> {
    title: &'static str,
    stem: &'static str,
    source: &'a Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    fs::create_dir_all(&cli.output).with_context(|| {
        format!("failed to create output directory: {}", cli.output.display())
    })?;

    let families = [
        Family {
            title: "Enfusion Script API",
            stem: "enfusion",
            source: &cli.enfusion,
        },
        Family {
            title: "Arma Reforger Script API",
            stem: "arma-reforger",
            source: &cli.arma,
        },
    ];

    let mut all_classes: Vec<ClassRecord> = Vec::new();
    for family in &families {
        all_classes.extend(extract_family(family, &cli)?);
    }

    println!("\n=== Generating Summary ===");
    let summary = summary::build(&all_classes);
    let summary_path = cli.output.join("summary.json");
    render::json::write(&summary_path, &summary)?;
    println!("Saved summary to {}", summary_path.display());

    println!("\n=== Generating Inheritance Tree ===");
    let tree = tree::build(&all_classes);
    let tree_path = cli.output.join("inheritance-tree.json");
    render::json::write(&tree_path, &tree)?;
    println!("Saved inheritance tree to {}", tree_path.display());

    print!("{}", render::text::report(&summary, &tree));
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

/// Parse one family and write its corpus. A missing reference directory is
/// reported and yields an empty corpus; the run goes on.
fn extract_family(family: &Family, cli: &Cli) -> Result<Vec<ClassRecord>> {
    let files = match corpus::discover(family.source, &cli.pattern) {
        Ok(files) => files,
        Err(ExtractError::SourceMissing(path)) => {
            eprintln!("warning: {} docs not found at {}", family.title, path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e).context(format!("cannot scan {} docs", family.title)),
    };

    println!("\n=== Parsing {} ===", family.title);
    println!("Found {} class files in {}", files.len(), family.source.display());

    let options = corpus::Options {
        parallel: cli.parallel,
        dedup: cli.dedup,
    };
    let classes = corpus::build(&files, options, |done, total| {
        if done % PROGRESS_EVERY == 0 {
            println!("Processing {done}/{total}...");
        }
    });
    println!("Parsed {} classes from {}", classes.len(), family.title);

    let out_path = cli.output.join(format!("{}.json", family.stem));
    render::json::write(&out_path, &classes)?;
    println!("Saved to {}", out_path.display());

    Ok(classes)
}
