//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `elftai_core` linkage by opening a catalog and printing its summary.
//! - Never create or rewrite the catalog file; a missing file is an error.

use elftai_core::{core_version, TitleCatalog};
use std::path::Path;
use std::process::ExitCode;

const DEFAULT_CATALOG_PATH: &str = "titles.csv";

fn main() -> ExitCode {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CATALOG_PATH.to_string());
    println!("elftai_core version={}", core_version());

    if let Err(message) = require_existing(&path) {
        eprintln!("elftai: {message}");
        return ExitCode::FAILURE;
    }

    let catalog = match TitleCatalog::open(&path, None) {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("elftai: cannot open `{path}`: {err}");
            return ExitCode::FAILURE;
        }
    };
    println!("elftai_core records={}", catalog.len());

    let mut out = std::io::stdout().lock();
    if let Err(err) = catalog.print_summary(&mut out) {
        eprintln!("elftai: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn require_existing(path: &str) -> Result<(), String> {
    if Path::new(path).is_file() {
        return Ok(());
    }
    Err(format!("catalog file `{path}` does not exist"))
}
