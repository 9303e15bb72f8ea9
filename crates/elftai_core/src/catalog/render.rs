//! Plain-text presentation of records.
//!
//! # Responsibility
//! - Summary line: padded title column plus aliases.
//! - Full block: title, aliases, numbered comments, latest items.
//!
//! # Invariants
//! - Output is single-line per entry; embedded newlines are collapsed.
//! - Rendering never mutates records.

use crate::error::{CatalogError, CatalogResult};
use crate::model::record::Record;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Write;

pub const SUMMARY_TITLE_WIDTH: usize = 40;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

pub(crate) fn write_summary_line(out: &mut impl Write, record: &Record) -> CatalogResult<()> {
    let title = fit_width(&single_line(record.title()), SUMMARY_TITLE_WIDTH);
    let aliases = record
        .aliases()
        .iter()
        .map(|alias| single_line(alias))
        .collect::<Vec<_>>()
        .join(", ");
    let line = if aliases.is_empty() {
        title
    } else {
        format!("{title:<width$} | {aliases}", width = SUMMARY_TITLE_WIDTH)
    };
    writeln!(out, "{}", line.trim_end()).map_err(CatalogError::Render)
}

pub(crate) fn write_block(
    out: &mut impl Write,
    record: &Record,
    item_limit: Option<usize>,
) -> CatalogResult<()> {
    render_block(out, record, item_limit).map_err(CatalogError::Render)
}

fn render_block(
    out: &mut impl Write,
    record: &Record,
    item_limit: Option<usize>,
) -> std::io::Result<()> {
    writeln!(out, "== {} ==", single_line(record.title()))?;
    if !record.aliases().is_empty() {
        let aliases = record
            .aliases()
            .iter()
            .map(|alias| single_line(alias))
            .collect::<Vec<_>>();
        writeln!(out, "aliases: {}", aliases.join(", "))?;
    }

    if !record.comments().is_empty() {
        writeln!(out, "comments:")?;
        for (index, comment) in record.comments().iter().enumerate() {
            writeln!(out, "  [{index}] {}", single_line(comment))?;
        }
    }

    let items = record.latest_items(item_limit);
    if !items.is_empty() {
        if items.len() < record.items().len() {
            writeln!(
                out,
                "items (latest {} of {}):",
                items.len(),
                record.items().len()
            )?;
        } else {
            writeln!(out, "items:")?;
        }
        for item in items {
            writeln!(out, "  - {}", single_line(item))?;
        }
    }

    writeln!(out)
}

fn single_line(value: &str) -> String {
    WHITESPACE_RE.replace_all(value.trim(), " ").into_owned()
}

fn fit_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut truncated = value.chars().take(width.saturating_sub(3)).collect::<String>();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::{fit_width, single_line, write_block, write_summary_line, SUMMARY_TITLE_WIDTH};
    use crate::model::record::Record;

    #[test]
    fn single_line_collapses_whitespace_runs() {
        assert_eq!(single_line("  a\n\tb   c "), "a b c");
    }

    #[test]
    fn fit_width_truncates_long_titles() {
        let long = "x".repeat(60);
        let fitted = fit_width(&long, SUMMARY_TITLE_WIDTH);
        assert_eq!(fitted.chars().count(), SUMMARY_TITLE_WIDTH);
        assert!(fitted.ends_with("..."));
    }

    #[test]
    fn summary_line_pads_title_before_aliases() {
        let mut record = Record::new("Foo");
        record.add_alias("bar").unwrap();
        record.add_alias("baz").unwrap();

        let mut out = Vec::new();
        write_summary_line(&mut out, &record).unwrap();
        let line = String::from_utf8(out).unwrap();
        assert_eq!(line, format!("{:<40} | bar, baz\n", "Foo"));
    }

    #[test]
    fn block_marks_truncated_item_lists() {
        let mut record = Record::new("Foo");
        record.add_comment("first\nline");
        for item in ["a", "b", "c"] {
            record.add_item(item).unwrap();
        }

        let mut out = Vec::new();
        write_block(&mut out, &record, Some(1)).unwrap();
        let block = String::from_utf8(out).unwrap();
        assert!(block.contains("  [0] first line\n"));
        assert!(block.contains("items (latest 1 of 3):\n  - c\n"));
        assert!(!block.contains("  - a"));
    }
}
