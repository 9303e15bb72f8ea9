//! Record manager over the backing CSV file.
//!
//! # Responsibility
//! - Load every record from the primary file once, at open.
//! - Apply node/alias/comment/item mutations under catalog-wide invariants.
//! - Rewrite the primary file on save, with restore-on-failure and backup.
//!
//! # Invariants
//! - No two records share a normalized title or alias; aliases never collide
//!   with any title, including their own record's.
//! - `records` is sorted by title after every insertion. Load keeps file order.
//! - The primary file is only rewritten by `save`/`close`.

use crate::catalog::render;
use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::model::normalize::{normalize_key, require_non_blank};
use crate::model::record::Record;
use crate::store::csv_codec::{write_records, RecordReader};
use crate::store::file;
use log::{debug, error, info};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// In-memory catalog of records bound to one primary CSV file.
#[derive(Debug)]
pub struct TitleCatalog {
    records: Vec<Record>,
    primary_path: PathBuf,
    backup_path: Option<PathBuf>,
}

impl TitleCatalog {
    /// Opens the catalog stored at `primary_path`.
    ///
    /// A missing primary file is created empty. Records are kept in file order.
    ///
    /// # Errors
    /// - `InvalidArgument` when the paths fail `CatalogConfig::validate`.
    /// - `Io` when the file exists but cannot be read, or cannot be created.
    /// - `Csv`/`InvalidData` when existing rows are malformed.
    pub fn open(
        primary_path: impl Into<PathBuf>,
        backup_path: Option<PathBuf>,
    ) -> CatalogResult<Self> {
        let primary_path = primary_path.into();
        CatalogConfig::validate_paths(&primary_path, backup_path.as_deref())?;
        let started_at = Instant::now();
        info!("event=catalog_open module=catalog status=start");

        match load_records(&primary_path) {
            Ok(records) => {
                info!(
                    "event=catalog_open module=catalog status=ok records={} backup={} duration_ms={}",
                    records.len(),
                    backup_path.is_some(),
                    started_at.elapsed().as_millis()
                );
                Ok(Self {
                    records,
                    primary_path,
                    backup_path,
                })
            }
            Err(err) => {
                error!(
                    "event=catalog_open module=catalog status=error path={} duration_ms={} error={}",
                    primary_path.display(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Opens the catalog described by `config`.
    pub fn open_with_config(config: &CatalogConfig) -> CatalogResult<Self> {
        Self::open(config.primary_path.clone(), config.backup_path.clone())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn primary_path(&self) -> &Path {
        &self.primary_path
    }

    pub fn backup_path(&self) -> Option<&Path> {
        self.backup_path.as_deref()
    }

    /// Persists all records, consuming the catalog.
    ///
    /// The records are dropped even when the save fails; callers that want to
    /// retry after an error should use `save` and keep the catalog.
    pub fn close(self) -> CatalogResult<()> {
        self.save()
    }

    /// Rewrites the primary file from the in-memory records.
    ///
    /// The previous file contents are captured first and copied to the backup
    /// path when one is configured. A failed backup aborts the save with the
    /// primary file untouched. If the rewrite fails, the snapshot is written
    /// back and the error returned.
    pub fn save(&self) -> CatalogResult<()> {
        let started_at = Instant::now();
        let snapshot = file::read_snapshot(&self.primary_path)?;

        let backed_up = match (&self.backup_path, &snapshot) {
            (Some(backup_path), Some(snapshot)) => {
                file::write_backup(backup_path, snapshot)?;
                true
            }
            _ => false,
        };

        file::overwrite_with_restore(&self.primary_path, snapshot.as_deref(), |sink| {
            write_records(sink, &self.records).map(|_| ())
        })?;

        info!(
            "event=catalog_save module=catalog status=ok records={} backup_written={} duration_ms={}",
            self.records.len(),
            backed_up,
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    /// Resolves `query` against titles and aliases, trimmed and case-folded.
    ///
    /// Returns the first match in current record order.
    pub fn find_by_name(&self, query: &str) -> Option<&Record> {
        self.position_by_name(query).map(|index| &self.records[index])
    }

    /// Adds a new record titled `title`, stored verbatim.
    pub fn add_node(&mut self, title: &str) -> CatalogResult<()> {
        require_non_blank(title, "title")?;
        if self.position_by_name(title).is_some() {
            return Err(CatalogError::NodeExists(title.to_string()));
        }

        self.insert_sorted(Record::new(title));
        debug!(
            "event=node_add module=catalog status=ok records={}",
            self.records.len()
        );
        Ok(())
    }

    /// Removes and returns the record resolved by `query`.
    pub fn remove_node(&mut self, query: &str) -> CatalogResult<Record> {
        let index = self
            .position_by_name(query)
            .ok_or_else(|| CatalogError::NodeNotFound(query.to_string()))?;
        let removed = self.records.remove(index);
        debug!(
            "event=node_remove module=catalog status=ok records={}",
            self.records.len()
        );
        Ok(removed)
    }

    /// Adds `alias` to the record resolved by `query`.
    ///
    /// The alias is checked against every title and alias first.
    pub fn add_alias(&mut self, query: &str, alias: &str) -> CatalogResult<()> {
        require_non_blank(alias, "alias")?;
        if self.position_by_name(alias).is_some() {
            return Err(CatalogError::AliasExists(alias.to_string()));
        }
        self.resolve_mut(query)?.add_alias(alias)
    }

    /// Removes `alias` from whichever record carries it.
    ///
    /// Matching is normalized: `" BAR "` removes a stored `bar`. A query that
    /// only resolves through a record's title is rejected.
    ///
    /// Returns the alias text as it was stored.
    pub fn remove_alias(&mut self, alias: &str) -> CatalogResult<String> {
        let index = self
            .position_by_name(alias)
            .ok_or_else(|| CatalogError::AliasNotFound(alias.to_string()))?;
        self.records[index].remove_alias(alias)
    }

    /// Replaces comment `index` of the resolved record and returns the old text.
    pub fn set_comment(&mut self, query: &str, index: usize, text: &str) -> CatalogResult<String> {
        self.resolve_mut(query)?.set_comment(index, text)
    }

    pub fn add_comment(&mut self, query: &str, text: &str) -> CatalogResult<()> {
        self.resolve_mut(query)?.add_comment(text);
        Ok(())
    }

    /// Removes and returns comment `index` of the resolved record.
    pub fn remove_comment(&mut self, query: &str, index: usize) -> CatalogResult<String> {
        self.resolve_mut(query)?.remove_comment(index)
    }

    /// Comments of the resolved record, in order.
    pub fn comments_of(&self, query: &str) -> CatalogResult<&[String]> {
        Ok(self.resolve(query)?.comments())
    }

    /// Adds `item` to the resolved record; items are unique per record only.
    pub fn add_item(&mut self, query: &str, item: &str) -> CatalogResult<()> {
        require_non_blank(item, "item")?;
        self.resolve_mut(query)?.add_item(item)
    }

    pub fn remove_item(&mut self, query: &str, item: &str) -> CatalogResult<()> {
        self.resolve_mut(query)?.remove_item(item).map(|_| ())
    }

    /// Returns every record carrying `item`, in catalog order.
    pub fn find_by_item(&self, item: &str) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|record| record.has_item(item))
            .collect()
    }

    /// Writes one summary line (title and aliases) per record.
    pub fn print_summary(&self, out: &mut impl Write) -> CatalogResult<()> {
        for record in &self.records {
            render::write_summary_line(out, record)?;
        }
        Ok(())
    }

    /// Writes the full block of one resolved record, or of every record.
    ///
    /// `item_limit` keeps only the latest N items of each block.
    pub fn print_full(
        &self,
        out: &mut impl Write,
        query: Option<&str>,
        item_limit: Option<usize>,
    ) -> CatalogResult<()> {
        match query {
            Some(query) => render::write_block(out, self.resolve(query)?, item_limit),
            None => {
                for record in &self.records {
                    render::write_block(out, record, item_limit)?;
                }
                Ok(())
            }
        }
    }

    fn position_by_name(&self, query: &str) -> Option<usize> {
        let key = normalize_key(query)?;
        self.records
            .iter()
            .position(|record| record.matches_key(&key))
    }

    fn resolve(&self, query: &str) -> CatalogResult<&Record> {
        self.find_by_name(query)
            .ok_or_else(|| CatalogError::NodeNotFound(query.to_string()))
    }

    fn resolve_mut(&mut self, query: &str) -> CatalogResult<&mut Record> {
        let index = self
            .position_by_name(query)
            .ok_or_else(|| CatalogError::NodeNotFound(query.to_string()))?;
        Ok(&mut self.records[index])
    }

    // Loaded files may be out of order; those get one stable full sort.
    fn insert_sorted(&mut self, record: Record) {
        let in_order = self
            .records
            .windows(2)
            .all(|pair| pair[0].title() <= pair[1].title());
        if in_order {
            let index = self
                .records
                .partition_point(|existing| existing.title() <= record.title());
            self.records.insert(index, record);
        } else {
            self.records.push(record);
            self.records.sort_by(|left, right| left.title().cmp(right.title()));
        }
    }
}

fn load_records(path: &Path) -> CatalogResult<Vec<Record>> {
    match file::open_or_create(path)? {
        Some(source) => RecordReader::new(BufReader::new(source)).read_all(),
        None => {
            info!(
                "event=catalog_create module=catalog status=ok path={}",
                path.display()
            );
            Ok(Vec::new())
        }
    }
}
