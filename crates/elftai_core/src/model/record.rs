//! Record domain model.
//!
//! # Responsibility
//! - Hold one tracked title with its aliases, comments and items.
//! - Enforce the rules that are local to a single record.
//!
//! # Invariants
//! - `aliases` never holds two values with the same normalized key.
//! - `items` never holds the same exact value twice.
//! - `comments` keep insertion order and are addressed by 0-based index.
//!
//! Cross-record rules (global alias uniqueness, sorted order) belong to
//! `catalog::manager`.

use crate::error::{CatalogError, CatalogResult};
use crate::model::normalize::{normalize_key, same_key};
use serde::{Deserialize, Serialize};

/// One tracked entity in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    title: String,
    aliases: Vec<String>,
    comments: Vec<String>,
    items: Vec<String>,
}

impl Record {
    /// Creates a record with no aliases, comments or items.
    ///
    /// The title is kept verbatim; only comparisons are normalized.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            aliases: Vec::new(),
            comments: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Rebuilds a record from persisted parts without re-checking them.
    pub(crate) fn from_parts(
        title: String,
        aliases: Vec<String>,
        comments: Vec<String>,
        items: Vec<String>,
    ) -> Self {
        Self {
            title,
            aliases,
            comments,
            items,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Aliases in insertion order.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Items in insertion order (oldest first).
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Returns whether the normalized `key` equals the title or any alias.
    ///
    /// `key` must already be the output of `normalize_key`.
    pub fn matches_key(&self, key: &str) -> bool {
        normalize_key(&self.title).as_deref() == Some(key)
            || self
                .aliases
                .iter()
                .any(|alias| normalize_key(alias).as_deref() == Some(key))
    }

    /// Appends an alias; rejects one already present on this record.
    pub fn add_alias(&mut self, alias: impl Into<String>) -> CatalogResult<()> {
        let alias = alias.into();
        if self.aliases.iter().any(|existing| same_key(existing, &alias)) {
            return Err(CatalogError::AliasExists(alias));
        }
        self.aliases.push(alias);
        Ok(())
    }

    /// Removes the alias whose normalized form matches `alias`.
    ///
    /// Returns the alias text as it was stored.
    pub fn remove_alias(&mut self, alias: &str) -> CatalogResult<String> {
        let position = self
            .aliases
            .iter()
            .position(|existing| same_key(existing, alias))
            .ok_or_else(|| CatalogError::AliasNotFound(alias.to_string()))?;
        Ok(self.aliases.remove(position))
    }

    pub fn add_comment(&mut self, text: impl Into<String>) {
        self.comments.push(text.into());
    }

    /// Replaces the comment at `index` and returns the previous text.
    pub fn set_comment(&mut self, index: usize, text: impl Into<String>) -> CatalogResult<String> {
        let len = self.comments.len();
        let slot = self
            .comments
            .get_mut(index)
            .ok_or(CatalogError::CommentIndexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, text.into()))
    }

    /// Removes and returns the comment at `index`.
    pub fn remove_comment(&mut self, index: usize) -> CatalogResult<String> {
        if index >= self.comments.len() {
            return Err(CatalogError::CommentIndexOutOfRange {
                index,
                len: self.comments.len(),
            });
        }
        Ok(self.comments.remove(index))
    }

    /// Adds an item; items are unique per record by exact value.
    pub fn add_item(&mut self, item: impl Into<String>) -> CatalogResult<()> {
        let item = item.into();
        if self.has_item(&item) {
            return Err(CatalogError::ItemExists {
                title: self.title.clone(),
                item,
            });
        }
        self.items.push(item);
        Ok(())
    }

    pub fn remove_item(&mut self, item: &str) -> CatalogResult<String> {
        let position = self
            .items
            .iter()
            .position(|existing| existing == item)
            .ok_or_else(|| CatalogError::ItemNotFound {
                title: self.title.clone(),
                item: item.to_string(),
            })?;
        Ok(self.items.remove(position))
    }

    pub fn has_item(&self, item: &str) -> bool {
        self.items.iter().any(|existing| existing == item)
    }

    /// Returns the most recently added `limit` items, oldest first.
    ///
    /// `None` returns every item.
    pub fn latest_items(&self, limit: Option<usize>) -> &[String] {
        match limit {
            Some(limit) if limit < self.items.len() => &self.items[self.items.len() - limit..],
            _ => &self.items,
        }
    }
}
