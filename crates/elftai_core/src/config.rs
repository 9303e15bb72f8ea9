//! Catalog file configuration.
//!
//! # Responsibility
//! - Describe where the primary CSV file and its optional backup live.
//! - Validate path choices before the catalog touches the file system.
//!
//! # Invariants
//! - `primary_path` is never empty.
//! - `backup_path`, when set, is non-empty and differs from `primary_path`.

use crate::error::{CatalogError, CatalogResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const BACKUP_EXTENSION: &str = "bak";

/// File locations for one catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogConfig {
    /// Authoritative CSV file.
    pub primary_path: PathBuf,
    /// Receives the pre-overwrite primary contents on every save.
    #[serde(default)]
    pub backup_path: Option<PathBuf>,
}

impl CatalogConfig {
    pub fn new(primary_path: impl Into<PathBuf>) -> Self {
        Self {
            primary_path: primary_path.into(),
            backup_path: None,
        }
    }

    pub fn with_backup(mut self, backup_path: impl Into<PathBuf>) -> Self {
        self.backup_path = Some(backup_path.into());
        self
    }

    /// Uses `<primary file name>.bak` next to the primary file as backup.
    pub fn with_default_backup(mut self) -> Self {
        let mut name = self.primary_path.as_os_str().to_owned();
        name.push(".");
        name.push(BACKUP_EXTENSION);
        self.backup_path = Some(PathBuf::from(name));
        self
    }

    /// Checks path invariants.
    ///
    /// # Errors
    /// - `InvalidArgument` when either path is empty or both are the same.
    pub fn validate(&self) -> CatalogResult<()> {
        Self::validate_paths(&self.primary_path, self.backup_path.as_deref())
    }

    pub(crate) fn validate_paths(
        primary_path: &Path,
        backup_path: Option<&Path>,
    ) -> CatalogResult<()> {
        if primary_path.as_os_str().is_empty() {
            return Err(CatalogError::InvalidArgument(
                "primary_path cannot be empty".to_string(),
            ));
        }
        let Some(backup_path) = backup_path else {
            return Ok(());
        };
        if backup_path.as_os_str().is_empty() {
            return Err(CatalogError::InvalidArgument(
                "backup_path cannot be empty when set".to_string(),
            ));
        }
        if backup_path == primary_path {
            return Err(CatalogError::InvalidArgument(format!(
                "backup_path must differ from primary_path `{}`",
                primary_path.display()
            )));
        }
        Ok(())
    }
}
