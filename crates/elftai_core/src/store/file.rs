//! File primitives for the catalog's backing CSV file.
//!
//! # Responsibility
//! - Open the primary file, creating it empty when absent.
//! - Snapshot, overwrite and restore the primary file around a save.
//! - Copy the pre-overwrite snapshot to the backup path.
//!
//! # Invariants
//! - A failed overwrite is followed by a restore from the snapshot captured
//!   before the destructive write began.
//! - Backups are verbatim byte copies of that same snapshot.

use crate::error::{CatalogError, CatalogResult};
use log::{error, warn};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// Opens `path` for reading, creating an empty file when it does not exist.
///
/// Returns `None` when the file was just created, so there is nothing to load.
pub fn open_or_create(path: &Path) -> CatalogResult<Option<File>> {
    match File::open(path) {
        Ok(file) => Ok(Some(file)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            File::create(path).map_err(|err| CatalogError::io(path, err))?;
            Ok(None)
        }
        Err(err) => Err(CatalogError::io(path, err)),
    }
}

/// Reads the full current contents of `path`.
///
/// Returns `None` when the file does not exist.
pub fn read_snapshot(path: &Path) -> CatalogResult<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(CatalogError::io(path, err)),
    }
}

/// Truncates `path` and lets `write` fill it.
///
/// When `write` (or the final flush) fails, the file is rewritten from
/// `snapshot` on a best-effort basis and the original error is returned.
pub fn overwrite_with_restore<F>(
    path: &Path,
    snapshot: Option<&[u8]>,
    write: F,
) -> CatalogResult<()>
where
    F: FnOnce(&mut File) -> CatalogResult<()>,
{
    let result = File::create(path)
        .map_err(|err| CatalogError::io(path, err))
        .and_then(|mut file| {
            write(&mut file)?;
            file.flush().map_err(|err| CatalogError::io(path, err))?;
            file.sync_all().map_err(|err| CatalogError::io(path, err))
        });

    if let Err(err) = result {
        error!(
            "event=catalog_overwrite module=store status=error path={} error={}",
            path.display(),
            err
        );
        restore_snapshot(path, snapshot);
        return Err(err);
    }

    Ok(())
}

/// Writes `snapshot` verbatim to `backup_path`.
pub fn write_backup(backup_path: &Path, snapshot: &[u8]) -> CatalogResult<()> {
    fs::write(backup_path, snapshot).map_err(|err| CatalogError::io(backup_path, err))
}

fn restore_snapshot(path: &Path, snapshot: Option<&[u8]>) {
    let Some(snapshot) = snapshot else {
        warn!(
            "event=catalog_restore module=store status=skipped reason=no_snapshot path={}",
            path.display()
        );
        return;
    };

    match fs::write(path, snapshot) {
        Ok(()) => warn!(
            "event=catalog_restore module=store status=ok path={} bytes={}",
            path.display(),
            snapshot.len()
        ),
        Err(err) => error!(
            "event=catalog_restore module=store status=error path={} error={}",
            path.display(),
            err
        ),
    }
}
