//! Lookup key normalization.
//!
//! Every identifier-based comparison (lookup, uniqueness checks, alias
//! removal) goes through `normalize_key` so add and find never drift apart.

use crate::error::{CatalogError, CatalogResult};

/// Normalizes a title/alias into its comparison key.
///
/// Returns `None` for values that are blank after trimming; such values can
/// never name a record.
pub fn normalize_key(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// Returns whether two identifiers name the same thing.
pub fn same_key(left: &str, right: &str) -> bool {
    match (normalize_key(left), normalize_key(right)) {
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}

pub(crate) fn require_non_blank(value: &str, field: &str) -> CatalogResult<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::InvalidArgument(format!(
            "{field} must not be blank"
        )));
    }
    Ok(())
}
