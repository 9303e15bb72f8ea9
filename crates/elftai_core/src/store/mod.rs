//! Backing-file persistence for the catalog.
//!
//! # Responsibility
//! - Encode/decode records as CSV rows (`csv_codec`).
//! - Own file-level snapshot, overwrite, restore and backup steps (`file`).

pub mod csv_codec;
pub mod file;
