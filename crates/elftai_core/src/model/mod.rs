//! Catalog domain model.
//!
//! # Responsibility
//! - Define the `Record` entity tracked by the catalog.
//! - Own the single key normalization rule used for every lookup.
//!
//! # Invariants
//! - Titles, aliases and items are never blank after trimming.
//! - Name comparison always goes through `normalize::normalize_key`.

pub mod normalize;
pub mod record;
