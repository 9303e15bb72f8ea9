//! Core catalog logic for ElfTAI.
//! This crate owns the title catalog invariants and its CSV persistence.

pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod store;

pub use catalog::manager::TitleCatalog;
pub use catalog::render::SUMMARY_TITLE_WIDTH;
pub use config::CatalogConfig;
pub use error::{CatalogError, CatalogResult, ErrorKind};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::normalize::normalize_key;
pub use model::record::Record;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
