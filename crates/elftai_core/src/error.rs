//! Error taxonomy for catalog operations.
//!
//! # Responsibility
//! - Give every manager/record failure a typed, matchable variant.
//! - Collapse variants into the coarse `ErrorKind` front-ends render.
//!
//! # Invariants
//! - Every fallible catalog API returns `CatalogResult<T>`.
//! - Errors are surfaced to the caller; nothing here is retried or swallowed.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Coarse failure category shared by all `CatalogError` variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A query or sub-entity (alias, item) does not exist.
    NotFound,
    /// An insertion would break a uniqueness invariant.
    AlreadyExists,
    /// A comment index is outside the current comment list.
    IndexOutOfRange,
    /// An argument fails a shape precondition (e.g. blank after trim).
    InvalidArgument,
    /// Backing file could not be created, read, parsed or written.
    IoFailure,
}

/// Error returned by record manager and record operations.
#[derive(Debug)]
pub enum CatalogError {
    /// No record resolves from the given title/alias query.
    NodeNotFound(String),
    /// The query resolves, but not through any alias.
    AliasNotFound(String),
    /// The resolved record does not carry the item.
    ItemNotFound { title: String, item: String },
    /// A title/alias with the same normalized key already exists.
    NodeExists(String),
    /// The alias collides with an existing title or alias.
    AliasExists(String),
    /// The item is already present on the record.
    ItemExists { title: String, item: String },
    /// Comment position is not a valid existing index.
    CommentIndexOutOfRange { index: usize, len: usize },
    /// Argument rejected before touching any record.
    InvalidArgument(String),
    /// File-system failure on the named path.
    Io { path: PathBuf, source: io::Error },
    /// CSV layer failure while reading or writing rows.
    Csv(csv::Error),
    /// Presentation output could not be written.
    Render(io::Error),
    /// Rows were readable but do not form valid records.
    InvalidData(String),
}

impl CatalogError {
    /// Returns the coarse category for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NodeNotFound(_) | Self::AliasNotFound(_) | Self::ItemNotFound { .. } => {
                ErrorKind::NotFound
            }
            Self::NodeExists(_) | Self::AliasExists(_) | Self::ItemExists { .. } => {
                ErrorKind::AlreadyExists
            }
            Self::CommentIndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Io { .. } | Self::Csv(_) | Self::Render(_) | Self::InvalidData(_) => {
                ErrorKind::IoFailure
            }
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NodeNotFound(query) => write!(f, "could not identify node `{query}`"),
            Self::AliasNotFound(alias) => write!(f, "no node has alias `{alias}`"),
            Self::ItemNotFound { title, item } => {
                write!(f, "node `{title}` does not have item `{item}`")
            }
            Self::NodeExists(title) => write!(f, "node `{title}` already exists"),
            Self::AliasExists(alias) => {
                write!(f, "node with alias or title `{alias}` already exists")
            }
            Self::ItemExists { title, item } => {
                write!(f, "item `{item}` already exists in node `{title}`")
            }
            Self::CommentIndexOutOfRange { index, len } => {
                write!(f, "comment index {index} out of range for {len} comments")
            }
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            Self::Io { path, source } => write!(f, "i/o failure on `{}`: {source}", path.display()),
            Self::Csv(err) => write!(f, "{err}"),
            Self::Render(err) => write!(f, "failed to write output: {err}"),
            Self::InvalidData(message) => write!(f, "invalid catalog data: {message}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv(err) => Some(err),
            Self::Render(err) => Some(err),
            _ => None,
        }
    }
}

impl From<csv::Error> for CatalogError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}
