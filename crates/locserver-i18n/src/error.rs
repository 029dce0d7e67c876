//! Error types for catalog loading and lookup

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, watching, or querying catalogs.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Unparsable payload for a given format
    #[error("malformed payload: {0}")]
    Malformed(String),

    /// Format needs an external language tag but none was supplied
    #[error("language tag required but none supplied")]
    TagRequired,

    /// A language tag string failed to parse
    #[error("invalid language tag: {0:?}")]
    InvalidTag(String),

    /// Fatal: a full scan produced zero usable language tags
    #[error("no language tags found under {}", .0.display())]
    NoLanguagesFound(PathBuf),

    /// Lookup for a tag with no loaded catalog
    #[error("no catalog loaded for tag {0:?}")]
    NotFound(String),

    /// Filesystem-watch-layer failure
    #[error("filesystem watch error: {0}")]
    Watch(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A per-file failure captured during a scan or reload.
///
/// Per-file errors never abort sibling work; they are collected so callers
/// can inspect which files failed and why after a load succeeds.
#[derive(Error, Debug)]
#[error("{}: {source}", path.display())]
pub struct ScanError {
    /// The file that failed to load
    pub path: PathBuf,
    /// What went wrong with it
    #[source]
    pub source: CatalogError,
}

impl From<notify::Error> for CatalogError {
    fn from(err: notify::Error) -> Self {
        CatalogError::Watch(err.to_string())
    }
}
