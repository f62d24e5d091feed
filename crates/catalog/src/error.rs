//! Error types for the catalog crate.
//!
//! Only contract violations are errors here. A raw record with no `id`
//! cannot be keyed into a pool, so it is rejected; every other missing
//! field is coerced to a neutral default by the normalizer.

use thiserror::Error;

/// Errors that can occur while loading or normalizing provider records
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The record file could not be read
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The record file is not valid JSON for the expected shape
    #[error("Malformed record JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A raw record arrived without an `id`
    ///
    /// The title (if any) is kept so the log line says which record it was.
    #[error("Record is missing an id (title: {title:?})")]
    MissingId { title: Option<String> },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
