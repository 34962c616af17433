//! Error types for collection mapping and loading.
//!
//! Identity violations are reported as [`DataError`]s and always abort the
//! enclosing construction. Malformed supplementary fields never surface here,
//! they degrade to defaults at the point where they are read.

use std::path::PathBuf;
use thiserror::Error;

/// A violation of the raw data shape detected while mapping a single value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("expected a mapping, found {found}")]
    NotAMapping { found: &'static str },

    #[error("expected a sequence for '{field}', found {found}")]
    NotASequence {
        field: &'static str,
        found: &'static str,
    },

    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("required field '{field}' has an invalid value: {value}")]
    InvalidField { field: &'static str, value: String },
}

/// Main error type of the crate.
#[derive(Error, Debug)]
pub enum Error {
    /// The caller passed an argument that can never address anything.
    #[error("Invalid value: {reason}")]
    InvalidValue { reason: String },

    /// The addressed collection does not exist in the data source.
    #[error("Item not found: {what}")]
    ItemNotFound { what: String },

    #[error("Invalid data: {0}")]
    InvalidData(#[from] DataError),

    /// A raw collection item failed validation during bulk construction.
    #[error("Invalid collection item at index {index}: {source}")]
    InvalidItem {
        index: usize,
        #[source]
        source: DataError,
    },

    #[error("Failed to read file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error belongs to the data validation family.
    pub fn is_invalid_data(&self) -> bool {
        matches!(self, Self::InvalidData(_) | Self::InvalidItem { .. })
    }

    /// Get a stable status code for this error type.
    pub fn status_code(&self) -> &'static str {
        match self {
            Self::InvalidValue { .. } => "INVALID_VALUE",
            Self::ItemNotFound { .. } => "ITEM_NOT_FOUND",
            Self::InvalidData(_) => "INVALID_DATA",
            Self::InvalidItem { .. } => "INVALID_ITEM",
            Self::Io { .. } => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
