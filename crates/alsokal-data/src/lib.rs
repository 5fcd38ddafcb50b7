//! Flat-file JSON data store for the dashboard.
//!
//! The lenient `load_*` methods never fail: a missing or malformed file is
//! logged and replaced by an empty list or the default config. The strict
//! `try_load_*` variants surface the underlying [`DataError`] instead.

use std::path::PathBuf;

use thiserror::Error;

mod store;

pub use store::{DataStore, DATA_FILES};

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("data root {0} is not a directory")]
    NotADirectory(PathBuf),
}

impl DataError {
    /// True when the file simply does not exist yet.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
