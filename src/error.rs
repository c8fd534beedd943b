use std::path::PathBuf;
use thiserror::Error;

/// The main error type for model refresh runs.
///
/// Every variant is fatal: the run stops at the first one and the binary
/// exits non-zero. Tolerated conditions (missing cards file, no variants)
/// are not errors and surface through [`crate::refresh::RefreshOutcome`].
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("Failed to fetch data tracker from {url}: {message}")]
    ManifestFetch { url: String, message: String },

    #[error("Failed to parse data tracker JSON from {url}: {message}")]
    ManifestParse { url: String, message: String },

    #[error("No 'most_recent_set' found in data tracker at {url}")]
    MissingIdentifier { url: String },

    #[error("Failed to read available sets from {path}: {message}")]
    CatalogFormat { path: PathBuf, message: String },

    #[error("Failed to update available sets in {path}: {source}")]
    CatalogWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to download {url}: {message}")]
    Download { url: String, message: String },

    #[error("Unexpected error during model refresh: {0}")]
    Unexpected(String),
}
