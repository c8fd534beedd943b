//! The local catalog of known dataset identifiers.
//!
//! The orchestrator only sees [`CatalogStore`]; where and how the list is
//! stored is the backend's business. [`MarkerCatalog`] keeps it as a list
//! literal inside a larger text file.

mod marker;

pub use marker::{
    extract_identifiers, insert_identifier, parse_list_body, render_list_body, MarkerCatalog,
    MarkerError, END_MARKER, START_MARKER,
};

use serde::Serialize;

use crate::error::RefreshError;

/// What a catalog write did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogUpdate {
    /// The identifier was prepended and the artifact rewritten.
    Inserted,
    /// The identifier was already listed; nothing was written.
    AlreadyPresent,
    /// Simulation mode: the identifier would have been prepended.
    WouldInsert,
}

/// Ordered list of dataset identifiers, most recent first, no duplicates.
pub trait CatalogStore {
    /// Reads the current identifiers in stored order.
    fn read_catalog(&self) -> Result<Vec<String>, RefreshError>;

    /// Makes `dataset_id` the first entry unless it is already listed.
    ///
    /// Re-reads the stored list first. Writes only when the list changes
    /// and `dry_run` is unset.
    fn write_catalog(&self, dataset_id: &str, dry_run: bool)
        -> Result<CatalogUpdate, RefreshError>;
}
