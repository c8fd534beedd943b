//! Catalog stored as a list literal between two markers in a text file.
//!
//! Only the bytes between the end of the start marker and the beginning of
//! the end marker are ever rewritten. Everything else in the file is opaque.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use super::{CatalogStore, CatalogUpdate};
use crate::error::RefreshError;
use crate::persist::write_atomic;

pub const START_MARKER: &str = "this.availableSets = [";
pub const END_MARKER: &str = "];";

/// Problems locating or patching the list literal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarkerError {
    #[error("could not find start marker '{0}'")]
    MissingStart(String),

    #[error("could not find end marker '{0}' after the start marker")]
    MissingEnd(String),

    #[error("identifier '{0}' cannot be written into the list")]
    Unembeddable(String),
}

/// Byte range of the list body: just past the start marker up to the first
/// end marker that follows it.
fn locate_body(text: &str, start: &str, end: &str) -> Result<Range<usize>, MarkerError> {
    let body_start = text
        .find(start)
        .map(|idx| idx + start.len())
        .ok_or_else(|| MarkerError::MissingStart(start.to_string()))?;
    let body_end = text[body_start..]
        .find(end)
        .map(|idx| body_start + idx)
        .ok_or_else(|| MarkerError::MissingEnd(end.to_string()))?;
    Ok(body_start..body_end)
}

/// Splits a list body such as `'FIN', "TDM",` into identifiers.
///
/// Whitespace and surrounding quotes of either style are stripped; empty
/// entries are skipped. Order is preserved.
pub fn parse_list_body(body: &str) -> Vec<String> {
    body.split(',')
        .map(|entry| entry.trim().trim_matches(|c| c == '\'' || c == '"').trim())
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Renders identifiers as a comma-separated list body.
///
/// Identifiers are single-quoted unless they contain `'`, in which case they
/// keep the double quotes they were hand-written with.
pub fn render_list_body(ids: &[String]) -> String {
    ids.iter()
        .map(|id| {
            if id.contains('\'') {
                format!("\"{id}\"")
            } else {
                format!("'{id}'")
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Reads the identifiers listed between `start` and `end` in `text`.
pub fn extract_identifiers(text: &str, start: &str, end: &str) -> Result<Vec<String>, MarkerError> {
    let body = locate_body(text, start, end)?;
    Ok(parse_list_body(&text[body]))
}

/// Prepends `id` to the list in `text`.
///
/// Returns `Ok(None)` when `id` is already listed. Otherwise returns the new
/// text, identical to `text` outside the list body.
pub fn insert_identifier(
    text: &str,
    start: &str,
    end: &str,
    id: &str,
) -> Result<Option<String>, MarkerError> {
    let embeddable = !id.is_empty()
        && id.trim() == id
        && !id.contains(['\'', '"', ','])
        && !id.contains(end);
    if !embeddable {
        return Err(MarkerError::Unembeddable(id.to_string()));
    }

    let body = locate_body(text, start, end)?;
    let mut ids = parse_list_body(&text[body.clone()]);
    if ids.iter().any(|existing| existing == id) {
        return Ok(None);
    }
    ids.insert(0, id.to_string());

    let rendered = render_list_body(&ids);
    let mut patched = String::with_capacity(text.len() + id.len() + 4);
    patched.push_str(&text[..body.start]);
    patched.push_str(&rendered);
    patched.push_str(&text[body.end..]);
    Ok(Some(patched))
}

/// [`CatalogStore`] over a text file with an embedded list literal.
#[derive(Clone, Debug)]
pub struct MarkerCatalog {
    path: PathBuf,
    start_marker: String,
    end_marker: String,
}

impl MarkerCatalog {
    /// Catalog in `path` delimited by [`START_MARKER`] and [`END_MARKER`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_markers(path, START_MARKER, END_MARKER)
    }

    pub fn with_markers(
        path: impl Into<PathBuf>,
        start_marker: impl Into<String>,
        end_marker: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            start_marker: start_marker.into(),
            end_marker: end_marker.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_text(&self) -> Result<String, RefreshError> {
        fs::read_to_string(&self.path).map_err(|source| RefreshError::CatalogFormat {
            path: self.path.clone(),
            message: format!("could not read file: {source}"),
        })
    }

    fn format_error(&self, source: MarkerError) -> RefreshError {
        RefreshError::CatalogFormat {
            path: self.path.clone(),
            message: source.to_string(),
        }
    }
}

impl CatalogStore for MarkerCatalog {
    fn read_catalog(&self) -> Result<Vec<String>, RefreshError> {
        let text = self.read_text()?;
        extract_identifiers(&text, &self.start_marker, &self.end_marker)
            .map_err(|source| self.format_error(source))
    }

    fn write_catalog(
        &self,
        dataset_id: &str,
        dry_run: bool,
    ) -> Result<CatalogUpdate, RefreshError> {
        let text = self.read_text()?;
        let patched = insert_identifier(&text, &self.start_marker, &self.end_marker, dataset_id)
            .map_err(|source| self.format_error(source))?;

        let Some(patched) = patched else {
            info!("Set '{dataset_id}' already exists in availableSets");
            return Ok(CatalogUpdate::AlreadyPresent);
        };

        if dry_run {
            info!(
                "[DRY RUN] Would add '{dataset_id}' to availableSets in {}",
                self.path.display()
            );
            return Ok(CatalogUpdate::WouldInsert);
        }

        write_atomic(&self.path, patched.as_bytes()).map_err(|source| {
            RefreshError::CatalogWrite {
                path: self.path.clone(),
                source,
            }
        })?;
        info!(
            "Added '{dataset_id}' to availableSets in {}",
            self.path.display()
        );
        Ok(CatalogUpdate::Inserted)
    }
}
