//! Refresh report types and text formatting.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::catalog::CatalogUpdate;
use crate::remote::probe::Variant;

/// How a run ended. Fatal failures are errors, not outcomes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// The dataset is already in the catalog; nothing was done.
    UpToDate,
    /// The remote update looked incomplete and force was not set.
    StoppedIncomplete { reason: IncompleteReason },
    /// Files were downloaded (or planned, in a dry run) and the catalog
    /// brought up to date.
    Completed,
}

/// Why a remote update was judged incomplete.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IncompleteReason {
    MissingCardsFile { remote_path: String },
    NoVariants,
}

impl fmt::Display for IncompleteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncompleteReason::MissingCardsFile { remote_path } => {
                write!(f, "missing cards file {remote_path}")
            }
            IncompleteReason::NoVariants => write!(f, "no ONNX model files"),
        }
    }
}

/// One download performed, or planned in a dry run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DownloadRecord {
    pub url: String,
    pub path: PathBuf,
}

/// Summary of a refresh run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RefreshReport {
    pub dataset_id: String,
    pub outcome: RefreshOutcome,
    pub dry_run: bool,
    pub forced: bool,
    /// Catalog as read at the start of the run.
    pub catalog_before: Vec<String>,
    pub cards_file_found: Option<bool>,
    pub variants: Vec<Variant>,
    pub downloads: Vec<DownloadRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_update: Option<CatalogUpdate>,
}

impl RefreshReport {
    pub(crate) fn new(
        dataset_id: &str,
        catalog_before: Vec<String>,
        dry_run: bool,
        forced: bool,
    ) -> Self {
        Self {
            dataset_id: dataset_id.to_string(),
            outcome: RefreshOutcome::UpToDate,
            dry_run,
            forced,
            catalog_before,
            cards_file_found: None,
            variants: Vec::new(),
            downloads: Vec::new(),
            catalog_update: None,
        }
    }

    /// True when the run wrote anything locally.
    pub fn changed_anything(&self) -> bool {
        !self.dry_run
            && (!self.downloads.is_empty()
                || self.catalog_update == Some(CatalogUpdate::Inserted))
    }
}

impl fmt::Display for RefreshReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.dry_run { " (dry run)" } else { "" };
        writeln!(f, "Refresh of set '{}'{}", self.dataset_id, mode)?;

        match &self.outcome {
            RefreshOutcome::UpToDate => {
                writeln!(f, "  Outcome:   already up to date")?;
                return Ok(());
            }
            RefreshOutcome::StoppedIncomplete { reason } => {
                writeln!(f, "  Outcome:   stopped, remote update incomplete ({reason})")?;
            }
            RefreshOutcome::Completed => {
                writeln!(f, "  Outcome:   completed")?;
            }
        }

        if !self.variants.is_empty() {
            let labels: Vec<&str> = self.variants.iter().map(|v| v.mode.label()).collect();
            writeln!(f, "  Variants:  {}", labels.join(", "))?;
        }

        let verb = if self.dry_run { "planned" } else { "downloaded" };
        writeln!(f, "  Files:     {} {}", self.downloads.len(), verb)?;
        for download in &self.downloads {
            writeln!(f, "    - {}", download.path.display())?;
        }

        if let Some(update) = self.catalog_update {
            let text = match update {
                CatalogUpdate::Inserted => "set added",
                CatalogUpdate::WouldInsert => "set would be added",
                CatalogUpdate::AlreadyPresent => "set already listed",
            };
            writeln!(f, "  Catalog:   {text}")?;
        }

        Ok(())
    }
}
