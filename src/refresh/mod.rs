//! The end-to-end refresh workflow.
//!
//! One linear pass: manifest, local catalog, idempotence gate, cards file
//! check, variant discovery, downloads, catalog update. Fatal failures come
//! back as [`RefreshError`]; the two tolerated stops are reported through
//! [`RefreshOutcome::StoppedIncomplete`].

mod report;

pub use report::{DownloadRecord, IncompleteReason, RefreshOutcome, RefreshReport};

use std::path::PathBuf;

use tracing::{info, warn};

use crate::catalog::{CatalogStore, CatalogUpdate};
use crate::config::{cards_remote_path, RefreshConfig};
use crate::error::RefreshError;
use crate::remote::fetch::download_file;
use crate::remote::manifest::fetch_manifest;
use crate::remote::probe::{probe_variants, remote_exists};
use crate::remote::RemoteSource;

/// Run flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshOptions {
    /// Probe and decide for real, but download and write nothing.
    pub dry_run: bool,
    /// Skip the idempotence gate and the incomplete-update stops.
    pub force: bool,
}

/// Drives one refresh run over an owned remote and catalog.
pub struct Refresher<R, C> {
    remote: R,
    catalog: C,
    config: RefreshConfig,
    options: RefreshOptions,
}

impl<R: RemoteSource, C: CatalogStore> Refresher<R, C> {
    pub fn new(remote: R, catalog: C, config: RefreshConfig, options: RefreshOptions) -> Self {
        Self {
            remote,
            catalog,
            config,
            options,
        }
    }

    /// Executes the workflow.
    ///
    /// # Errors
    /// Any manifest, catalog or download failure aborts the run. Force never
    /// bypasses these.
    pub fn run(&self) -> Result<RefreshReport, RefreshError> {
        let RefreshOptions { dry_run, force } = self.options;

        let manifest_url = self.config.manifest_url();
        let manifest = fetch_manifest(&self.remote, &manifest_url)?;
        let dataset_id = manifest.dataset_id(&manifest_url)?.to_string();
        info!("Most recent set from remote: {dataset_id}");

        let current_sets = self.catalog.read_catalog()?;
        info!("Current available sets: {current_sets:?}");
        let already_listed = current_sets.iter().any(|id| *id == dataset_id);

        let mut report = RefreshReport::new(&dataset_id, current_sets, dry_run, force);

        if already_listed && !force {
            info!("Set '{dataset_id}' already exists. Use --force to update anyway.");
            return Ok(report);
        }

        let cards_remote = cards_remote_path(&dataset_id);
        let cards_url = self.config.remote_url(&cards_remote);
        let cards_found = remote_exists(&self.remote, &cards_url);
        report.cards_file_found = Some(cards_found);

        if !cards_found {
            warn!("Missing cards file on remote: {cards_remote}");
            if !force {
                info!("Use --force to proceed anyway");
                report.outcome = RefreshOutcome::StoppedIncomplete {
                    reason: IncompleteReason::MissingCardsFile {
                        remote_path: cards_remote,
                    },
                };
                return Ok(report);
            }
        }

        let variants = probe_variants(&self.remote, &self.config, &dataset_id);
        if variants.is_empty() {
            warn!("No ONNX model files found for set '{dataset_id}'");
            if !force {
                info!("Use --force to proceed anyway");
                report.outcome = RefreshOutcome::StoppedIncomplete {
                    reason: IncompleteReason::NoVariants,
                };
                return Ok(report);
            }
        }

        let labels: Vec<&str> = variants.iter().map(|v| v.mode.label()).collect();
        info!(
            "Found {} draft mode variant(s): {labels:?}",
            variants.len()
        );

        if cards_found {
            let dest = self.config.cards_local_path(&dataset_id);
            self.download(&mut report, cards_url, dest)?;
        }

        for variant in &variants {
            let url = self.config.remote_url(&variant.remote_path);
            let dest = self.config.variant_local_path(&dataset_id, variant.mode);
            self.download(&mut report, url, dest)?;
        }
        report.variants = variants;

        let update = if already_listed {
            CatalogUpdate::AlreadyPresent
        } else {
            self.catalog.write_catalog(&dataset_id, dry_run)?
        };
        report.catalog_update = Some(update);
        report.outcome = RefreshOutcome::Completed;

        info!(
            "Model refresh completed successfully for set '{dataset_id}' ({} variant(s))",
            report.variants.len()
        );
        if !dry_run {
            info!("Don't forget to refresh your browser to see the new set!");
        }

        Ok(report)
    }

    fn download(
        &self,
        report: &mut RefreshReport,
        url: String,
        dest: PathBuf,
    ) -> Result<(), RefreshError> {
        download_file(&self.remote, &url, &dest, self.options.dry_run)?;
        report.downloads.push(DownloadRecord { url, path: dest });
        Ok(())
    }
}
