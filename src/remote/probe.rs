//! Existence probes and model variant discovery.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::RemoteSource;
use crate::config::RefreshConfig;

/// Draft-mode flavor of a dataset's model file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum VariantMode {
    Premier,
    Trad,
    PickTwo,
    PickTwoTrad,
}

/// Historical file naming scheme a mode belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum NamingScheme {
    /// Premier / Trad models.
    Legacy,
    /// Pick-two draft models.
    PickTwo,
}

impl VariantMode {
    /// All modes in probe order: legacy scheme first, then pick-two.
    pub const ALL: [VariantMode; 4] = [
        VariantMode::Premier,
        VariantMode::Trad,
        VariantMode::PickTwo,
        VariantMode::PickTwoTrad,
    ];

    /// Label embedded in remote and local file names.
    pub fn label(self) -> &'static str {
        match self {
            VariantMode::Premier => "Premier",
            VariantMode::Trad => "Trad",
            VariantMode::PickTwo => "PickTwo",
            VariantMode::PickTwoTrad => "PickTwoTrad",
        }
    }

    pub fn scheme(self) -> NamingScheme {
        match self {
            VariantMode::Premier | VariantMode::Trad => NamingScheme::Legacy,
            VariantMode::PickTwo | VariantMode::PickTwoTrad => NamingScheme::PickTwo,
        }
    }

    /// Remote-relative path of this mode's model for `dataset_id`.
    pub fn remote_path(self, dataset_id: &str) -> String {
        format!("data/onnx/{dataset_id}_{}.onnx", self.label())
    }
}

impl fmt::Display for VariantMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A model variant known to exist remotely.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Variant {
    pub mode: VariantMode,
    pub remote_path: String,
}

/// Returns true only when a HEAD on `url` answers 200.
///
/// Transport failures count as "does not exist".
pub fn remote_exists<R: RemoteSource + ?Sized>(remote: &R, url: &str) -> bool {
    match remote.head_status(url) {
        Ok(status) => {
            debug!("HEAD {url} -> {status}");
            status == 200
        }
        Err(source) => {
            debug!("HEAD {url} failed: {source}");
            false
        }
    }
}

/// Probes every known variant of `dataset_id`, keeping the ones that exist.
///
/// The result follows [`VariantMode::ALL`] order whatever subset exists.
pub fn probe_variants<R: RemoteSource + ?Sized>(
    remote: &R,
    config: &RefreshConfig,
    dataset_id: &str,
) -> Vec<Variant> {
    VariantMode::ALL
        .into_iter()
        .map(|mode| Variant {
            mode,
            remote_path: mode.remote_path(dataset_id),
        })
        .filter(|variant| remote_exists(remote, &config.remote_url(&variant.remote_path)))
        .collect()
}
