//! Run configuration and the path conventions shared by the remote and the
//! local layout.

use std::path::{Path, PathBuf};

use crate::remote::probe::VariantMode;

/// Raw content root of the upstream statistical-drafting repository.
pub const DEFAULT_REMOTE_BASE: &str =
    "https://raw.githubusercontent.com/danieljbrooks/statistical-drafting/main";

/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Statistical-Drafting-Website/1.0";

/// Manifest location, relative to the remote base.
pub const MANIFEST_PATH: &str = "model_refresh/data_tracker.json";

/// Local artifact holding the catalog, relative to the project root.
pub const DEFAULT_CATALOG_FILE: &str = "script.js";

/// Local data root, relative to the project root.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Resolved settings for one refresh run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefreshConfig {
    /// Remote base URL, without a trailing slash.
    pub remote_base: String,
    /// Local data root; cards and models are written below it.
    pub data_dir: PathBuf,
    /// Text artifact embedding the catalog.
    pub catalog_file: PathBuf,
    pub user_agent: String,
}

impl RefreshConfig {
    /// Creates a configuration with the default layout under `project_root`.
    pub fn new(remote_base: impl Into<String>, project_root: &Path) -> Self {
        let remote_base = remote_base.into().trim_end_matches('/').to_string();
        Self {
            remote_base,
            data_dir: project_root.join(DEFAULT_DATA_DIR),
            catalog_file: project_root.join(DEFAULT_CATALOG_FILE),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_catalog_file(mut self, catalog_file: impl Into<PathBuf>) -> Self {
        self.catalog_file = catalog_file.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Full URL of the remote manifest.
    pub fn manifest_url(&self) -> String {
        self.remote_url(MANIFEST_PATH)
    }

    /// Joins a remote-relative path onto the remote base.
    pub fn remote_url(&self, relative: &str) -> String {
        format!("{}/{}", self.remote_base, relative.trim_start_matches('/'))
    }

    /// Local destination of a dataset's cards file.
    pub fn cards_local_path(&self, dataset_id: &str) -> PathBuf {
        self.data_dir.join("cards").join(format!("{dataset_id}.csv"))
    }

    /// Local destination of one model variant.
    pub fn variant_local_path(&self, dataset_id: &str, mode: VariantMode) -> PathBuf {
        self.data_dir
            .join("onnx")
            .join(format!("{dataset_id}_{}.onnx", mode.label()))
    }
}

/// Remote-relative path of a dataset's cards file.
pub fn cards_remote_path(dataset_id: &str) -> String {
    format!("data/cards/{dataset_id}.csv")
}
