#![allow(dead_code)]

use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use mockito::{Mock, ServerGuard};
use model_refresh::remote::{RemoteSource, TransportError};

pub const MANIFEST_PATH: &str = "/model_refresh/data_tracker.json";

/// A trimmed-down site script with the catalog embedded mid-file.
pub fn script_js(sets: &[&str]) -> String {
    let list = sets
        .iter()
        .map(|set| format!("'{set}'"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "class DraftingAssistant {{\n    constructor() {{\n        this.cardData = [];\n        this.availableSets = [{list}];\n        this.filters = {{ rarities: [], colors: [] }};\n    }}\n}}\n"
    )
}

/// Creates a site root with `script.js` listing `sets`.
pub fn site(sets: &[&str]) -> tempfile::TempDir {
    let temp = tempfile::tempdir().expect("create temp dir");
    fs::write(temp.path().join("script.js"), script_js(sets)).expect("write script.js");
    temp
}

/// Relative path and contents of every file under `root`.
pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    let mut files = BTreeMap::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).expect("read dir") {
            let path = entry.expect("dir entry").path();
            if path.is_dir() {
                pending.push(path);
            } else {
                let rel = path.strip_prefix(root).expect("under root").to_path_buf();
                files.insert(rel, fs::read(&path).expect("read file"));
            }
        }
    }
    files
}

pub fn mock_manifest(server: &mut ServerGuard, body: &str) -> Mock {
    server
        .mock("GET", MANIFEST_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create()
}

pub fn mock_latest_set(server: &mut ServerGuard, set: &str) -> Mock {
    mock_manifest(server, &format!(r#"{{"most_recent_set": "{set}"}}"#))
}

/// Serves `body` at `path` for both HEAD probes and GET downloads.
pub fn mock_remote_file(server: &mut ServerGuard, path: &str, body: &[u8]) -> (Mock, Mock) {
    mock_remote_file_hits(server, path, body, 1)
}

/// Like [`mock_remote_file`], with the GET mock expecting `gets` hits.
pub fn mock_remote_file_hits(
    server: &mut ServerGuard,
    path: &str,
    body: &[u8],
    gets: usize,
) -> (Mock, Mock) {
    let head = server.mock("HEAD", path).with_status(200).create();
    let get = server
        .mock("GET", path)
        .with_status(200)
        .with_body(body)
        .expect(gets)
        .create();
    (head, get)
}

/// In-memory remote that answers HEAD 200 for a fixed set of URLs.
#[derive(Default)]
pub struct PresenceRemote {
    pub present: BTreeSet<String>,
    pub gets: Cell<usize>,
}

impl RemoteSource for PresenceRemote {
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        self.gets.set(self.gets.get() + 1);
        if self.present.contains(url) {
            Ok(Vec::new())
        } else {
            Err(TransportError::Status(404))
        }
    }

    fn head_status(&self, url: &str) -> Result<u16, TransportError> {
        Ok(if self.present.contains(url) { 200 } else { 404 })
    }
}
