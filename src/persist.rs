//! Whole-file replacement through a sibling temp file.

use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tempfile::NamedTempFile;

/// Temp files currently being written, removed by the interrupt handler.
static IN_FLIGHT: Mutex<BTreeSet<PathBuf>> = Mutex::new(BTreeSet::new());

const TEMP_PREFIX: &str = ".model-refresh-";

fn in_flight() -> MutexGuard<'static, BTreeSet<PathBuf>> {
    IN_FLIGHT.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Writes `contents` to `path`, creating missing parent directories.
///
/// The bytes land in a temp file next to `path` which is renamed over it once
/// fully written, so an interrupted run leaves the old file intact.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let tmp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .tempfile_in(parent)?;
    let tmp_path = tmp.path().to_path_buf();
    in_flight().insert(tmp_path.clone());

    let written = fill_and_persist(tmp, path, contents);
    in_flight().remove(&tmp_path);
    written
}

fn fill_and_persist(mut tmp: NamedTempFile, path: &Path, contents: &[u8]) -> io::Result<()> {
    tmp.write_all(contents)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

/// Deletes every temp file still being written. Called when the process is
/// interrupted, since `Drop` will not run then.
pub(crate) fn discard_in_flight() {
    discard_all(&mut in_flight());
}

fn discard_all(paths: &mut BTreeSet<PathBuf>) {
    for path in std::mem::take(paths) {
        // Already renamed or never created.
        let _ = fs::remove_file(path);
    }
}
