//! Downloading remote files into the local data root.

use std::path::Path;

use tracing::info;

use super::RemoteSource;
use crate::error::RefreshError;
use crate::persist::write_atomic;

/// Downloads `url` to `dest`, replacing any existing file.
///
/// The body is fetched in full before anything touches the filesystem; only
/// then are missing parent directories created and the file written. With
/// `dry_run` set nothing is fetched or written and the action is only logged.
///
/// # Errors
/// `Download` on a non-2xx status, a transport failure or a local write
/// failure.
pub fn download_file<R: RemoteSource + ?Sized>(
    remote: &R,
    url: &str,
    dest: &Path,
    dry_run: bool,
) -> Result<(), RefreshError> {
    if dry_run {
        info!("[DRY RUN] Would download {url} to {}", dest.display());
        return Ok(());
    }

    info!("Downloading {url}...");
    let body = remote
        .get_bytes(url)
        .map_err(|source| RefreshError::Download {
            url: url.to_string(),
            message: source.to_string(),
        })?;

    write_atomic(dest, &body).map_err(|source| RefreshError::Download {
        url: url.to_string(),
        message: format!("could not write {}: {source}", dest.display()),
    })?;

    info!("Downloaded to {} ({} bytes)", dest.display(), body.len());
    Ok(())
}
