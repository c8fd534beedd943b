//! The remote data tracker manifest.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::RemoteSource;
use crate::error::RefreshError;

/// Remote descriptor of the most recently published dataset.
///
/// Fields other than `most_recent_set` are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub most_recent_set: Option<String>,
}

impl Manifest {
    /// Returns the published dataset identifier.
    ///
    /// # Errors
    /// `MissingIdentifier` when the field is absent or blank, `ManifestParse`
    /// when it cannot safely name local files or sit in the catalog.
    pub fn dataset_id(&self, url: &str) -> Result<&str, RefreshError> {
        let id = self
            .most_recent_set
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| RefreshError::MissingIdentifier {
                url: url.to_string(),
            })?;

        if !is_valid_dataset_id(id) {
            return Err(RefreshError::ManifestParse {
                url: url.to_string(),
                message: format!("'{id}' is not a usable dataset identifier"),
            });
        }
        Ok(id)
    }
}

/// Identifiers end up in file names and in a quoted list literal, so path
/// separators, quotes, commas and whitespace are rejected.
pub fn is_valid_dataset_id(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && !id.chars().any(|c| {
            c.is_whitespace()
                || c.is_control()
                || matches!(c, '/' | '\\' | '\'' | '"' | ',' | '[' | ']')
        })
}

/// Parses a manifest body.
pub fn parse_manifest(url: &str, body: &[u8]) -> Result<Manifest, RefreshError> {
    serde_json::from_slice(body).map_err(|source| RefreshError::ManifestParse {
        url: url.to_string(),
        message: source.to_string(),
    })
}

/// Fetches and parses the manifest at `url`. A single attempt, no retries.
pub fn fetch_manifest<R: RemoteSource + ?Sized>(
    remote: &R,
    url: &str,
) -> Result<Manifest, RefreshError> {
    info!("Fetching data tracker from {url}");
    let body = remote
        .get_bytes(url)
        .map_err(|source| RefreshError::ManifestFetch {
            url: url.to_string(),
            message: source.to_string(),
        })?;
    parse_manifest(url, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::testing::FakeRemote;

    const URL: &str = "https://example.org/model_refresh/data_tracker.json";

    #[test]
    fn fetch_reads_most_recent_set() {
        let remote = FakeRemote::new().with_file(URL, br#"{"most_recent_set": "FIN", "extra": 1}"#);
        let manifest = fetch_manifest(&remote, URL).expect("fetch");
        assert_eq!(manifest.dataset_id(URL).expect("id"), "FIN");
    }

    #[test]
    fn missing_document_is_a_fetch_error() {
        let remote = FakeRemote::new();
        let err = fetch_manifest(&remote, URL).expect_err("should fail");
        assert!(matches!(err, RefreshError::ManifestFetch { .. }), "{err:?}");
    }

    #[test]
    fn transport_failure_is_a_fetch_error() {
        let remote = FakeRemote::new().with_broken(URL);
        let err = fetch_manifest(&remote, URL).expect_err("should fail");
        assert!(matches!(err, RefreshError::ManifestFetch { .. }), "{err:?}");
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let remote = FakeRemote::new().with_file(URL, b"<html>not json</html>");
        let err = fetch_manifest(&remote, URL).expect_err("should fail");
        assert!(matches!(err, RefreshError::ManifestParse { .. }), "{err:?}");
    }

    #[test]
    fn absent_or_blank_identifier_is_missing() {
        for body in [r#"{}"#, r#"{"most_recent_set": null}"#, r#"{"most_recent_set": "  "}"#] {
            let manifest = parse_manifest(URL, body.as_bytes()).expect("parse");
            let err = manifest.dataset_id(URL).expect_err("should fail");
            assert!(
                matches!(err, RefreshError::MissingIdentifier { .. }),
                "{body}: {err:?}"
            );
        }
    }

    #[test]
    fn path_like_identifier_is_rejected() {
        let manifest = parse_manifest(URL, br#"{"most_recent_set": "../etc"}"#).expect("parse");
        let err = manifest.dataset_id(URL).expect_err("should fail");
        assert!(matches!(err, RefreshError::ManifestParse { .. }), "{err:?}");
    }

    #[test]
    fn identifier_charset() {
        assert!(is_valid_dataset_id("MH3"));
        assert!(is_valid_dataset_id("Cube-2024_v2"));
        assert!(!is_valid_dataset_id("a/b"));
        assert!(!is_valid_dataset_id("it's"));
        assert!(!is_valid_dataset_id("A, B"));
        assert!(!is_valid_dataset_id(".."));
    }
}
