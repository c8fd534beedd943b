//! Fuzz target for data tracker manifest parsing.
//!
//! This fuzzer feeds arbitrary byte sequences to the manifest parser and
//! identifier extraction, checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use model_refresh::remote::manifest::parse_manifest;

const URL: &str = "https://example.org/model_refresh/data_tracker.json";

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(manifest) = parse_manifest(URL, data) {
        let _ = manifest.dataset_id(URL);
    }
});
