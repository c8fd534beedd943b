//! Fuzz target for catalog extraction from script text.
//!
//! This fuzzer feeds arbitrary UTF-8 text to the marker-delimited catalog
//! reader, checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use model_refresh::catalog::{extract_identifiers, END_MARKER, START_MARKER};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = extract_identifiers(text, START_MARKER, END_MARKER);
});
