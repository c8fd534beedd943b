#![allow(dead_code)]

use std::collections::BTreeSet;

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Set codes shaped like the real ones (`FIN`, `MH3`, `Y24`...).
pub fn arb_set_code() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9]{1,4}"
}

/// Distinct set codes in arbitrary order.
pub fn arb_catalog(max_len: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_set_code(), 0..=max_len).prop_map(|codes| {
        let mut seen = BTreeSet::new();
        codes
            .into_iter()
            .filter(|code| seen.insert(code.clone()))
            .collect()
    })
}

/// Script text surrounding the catalog. Lowercase only, so it can never
/// contain the start marker.
pub fn arb_surrounding_text() -> impl Strategy<Value = String> {
    "[a-z0-9 \n=;.(){}\\[\\]']{0,60}"
}

/// Renders a list body with a mix of quote styles and spacing.
pub fn render_body(ids: &[String], double_quotes: &[bool]) -> String {
    ids.iter()
        .enumerate()
        .map(|(i, id)| {
            if double_quotes.get(i).copied().unwrap_or(false) {
                format!("\"{id}\"")
            } else {
                format!(" '{id}' ")
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}
