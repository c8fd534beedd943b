//! Fuzz target for catalog patching.
//!
//! The first line of the input is the identifier to insert, the rest is the
//! script text. Whenever a patch is produced, the text outside the list body
//! must survive unchanged and the identifier must read back first.

#![no_main]

use libfuzzer_sys::fuzz_target;
use model_refresh::catalog::{extract_identifiers, insert_identifier, END_MARKER, START_MARKER};

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Some((id, text)) = input.split_once('\n') else {
        return;
    };

    if let Ok(Some(patched)) = insert_identifier(text, START_MARKER, END_MARKER, id) {
        let start = text.find(START_MARKER).expect("patched text had a start marker");
        assert_eq!(&patched[..start], &text[..start]);

        let ids = extract_identifiers(&patched, START_MARKER, END_MARKER)
            .expect("patched text keeps its markers");
        assert_eq!(ids.first().map(String::as_str), Some(id));
    }
});
