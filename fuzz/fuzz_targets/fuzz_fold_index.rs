#![no_main]

use foldsub::fold::{Deunicode, FoldIndex};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let Ok(index) = FoldIndex::build(data, &Deunicode) else {
        return;
    };

    // Every folded range maps to whole original characters
    let len = index.folded().len();
    for start in 0..=len.min(64) {
        for end in start..=len.min(64) {
            let span = index.to_original(start..end);
            assert!(span.start <= span.end && span.end <= data.len());
            assert!(data.is_char_boundary(span.start) && data.is_char_boundary(span.end));
        }
    }
});
