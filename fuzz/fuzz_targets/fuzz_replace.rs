#![no_main]

use arbitrary::Arbitrary;
use foldsub::{ReplaceOptions, Search, replace};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    text: &'a str,
    search: &'a str,
    sub: &'a str,
    pattern: bool,
    allow_overlaps: bool,
    unidecoded_search: bool,
    case_sensitive: bool,
    strict_boundaries: bool,
    max_count: Option<u8>,
    start_pos: Option<u16>,
    end_pos: Option<u16>,
}

fuzz_target!(|input: Input<'_>| {
    // Replacing must never panic, whatever the window or the expansion layout
    let options = ReplaceOptions {
        allow_overlaps: input.allow_overlaps,
        max_count: input.max_count.map(usize::from),
        start_pos: input.start_pos.map(usize::from),
        end_pos: input.end_pos.map(usize::from),
        unidecoded_search: input.unidecoded_search,
        case_sensitive: input.case_sensitive,
        strict_boundaries: input.strict_boundaries,
        ..Default::default()
    };
    let search = if input.pattern {
        Search::pattern(input.search)
    } else {
        Search::literal(input.search)
    };
    let _ = replace(input.text, search, input.sub, &options);
});
