//! Integration tests comparing foldsub to `str::replace` and `Regex::replace_all`.
//!
//! On ASCII text folding changes nothing, so every call here must give the
//! same result as the standard single-search replace functions.

use foldsub::{replace, wrap, Found, ReplaceOptions, Search, Substitution};
use regex::{Captures, Regex};

const SHORT: &str = "The quick brown fox jumps over the lazy dog.";
const SHORT_SEARCH: &str = "quick";
const SHORT_PATTERN: &str = r"([rd])(o)";
const SHORT_SUB: &str = "ʞɔınb";

const LONG: &str = concat!(
    "Peter Piper picked a peck of pickled peppers\n",
    "A peck of pickled peppers Peter Piper picked\n",
    "If Peter Piper picked a peck of pickled peppers\n",
    "Where’s the peck of pickled peppers Peter Piper picked? ",
);
const LONG_SEARCH: &str = "peck";
const LONG_PATTERN: &str = r"(pick)(led)?\b";
const LONG_SUB: &str = "ʞɔǝd";

fn options() -> ReplaceOptions {
    ReplaceOptions::default()
}

fn count(n: usize) -> ReplaceOptions {
    ReplaceOptions {
        max_count: Some(n),
        ..Default::default()
    }
}

fn doubled() -> Substitution {
    Substitution::func(|found| found.as_str().repeat(2))
}

fn swapped() -> Substitution {
    Substitution::func(|found: &Found<'_>| match found.captures() {
        Some(m) => {
            let second = m.get(2).map_or("", |g| g.as_str());
            let first = m.get(1).map_or("", |g| g.as_str());
            format!("{second}{first}")
        }
        None => String::new(),
    })
}

fn regex_swapped(caps: &Captures<'_>) -> String {
    let second = caps.get(2).map_or("", |m| m.as_str());
    format!("{second}{}", &caps[1])
}

#[test]
fn test_literal_text() {
    assert_eq!(
        replace(SHORT, SHORT_SEARCH, SHORT_SUB, &options()).unwrap(),
        SHORT.replace(SHORT_SEARCH, SHORT_SUB)
    );
    assert_eq!(
        replace(LONG, LONG_SEARCH, LONG_SUB, &options()).unwrap(),
        LONG.replace(LONG_SEARCH, LONG_SUB)
    );
    assert_eq!(
        replace(LONG, LONG_SEARCH, LONG_SUB, &count(2)).unwrap(),
        LONG.replacen(LONG_SEARCH, LONG_SUB, 2)
    );
}

#[test]
fn test_pattern_text() {
    let short = Regex::new(SHORT_PATTERN).unwrap();
    let long = Regex::new(LONG_PATTERN).unwrap();

    assert_eq!(
        replace(SHORT, &short, SHORT_SUB, &options()).unwrap(),
        short.replace_all(SHORT, SHORT_SUB)
    );
    assert_eq!(
        replace(LONG, &long, LONG_SUB, &options()).unwrap(),
        long.replace_all(LONG, LONG_SUB)
    );
    assert_eq!(
        replace(LONG, &long, LONG_SUB, &count(2)).unwrap(),
        long.replacen(LONG, 2, LONG_SUB)
    );
}

#[test]
fn test_pattern_from_search_strings() {
    let long = Regex::new(LONG_PATTERN).unwrap();
    let options = ReplaceOptions {
        use_pattern_search: true,
        ..Default::default()
    };
    assert_eq!(
        replace(LONG, LONG_PATTERN, LONG_SUB, &options).unwrap(),
        long.replace_all(LONG, LONG_SUB)
    );
}

#[test]
fn test_pattern_template() {
    let short = Regex::new(SHORT_PATTERN).unwrap();
    assert_eq!(
        replace(SHORT, &short, "<$2$1>", &options()).unwrap(),
        short.replace_all(SHORT, "<$2$1>")
    );
}

#[test]
fn test_literal_callable() {
    assert_eq!(
        replace(SHORT, SHORT_SEARCH, doubled(), &options()).unwrap(),
        SHORT.replace(SHORT_SEARCH, &SHORT_SEARCH.repeat(2))
    );
    assert_eq!(
        replace(LONG, LONG_SEARCH, doubled(), &count(2)).unwrap(),
        LONG.replacen(LONG_SEARCH, &LONG_SEARCH.repeat(2), 2)
    );
}

#[test]
fn test_pattern_callable() {
    let short = Regex::new(SHORT_PATTERN).unwrap();
    let long = Regex::new(LONG_PATTERN).unwrap();

    assert_eq!(
        replace(SHORT, &short, swapped(), &options()).unwrap(),
        short.replace_all(SHORT, regex_swapped)
    );
    assert_eq!(
        replace(LONG, &long, swapped(), &options()).unwrap(),
        long.replace_all(LONG, regex_swapped)
    );
    assert_eq!(
        replace(LONG, &long, swapped(), &count(2)).unwrap(),
        long.replacen(LONG, 2, regex_swapped)
    );
}

#[test]
fn test_mixed_lists() {
    let long = Regex::new(LONG_PATTERN).unwrap();
    let searches = vec![Search::literal(LONG_SEARCH), Search::from(&long)];

    assert_eq!(
        replace(LONG, searches.clone(), [LONG_SUB, "XXX"], &options()).unwrap(),
        long.replace_all(&LONG.replace(LONG_SEARCH, LONG_SUB), "XXX")
    );
    // peck, pickled, peck
    assert_eq!(
        replace(LONG, searches, [LONG_SUB, "XXX"], &count(3)).unwrap(),
        long.replacen(&LONG.replacen(LONG_SEARCH, LONG_SUB, 2), 1, "XXX")
    );
}

#[test]
fn test_broadcast_sub() {
    let short = Regex::new(SHORT_PATTERN).unwrap();
    let searches = vec![Search::literal(SHORT_SEARCH), Search::from(&short)];
    assert_eq!(
        replace(SHORT, searches, SHORT_SUB, &options()).unwrap(),
        short.replace_all(&SHORT.replace(SHORT_SEARCH, SHORT_SUB), SHORT_SUB)
    );
}

#[test]
fn test_wrap() {
    assert_eq!(
        wrap(LONG, LONG_SEARCH, "<<<", ">>>", &options()).unwrap(),
        LONG.replace(LONG_SEARCH, "<<<peck>>>")
    );

    let long = Regex::new(LONG_PATTERN).unwrap();
    assert_eq!(
        wrap(LONG, &long, "<<<", ">>>", &options()).unwrap(),
        long.replace_all(LONG, "<<<$0>>>")
    );
}

#[test]
fn test_no_match_leaves_text_unchanged() {
    assert_eq!(replace(LONG, "nothing here", "x", &options()).unwrap(), LONG);
    assert_eq!(replace(LONG, Search::pattern("z{3}"), "x", &options()).unwrap(), LONG);
}

#[test]
fn test_unfolded_search_matches_std() {
    let options = ReplaceOptions {
        unidecoded_search: false,
        ..Default::default()
    };
    assert_eq!(
        replace(LONG, "’s", "'s", &options).unwrap(),
        LONG.replace("’s", "'s")
    );
}
