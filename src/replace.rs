//! The replace engine: validates a call, drives the search and splices the
//! replacements into the original text.

use crate::error::{Error, Result};
use crate::fold::{self, Deunicode, Fold, FoldIndex, Projection};
use crate::options::ReplaceOptions;
use crate::search::collector::{self, Policy};
use crate::search::{Search, SearchItem, Searches, Substitution, Substitutions};
use log::debug;
use std::collections::BTreeSet;
use std::ops::Range;

/// A selected match with its final replacement text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Span in the original text
    pub range: Range<usize>,
    /// Text that replaces the span
    pub replacement: String,
    /// Index of the search that found it
    pub item: usize,
}

/// Build the output by copying untouched text and splicing in replacements
///
/// Overlapping spans (only possible with `allow_overlaps`) are applied in
/// order: a span starting before the end of the previous one adds its
/// replacement right after the previous replacement, without repeating the
/// shared original text.
pub fn apply(text: &str, matches: &[Resolved]) -> String {
    let extra: usize = matches.iter().map(|m| m.replacement.len()).sum();
    let mut output = String::with_capacity(text.len() + extra);
    let mut cursor = 0;

    for m in matches {
        if m.range.start > cursor {
            output.push_str(&text[cursor..m.range.start]);
        }
        output.push_str(&m.replacement);
        cursor = cursor.max(m.range.end);
    }
    output.push_str(&text[cursor..]);

    output
}

/// Search-and-replace on folded text with a given folder
#[derive(Debug, Clone, Default)]
pub struct FoldReplace<F = Deunicode> {
    folder: F,
}

impl<F: Fold> FoldReplace<F> {
    pub fn new(folder: F) -> Self {
        Self { folder }
    }

    pub fn folder(&self) -> &F {
        &self.folder
    }

    /// Select the matches a replace call would apply, without applying them
    pub fn find(
        &self,
        text: &str,
        search: impl Into<Searches>,
        sub: impl Into<Substitutions>,
        options: &ReplaceOptions,
    ) -> Result<Vec<Resolved>> {
        if options.max_count == Some(0) {
            return Err(Error::ZeroCount);
        }

        let items = pair_up(search.into(), sub.into())?
            .into_iter()
            .map(|(search, sub)| SearchItem::build(search, sub, options, &self.folder))
            .collect::<Result<Vec<_>>>()?;

        let projection = if options.unidecoded_search {
            Projection::Folded(FoldIndex::build(text, &self.folder)?)
        } else {
            Projection::Identity(text)
        };

        let window = options.window(text.len());
        let selected = collector::collect(
            &items,
            &projection,
            projection.window(window.clone()),
            Policy::from(options),
        );

        let resolved: Vec<Resolved> = selected
            .iter()
            .map(|candidate| Resolved {
                range: candidate.span.clone(),
                replacement: candidate.resolve(&projection, window.clone()),
                item: candidate.item,
            })
            .collect();

        debug!(
            "resolved {} replacements (folded search: {})",
            resolved.len(),
            projection.is_folded()
        );

        Ok(resolved)
    }

    /// Replace every selected match of `search` with `sub`
    pub fn replace(
        &self,
        text: &str,
        search: impl Into<Searches>,
        sub: impl Into<Substitutions>,
        options: &ReplaceOptions,
    ) -> Result<String> {
        let matches = self.find(text, search, sub, options)?;
        Ok(apply(text, &matches))
    }

    /// Surround every selected match of `search` with `prefix` and `suffix`
    pub fn wrap(
        &self,
        text: &str,
        search: impl Into<Searches>,
        prefix: &str,
        suffix: &str,
        options: &ReplaceOptions,
    ) -> Result<String> {
        self.replace(text, search, Substitution::wrap(prefix, suffix), options)
    }

    /// Check if every character of `text` can be folded
    pub fn can_fold(&self, text: &str) -> bool {
        fold::can_fold(&self.folder, text)
    }

    /// Characters of `text` that cannot be folded
    pub fn unfoldable_chars(&self, text: &str) -> BTreeSet<char> {
        fold::unfoldable_chars(&self.folder, text)
    }
}

/// Pair every search with its substitution; a single substitution is shared by all
fn pair_up(searches: Searches, subs: Substitutions) -> Result<Vec<(Search, Substitution)>> {
    let searches = searches.into_vec();
    let subs = subs.into_vec();

    if searches.is_empty() {
        return Err(Error::NoSearch);
    }

    if subs.len() == searches.len() {
        return Ok(searches.into_iter().zip(subs).collect());
    }

    match <[Substitution; 1]>::try_from(subs) {
        Ok([sub]) => Ok(searches
            .into_iter()
            .map(|search| (search, sub.clone()))
            .collect()),
        Err(subs) => Err(Error::SubstitutionCount {
            searches: searches.len(),
            subs: subs.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fold::testing::TableFold;

    fn resolved(range: Range<usize>, replacement: &str) -> Resolved {
        Resolved {
            range,
            replacement: replacement.to_string(),
            item: 0,
        }
    }

    #[test]
    fn test_apply_gaps_and_tail() {
        let out = apply("hello world", &[resolved(0..1, "J"), resolved(6..11, "there")]);
        assert_eq!(out, "Jello there");
    }

    #[test]
    fn test_apply_insertion() {
        assert_eq!(apply("ab", &[resolved(1..1, "-")]), "a-b");
        assert_eq!(apply("", &[resolved(0..0, "x")]), "x");
    }

    #[test]
    fn test_apply_overlapping_spans() {
        let out = apply("abcde", &[resolved(1..3, "BC"), resolved(2..4, "CD")]);
        assert_eq!(out, "aBCCDe");
    }

    #[test]
    fn test_apply_nothing() {
        assert_eq!(apply("unchanged", &[]), "unchanged");
    }

    #[test]
    fn test_pair_up_broadcast() {
        let pairs = pair_up(["a", "b"].into(), "x".into()).unwrap();
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn test_pair_up_mismatch() {
        let err = pair_up(["a", "b", "c"].into(), ["1", "2"].into()).unwrap_err();
        assert!(matches!(err, Error::SubstitutionCount { searches: 3, subs: 2 }));
        assert!(err.is_config());
    }

    #[test]
    fn test_pair_up_empty() {
        let err = pair_up(Vec::<Search>::new().into(), "x".into()).unwrap_err();
        assert!(matches!(err, Error::NoSearch));
    }

    #[test]
    fn test_find_reports_items_and_spans() {
        let engine = FoldReplace::new(TableFold);
        let found = engine
            .find("北亰 Bei", ["Jing", "Bei"], ["J", "B"], &ReplaceOptions::default())
            .unwrap();
        let found: Vec<_> = found
            .iter()
            .map(|m| (m.range.clone(), m.replacement.as_str(), m.item))
            .collect();
        assert_eq!(found, vec![(0..3, "B", 1), (3..6, "J", 0), (7..10, "B", 1)]);
    }

    #[test]
    fn test_configuration_checked_before_folding() {
        let engine = FoldReplace::new(TableFold);
        let err = engine
            .replace("\u{E000}", "a", "$1", &ReplaceOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::GroupReferenceInLiteral { .. }));

        let err = engine.replace("\u{E000}", "a", "b", &ReplaceOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Unfoldable { .. }));
    }

    #[test]
    fn test_zero_count() {
        let options = ReplaceOptions {
            max_count: Some(0),
            ..Default::default()
        };
        let err = FoldReplace::new(TableFold).replace("a", "a", "b", &options).unwrap_err();
        assert!(matches!(err, Error::ZeroCount));
    }
}
