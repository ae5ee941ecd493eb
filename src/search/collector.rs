//! Merges the candidates of all search items into one selection.
//!
//! Selection steps:
//!
//! 1. every item reports its candidates inside the window
//! 2. candidates are ordered by start, then by item order, then by discovery order
//! 3. unless overlaps are allowed, a candidate is dropped when its original
//!    span starts before the end of the last kept one
//! 4. only the first `max_count` survivors are kept
//!
//! A zero-width match sitting on the window end is outside the window when
//! that end comes from `end_pos`; at the natural end of the text it is kept.
//!
//! Steps 3 and 4 run on original coordinates so that two folded matches
//! inside one character's expansion never replace that character twice.

use super::{FoldedMatch, Hit, SearchItem};
use crate::fold::Projection;
use crate::options::ReplaceOptions;
use log::debug;
use std::ops::Range;

/// A match found by one search item
#[derive(Debug)]
pub struct Candidate<'h> {
    /// Index of the owning search item
    pub item: usize,
    /// Span in the searched text
    pub range: Range<usize>,
    /// Span in the original text
    pub span: Range<usize>,
    /// What the owning item reported
    pub hit: Hit<'h>,
}

impl Candidate<'_> {
    /// Compute the replacement text; callables are only invoked here
    pub fn resolve(&self, projection: &Projection<'_>, window: Range<usize>) -> String {
        match &self.hit {
            Hit::Literal(item) => item.resolve(&projection.original()[self.span.clone()]),
            Hit::Pattern(item, caps) => {
                item.resolve(&FoldedMatch::new(caps, item.regex(), projection, window))
            }
        }
    }
}

/// Overlap, count and boundary policy for one call
#[derive(Debug, Clone, Copy, Default)]
pub struct Policy {
    pub allow_overlaps: bool,
    pub max_count: Option<usize>,
    pub strict_boundaries: bool,
    /// The window end comes from `end_pos` rather than the end of the text
    pub bounded_end: bool,
}

impl From<&ReplaceOptions> for Policy {
    fn from(options: &ReplaceOptions) -> Self {
        Self {
            allow_overlaps: options.allow_overlaps,
            max_count: options.max_count,
            strict_boundaries: options.strict_boundaries,
            bounded_end: options.end_pos.is_some(),
        }
    }
}

/// Run every item over the projection and select the matches to apply
pub fn collect<'h>(
    items: &'h [SearchItem],
    projection: &'h Projection<'_>,
    window: Range<usize>,
    policy: Policy,
) -> Vec<Candidate<'h>> {
    let haystack = projection.haystack();

    let mut candidates: Vec<Candidate<'h>> = items
        .iter()
        .enumerate()
        .flat_map(|(item, search)| {
            search
                .find_all(haystack, window.clone(), policy.allow_overlaps)
                .into_iter()
                .map(move |(range, hit)| Candidate {
                    item,
                    span: projection.to_original(range.clone()),
                    range,
                    hit,
                })
        })
        .filter(|c| !policy.bounded_end || c.range.start < window.end)
        .filter(|c| {
            !policy.strict_boundaries
                || (projection.is_char_boundary(c.range.start)
                    && projection.is_char_boundary(c.range.end))
        })
        .collect();

    let found = candidates.len();

    // Stable: equal keys keep discovery order
    candidates.sort_by_key(|c| (c.range.start, c.item));

    let mut selected = Vec::with_capacity(candidates.len());
    let mut last_end = 0;
    for candidate in candidates {
        if policy.max_count.is_some_and(|max| selected.len() >= max) {
            break;
        }
        if !policy.allow_overlaps && candidate.span.start < last_end {
            continue;
        }
        last_end = candidate.span.end;
        selected.push(candidate);
    }

    debug!(
        "{} search items: {} candidates, {} selected",
        items.len(),
        found,
        selected.len()
    );

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fold::FoldIndex;
    use crate::fold::testing::TableFold;
    use crate::options::PatternFlags;
    use crate::search::{LiteralItem, PatternItem, Substitution};

    fn literal(needle: &str) -> SearchItem {
        SearchItem::Literal(LiteralItem::new(needle.to_string(), true, "x".into()).unwrap())
    }

    fn pattern(source: &str) -> SearchItem {
        SearchItem::Pattern(PatternItem::new(source, PatternFlags::empty(), "x".into()).unwrap())
    }

    fn spans(selected: &[Candidate<'_>]) -> Vec<(usize, Range<usize>)> {
        selected.iter().map(|c| (c.item, c.span.clone())).collect()
    }

    #[test]
    fn test_overlaps_dropped_greedily() {
        let projection = Projection::Identity("aaa");
        let items = [literal("aa")];
        let selected = collect(&items, &projection, 0..3, Policy::default());
        assert_eq!(spans(&selected), vec![(0, 0..2)]);
    }

    #[test]
    fn test_overlaps_allowed() {
        let projection = Projection::Identity("aaa");
        let policy = Policy {
            allow_overlaps: true,
            ..Default::default()
        };
        let items = [literal("aa")];
        let selected = collect(&items, &projection, 0..3, policy);
        assert_eq!(spans(&selected), vec![(0, 0..2), (0, 1..3)]);
    }

    #[test]
    fn test_merge_order_and_ties() {
        let projection = Projection::Identity("abcab");
        let items = [literal("b"), pattern("a."), literal("ab")];
        let policy = Policy {
            allow_overlaps: true,
            ..Default::default()
        };
        let selected = collect(&items, &projection, 0..5, policy);
        assert_eq!(
            spans(&selected),
            vec![(1, 0..2), (2, 0..2), (0, 1..2), (1, 3..5), (2, 3..5), (0, 4..5)]
        );

        let selected = collect(&items, &projection, 0..5, Policy::default());
        assert_eq!(spans(&selected), vec![(1, 0..2), (1, 3..5)]);
    }

    #[test]
    fn test_count_applies_after_overlaps() {
        let projection = Projection::Identity("aaaaaa");
        let policy = Policy {
            max_count: Some(2),
            ..Default::default()
        };
        let items = [literal("aa")];
        let selected = collect(&items, &projection, 0..6, policy);
        assert_eq!(spans(&selected), vec![(0, 0..2), (0, 2..4)]);
    }

    #[test]
    fn test_expansion_overlap_in_original_coordinates() {
        // "ss" folds from one ß: the two "s" hits must not both replace it
        let projection = Projection::Folded(FoldIndex::build("aßb", &TableFold).unwrap());
        let items = [literal("s")];
        let selected = collect(&items, &projection, 0..4, Policy::default());
        assert_eq!(spans(&selected), vec![(0, 1..3)]);
    }

    #[test]
    fn test_strict_boundaries() {
        let projection = Projection::Folded(FoldIndex::build("北亰", &TableFold).unwrap());
        let strict = Policy {
            strict_boundaries: true,
            ..Default::default()
        };
        assert!(collect(&[literal("ei")], &projection, 0..9, strict).is_empty());
        assert_eq!(
            spans(&collect(&[literal("Jing ")], &projection, 0..9, strict)),
            vec![(0, 3..6)]
        );
        assert_eq!(
            spans(&collect(&[literal("ei")], &projection, 0..9, Policy::default())),
            vec![(0, 0..3)]
        );
    }

    #[test]
    fn test_zero_width_candidates_kept() {
        let projection = Projection::Identity("ab");
        let items = [pattern("^"), literal("a")];
        let selected = collect(&items, &projection, 0..2, Policy::default());
        assert_eq!(spans(&selected), vec![(0, 0..0), (1, 0..1)]);
    }

    #[test]
    fn test_zero_width_at_bounded_end_dropped() {
        let projection = Projection::Identity("abcd");
        let bounded = Policy {
            bounded_end: true,
            ..Default::default()
        };
        let items = [pattern("$")];
        assert!(collect(&items, &projection, 0..2, bounded).is_empty());

        let items = [pattern("")];
        assert_eq!(
            spans(&collect(&items, &projection, 0..2, bounded)),
            vec![(0, 0..0), (0, 1..1)]
        );
        assert!(collect(&items, &projection, 3..3, bounded).is_empty());
    }

    #[test]
    fn test_zero_width_at_text_end_kept() {
        let projection = Projection::Identity("abcd");
        let items = [pattern("$")];
        assert_eq!(
            spans(&collect(&items, &projection, 0..4, Policy::default())),
            vec![(0, 4..4)]
        );
    }

    #[test]
    fn test_resolve_per_hit() {
        let projection = Projection::Folded(FoldIndex::build("größe", &TableFold).unwrap());
        let items = [
            SearchItem::Literal(
                LiteralItem::new(
                    "o".to_string(),
                    true,
                    Substitution::func(|found| found.as_str().to_uppercase()),
                )
                .unwrap(),
            ),
            SearchItem::Pattern(
                PatternItem::new("(s+)", PatternFlags::empty(), "<$1>".into()).unwrap(),
            ),
        ];
        let selected = collect(&items, &projection, 0..6, Policy::default());
        let replacements: Vec<String> = selected
            .iter()
            .map(|c| c.resolve(&projection, 0..6))
            .collect();
        assert_eq!(replacements, vec!["Ö", "<ß>"]);
    }
}
