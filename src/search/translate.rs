//! Original-coordinate view of a pattern match found in folded text.
//!
//! Patterns run over the folded text, so their spans point into it. A
//! [`FoldedMatch`] answers the same questions (spans, groups, expansion)
//! about the *original* text, rounding spans outward to whole original
//! characters. The untranslated match stays reachable through
//! [`FoldedMatch::original`].

use crate::fold::Projection;
use regex::{Captures, Regex};
use regex_automata::util::interpolate;
use std::ops::Range;

/// One capture group in original coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<'a> {
    text: &'a str,
    range: Range<usize>,
}

impl<'a> Group<'a> {
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    pub fn start(&self) -> usize {
        self.range.start
    }

    pub fn end(&self) -> usize {
        self.range.end
    }

    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// A pattern match translated to the original text
#[derive(Debug)]
pub struct FoldedMatch<'a> {
    captures: &'a Captures<'a>,
    regex: &'a Regex,
    projection: &'a Projection<'a>,
    window: Range<usize>,
}

impl<'a> FoldedMatch<'a> {
    pub fn new(
        captures: &'a Captures<'a>,
        regex: &'a Regex,
        projection: &'a Projection<'a>,
        window: Range<usize>,
    ) -> Self {
        Self {
            captures,
            regex,
            projection,
            window,
        }
    }

    /// The untranslated match, in the coordinates of the searched text
    pub fn original(&self) -> &'a Captures<'a> {
        self.captures
    }

    /// The pattern that produced this match
    pub fn regex(&self) -> &'a Regex {
        self.regex
    }

    /// The original text
    pub fn haystack(&self) -> &'a str {
        self.projection.original()
    }

    /// Search window of the call, in original coordinates
    pub fn window(&self) -> Range<usize> {
        self.window.clone()
    }

    /// Group `index` (0 is the whole match), `None` if it did not participate
    pub fn get(&self, index: usize) -> Option<Group<'a>> {
        self.captures
            .get(index)
            .map(|m| self.translate(m.range()))
    }

    /// Named group
    pub fn name(&self, name: &str) -> Option<Group<'a>> {
        self.captures.name(name).map(|m| self.translate(m.range()))
    }

    /// Number of groups, including the whole match
    pub fn len(&self) -> usize {
        self.captures.len()
    }

    /// Always false: a match has at least the implicit whole-match group
    pub fn is_empty(&self) -> bool {
        false
    }

    /// All groups in order, the whole match first
    pub fn iter(&self) -> impl Iterator<Item = Option<Group<'a>>> + '_ {
        (0..self.len()).map(|index| self.get(index))
    }

    pub fn range(&self) -> Range<usize> {
        self.whole().range()
    }

    pub fn start(&self) -> usize {
        self.whole().start()
    }

    pub fn end(&self) -> usize {
        self.whole().end()
    }

    /// Original text covered by the whole match
    pub fn as_str(&self) -> &'a str {
        self.whole().as_str()
    }

    /// Expand `$n` / `${name}` references in `template` with original group texts
    ///
    /// Uses the same template syntax as [`Captures::expand`]; `$$` is a literal `$`.
    pub fn expand(&self, template: &str) -> String {
        let mut dst = String::new();
        interpolate::string(
            template,
            |index, dst| {
                if let Some(group) = self.get(index) {
                    dst.push_str(group.as_str());
                }
            },
            |name| {
                self.regex
                    .capture_names()
                    .position(|candidate| candidate == Some(name))
            },
            &mut dst,
        );
        dst
    }

    fn whole(&self) -> Group<'a> {
        let range = self
            .captures
            .get(0)
            .map_or(0..0, |m| m.range());
        self.translate(range)
    }

    fn translate(&self, range: Range<usize>) -> Group<'a> {
        let range = self.projection.to_original(range);
        Group {
            text: &self.projection.original()[range.clone()],
            range,
        }
    }
}
