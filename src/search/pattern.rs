//! Regular expression search

use super::literal::next_char_len;
use super::{FoldedMatch, Found, Substitution};
use crate::error::Result;
use crate::options::PatternFlags;
use regex::{Captures, Regex, RegexBuilder};
use std::ops::Range;

/// A pattern search with its substitution
#[derive(Debug)]
pub struct PatternItem {
    regex: Regex,
    sub: Substitution,
}

impl PatternItem {
    /// Compile `source`; engine errors are returned unchanged
    pub fn new(source: &str, flags: PatternFlags, sub: Substitution) -> Result<Self> {
        let mut builder = RegexBuilder::new(source);
        flags.configure(&mut builder);
        Ok(Self {
            regex: builder.build()?,
            sub,
        })
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Matches inside `window`, in order
    ///
    /// The haystack is cut at the window end, so `$` matches there. With
    /// `allow_overlaps` the search resumes one character after each match
    /// start, otherwise at the match end. Empty matches are kept, including
    /// one right after a non-empty match or on the window end; the collector
    /// drops the latter when the window end is an explicit bound.
    pub fn find_all<'h>(
        &self,
        haystack: &'h str,
        window: Range<usize>,
        allow_overlaps: bool,
    ) -> Vec<Captures<'h>> {
        let haystack = &haystack[..window.end];
        let mut found = Vec::new();
        let mut at = window.start;

        while at <= haystack.len() {
            let Some(caps) = self.regex.captures_at(haystack, at) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };
            at = if allow_overlaps || whole.is_empty() {
                whole.start() + next_char_len(haystack, whole.start())
            } else {
                whole.end()
            };
            found.push(caps);
        }

        found
    }

    /// Replacement for a translated match
    ///
    /// Text substitutions expand `$n` / `${name}` with the original text of each group.
    pub fn resolve(&self, m: &FoldedMatch<'_>) -> String {
        match &self.sub {
            Substitution::Text(template) => m.expand(template),
            Substitution::Func(f) => f(&Found::Pattern(m)),
        }
    }
}
