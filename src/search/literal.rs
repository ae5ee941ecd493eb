//! Literal substring search

use super::{Found, Substitution};
use crate::error::{Error, Result};
use memchr::memmem;
use regex::{Regex, RegexBuilder};
use std::fmt;
use std::ops::Range;

enum Matcher {
    /// Byte-exact search
    Exact(memmem::Finder<'static>),
    /// Simple case folding, through an escaped pattern
    Caseless(Regex),
}

/// A literal search with its substitution
pub struct LiteralItem {
    needle: String,
    matcher: Matcher,
    sub: Substitution,
}

impl fmt::Debug for LiteralItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiteralItem")
            .field("needle", &self.needle)
            .field("case_sensitive", &matches!(self.matcher, Matcher::Exact(_)))
            .field("sub", &self.sub)
            .finish()
    }
}

impl LiteralItem {
    pub fn new(needle: String, case_sensitive: bool, sub: Substitution) -> Result<Self> {
        if needle.is_empty() {
            return Err(Error::EmptyLiteral);
        }
        let matcher = if case_sensitive {
            Matcher::Exact(memmem::Finder::new(needle.as_bytes()).into_owned())
        } else {
            Matcher::Caseless(
                RegexBuilder::new(&regex::escape(&needle))
                    .case_insensitive(true)
                    .build()?,
            )
        };
        Ok(Self {
            needle,
            matcher,
            sub,
        })
    }

    /// The searched text, after folding
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Every occurrence inside `window`, overlapping ones included
    pub fn find_all(&self, haystack: &str, window: Range<usize>) -> Vec<Range<usize>> {
        let haystack = &haystack[..window.end];
        let mut found = Vec::new();
        let mut at = window.start;

        while at < haystack.len() {
            let hit = match &self.matcher {
                Matcher::Exact(finder) => finder
                    .find(&haystack.as_bytes()[at..])
                    .map(|offset| at + offset..at + offset + self.needle.len()),
                Matcher::Caseless(regex) => regex.find_at(haystack, at).map(|m| m.range()),
            };
            let Some(range) = hit else {
                break;
            };
            at = range.start + next_char_len(haystack, range.start);
            found.push(range);
        }

        found
    }

    /// Replacement for a match covering `original` in the original text
    pub fn resolve(&self, original: &str) -> String {
        match &self.sub {
            Substitution::Text(text) => text.clone(),
            Substitution::Func(f) => f(&Found::Literal(original)),
        }
    }
}

/// Width of the character at `offset`, at least one byte
pub(crate) fn next_char_len(text: &str, offset: usize) -> usize {
    text[offset..].chars().next().map_or(1, char::len_utf8)
}
