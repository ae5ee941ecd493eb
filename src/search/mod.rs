//! Search items: what to look for and what to put in its place.
//!
//! A call receives a list of [`Search`]es and a list of [`Substitution`]s.
//! They are paired up into [`SearchItem`]s, one per search:
//!
//! - [`literal`] - plain substring search (optionally case-insensitive)
//! - [`pattern`] - regular expression search
//! - [`collector`] - merges the candidates of all items under the overlap,
//!   count and window policy
//! - [`translate`] - original-coordinate view of a folded pattern match

pub mod collector;
pub mod literal;
pub mod pattern;
pub mod translate;

pub use collector::Candidate;
pub use literal::LiteralItem;
pub use pattern::PatternItem;
pub use translate::{FoldedMatch, Group};

use crate::error::{Error, Result};
use crate::fold::{Fold, fold_str};
use crate::options::{PatternFlags, ReplaceOptions};
use regex::Regex;
use regex_automata::util::interpolate;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// One search target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Search {
    /// Plain text
    Literal(String),
    /// Regular expression source with its compile flags
    Pattern { source: String, flags: PatternFlags },
}

impl Search {
    pub fn literal(text: impl Into<String>) -> Self {
        Search::Literal(text.into())
    }

    pub fn pattern(source: impl Into<String>) -> Self {
        Self::pattern_with_flags(source, PatternFlags::empty())
    }

    pub fn pattern_with_flags(source: impl Into<String>, flags: PatternFlags) -> Self {
        Search::Pattern {
            source: source.into(),
            flags,
        }
    }
}

impl From<&str> for Search {
    fn from(text: &str) -> Self {
        Search::literal(text)
    }
}

impl From<String> for Search {
    fn from(text: String) -> Self {
        Search::Literal(text)
    }
}

/// A compiled regex contributes only its source; builder flags are not recoverable,
/// inline flags such as `(?i)` are kept.
impl From<Regex> for Search {
    fn from(regex: Regex) -> Self {
        Search::pattern(regex.as_str())
    }
}

impl From<&Regex> for Search {
    fn from(regex: &Regex) -> Self {
        Search::pattern(regex.as_str())
    }
}

/// What a substitution callable is given
#[derive(Debug, Clone, Copy)]
pub enum Found<'a> {
    /// Original text matched by a literal search
    Literal(&'a str),
    /// Pattern match translated to original coordinates
    Pattern(&'a FoldedMatch<'a>),
}

impl<'a> Found<'a> {
    /// The matched original text
    pub fn as_str(&self) -> &'a str {
        match self {
            Found::Literal(text) => text,
            Found::Pattern(m) => m.as_str(),
        }
    }

    /// Capture groups, for pattern matches
    pub fn captures(&self) -> Option<&'a FoldedMatch<'a>> {
        match self {
            Found::Literal(_) => None,
            Found::Pattern(m) => Some(m),
        }
    }
}

/// Signature of substitution callables
pub type SubFn = dyn Fn(&Found<'_>) -> String + Send + Sync;

/// Replacement for the matches of one search
#[derive(Clone)]
pub enum Substitution {
    /// Replacement text; `$1` / `${name}` references are expanded for pattern searches,
    /// `$$` stands for a literal `$` with any search
    Text(String),
    /// Computes the replacement from the match
    Func(Arc<SubFn>),
}

impl Substitution {
    pub fn text(text: impl Into<String>) -> Self {
        Substitution::Text(text.into())
    }

    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&Found<'_>) -> String + Send + Sync + 'static,
    {
        Substitution::Func(Arc::new(f))
    }

    /// Keep the matched text, surrounded by `prefix` and `suffix`
    pub fn wrap(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let suffix = suffix.into();
        Self::func(move |found| format!("{prefix}{}{suffix}", found.as_str()))
    }
}

impl fmt::Debug for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Substitution::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Substitution::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl From<&str> for Substitution {
    fn from(text: &str) -> Self {
        Substitution::text(text)
    }
}

impl From<String> for Substitution {
    fn from(text: String) -> Self {
        Substitution::Text(text)
    }
}

/// Ordered list of searches for one call
#[derive(Debug, Clone, Default)]
pub struct Searches(Vec<Search>);

/// Ordered list of substitutions for one call
#[derive(Debug, Clone, Default)]
pub struct Substitutions(Vec<Substitution>);

macro_rules! impl_list_from {
    ($list:ident, $item:ty, [$($single:ty),*]) => {
        impl $list {
            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn into_vec(self) -> Vec<$item> {
                self.0
            }
        }

        $(
            impl From<$single> for $list {
                fn from(value: $single) -> Self {
                    $list(vec![value.into()])
                }
            }

            impl From<Vec<$single>> for $list {
                fn from(values: Vec<$single>) -> Self {
                    $list(values.into_iter().map(Into::into).collect())
                }
            }

            impl<const N: usize> From<[$single; N]> for $list {
                fn from(values: [$single; N]) -> Self {
                    $list(values.into_iter().map(Into::into).collect())
                }
            }

            impl From<&[$single]> for $list {
                fn from(values: &[$single]) -> Self {
                    $list(values.iter().cloned().map(Into::into).collect())
                }
            }
        )*
    };
}

impl_list_from!(Searches, Search, [Search, &str, String, Regex, &Regex]);
impl_list_from!(Substitutions, Substitution, [Substitution, &str, String]);

/// Check if a template would expand any capture group reference
pub(crate) fn has_group_reference(template: &str) -> bool {
    let mut found = false;
    let mut sink = String::new();
    interpolate::string(template, |_, _| found = true, |_| Some(0), &mut sink);
    found
}

/// Resolve `$$` escapes in a template without group references
fn unescape_dollars(template: &str) -> String {
    let mut dst = String::with_capacity(template.len());
    interpolate::string(template, |_, _| {}, |_| None, &mut dst);
    dst
}

/// One search paired with its substitution
#[derive(Debug)]
pub enum SearchItem {
    Literal(LiteralItem),
    Pattern(PatternItem),
}

impl SearchItem {
    /// Build an item, folding the search itself when folded search is enabled
    pub fn build<F: Fold + ?Sized>(
        search: Search,
        sub: Substitution,
        options: &ReplaceOptions,
        folder: &F,
    ) -> Result<Self> {
        let fold = |text: String| -> Result<String> {
            if options.unidecoded_search {
                fold_str(folder, &text)
            } else {
                Ok(text)
            }
        };

        match search {
            Search::Literal(source) if options.use_pattern_search => {
                let source = fold(source)?;
                Ok(SearchItem::Pattern(PatternItem::new(
                    &source,
                    options.pattern_flags,
                    sub,
                )?))
            }
            Search::Literal(needle) => {
                let sub = match sub {
                    Substitution::Text(template) if has_group_reference(&template) => {
                        return Err(Error::GroupReferenceInLiteral { template });
                    }
                    Substitution::Text(template) => Substitution::Text(unescape_dollars(&template)),
                    sub => sub,
                };
                let needle = fold(needle)?;
                Ok(SearchItem::Literal(LiteralItem::new(
                    needle,
                    options.case_sensitive,
                    sub,
                )?))
            }
            Search::Pattern { source, flags } => {
                let source = fold(source)?;
                Ok(SearchItem::Pattern(PatternItem::new(&source, flags, sub)?))
            }
        }
    }

    /// All candidate ranges inside `window` of `haystack`, in discovery order
    pub fn find_all<'h>(
        &'h self,
        haystack: &'h str,
        window: Range<usize>,
        allow_overlaps: bool,
    ) -> Vec<(Range<usize>, Hit<'h>)> {
        match self {
            SearchItem::Literal(item) => item
                .find_all(haystack, window)
                .into_iter()
                .map(|range| (range, Hit::Literal(item)))
                .collect(),
            SearchItem::Pattern(item) => item
                .find_all(haystack, window, allow_overlaps)
                .into_iter()
                .filter_map(|caps| {
                    let range = caps.get(0)?.range();
                    Some((range, Hit::Pattern(item, caps)))
                })
                .collect(),
        }
    }
}

/// The item-specific part of a candidate match
#[derive(Debug)]
pub enum Hit<'h> {
    Literal(&'h LiteralItem),
    /// Groups in the coordinates of the searched text
    Pattern(&'h PatternItem, regex::Captures<'h>),
}

impl Hit<'_> {
    /// Groups of a pattern match
    pub fn captures(&self) -> Option<&regex::Captures<'_>> {
        match self {
            Hit::Literal(_) => None,
            Hit::Pattern(_, caps) => Some(caps),
        }
    }
}
