//! # foldsub - search and replace on transliterated text
//!
//! foldsub searches a transliterated ("folded") view of a string, where
//! diacritics and non-Latin characters are reduced to ASCII, while replacing
//! in the original string, whose characters are kept untouched.
//!
//! ```
//! use foldsub::{replace, ReplaceOptions};
//!
//! let options = ReplaceOptions::default();
//! // "ö" folds to "o", so searching for either finds it
//! assert_eq!(replace("Übergröße", "o", "!!!", &options).unwrap(), "Übergr!!!ße");
//! assert_eq!(replace("Übergröße", "ö", "!!!", &options).unwrap(), "Übergr!!!ße");
//! ```
//!
//! ## Architecture
//!
//! - [`fold`] - transliteration and the original↔folded offset mapping
//! - [`search`] - literal and pattern search items, match collection and
//!   the original-coordinate view of pattern matches
//! - [`replace`] - the engine and the splicing of replacements
//! - [`options`] - call options
//!
//! ## Offsets
//!
//! All offsets (window bounds, match and group spans) are byte offsets into
//! the original string.

pub mod error;
pub mod fold;
pub mod options;
pub mod replace;
pub mod search;

pub use error::{Error, Result};
pub use fold::{Deunicode, Fold};
pub use options::{PatternFlags, ReplaceOptions};
pub use replace::{FoldReplace, Resolved, apply};
pub use search::{FoldedMatch, Found, Group, Search, Searches, Substitution, Substitutions};

use std::collections::BTreeSet;

/// Replace the matches of `search` in `text` with `sub`, searching the transliterated text
///
/// ```
/// use foldsub::{replace, ReplaceOptions, Search, Substitution};
///
/// let swapped = replace(
///     "Größe",
///     Search::pattern("(r)(o)"),
///     Substitution::text("$2$1"),
///     &ReplaceOptions::default(),
/// )
/// .unwrap();
/// assert_eq!(swapped, "Görße");
/// ```
pub fn replace(
    text: &str,
    search: impl Into<Searches>,
    sub: impl Into<Substitutions>,
    options: &ReplaceOptions,
) -> Result<String> {
    FoldReplace::new(Deunicode).replace(text, search, sub, options)
}

/// Surround the matches of `search` in `text` with `prefix` and `suffix`
///
/// ```
/// use foldsub::{wrap, ReplaceOptions};
///
/// let out = wrap("This is some string.", "some", "<b>", "</b>", &ReplaceOptions::default());
/// assert_eq!(out.unwrap(), "This is <b>some</b> string.");
/// ```
pub fn wrap(
    text: &str,
    search: impl Into<Searches>,
    prefix: &str,
    suffix: &str,
    options: &ReplaceOptions,
) -> Result<String> {
    FoldReplace::new(Deunicode).wrap(text, search, prefix, suffix, options)
}

/// The matches a [`replace`] call would apply, with their replacement texts
pub fn find(
    text: &str,
    search: impl Into<Searches>,
    sub: impl Into<Substitutions>,
    options: &ReplaceOptions,
) -> Result<Vec<Resolved>> {
    FoldReplace::new(Deunicode).find(text, search, sub, options)
}

/// Check if every character of `text` can be transliterated
pub fn can_fold(text: &str) -> bool {
    fold::can_fold(&Deunicode, text)
}

/// Characters of `text` that cannot be transliterated
pub fn unfoldable_chars(text: &str) -> BTreeSet<char> {
    fold::unfoldable_chars(&Deunicode, text)
}
