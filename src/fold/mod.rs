//! Transliteration ("folding") of text to a simplified representation.
//!
//! - [`Fold`] - per-character folding function, injected into the engine
//! - [`Deunicode`] - default folder backed by the `deunicode` tables
//! - [`index`] - the offset mapping between original and folded text

pub mod index;

pub use index::{FoldIndex, Projection};

use crate::error::{Error, Result};
use std::borrow::Cow;
use std::collections::BTreeSet;

/// Per-character transliteration
///
/// Returns `None` when the character has no transliteration. A character may
/// fold to an empty string, a single character or several characters.
pub trait Fold {
    fn fold(&self, ch: char) -> Option<Cow<'_, str>>;
}

impl<T: Fold + ?Sized> Fold for &T {
    fn fold(&self, ch: char) -> Option<Cow<'_, str>> {
        (**self).fold(ch)
    }
}

/// ASCII transliteration using the `deunicode` tables
#[derive(Debug, Clone, Copy, Default)]
pub struct Deunicode;

impl Fold for Deunicode {
    fn fold(&self, ch: char) -> Option<Cow<'_, str>> {
        deunicode::deunicode_char(ch).map(Cow::Borrowed)
    }
}

/// Fold a whole string, failing on the first character without a transliteration
pub fn fold_str<F: Fold + ?Sized>(folder: &F, text: &str) -> Result<String> {
    let mut folded = String::with_capacity(text.len());
    for (offset, ch) in text.char_indices() {
        let chunk = folder.fold(ch).ok_or(Error::Unfoldable { ch, offset })?;
        folded.push_str(&chunk);
    }
    Ok(folded)
}

/// Check if every character of `text` can be folded
pub fn can_fold<F: Fold + ?Sized>(folder: &F, text: &str) -> bool {
    text.chars().all(|ch| folder.fold(ch).is_some())
}

/// Collect the characters of `text` that cannot be folded
pub fn unfoldable_chars<F: Fold + ?Sized>(folder: &F, text: &str) -> BTreeSet<char> {
    text.chars().filter(|&ch| folder.fold(ch).is_none()).collect()
}
