//! Offset mapping between an original string and its folded projection.
//!
//! Searching happens on the folded text while replacing happens on the
//! original one, so every folded offset has to be traced back to the
//! original character that produced it.
//!
//! ```text
//! original: 北 亰          (bytes 0..3, 3..6)
//! folded:   B e i ␠ J i n g ␠
//! u2i:      0 0 0 0 3 3 3 3 3 | 6
//! ```
//!
//! The trailing entry is a sentinel equal to the original length, so an
//! offset at the very end of the folded text maps to the end of the
//! original text.

use super::Fold;
use crate::error::{Error, Result};
use log::trace;
use std::ops::Range;

/// Folded text plus the folded-to-original ("u2i") offset mapping
#[derive(Debug, Clone)]
pub struct FoldIndex<'t> {
    original: &'t str,
    folded: String,
    u2i: Vec<usize>,
}

impl<'t> FoldIndex<'t> {
    /// Fold `original` character by character, recording where each folded byte came from
    pub fn build<F: Fold + ?Sized>(original: &'t str, folder: &F) -> Result<Self> {
        let mut folded = String::with_capacity(original.len());
        let mut u2i = Vec::with_capacity(original.len() + 1);

        for (offset, ch) in original.char_indices() {
            let chunk = folder.fold(ch).ok_or(Error::Unfoldable { ch, offset })?;
            folded.push_str(&chunk);
            // One entry per folded byte; characters folding to nothing add none
            u2i.resize(folded.len(), offset);
        }
        u2i.push(original.len());

        trace!(
            "folded {} bytes into {} bytes",
            original.len(),
            folded.len()
        );

        Ok(Self {
            original,
            folded,
            u2i,
        })
    }

    pub fn original(&self) -> &'t str {
        self.original
    }

    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// Original offset of the character that produced folded byte `offset`
    pub fn original_offset(&self, offset: usize) -> usize {
        self.u2i[offset.min(self.folded.len())]
    }

    /// Map a folded range to the original span of the characters it touches
    ///
    /// Ends are rounded outward: a range covering only part of one
    /// character's expansion maps to that whole character.
    pub fn to_original(&self, range: Range<usize>) -> Range<usize> {
        let start = self.original_offset(range.start);
        if range.is_empty() {
            return start..start;
        }
        let last = self.original_offset(range.end - 1);
        let width = self.original[last..]
            .chars()
            .next()
            .map_or(0, char::len_utf8);
        start..last + width
    }

    /// First folded offset whose original offset is at least `offset`
    pub fn to_folded(&self, offset: usize) -> usize {
        self.u2i
            .partition_point(|&original| original < offset)
            .min(self.folded.len())
    }

    /// Check if folded `offset` sits between the expansions of two original characters
    pub fn is_char_boundary(&self, offset: usize) -> bool {
        offset == 0 || offset >= self.folded.len() || self.u2i[offset] != self.u2i[offset - 1]
    }
}

/// The text a search runs over, together with the way back to the original
#[derive(Debug, Clone)]
pub enum Projection<'t> {
    /// Searching the original text directly
    Identity(&'t str),
    /// Searching the folded text
    Folded(FoldIndex<'t>),
}

impl<'t> Projection<'t> {
    pub fn original(&self) -> &'t str {
        match self {
            Projection::Identity(text) => text,
            Projection::Folded(index) => index.original(),
        }
    }

    /// The text searches run over
    pub fn haystack(&self) -> &str {
        match self {
            Projection::Identity(text) => text,
            Projection::Folded(index) => index.folded(),
        }
    }

    pub fn is_folded(&self) -> bool {
        matches!(self, Projection::Folded(_))
    }

    /// Map a range of the haystack to original coordinates
    pub fn to_original(&self, range: Range<usize>) -> Range<usize> {
        match self {
            Projection::Identity(_) => range,
            Projection::Folded(index) => index.to_original(range),
        }
    }

    /// Map an original offset to the haystack, moving forward to a character boundary
    pub fn to_haystack(&self, offset: usize) -> usize {
        match self {
            Projection::Identity(text) => (offset..text.len())
                .find(|&i| text.is_char_boundary(i))
                .unwrap_or(text.len()),
            Projection::Folded(index) => index.to_folded(offset),
        }
    }

    /// Map an original window to the haystack
    pub fn window(&self, window: Range<usize>) -> Range<usize> {
        self.to_haystack(window.start)..self.to_haystack(window.end)
    }

    /// Check if a haystack offset falls between whole original characters
    pub fn is_char_boundary(&self, offset: usize) -> bool {
        match self {
            Projection::Identity(text) => text.is_char_boundary(offset),
            Projection::Folded(index) => index.is_char_boundary(offset),
        }
    }
}
