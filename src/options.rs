//! Options controlling a replace call

use bitflags::bitflags;
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::ops::Range;

bitflags! {
    /// Flags applied when compiling search patterns
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct PatternFlags: u32 {
        const CASE_INSENSITIVE = 1;
        const MULTI_LINE = 1 << 1;
        const DOT_MATCHES_NEW_LINE = 1 << 2;
        const IGNORE_WHITESPACE = 1 << 3;
        const SWAP_GREED = 1 << 4;
    }
}

impl Default for PatternFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl PatternFlags {
    pub(crate) fn configure(self, builder: &mut RegexBuilder) {
        builder
            .case_insensitive(self.contains(Self::CASE_INSENSITIVE))
            .multi_line(self.contains(Self::MULTI_LINE))
            .dot_matches_new_line(self.contains(Self::DOT_MATCHES_NEW_LINE))
            .ignore_whitespace(self.contains(Self::IGNORE_WHITESPACE))
            .swap_greed(self.contains(Self::SWAP_GREED));
    }
}

/// Replace options
///
/// All offsets are byte offsets into the original text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplaceOptions {
    /// Keep overlapping matches instead of dropping the later ones
    pub allow_overlaps: bool,
    /// Compile literal search strings as patterns
    pub use_pattern_search: bool,
    /// Flags for patterns compiled from search strings
    pub pattern_flags: PatternFlags,
    /// Replace at most this many matches
    pub max_count: Option<usize>,
    /// Ignore matches starting before this offset
    pub start_pos: Option<usize>,
    /// Ignore matches reaching past this offset
    pub end_pos: Option<usize>,
    /// Search the transliterated text (otherwise the text as-is)
    pub unidecoded_search: bool,
    /// Case sensitivity of literal searches (patterns use their own flags)
    pub case_sensitive: bool,
    /// Drop matches that start or end inside one character's transliteration
    pub strict_boundaries: bool,
}

impl Default for ReplaceOptions {
    fn default() -> Self {
        Self {
            allow_overlaps: false,
            use_pattern_search: false,
            pattern_flags: PatternFlags::empty(),
            max_count: None,
            start_pos: None,
            end_pos: None,
            unidecoded_search: true,
            case_sensitive: true,
            strict_boundaries: false,
        }
    }
}

impl ReplaceOptions {
    /// Search window in original coordinates, clamped to `len`
    pub(crate) fn window(&self, len: usize) -> Range<usize> {
        let start = self.start_pos.unwrap_or(0).min(len);
        let end = self.end_pos.map_or(len, |end| end.min(len));
        start..end.max(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_defaults_to_whole_text() {
        assert_eq!(ReplaceOptions::default().window(10), 0..10);
    }

    #[test]
    fn test_window_is_clamped() {
        let options = ReplaceOptions {
            start_pos: Some(4),
            end_pos: Some(99),
            ..Default::default()
        };
        assert_eq!(options.window(10), 4..10);

        let inverted = ReplaceOptions {
            start_pos: Some(8),
            end_pos: Some(3),
            ..Default::default()
        };
        assert_eq!(inverted.window(10), 8..8);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options: ReplaceOptions =
            serde_json::from_str(r#"{"max_count": 2, "case_sensitive": false}"#).unwrap();
        assert_eq!(options.max_count, Some(2));
        assert!(!options.case_sensitive);
        assert!(options.unidecoded_search);
        assert!(options.pattern_flags.is_empty());
    }

    #[test]
    fn test_pattern_flags_from_json() {
        let options: ReplaceOptions =
            serde_json::from_str(r#"{"pattern_flags": "CASE_INSENSITIVE | MULTI_LINE"}"#).unwrap();
        assert_eq!(
            options.pattern_flags,
            PatternFlags::CASE_INSENSITIVE | PatternFlags::MULTI_LINE
        );
    }
}
