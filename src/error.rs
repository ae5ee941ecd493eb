//! Error type shared by every entry point of the crate.

use thiserror::Error;

/// Result type for replace operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a replace call
///
/// No partial output is produced when any of these is returned.
#[derive(Debug, Error)]
pub enum Error {
    /// A character has no transliteration while folded search is enabled
    #[error("no replacement found for character {ch:?} at offset {offset}")]
    Unfoldable { ch: char, offset: usize },

    /// The search list was empty
    #[error("at least one search string or pattern must be provided")]
    NoSearch,

    /// A literal search is empty (possibly only after folding)
    #[error("search strings must not be empty")]
    EmptyLiteral,

    /// Search and substitution lists cannot be paired up
    #[error(
        "the number of search and sub terms must be equal or there must be exactly one sub \
         (got {searches} searches and {subs} subs)"
    )]
    SubstitutionCount { searches: usize, subs: usize },

    /// A substitution template with `$group` references was paired with a literal search
    #[error(
        "substitution {template:?} refers to capture groups but its search is not a pattern \
         (write `$$` for a literal `$`)"
    )]
    GroupReferenceInLiteral { template: String },

    /// `max_count` was set to zero
    #[error("max_count must be a positive integer")]
    ZeroCount,

    /// Pattern compilation failed
    #[error(transparent)]
    Pattern(#[from] regex::Error),
}

impl Error {
    /// Check if the error comes from the call's arguments rather than its input text
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::NoSearch
                | Error::EmptyLiteral
                | Error::SubstitutionCount { .. }
                | Error::GroupReferenceInLiteral { .. }
                | Error::ZeroCount
        )
    }
}
