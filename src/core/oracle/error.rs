//! Error types for dictionary resolution.
//!
//! Only data-integrity problems are errors here. A candidate that matches
//! nothing is an ordinary `None` from the resolver.

use thiserror::Error;

use super::vocabulary::Vocabulary;

/// Result type alias for oracle operations.
pub type Result<T> = std::result::Result<T, OracleError>;

#[derive(Error, Debug)]
pub enum OracleError {
    // =========================================================================
    // Construction Errors
    // =========================================================================

    /// The same code appears twice in one dictionary.
    #[error("Duplicate {vocabulary} code: {code}")]
    DuplicateCode { vocabulary: Vocabulary, code: String },

    /// Two display names normalize to the same lookup key.
    #[error("{vocabulary} names of {first} and {second} collapse to the same key {key:?}")]
    KeyCollision {
        vocabulary: Vocabulary,
        key: String,
        first: String,
        second: String,
    },

    /// A code's match pattern failed to compile.
    #[error("Invalid {vocabulary} pattern for {code}: {source}")]
    InvalidPattern {
        vocabulary: Vocabulary,
        code: String,
        #[source]
        source: regex::Error,
    },

    /// A code the vocabulary depends on is absent from the dictionary.
    #[error("{vocabulary} dictionary is missing required code {code}")]
    MissingCode { vocabulary: Vocabulary, code: String },

    /// The dictionary resource is not valid JSON of the expected shape.
    #[error("Malformed {vocabulary} dictionary: {source}")]
    Resource {
        vocabulary: Vocabulary,
        #[source]
        source: serde_json::Error,
    },

    // =========================================================================
    // Strict Resolution Errors
    // =========================================================================

    /// Several codes' patterns match one candidate in strict mode.
    #[error("Ambiguous {vocabulary} {candidate:?}: matches {codes:?}")]
    AmbiguousMatch {
        vocabulary: Vocabulary,
        candidate: String,
        codes: Vec<String>,
    },
}
