//! Dictionary Resolvers ("oracles")
//!
//! Resolve arbitrary human or localized strings to canonical short codes
//! within one fixed vocabulary: card condition, card set, or card language.
//!
//! # Architecture
//!
//! ```text
//!            Oracles
//!               |
//!     +---------+----------+
//!     |         |          |
//!     v         v          v
//! condition    set      language
//!  (Oracle)  (Oracle)   (Oracle)
//! ```
//!
//! Each [`Oracle`] is immutable after construction and shared read-only by
//! every adapter worker and the card fixer.
//!
//! # Errors
//!
//! Construction fails on corrupt dictionaries (duplicate codes, colliding
//! name keys, bad patterns). Strict resolution fails on overlapping
//! patterns. A plain miss is `None`, logged unless the caller asks for quiet.

pub mod condition;
pub mod error;
pub mod resolver;
pub mod resources;
pub mod vocabulary;

pub use condition::{detect_condition, pick_reported, severity_order, SEVERITY_ORDER};
pub use error::{OracleError, Result};
pub use resolver::{DictionaryEntry, Oracle, ResolveOptions};
pub use resources::parse_dictionary;
pub use vocabulary::Vocabulary;

/// The three oracles every consumer needs, built together.
#[derive(Debug)]
pub struct Oracles {
    pub condition: Oracle,
    pub set: Oracle,
    pub language: Oracle,
}

impl Oracles {
    /// Bundle prebuilt oracles. The condition dictionary must define every
    /// severity code.
    pub fn new(condition: Oracle, set: Oracle, language: Oracle) -> Result<Self> {
        if let Some(code) = SEVERITY_ORDER
            .iter()
            .find(|code| !condition.contains_code(code))
        {
            return Err(OracleError::MissingCode {
                vocabulary: Vocabulary::Condition,
                code: code.to_string(),
            });
        }

        Ok(Self {
            condition,
            set,
            language,
        })
    }

    /// Build all three oracles from their dictionary resources.
    pub fn from_json(conditions: &str, sets: &str, languages: &str) -> Result<Self> {
        Self::new(
            Oracle::from_json(Vocabulary::Condition, conditions)?,
            Oracle::from_json(Vocabulary::Set, sets)?,
            Oracle::from_json(Vocabulary::Language, languages)?,
        )
    }

    pub fn get(&self, vocabulary: Vocabulary) -> &Oracle {
        match vocabulary {
            Vocabulary::Condition => &self.condition,
            Vocabulary::Set => &self.set,
            Vocabulary::Language => &self.language,
        }
    }

    /// Condition severity order; a fixed constant.
    pub fn severity_order(&self) -> [&'static str; 4] {
        severity_order()
    }
}
