use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::names::{lookup_key_with, Alphabet};

/// One of the fixed vocabularies an [`Oracle`](super::Oracle) resolves into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vocabulary {
    Condition,
    Set,
    Language,
}

impl Vocabulary {
    pub const ALL: [Vocabulary; 3] = [Self::Condition, Self::Set, Self::Language];

    /// Characters that survive into this vocabulary's lookup keys.
    pub fn alphabet(&self) -> Alphabet {
        match self {
            Self::Condition => Alphabet::LETTERS,
            Self::Set => Alphabet::LETTERS_DIGITS,
            Self::Language => Alphabet::LETTERS_UNKNOWN,
        }
    }

    /// Normalized lookup key of a display name or candidate.
    pub fn lookup_key(&self, text: &str) -> String {
        lookup_key_with(text, self.alphabet())
    }

    /// File name of the dictionary resource for this vocabulary.
    pub fn resource_file(&self) -> &'static str {
        match self {
            Self::Condition => "conditions.json",
            Self::Set => "sets.json",
            Self::Language => "languages.json",
        }
    }
}

impl fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Condition => "condition",
            Self::Set => "set",
            Self::Language => "language",
        })
    }
}
