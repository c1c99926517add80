//! Dictionary resource parsing.
//!
//! A dictionary is a JSON object keyed by code. Each value is either a bare
//! display name or a `[display_name, pattern]` pair where the pattern may be
//! `null`:
//!
//! ```json
//! {
//!   "LEA": ["Limited Edition Alpha", "(?:limited edition )?alpha"],
//!   "REN": "Renaissance"
//! }
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use super::error::{OracleError, Result};
use super::resolver::{DictionaryEntry, Oracle};
use super::vocabulary::Vocabulary;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Name(String),
    Pair(String, Option<String>),
}

/// Parse a dictionary resource into entries, ordered by code.
pub fn parse_dictionary(vocabulary: Vocabulary, json: &str) -> Result<Vec<DictionaryEntry>> {
    let raw: BTreeMap<String, RawEntry> = serde_json::from_str(json)
        .map_err(|source| OracleError::Resource { vocabulary, source })?;

    Ok(raw
        .into_iter()
        .map(|(code, entry)| match entry {
            RawEntry::Name(display_name) => DictionaryEntry::new(code, display_name),
            RawEntry::Pair(display_name, pattern) => DictionaryEntry {
                code,
                display_name,
                pattern,
            },
        })
        .collect())
}

impl Oracle {
    /// Build an oracle straight from a dictionary resource.
    pub fn from_json(vocabulary: Vocabulary, json: &str) -> Result<Self> {
        Oracle::new(vocabulary, parse_dictionary(vocabulary, json)?)
    }
}
