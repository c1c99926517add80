//! Card-name aliases: obsolete and localized names mapped to the current
//! canonical name.

use std::collections::HashMap;

use super::error::Result;
use crate::core::names::to_lookup_key;

#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    /// lookup key -> canonical names, first authoritative
    entries: HashMap<String, Vec<String>>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an alias resource: `{ "<name or key>": ["Canonical Name", ...] }`.
    ///
    /// Keys are re-normalized, so the resource may spell them any way. Entries
    /// without a canonical name are dropped.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(json)?;
        let mut table = Self::new();
        for (name, canonical) in raw {
            table.insert(&name, canonical);
        }
        log::debug!("Loaded {} card name aliases", table.len());
        Ok(table)
    }

    pub fn insert(&mut self, name: &str, canonical: Vec<String>) {
        let key = to_lookup_key(name);
        if key.is_empty() || canonical.is_empty() {
            log::warn!("Skipping unusable card alias {:?}", name);
            return;
        }
        self.entries.insert(key, canonical);
    }

    /// Authoritative canonical name for a lookup key.
    pub fn canonical(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .and_then(|names| names.first())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
