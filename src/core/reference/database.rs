//! Reference Database loading and queries.
//!
//! Resource layout, keyed by raw set name as the storefronts spell it:
//!
//! ```json
//! {
//!   "Limited Edition Alpha": {
//!     "foil": ["No"],
//!     "languages": ["English"],
//!     "cards": { "Lightning Bolt": [161, ""] }
//!   }
//! }
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::de::IgnoredAny;
use serde::Deserialize;

use super::error::{ReferenceError, Result};
use super::foil::FoilPolicy;
use crate::core::names::{primary_face, to_lookup_key};
use crate::core::oracle::{Oracle, Oracles, ResolveOptions};

const LOAD_OPTIONS: ResolveOptions = ResolveOptions {
    strict: true,
    quiet: true,
};

static NO_SETS: BTreeSet<String> = BTreeSet::new();

#[derive(Deserialize)]
struct RawSet {
    #[serde(default)]
    cards: BTreeMap<String, RawCard>,
    #[serde(default)]
    foil: Vec<String>,
    #[serde(default)]
    languages: Vec<String>,
}

/// `[id, foil_marker]` or a bare id. The per-card marker carries nothing the
/// set policy does not.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCard {
    Printing(Option<u32>, IgnoredAny),
    Id(Option<u32>),
}

impl RawCard {
    fn id(&self) -> Option<u32> {
        match self {
            Self::Printing(id, _) | Self::Id(id) => *id,
        }
    }
}

/// One set as the database knows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetInfo {
    pub code: String,
    /// Set name as spelled in the resource.
    pub raw_name: String,
    pub foil: FoilPolicy,
    /// Language codes, in resource order.
    pub languages: Vec<String>,
    /// Raw language names that resolved to no code.
    unresolved_languages: usize,
    /// card key -> numbering id within the set
    cards: HashMap<String, Option<u32>>,
}

impl SetInfo {
    pub fn contains(&self, card_key: &str) -> bool {
        self.cards.contains_key(card_key)
    }

    pub fn card_id(&self, card_key: &str) -> Option<u32> {
        self.cards.get(card_key).copied().flatten()
    }

    /// The only language the set was printed in. None when any listed
    /// language failed to resolve, since the set may have more.
    pub fn sole_language(&self) -> Option<&str> {
        if self.unresolved_languages > 0 {
            return None;
        }
        match self.languages.as_slice() {
            [language] => Some(language.as_str()),
            _ => None,
        }
    }
}

/// Immutable card and set reference, built once at startup.
#[derive(Debug, Default)]
pub struct ReferenceDatabase {
    sets: BTreeMap<String, SetInfo>,
    /// card key -> codes of the sets containing it
    by_card: HashMap<String, BTreeSet<String>>,
}

impl ReferenceDatabase {
    /// Load the database, resolving raw set and language names through the
    /// oracles in strict mode.
    ///
    /// Unresolvable names are skipped with a warning. Ambiguous names, or two
    /// raw sets landing on one code, mean the reference data needs fixing and
    /// fail the load.
    pub fn from_json(json: &str, oracles: &Oracles) -> Result<Self> {
        let raw: BTreeMap<String, RawSet> = serde_json::from_str(json)?;
        let mut db = Self::default();

        for (raw_name, raw_set) in raw {
            let Some(code) = resolve_at_load(&oracles.set, &raw_name)?.map(str::to_string) else {
                log::warn!("Skipping reference set {:?}: unknown set name", raw_name);
                continue;
            };

            if let Some(existing) = db.sets.get(&code) {
                return Err(ReferenceError::DuplicateSet {
                    code,
                    first: existing.raw_name.clone(),
                    second: raw_name,
                });
            }

            let mut languages: Vec<String> = Vec::new();
            let mut unresolved_languages = 0;
            for raw_language in &raw_set.languages {
                match resolve_at_load(&oracles.language, raw_language)? {
                    Some(language) if !languages.iter().any(|l| l == language) => {
                        languages.push(language.to_string())
                    }
                    Some(_) => {}
                    None => {
                        log::warn!(
                            "Skipping language {:?} of set {}: unknown language",
                            raw_language,
                            code
                        );
                        unresolved_languages += 1;
                    }
                }
            }

            let mut cards = HashMap::with_capacity(raw_set.cards.len());
            for (name, card) in &raw_set.cards {
                let key = to_lookup_key(&primary_face(name));
                if key.is_empty() {
                    log::warn!("Skipping card {:?} of set {}: empty name key", name, code);
                    continue;
                }
                db.by_card
                    .entry(key.clone())
                    .or_default()
                    .insert(code.clone());
                cards.insert(key, card.id());
            }

            db.sets.insert(
                code.clone(),
                SetInfo {
                    code,
                    raw_name,
                    foil: FoilPolicy::from_markers(raw_set.foil.as_slice()),
                    languages,
                    unresolved_languages,
                    cards,
                },
            );
        }

        log::info!(
            "Loaded reference database: {} sets, {} distinct cards",
            db.sets.len(),
            db.by_card.len()
        );
        Ok(db)
    }

    /// Codes of every set containing the card; empty when the card is
    /// unknown.
    pub fn sets_for(&self, card_key: &str) -> &BTreeSet<String> {
        self.by_card.get(card_key).unwrap_or(&NO_SETS)
    }

    pub fn set(&self, code: &str) -> Option<&SetInfo> {
        self.sets.get(code)
    }

    pub fn card_id(&self, set_code: &str, card_key: &str) -> Option<u32> {
        self.set(set_code)?.card_id(card_key)
    }

    pub fn languages(&self, set_code: &str) -> &[String] {
        self.set(set_code)
            .map(|set| set.languages.as_slice())
            .unwrap_or(&[])
    }

    /// Unknown sets impose no policy.
    pub fn foil_policy(&self, set_code: &str) -> FoilPolicy {
        self.set(set_code).map(|set| set.foil).unwrap_or_default()
    }

    pub fn set_codes(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

fn resolve_at_load<'a>(oracle: &'a Oracle, raw: &str) -> Result<Option<&'a str>> {
    Ok(oracle.resolve_with(raw, LOAD_OPTIONS)?)
}
