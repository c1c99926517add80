//! Card Fixer
//!
//! Turns a raw storefront listing into a corrected [`CardRecord`] using the
//! oracles and the reference database. Pure computation: never blocks, never
//! fails, only logs.
//!
//! Precedence, applied in order:
//! 1. Caption reduced to its primary face, description defaulted to empty
//! 2. Card-name aliases
//! 3. Asserted language and condition resolved to codes; condition detected
//!    from the description when none is asserted
//! 4. Asserted set kept only if it resolves and contains the card
//! 5. Set inferred when foil compatibility leaves exactly one candidate
//! 6. Numbering id, single print language and definite foil policy of the
//!    final set override what the listing said

use std::fmt;
use std::sync::Arc;

use crate::core::names::{primary_face, to_lookup_key};
use crate::core::oracle::{detect_condition, Oracles};
use crate::core::record::CardRecord;
use crate::core::reference::{AliasTable, ReferenceDatabase};

/// One adjustment the fixer made to a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Correction {
    AliasApplied { from: String, to: String },
    LanguageUnresolved { raw: String },
    ConditionUnresolved { raw: String },
    ConditionDetected { code: String },
    SetUnresolved { raw: String },
    SetNotContainingCard { set: String },
    SetInferred { set: String },
    IdAssigned { id: u32 },
    LanguageForced { from: Option<String>, to: String },
    FoilnessForced { from: Option<bool>, to: bool },
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AliasApplied { from, to } => write!(f, "renamed {from:?} to {to:?}"),
            Self::LanguageUnresolved { raw } => write!(f, "dropped unknown language {raw:?}"),
            Self::ConditionUnresolved { raw } => write!(f, "dropped unknown condition {raw:?}"),
            Self::ConditionDetected { code } => write!(f, "detected condition {code}"),
            Self::SetUnresolved { raw } => write!(f, "dropped unknown set {raw:?}"),
            Self::SetNotContainingCard { set } => write!(f, "dropped set {set} lacking the card"),
            Self::SetInferred { set } => write!(f, "inferred set {set}"),
            Self::IdAssigned { id } => write!(f, "assigned id {id}"),
            Self::LanguageForced { from, to } => write!(f, "forced language {from:?} -> {to}"),
            Self::FoilnessForced { from, to } => write!(f, "forced foilness {from:?} -> {to}"),
        }
    }
}

/// A fixed record together with what changed.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedRecord {
    pub record: CardRecord,
    pub corrections: Vec<Correction>,
}

/// Record fixer over shared, immutable reference data.
///
/// Cloning is cheap; every adapter worker gets its own handle.
#[derive(Debug, Clone)]
pub struct CardFixer {
    oracles: Arc<Oracles>,
    reference: Arc<ReferenceDatabase>,
    aliases: Arc<AliasTable>,
}

impl CardFixer {
    pub fn new(
        oracles: Arc<Oracles>,
        reference: Arc<ReferenceDatabase>,
        aliases: Arc<AliasTable>,
    ) -> Self {
        Self {
            oracles,
            reference,
            aliases,
        }
    }

    pub fn oracles(&self) -> &Oracles {
        &self.oracles
    }

    pub fn reference(&self) -> &ReferenceDatabase {
        &self.reference
    }

    /// Produce a corrected copy of `raw`.
    pub fn fix(&self, raw: &CardRecord) -> CardRecord {
        self.fix_detailed(raw).record
    }

    /// Like [`fix`](Self::fix), also reporting every correction applied.
    pub fn fix_detailed(&self, raw: &CardRecord) -> FixedRecord {
        let mut record = raw.clone();
        let mut corrections = Vec::new();

        let key = self.canonicalize_name(&mut record, &mut corrections);
        self.resolve_language(&mut record, &mut corrections);
        self.resolve_condition(&mut record, &mut corrections);
        self.check_asserted_set(&mut record, &key, &mut corrections);
        self.infer_set(&mut record, &key, &mut corrections);
        self.apply_set_facts(&mut record, &key, &mut corrections);

        for correction in &corrections {
            log::debug!("{}: {}", record.name.caption, correction);
        }

        FixedRecord {
            record,
            corrections,
        }
    }

    /// Returns the lookup key of the final caption.
    fn canonicalize_name(&self, record: &mut CardRecord, corrections: &mut Vec<Correction>) -> String {
        record.name.caption = primary_face(&record.name.caption);
        record.name.description.get_or_insert_with(String::new);

        let key = to_lookup_key(&record.name.caption);
        let Some(canonical) = self.aliases.canonical(&key) else {
            return key;
        };

        let canonical = primary_face(canonical);
        if canonical == record.name.caption {
            return key;
        }
        corrections.push(Correction::AliasApplied {
            from: std::mem::replace(&mut record.name.caption, canonical),
            to: record.name.caption.clone(),
        });
        to_lookup_key(&record.name.caption)
    }

    fn resolve_language(&self, record: &mut CardRecord, corrections: &mut Vec<Correction>) {
        let Some(raw) = record.language.take() else {
            return;
        };
        match self.oracles.language.resolve(&raw) {
            Some(code) => record.language = Some(code.to_string()),
            None => corrections.push(Correction::LanguageUnresolved { raw }),
        }
    }

    fn resolve_condition(&self, record: &mut CardRecord, corrections: &mut Vec<Correction>) {
        if let Some(raw) = record.condition.take() {
            match self.oracles.condition.resolve(&raw) {
                Some(code) => {
                    record.condition = Some(code.to_string());
                    return;
                }
                None => corrections.push(Correction::ConditionUnresolved { raw }),
            }
        }

        let description = record.name.description.as_deref().unwrap_or_default();
        if let Some(code) = detect_condition(&self.oracles.condition, description) {
            record.condition = Some(code.to_string());
            corrections.push(Correction::ConditionDetected {
                code: code.to_string(),
            });
        }
    }

    fn check_asserted_set(&self, record: &mut CardRecord, key: &str, corrections: &mut Vec<Correction>) {
        let Some(raw) = record.set.take() else {
            return;
        };
        let candidates = self.reference.sets_for(key);

        match self.oracles.set.resolve(&raw) {
            Some(code) if candidates.is_empty() || candidates.contains(code) => {
                record.set = Some(code.to_string());
            }
            Some(code) => {
                log::warn!(
                    "Set {} does not contain {:?}; dropping asserted set",
                    code,
                    record.name.caption
                );
                record.id = None;
                corrections.push(Correction::SetNotContainingCard {
                    set: code.to_string(),
                });
            }
            None => {
                record.id = None;
                corrections.push(Correction::SetUnresolved { raw });
            }
        }
    }

    fn infer_set(&self, record: &mut CardRecord, key: &str, corrections: &mut Vec<Correction>) {
        let mut matched = self
            .reference
            .sets_for(key)
            .iter()
            .filter(|code| self.reference.foil_policy(code).admits(record.foilness));

        let (Some(only), None) = (matched.next(), matched.next()) else {
            return;
        };
        if record.set.as_deref() == Some(only.as_str()) {
            return;
        }
        if let Some(asserted) = record.set.as_deref() {
            log::warn!(
                "Only {} prints a compatible {:?}; replacing asserted set {}",
                only,
                record.name.caption,
                asserted
            );
            record.id = None;
        }
        record.set = Some(only.clone());
        corrections.push(Correction::SetInferred { set: only.clone() });
    }

    fn apply_set_facts(&self, record: &mut CardRecord, key: &str, corrections: &mut Vec<Correction>) {
        let Some(set) = record.set.as_deref().and_then(|code| self.reference.set(code)) else {
            return;
        };

        if let Some(id) = set.card_id(key) {
            if record.id != Some(id) {
                record.id = Some(id);
                corrections.push(Correction::IdAssigned { id });
            }
        }

        if let Some(language) = set.sole_language() {
            if record.language.as_deref() != Some(language) {
                if let Some(asserted) = record.language.as_deref() {
                    log::warn!(
                        "Set {} is printed only in {}; overriding language {} of {:?}",
                        set.code,
                        language,
                        asserted,
                        record.name.caption
                    );
                }
                corrections.push(Correction::LanguageForced {
                    from: record.language.replace(language.to_string()),
                    to: language.to_string(),
                });
            }
        }

        if let Some(foil) = set.foil.forced() {
            if record.foilness != Some(foil) {
                if record.foilness.is_some() {
                    log::warn!(
                        "Set {} forces foilness {}; overriding listing of {:?}",
                        set.code,
                        foil,
                        record.name.caption
                    );
                }
                corrections.push(Correction::FoilnessForced {
                    from: record.foilness.replace(foil),
                    to: foil,
                });
            }
        }
    }
}
