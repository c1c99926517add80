//! Property-based tests for the Card Fixer
//!
//! Tests invariants:
//! - `fix` is idempotent
//! - Set, language and condition of a fixed record are known codes
//! - An id never survives without a set it was asserted with or assigned from

use proptest::prelude::*;

use crate::core::record::CardRecord;
use crate::tests::common::{test_fixer, test_oracles};

// ============================================================================
// Strategies
// ============================================================================

fn arb_caption() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "Lightning Bolt",
            "Shivan Dragon",
            "Serra Angel",
            "Dark Ritual",
            "Ashes to Ashes",
            "Karn Liberated",
            "Delver of Secrets // Insectile Aberration",
            "Insectile Aberration",
            "Молния",
            "\"Ach! Hans, Run!\"",
        ])
        .prop_map(str::to_string),
        "[A-Za-z /|]{0,20}",
    ]
}

fn arb_text_field(pool: Vec<&'static str>) -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::sample::select(pool).prop_map(str::to_string))
}

prop_compose! {
    fn arb_raw_record()(
        caption in arb_caption(),
        description in arb_text_field(vec!["", "NM", "played, NM otherwise", "light creases", "HP"]),
        set in arb_text_field(vec![
            "LEA", "Alpha", "Beta", "Innistrad", "Renaissance", "From the Vault: Dragons",
            "Magic 2010", "M10", "Modern Masters 2015", "Zzyzx Promo",
        ]),
        language in arb_text_field(vec!["English", "fr", "Русский", "Klingon", "??", "DE"]),
        condition in arb_text_field(vec!["NM", "M/NM", "Lightly Played", "mystery", "HP"]),
        foilness in any::<Option<bool>>(),
        id in prop::option::of(0u32..300),
    ) -> CardRecord {
        let mut record = CardRecord::new(caption);
        record.name.description = description;
        record.set = set;
        record.language = language;
        record.condition = condition;
        record.foilness = foilness;
        record.id = id;
        record
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn fix_is_idempotent(raw in arb_raw_record()) {
        let fixer = test_fixer();
        let once = fixer.fix(&raw);
        let twice = fixer.fix(&once);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn fixed_fields_are_codes(raw in arb_raw_record()) {
        let fixed = test_fixer().fix(&raw);
        let oracles = test_oracles();
        if let Some(set) = &fixed.set {
            prop_assert!(oracles.set.contains_code(set));
        }
        if let Some(language) = &fixed.language {
            prop_assert!(oracles.language.contains_code(language));
        }
        if let Some(condition) = &fixed.condition {
            prop_assert!(oracles.condition.contains_code(condition));
        }
        prop_assert!(fixed.name.description.is_some());
    }

    #[test]
    fn id_requires_set(raw in arb_raw_record()) {
        let fixed = test_fixer().fix(&raw);
        if raw.id.is_some() && raw.set.is_some() && fixed.set.is_none() {
            prop_assert_eq!(fixed.id, None);
        }
    }
}
