//! Card Fixer Scenarios
//!
//! End-to-end corrections over the bundled reference data:
//! - Set inference from a single-set, single-language card
//! - Asserted sets that do not contain the card, with and without a unique
//!   foil-compatible alternative
//! - Definite foil policies overriding the listing
//! - Aliases, faces and condition detection

use rstest::rstest;

use crate::core::fixer::Correction;
use crate::core::record::CardRecord;
use crate::tests::common::log_capture::{at_least, capture};
use crate::tests::common::{raw_listing, test_fixer};

// =============================================================================
// Single-set cards
// =============================================================================

#[test]
fn test_single_french_set_inferred_and_language_forced() {
    let fixed = test_fixer().fix(&raw_listing("Ashes to Ashes"));

    assert_eq!(fixed.set.as_deref(), Some("REN"));
    assert_eq!(fixed.language.as_deref(), Some("FR"));
    assert_eq!(fixed.foilness, Some(false));
    assert_eq!(fixed.id, None);
}

#[test]
fn test_single_language_set_overrides_reported_language() {
    let fixed = test_fixer().fix_detailed(&raw_listing("Sylvan Library").with_language("English"));

    assert_eq!(fixed.record.language.as_deref(), Some("FR"));
    assert!(fixed.corrections.contains(&Correction::LanguageForced {
        from: Some("EN".to_string()),
        to: "FR".to_string(),
    }));
}

// =============================================================================
// Asserted set not containing the card
// =============================================================================

#[test]
fn test_wrong_set_replaced_by_unique_foil_compatible_set() {
    let fixed = test_fixer().fix_detailed(
        &raw_listing("Serra Angel")
            .with_set("Innistrad")
            .with_foilness(true)
            .with_id(999),
    );

    assert!(fixed.corrections.contains(&Correction::SetNotContainingCard {
        set: "ISD".to_string(),
    }));
    assert_eq!(fixed.record.set.as_deref(), Some("M10"));
    assert_eq!(fixed.record.id, Some(35));
    assert_eq!(fixed.record.foilness, Some(true));
}

#[test]
fn test_wrong_set_cleared_when_candidates_stay_ambiguous() {
    let fixed = test_fixer().fix(
        &raw_listing("Serra Angel")
            .with_set("Innistrad")
            .with_foilness(false)
            .with_id(999),
    );

    assert_eq!(fixed.set, None);
    assert_eq!(fixed.id, None);
    assert_eq!(fixed.foilness, Some(false));
}

#[test]
fn test_wrong_set_cleared_when_no_candidate_admits_foilness() {
    let fixed = test_fixer().fix(&raw_listing("Dark Ritual").with_set("Innistrad").with_foilness(true));

    assert_eq!(fixed.set, None);
    assert_eq!(fixed.foilness, Some(true));
}

#[test]
fn test_wrong_set_logs_warning() {
    let fixer = test_fixer();
    let (fixed, records) = capture(|| fixer.fix(&raw_listing("Karn Liberated").with_set("Alpha")));

    assert_eq!(fixed.set.as_deref(), Some("MM2"));
    assert_eq!(fixed.id, Some(4));
    let warnings = at_least(&records, log::Level::Warn);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("LEA"));
}

#[test]
fn test_valid_set_replaced_by_unique_foil_compatible_set_logs_warning() {
    let fixer = test_fixer();
    let (fixed, records) = capture(|| {
        fixer.fix_detailed(&raw_listing("Serra Angel").with_set("Alpha").with_foilness(true).with_id(39))
    });

    assert_eq!(fixed.record.set.as_deref(), Some("M10"));
    assert_eq!(fixed.record.id, Some(35));
    assert!(fixed.corrections.contains(&Correction::SetInferred {
        set: "M10".to_string(),
    }));
    let warnings = at_least(&records, log::Level::Warn);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("LEA"));
}

// =============================================================================
// Foil policies
// =============================================================================

#[rstest]
#[case::foil_only_set_with_nonfoil_listing("From the Vault: Dragons", Some(false), "DRB", true, 13)]
#[case::foil_only_set_without_foilness("DRB", None, "DRB", true, 13)]
#[case::nonfoil_only_set_with_foil_listing("Alpha", Some(true), "LEA", false, 174)]
#[case::either_set_keeps_nothing_forced("Magic 2010", None, "M10", false, 154)]
fn test_set_foil_policy(
    #[case] set: &str,
    #[case] foilness: Option<bool>,
    #[case] expected_set: &str,
    #[case] expected_foil: bool,
    #[case] expected_id: u32,
) {
    let mut raw = raw_listing("Shivan Dragon").with_set(set);
    raw.foilness = foilness;
    let fixed = test_fixer().fix(&raw);

    assert_eq!(fixed.set.as_deref(), Some(expected_set));
    assert_eq!(fixed.id, Some(expected_id));
    if expected_set == "M10" {
        assert_eq!(fixed.foilness, foilness);
    } else {
        assert_eq!(fixed.foilness, Some(expected_foil));
    }
}

#[test]
fn test_foil_listing_without_set_stays_ambiguous() {
    // Both M10 and DRB print a foil Shivan Dragon.
    let fixed = test_fixer().fix(&raw_listing("Shivan Dragon").with_foilness(true));
    assert_eq!(fixed.set, None);
    assert_eq!(fixed.id, None);
}

// =============================================================================
// Names
// =============================================================================

#[rstest]
#[case::second_face_alias("Insectile Aberration", "Delver of Secrets", "ISD", Some(51))]
#[case::split_name("Delver of Secrets // Insectile Aberration", "Delver of Secrets", "ISD", Some(51))]
#[case::russian_alias("Молния", "Lightning Bolt", "", None)]
#[case::straight_quotes("\"Ach! Hans, Run!\"", "“Ach! Hans, Run!”", "UNH", Some(116))]
fn test_name_canonicalization(
    #[case] caption: &str,
    #[case] expected_caption: &str,
    #[case] expected_set: &str,
    #[case] expected_id: Option<u32>,
) {
    let fixed = test_fixer().fix(&raw_listing(caption));

    assert_eq!(fixed.name.caption, expected_caption);
    assert_eq!(fixed.set.as_deref().unwrap_or_default(), expected_set);
    assert_eq!(fixed.id, expected_id);
}

// =============================================================================
// Conditions
// =============================================================================

#[rstest]
#[case::asserted_code(Some("NM"), "", Some("NM"))]
#[case::asserted_text(Some("M/NM"), "", Some("NM"))]
#[case::asserted_russian(Some("Легко поиграна"), "", Some("SP"))]
#[case::detected(None, "Slightly played, no creases", Some("SP"))]
#[case::detected_fixed_order(None, "NM front, HP back", Some("HP"))]
#[case::unresolvable_then_detected(Some("mystery"), "near mint", Some("NM"))]
#[case::nothing(None, "signed by the artist", None)]
fn test_condition(
    #[case] asserted: Option<&str>,
    #[case] description: &str,
    #[case] expected: Option<&str>,
) {
    let mut raw = raw_listing("Karn Liberated").with_description(description);
    raw.condition = asserted.map(str::to_string);
    let fixed = test_fixer().fix(&raw);
    assert_eq!(fixed.condition.as_deref(), expected);
}

// =============================================================================
// Best effort
// =============================================================================

#[test]
fn test_unresolvable_fields_are_blank_not_errors() {
    let fixer = test_fixer();
    let raw = CardRecord::new("Unheard Of Card")
        .with_set("Zzyzx Promo")
        .with_language("Klingon")
        .with_condition("mystery");

    let (fixed, records) = capture(|| fixer.fix_detailed(&raw));

    assert_eq!(fixed.record.set, None);
    assert_eq!(fixed.record.language, None);
    assert_eq!(fixed.record.condition, None);
    assert_eq!(fixed.corrections.len(), 3);
    assert_eq!(at_least(&records, log::Level::Warn).len(), 3);
}

#[test]
fn test_fix_is_idempotent_on_scenarios() {
    let fixer = test_fixer();
    let raws = [
        raw_listing("Ashes to Ashes"),
        raw_listing("Serra Angel").with_set("Innistrad").with_foilness(true),
        raw_listing("Shivan Dragon").with_set("LEA").with_foilness(true),
        raw_listing("Insectile Aberration").with_description("NM"),
        raw_listing("Молния").with_language("Русский"),
    ];
    for raw in &raws {
        let once = fixer.fix(raw);
        assert_eq!(fixer.fix(&once), once, "drift on {:?}", raw.name.caption);
    }
}
