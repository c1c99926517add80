//! Oracle Scenarios over the bundled dictionaries.

use rstest::rstest;

use crate::core::names::to_lookup_key;
use crate::core::oracle::{ResolveOptions, Vocabulary};
use crate::tests::common::log_capture::capture;
use crate::tests::common::test_oracles;

#[rstest]
#[case::display_name("Limited Edition Alpha")]
#[case::short_name("Alpha")]
#[case::code("LEA")]
#[case::lowercase_code(" lea ")]
#[case::russian("Альфа")]
fn test_alpha_spellings(#[case] candidate: &str) {
    let set = &test_oracles().set;
    assert_eq!(set.resolve(candidate), Some("LEA"));
    assert_eq!(set.resolve_strict(candidate).unwrap(), Some("LEA"));
}

#[rstest]
#[case("M/NM", "NM")]
#[case("Near Mint", "NM")]
#[case("near-mint", "NM")]
#[case("Lightly Played", "SP")]
#[case("EX", "SP")]
#[case("played", "MP")]
#[case("Heavily Played", "HP")]
fn test_condition_spellings(#[case] candidate: &str, #[case] expected: &str) {
    assert_eq!(test_oracles().condition.resolve(candidate), Some(expected));
}

#[test]
fn test_severity_order() {
    assert_eq!(test_oracles().severity_order(), ["HP", "MP", "SP", "NM"]);
}

#[rstest]
#[case("English", "EN")]
#[case("eng", "EN")]
#[case("Français", "FR")]
#[case("日本語", "JP")]
#[case("Chinese Traditional", "TW")]
#[case("???", "??")]
#[case("??", "??")]
fn test_language_spellings(#[case] candidate: &str, #[case] expected: &str) {
    assert_eq!(test_oracles().language.resolve(candidate), Some(expected));
}

#[test]
fn test_every_entry_is_self_matching() {
    for vocabulary in Vocabulary::ALL {
        let oracle = test_oracles().get(vocabulary);
        for (code, display_name) in oracle.entries() {
            assert_eq!(oracle.resolve(code), Some(code), "{vocabulary} code {code}");
            assert_eq!(oracle.resolve_strict(code).unwrap(), Some(code));
            assert_eq!(
                oracle.resolve(display_name),
                Some(code),
                "{vocabulary} name {display_name:?}"
            );
            assert_eq!(oracle.resolve_strict(display_name).unwrap(), Some(code));
        }
    }
}

#[test]
fn test_display_name_keys_are_distinct() {
    for vocabulary in Vocabulary::ALL {
        let oracle = test_oracles().get(vocabulary);
        let mut keys: Vec<String> = oracle
            .entries()
            .map(|(_, name)| vocabulary.lookup_key(name))
            .collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total, "{vocabulary} has colliding name keys");
    }
}

#[test]
fn test_decorative_quotes_share_key() {
    assert_eq!(
        to_lookup_key("“Ach! Hans, Run!”"),
        to_lookup_key("\"Ach! Hans, Run!\"")
    );
    assert_eq!(to_lookup_key("“Ach! Hans, Run!”"), "achhansrun");
}

#[test]
fn test_miss_logs_once_unless_quiet() {
    let set = &test_oracles().set;

    let (found, records) = capture(|| set.resolve("Zzyzx Edition"));
    assert_eq!(found, None);
    let diagnostics: Vec<_> = records
        .iter()
        .filter(|r| r.message.contains("Zzyzx Edition"))
        .collect();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].level, log::Level::Warn);
    assert!(diagnostics[0].message.contains("set"));

    let (found, records) = capture(|| set.resolve_with("Zzyzx Edition", ResolveOptions::QUIET).unwrap());
    assert_eq!(found, None);
    assert!(records.is_empty());
}

#[test]
fn test_probe_finds_embedded_language() {
    let language = &test_oracles().language;
    assert_eq!(language.probe("Lightning Bolt (Russian) NM"), vec!["RU"]);
}
