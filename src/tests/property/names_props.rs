//! Property-based tests for name normalization
//!
//! Tests invariants:
//! - `to_lookup_key` is idempotent and total
//! - Keys only contain characters of the alphabet
//! - `split_faces` inverts joining with any accepted separator

use proptest::prelude::*;

use crate::core::names::{lookup_key_with, primary_face, split_faces, to_lookup_key, Alphabet};

// ============================================================================
// Strategies
// ============================================================================

/// Mixed-script text with decorations, punctuation and separators.
fn arb_name_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "\\PC{0,40}",
        "[A-Za-zÆæŒœéûА-Яа-яЁё0-9 '’“”\"!?,.:/|—–-]{0,40}",
        Just(String::new()),
        Just("!!! ... ---".to_string()),
    ]
}

/// A single face: no separators, no surrounding whitespace.
fn arb_face() -> impl Strategy<Value = String> {
    "[A-Za-zА-Яа-я][A-Za-zА-Яа-я ',!-]{0,20}[A-Za-zА-Яа-я!]"
}

fn arb_separator() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![" // ", "//", " / ", "/", " | ", "|", " ∕ ", "｜", " ⁄ "])
}

fn arb_alphabet() -> impl Strategy<Value = Alphabet> {
    prop::sample::select(vec![
        Alphabet::LETTERS,
        Alphabet::LETTERS_DIGITS,
        Alphabet::LETTERS_UNKNOWN,
    ])
}

// ============================================================================
// Lookup keys
// ============================================================================

proptest! {
    #[test]
    fn lookup_key_is_idempotent(text in arb_name_text()) {
        let key = to_lookup_key(&text);
        prop_assert_eq!(to_lookup_key(&key), key);
    }

    #[test]
    fn lookup_key_stays_in_alphabet(text in arb_name_text(), alphabet in arb_alphabet()) {
        let key = lookup_key_with(&text, alphabet);
        prop_assert!(key.chars().all(|c| alphabet.contains(c)));
        prop_assert_eq!(lookup_key_with(&key, alphabet), key);
    }

    #[test]
    fn lookup_key_ignores_case(face in arb_face()) {
        prop_assert_eq!(to_lookup_key(&face.to_uppercase()), to_lookup_key(&face.to_lowercase()));
    }
}

// ============================================================================
// Faces
// ============================================================================

proptest! {
    #[test]
    fn split_faces_recovers_joined_faces(
        faces in prop::collection::vec(arb_face(), 1..4),
        separator in arb_separator(),
    ) {
        let joined = faces.join(separator);
        prop_assert_eq!(split_faces(&joined), faces.clone());
        prop_assert_eq!(primary_face(&joined), faces[0].clone());
    }

    #[test]
    fn single_face_yields_one_element(face in arb_face()) {
        prop_assert_eq!(split_faces(&face), vec![face.clone()]);
    }

    #[test]
    fn split_faces_never_empty(text in arb_name_text()) {
        prop_assert!(!split_faces(&text).is_empty());
    }
}
