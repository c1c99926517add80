//! Card Name Normalization
//!
//! Canonicalizes card name text so lookups stay stable across the punctuation
//! variants different storefronts use:
//!
//! - Decorative glyph folding (curly quotes, typographic dashes, slash and bar
//!   look-alikes, `Æ`/`Œ` ligatures)
//! - Lookup keys: folded, case-folded, restricted to an [`Alphabet`]
//! - Multi-faced names (`Fire // Ice`, `Delver of Secrets | Insectile Aberration`)
//! - Storage form (ASCII-safe digraphs and straight quotes) and display form
//!   (re-expanded glyphs, quote style chosen by script)

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

// ============================================================================
// Errors
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// Display expansion pairs exactly one opening and one closing quote.
    #[error("Expected exactly two straight double quotes, found {count} in {text:?}")]
    UnbalancedQuotes { text: String, count: usize },
}

// ============================================================================
// Alphabets
// ============================================================================

/// Set of characters that survive into a lookup key.
///
/// Latin and Russian lowercase letters are always allowed; digits and a few
/// extra symbols are opt-in per vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alphabet {
    digits: bool,
    extra: &'static [char],
}

impl Alphabet {
    /// Letters only. Used for card names and conditions.
    pub const LETTERS: Alphabet = Alphabet {
        digits: false,
        extra: &[],
    };

    /// Letters and ASCII digits. Used for set names (`Magic 2010`, `10E`).
    pub const LETTERS_DIGITS: Alphabet = Alphabet {
        digits: true,
        extra: &[],
    };

    /// Letters and `?`. Used for languages, where `??` is a real entry.
    pub const LETTERS_UNKNOWN: Alphabet = Alphabet {
        digits: false,
        extra: &['?'],
    };

    pub fn contains(&self, c: char) -> bool {
        c.is_ascii_lowercase()
            || ('а'..='я').contains(&c)
            || c == 'ё'
            || (self.digits && c.is_ascii_digit())
            || self.extra.contains(&c)
    }
}

// ============================================================================
// Decoration Folding
// ============================================================================

const DOUBLE_QUOTES: &[char] = &['“', '”', '„', '‟', '«', '»', '″', '＂'];
const SINGLE_QUOTES: &[char] = &['‘', '’', '‚', '‛', '′', '´', '`', '＇'];
const DASHES: &[char] = &['‐', '‑', '‒', '–', '—', '―', '−'];
const SLASHES: &[char] = &['∕', '⁄', '／', '⧸'];
const BARS: &[char] = &['¦', '｜', '│'];

/// Separator between faces of a multi-faced card, after slash/bar folding.
static FACE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*(?://|/|\|)\s*").expect("face separator pattern"));

/// `AE` digraph at the start of a capitalized word (`AEther`).
static AE_DIGRAPH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"AE([a-z])").expect("digraph pattern"));

fn fold_separator(c: char) -> Option<char> {
    if SLASHES.contains(&c) {
        Some('/')
    } else if BARS.contains(&c) {
        Some('|')
    } else {
        None
    }
}

/// Fold decorative glyphs to their plain baseline form.
///
/// Letters other than the ligatures are left alone, so the result is still
/// suitable for display after [`to_display_form`].
pub fn fold_decorations(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'Æ' => out.push_str("AE"),
            'æ' => out.push_str("ae"),
            'Œ' => out.push_str("OE"),
            'œ' => out.push_str("oe"),
            '…' => out.push_str("..."),
            '\u{00A0}' | '\u{2007}' | '\u{202F}' => out.push(' '),
            _ if DOUBLE_QUOTES.contains(&c) => out.push('"'),
            _ if SINGLE_QUOTES.contains(&c) => out.push('\''),
            _ if DASHES.contains(&c) => out.push('-'),
            _ => out.push(fold_separator(c).unwrap_or(c)),
        }
    }
    out
}

/// Strip diacritics from Latin letters (`Lim-Dûl` -> `Lim-Dul`) while keeping
/// Cyrillic `й` and `ё` intact.
fn strip_latin_marks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut base_is_latin = false;
    for c in text.nfkd() {
        if is_combining_mark(c) {
            if !base_is_latin {
                out.push(c);
            }
            continue;
        }
        base_is_latin = c.is_ascii_alphabetic();
        out.push(c);
    }
    out.nfc().collect()
}

// ============================================================================
// Lookup Keys
// ============================================================================

/// Compute a lookup key restricted to `alphabet`.
///
/// Total and idempotent: the output only contains lowercase characters of
/// `alphabet`, all of which are fixed points of every step.
pub fn lookup_key_with(text: &str, alphabet: Alphabet) -> String {
    strip_latin_marks(&fold_decorations(text))
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| alphabet.contains(*c))
        .collect()
}

/// Letters-only lookup key of a card name. The empty string is a valid key.
pub fn to_lookup_key(name: &str) -> String {
    lookup_key_with(name, Alphabet::LETTERS)
}

// ============================================================================
// Faces
// ============================================================================

/// Split a multi-faced card name into its faces, in order.
///
/// Accepts `//`, `/`, `|` and their Unicode look-alikes, with or without
/// surrounding whitespace. A single-faced name yields one element.
pub fn split_faces(name: &str) -> Vec<String> {
    let folded: String = name
        .chars()
        .map(|c| fold_separator(c).unwrap_or(c))
        .collect();

    let faces: Vec<String> = FACE_SEPARATOR
        .split(&folded)
        .map(str::trim)
        .filter(|face| !face.is_empty())
        .map(str::to_string)
        .collect();

    if faces.is_empty() {
        vec![name.trim().to_string()]
    } else {
        faces
    }
}

/// First face of a possibly multi-faced name.
pub fn primary_face(name: &str) -> String {
    split_faces(name).swap_remove(0)
}

// ============================================================================
// Storage / Display Forms
// ============================================================================

/// Quote glyph pair used when expanding straight quotes for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// “English”
    Curly,
    /// «Русский»
    Guillemets,
}

impl QuoteStyle {
    /// Pick the quote style from the script of the surrounding text.
    pub fn detect(text: &str) -> Self {
        if text.chars().any(|c| matches!(c, 'А'..='я' | 'Ё' | 'ё')) {
            Self::Guillemets
        } else {
            Self::Curly
        }
    }

    pub fn pair(&self) -> (char, char) {
        match self {
            Self::Curly => ('“', '”'),
            Self::Guillemets => ('«', '»'),
        }
    }
}

/// ASCII-safe storage form: straight quotes, `AE` digraphs, plain dashes and
/// a canonical ` // ` face separator.
pub fn to_storage_form(name: &str) -> String {
    split_faces(&fold_decorations(name)).join(" // ")
}

/// Re-expand a storage-form name for display.
///
/// Zero straight double quotes leaves quoting untouched; exactly two become
/// an opening/closing pair in the style of the text's script; any other count
/// is rejected.
pub fn to_display_form(name: &str) -> Result<String, NameError> {
    let count = name.matches('"').count();
    let quoted = match count {
        0 => name.to_string(),
        2 => {
            let (open, close) = QuoteStyle::detect(name).pair();
            let mut out = String::with_capacity(name.len() + 4);
            let mut opened = false;
            for c in name.chars() {
                if c == '"' {
                    out.push(if opened { close } else { open });
                    opened = true;
                } else {
                    out.push(c);
                }
            }
            out
        }
        _ => {
            return Err(NameError::UnbalancedQuotes {
                text: name.to_string(),
                count,
            })
        }
    };
    Ok(AE_DIGRAPH.replace_all(&quoted, "Æ$1").into_owned())
}
