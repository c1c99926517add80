//! Fuzzy string -> code resolution over one vocabulary.
//!
//! Resolution order for a candidate:
//! 1. Exact code (trimmed, uppercased)
//! 2. Lookup key of a display name
//! 3. Whole-string, case-insensitive match patterns
//!
//! Step 3 returns the first matching code in non-strict mode. Strict mode
//! evaluates every pattern and treats more than one match as corrupt
//! reference data.

use std::collections::{BTreeMap, HashMap};

use regex::{Regex, RegexBuilder};

use super::error::{OracleError, Result};
use super::vocabulary::Vocabulary;
use crate::core::names::fold_decorations;

/// Longest run of words [`Oracle::probe`] tries as a single candidate.
const MAX_PROBE_WORDS: usize = 3;

/// One row of a dictionary resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    pub code: String,
    pub display_name: String,
    /// Regex matched against the whole candidate. Defaults to the escaped
    /// display name.
    pub pattern: Option<String>,
}

impl DictionaryEntry {
    pub fn new(code: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display_name: display_name.into(),
            pattern: None,
        }
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }
}

/// Per-call resolution switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Require at most one pattern match.
    pub strict: bool,
    /// Suppress the miss diagnostic.
    pub quiet: bool,
}

impl ResolveOptions {
    pub const STRICT: ResolveOptions = ResolveOptions {
        strict: true,
        quiet: false,
    };

    pub const QUIET: ResolveOptions = ResolveOptions {
        strict: false,
        quiet: true,
    };
}

/// Immutable resolver from free text to canonical codes.
///
/// Built once, then shared read-only (`Send + Sync`) by every consumer.
#[derive(Debug)]
pub struct Oracle {
    vocabulary: Vocabulary,
    /// display-name key -> code
    by_key: HashMap<String, String>,
    /// code -> display name
    names: BTreeMap<String, String>,
    /// (code, anchored pattern), ordered by code
    patterns: Vec<(String, Regex)>,
}

impl Oracle {
    /// Build an oracle, failing on duplicate codes, colliding display-name
    /// keys or patterns that do not compile.
    pub fn new<I>(vocabulary: Vocabulary, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = DictionaryEntry>,
    {
        let mut by_key: HashMap<String, String> = HashMap::new();
        let mut names = BTreeMap::new();
        let mut patterns = Vec::new();

        for entry in entries {
            let code = entry.code.trim().to_uppercase();
            if names.contains_key(&code) {
                return Err(OracleError::DuplicateCode { vocabulary, code });
            }

            let key = vocabulary.lookup_key(&entry.display_name);
            if !key.is_empty() {
                if let Some(first) = by_key.get(&key) {
                    return Err(OracleError::KeyCollision {
                        vocabulary,
                        key,
                        first: first.clone(),
                        second: code,
                    });
                }
                by_key.insert(key, code.clone());
            }

            let source = entry
                .pattern
                .unwrap_or_else(|| regex::escape(&entry.display_name));
            let pattern = compile_anchored(&source).map_err(|source| OracleError::InvalidPattern {
                vocabulary,
                code: code.clone(),
                source,
            })?;

            patterns.push((code.clone(), pattern));
            names.insert(code, entry.display_name);
        }

        patterns.sort_by(|a, b| a.0.cmp(&b.0));

        log::debug!("Built {} oracle with {} codes", vocabulary, names.len());

        Ok(Self {
            vocabulary,
            by_key,
            names,
            patterns,
        })
    }

    pub fn vocabulary(&self) -> Vocabulary {
        self.vocabulary
    }

    /// Display name of a code.
    pub fn display_name(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    /// All codes, in sorted order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    /// (code, display name) pairs, in code order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names.iter().map(|(c, n)| (c.as_str(), n.as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.names.contains_key(code)
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Non-strict resolution; logs a warning on a miss.
    pub fn resolve(&self, candidate: &str) -> Option<&str> {
        let found = self
            .exact(candidate)
            .or_else(|| self.first_match(candidate));
        if found.is_none() {
            self.report_miss(candidate);
        }
        found
    }

    /// Non-strict resolution without diagnostics, for best-effort probing.
    pub fn resolve_quiet(&self, candidate: &str) -> Option<&str> {
        self.exact(candidate)
            .or_else(|| self.first_match(candidate))
    }

    /// Strict resolution; ambiguous pattern matches are an error.
    pub fn resolve_strict(&self, candidate: &str) -> Result<Option<&str>> {
        self.resolve_with(candidate, ResolveOptions::STRICT)
    }

    pub fn resolve_with(&self, candidate: &str, options: ResolveOptions) -> Result<Option<&str>> {
        let found = match self.exact(candidate) {
            Some(code) => Some(code),
            None if options.strict => self.unique_match(candidate)?,
            None => self.first_match(candidate),
        };
        if found.is_none() && !options.quiet {
            self.report_miss(candidate);
        }
        Ok(found)
    }

    /// Scan free text for words of this vocabulary.
    ///
    /// Tries the longest run of up to three words at each position, advancing
    /// past a run once it resolves. A lone word of one or two letters only
    /// counts when written in capitals, so prose like "de" or "en" is not
    /// read as a code. Codes come back in order of first
    /// occurrence, without duplicates. Never logs.
    pub fn probe(&self, text: &str) -> Vec<&str> {
        let words: Vec<&str> = text
            .split(|c: char| c.is_whitespace() || ",;:()[]{}!.".contains(c))
            .filter(|w| !w.is_empty())
            .collect();

        let mut found: Vec<&str> = Vec::new();
        let mut start = 0;
        while start < words.len() {
            let longest = MAX_PROBE_WORDS.min(words.len() - start);
            let hit = (1..=longest).rev().find_map(|n| {
                if n == 1 && is_incidental_word(words[start]) {
                    return None;
                }
                let candidate = words[start..start + n].join(" ");
                self.resolve_quiet(&candidate).map(|code| (code, n))
            });
            match hit {
                Some((code, n)) => {
                    if !found.contains(&code) {
                        found.push(code);
                    }
                    start += n;
                }
                None => start += 1,
            }
        }
        found
    }

    fn exact(&self, candidate: &str) -> Option<&str> {
        let trimmed = candidate.trim();
        if let Some((code, _)) = self.names.get_key_value(trimmed.to_uppercase().as_str()) {
            return Some(code.as_str());
        }

        let key = self.vocabulary.lookup_key(trimmed);
        if key.is_empty() {
            return None;
        }
        self.by_key.get(&key).map(String::as_str)
    }

    fn first_match(&self, candidate: &str) -> Option<&str> {
        let folded = fold_decorations(candidate.trim());
        self.patterns
            .iter()
            .find(|(_, pattern)| pattern.is_match(&folded))
            .map(|(code, _)| code.as_str())
    }

    fn unique_match(&self, candidate: &str) -> Result<Option<&str>> {
        let folded = fold_decorations(candidate.trim());
        let matches: Vec<&str> = self
            .patterns
            .iter()
            .filter(|(_, pattern)| pattern.is_match(&folded))
            .map(|(code, _)| code.as_str())
            .collect();

        match matches.as_slice() {
            [] => Ok(None),
            [code] => Ok(Some(*code)),
            _ => Err(OracleError::AmbiguousMatch {
                vocabulary: self.vocabulary,
                candidate: candidate.to_string(),
                codes: matches.iter().map(|c| c.to_string()).collect(),
            }),
        }
    }

    fn report_miss(&self, candidate: &str) {
        log::warn!(
            target: "cardscout::oracle",
            "Unable to resolve {} {:?}",
            self.vocabulary,
            candidate
        );
    }
}

fn is_incidental_word(word: &str) -> bool {
    word.chars().count() <= 2 && word.chars().any(char::is_lowercase)
}

/// Compile a whole-candidate, case-insensitive matcher.
///
/// The source must parse on its own first; otherwise a stray `)` could close
/// the anchoring group early and leave an alternative unanchored.
fn compile_anchored(source: &str) -> std::result::Result<Regex, regex::Error> {
    let build = |pattern: &str| {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .unicode(true)
            .build()
    };
    build(source)?;
    build(&format!("^(?:{source})$"))
}
