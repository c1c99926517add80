//! Condition vocabulary specifics.
//!
//! The severity order is a fixed constant, never derived from the dictionary.
//! When free text mentions several conditions, the reported one is the first
//! present in this order.

use super::resolver::Oracle;

/// Condition codes from heavily played to near mint.
pub const SEVERITY_ORDER: [&str; 4] = ["HP", "MP", "SP", "NM"];

pub fn severity_order() -> [&'static str; 4] {
    SEVERITY_ORDER
}

/// First code of [`SEVERITY_ORDER`] present among `found`.
pub fn pick_reported(found: &[&str]) -> Option<&'static str> {
    SEVERITY_ORDER
        .iter()
        .find(|code| found.contains(code))
        .copied()
}

/// Detect the condition a free-text description mentions, if any.
pub fn detect_condition(oracle: &Oracle, text: &str) -> Option<&'static str> {
    pick_reported(&oracle.probe(text))
}
