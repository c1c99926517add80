//! Test Fixtures
//!
//! The bundled catalog is built once per test binary and shared.

use once_cell::sync::Lazy;

use crate::core::catalog::Catalog;
use crate::core::fixer::CardFixer;
use crate::core::oracle::Oracles;
use crate::core::record::CardRecord;

static CATALOG: Lazy<Catalog> =
    Lazy::new(|| Catalog::bundled().expect("bundled reference data must load"));

pub fn test_oracles() -> &'static Oracles {
    CATALOG.oracles()
}

/// Fixer over the bundled catalog.
pub fn test_fixer() -> CardFixer {
    CATALOG.fixer()
}

/// A raw listing as a storefront might report it.
pub fn raw_listing(caption: &str) -> CardRecord {
    CardRecord::new(caption)
}
