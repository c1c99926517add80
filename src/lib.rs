/// Cardscout - trading card listing aggregation
///
/// Core library resolving free-text card conditions, sets and languages to
/// canonical codes, normalizing card names, and correcting storefront
/// listings against a static reference database.

pub mod config;
pub mod core;

#[cfg(test)]
mod tests;

pub use crate::core::catalog::Catalog;
pub use crate::core::fixer::{CardFixer, Correction, FixedRecord};
pub use crate::core::record::{CardName, CardRecord, Count, SourceRef};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
