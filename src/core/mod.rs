
pub mod logging;

// Text normalization and vocabulary resolution
pub mod names;
pub mod oracle;

// Static reference data
pub mod reference;
pub mod catalog;

// Records and correction
pub mod record;
pub mod fixer;

// Storefront fan-out / fan-in
pub mod aggregator;
