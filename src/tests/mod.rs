//! In-crate test suites
//!
//! - `common`: shared fixtures and a thread-local log capture
//! - `property`: proptest invariants of names, oracles and the fixer
//! - `unit`: scenario tests over the bundled reference data

mod unit;
