//! Reference Database
//!
//! Static knowledge about which sets print which cards: per-set numbering,
//! print languages and foil policy, plus the card-name alias table. Built once
//! through the oracles and shared read-only afterwards.

pub mod aliases;
pub mod database;
pub mod error;
pub mod foil;

pub use aliases::AliasTable;
pub use database::{ReferenceDatabase, SetInfo};
pub use error::{ReferenceError, Result};
pub use foil::FoilPolicy;
