//! Startup loading of all static reference data.
//!
//! A [`Catalog`] owns the three oracles, the reference database and the alias
//! table behind `Arc`s. It is built once and hands out [`CardFixer`] handles.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::core::fixer::CardFixer;
use crate::core::oracle::{Oracle, OracleError, Oracles, Vocabulary};
use crate::core::reference::{AliasTable, ReferenceDatabase, ReferenceError};

pub const REFERENCE_FILE: &str = "reference.json";
pub const ALIASES_FILE: &str = "aliases.json";

const BUNDLED_CONDITIONS: &str = include_str!("../../resources/conditions.json");
const BUNDLED_SETS: &str = include_str!("../../resources/sets.json");
const BUNDLED_LANGUAGES: &str = include_str!("../../resources/languages.json");
const BUNDLED_REFERENCE: &str = include_str!("../../resources/reference.json");
const BUNDLED_ALIASES: &str = include_str!("../../resources/aliases.json");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Reference(#[from] ReferenceError),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Clone)]
pub struct Catalog {
    oracles: Arc<Oracles>,
    reference: Arc<ReferenceDatabase>,
    aliases: Arc<AliasTable>,
}

impl Catalog {
    /// Build from resource texts.
    pub fn from_json(
        conditions: &str,
        sets: &str,
        languages: &str,
        reference: &str,
        aliases: Option<&str>,
    ) -> Result<Self> {
        let oracles = Oracles::from_json(conditions, sets, languages)?;
        let reference = ReferenceDatabase::from_json(reference, &oracles)?;
        let aliases = match aliases {
            Some(json) => AliasTable::from_json(json)?,
            None => AliasTable::new(),
        };

        Ok(Self {
            oracles: Arc::new(oracles),
            reference: Arc::new(reference),
            aliases: Arc::new(aliases),
        })
    }

    /// Reference data compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_json(
            BUNDLED_CONDITIONS,
            BUNDLED_SETS,
            BUNDLED_LANGUAGES,
            BUNDLED_REFERENCE,
            Some(BUNDLED_ALIASES),
        )
    }

    /// Load every resource from a directory. The alias table is optional.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        log::info!("Loading reference data from {}", dir.display());

        let conditions = read(&dir.join(Vocabulary::Condition.resource_file()))?;
        let sets = read(&dir.join(Vocabulary::Set.resource_file()))?;
        let languages = read(&dir.join(Vocabulary::Language.resource_file()))?;
        let reference = read(&dir.join(REFERENCE_FILE))?;

        let aliases_path = dir.join(ALIASES_FILE);
        let aliases = if aliases_path.exists() {
            Some(read(&aliases_path)?)
        } else {
            log::debug!("No alias table at {}", aliases_path.display());
            None
        };

        Self::from_json(&conditions, &sets, &languages, &reference, aliases.as_deref())
    }

    pub fn oracles(&self) -> &Oracles {
        &self.oracles
    }

    pub fn oracle(&self, vocabulary: Vocabulary) -> &Oracle {
        self.oracles.get(vocabulary)
    }

    pub fn reference(&self) -> &ReferenceDatabase {
        &self.reference
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn fixer(&self) -> CardFixer {
        CardFixer::new(
            Arc::clone(&self.oracles),
            Arc::clone(&self.reference),
            Arc::clone(&self.aliases),
        )
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}
