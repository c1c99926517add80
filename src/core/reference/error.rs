use thiserror::Error;

use crate::core::oracle::OracleError;

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Reference data is ambiguous: {0}")]
    Oracle(#[from] OracleError),

    #[error("Failed to parse reference resource: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Sets {first:?} and {second:?} both resolve to {code}")]
    DuplicateSet {
        code: String,
        first: String,
        second: String,
    },
}

pub type Result<T> = std::result::Result<T, ReferenceError>;
