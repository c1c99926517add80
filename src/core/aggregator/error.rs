use std::path::PathBuf;

use thiserror::Error;

/// Failure of one storefront adapter. Never aborts the other storefronts.
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to read listings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed listing data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Storefront returned {status} for {url}")]
    Status { status: u16, url: String },
}

pub type Result<T> = std::result::Result<T, AdapterError>;
