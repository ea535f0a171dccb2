use std::path::PathBuf;

use polymorph_catalog::CatalogError;
use thiserror::Error;

/// Errors produced while configuring or querying a type selector.
#[derive(Error, Debug)]
pub enum SelectorError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse selector config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("invalid selector config: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
