use thiserror::Error;

use crate::TypeKey;

/// Errors returned by [`TypeCatalog`](crate::TypeCatalog) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A type with the same full name is already registered.
    #[error("type '{0}' is already registered")]
    DuplicateType(String),
    /// No type is registered under this full name.
    #[error("unknown type '{0}'")]
    UnknownType(String),
    /// The key was not issued by this catalog.
    #[error("invalid type key {0}")]
    InvalidKey(TypeKey),
    /// The type has no stored constructor.
    #[error("type '{0}' cannot be constructed without arguments")]
    NotConstructible(String),
}
