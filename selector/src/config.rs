//! Selector configuration, loadable from TOML.
//!
//! ```toml
//! title = "Select Weapon"
//! null_label = "None"
//! max_nodes = 5000
//! folder_separators = [".", "/"]
//! include_base = true
//! opaque_roots = ["Engine.Object"]
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::SelectorError;

/// Menu title used when none is configured.
pub const DEFAULT_TITLE: &str = "Select Type";
/// Label of the entry that clears the field.
pub const DEFAULT_NULL_LABEL: &str = "<null>";
/// Upper bound on folders expanded while compiling one menu.
pub const DEFAULT_MAX_NODES: usize = 10_000;

/// Policy and presentation settings for a [`TypeSelector`](crate::TypeSelector).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectorConfig {
    /// Label of the menu root.
    pub title: String,
    /// Label of the item that clears the field.
    pub null_label: String,
    /// Maximum number of tree folders expanded during compilation.
    pub max_nodes: usize,
    /// Characters that split an override folder path into segments.
    pub folder_separators: Vec<char>,
    /// Offer the base type itself when it is concrete.
    pub include_base: bool,
    /// Types whose descendants (and themselves) are never offered.
    pub opaque_roots: Vec<String>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.into(),
            null_label: DEFAULT_NULL_LABEL.into(),
            max_nodes: DEFAULT_MAX_NODES,
            folder_separators: vec!['.', '/'],
            include_base: true,
            opaque_roots: Vec::new(),
        }
    }
}

impl SelectorConfig {
    /// Parse a config from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, SelectorError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, SelectorError> {
        let content = std::fs::read_to_string(path).map_err(|source| SelectorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded selector config from {}", path.display());
        Ok(config)
    }

    /// Set the menu title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Exclude a type and everything deriving from it.
    pub fn with_opaque_root(mut self, root: impl Into<String>) -> Self {
        self.opaque_roots.push(root.into());
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Check values that parse but cannot be used.
    pub fn validate(&self) -> Result<(), SelectorError> {
        if self.max_nodes == 0 {
            return Err(SelectorError::InvalidConfig(
                "max_nodes must be at least 1".into(),
            ));
        }
        if self.null_label.is_empty() {
            return Err(SelectorError::InvalidConfig(
                "null_label must not be empty".into(),
            ));
        }
        Ok(())
    }
}
