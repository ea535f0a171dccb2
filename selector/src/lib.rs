//! # Polymorph Selector
//!
//! Turns the types of a [`TypeCatalog`](polymorph_catalog::TypeCatalog) into a
//! folder-organized dropdown for a polymorphic field.
//!
//! The pipeline has three stages:
//!
//! 1. [`candidates`]: every concrete type assignable to the field's base type.
//! 2. [`TypeTree::build`]: files candidates into folders by namespace or by
//!    their [`MenuOverride`](polymorph_catalog::MenuOverride).
//! 3. [`Menu::compile`]: flattens the tree into an arena with a null entry,
//!    separators, alphabetical ordering and disabled non-constructible items.
//!
//! [`TypeSelector`] runs the pipeline lazily and resolves picks into a
//! [`Selection`].
//!
//! ```
//! use std::sync::Arc;
//!
//! use polymorph_catalog::{TypeCatalog, TypeInfo};
//! use polymorph_selector::{Selection, SelectorConfig, TypeSelector};
//!
//! let mut catalog = TypeCatalog::new();
//! catalog.register_info(TypeInfo::new("Game.IEffect").abstract_type()).unwrap();
//! let spark = catalog
//!     .register_info(
//!         TypeInfo::new("Game.Fx.Spark")
//!             .with_base("Game.IEffect")
//!             .with_default_constructor(),
//!     )
//!     .unwrap();
//!
//! let selector =
//!     TypeSelector::for_type(Arc::new(catalog), "Game.IEffect", SelectorConfig::default()).unwrap();
//! assert_eq!(
//!     selector.select_path(&["Game", "Fx", "Spark"]),
//!     Some(Selection::Type(spark))
//! );
//! ```

mod config;
mod error;
pub mod menu;
pub mod query;
mod selector;
pub mod tree;

pub use config::{DEFAULT_MAX_NODES, DEFAULT_NULL_LABEL, DEFAULT_TITLE, SelectorConfig};
pub use error::SelectorError;
pub use menu::{Menu, MenuEntry, MenuEntryKind, MenuId, MenuSlot};
pub use query::candidates;
pub use selector::{Selection, TypeSelector};
pub use tree::{TreeNode, TypeTree};
