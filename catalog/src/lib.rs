//! # Polymorph Type Catalog
//!
//! Reflection data for the types that may fill a polymorphic field.
//!
//! - [`TypeInfo`] describes one type: name, namespace, direct supertypes,
//!   abstract / generic / constructor flags and an optional [`MenuOverride`].
//! - [`TypeCatalog`] stores descriptors by [`TypeKey`] and answers the
//!   hierarchy questions a selector needs ([`derived_from`](TypeCatalog::derived_from),
//!   [`is_assignable`](TypeCatalog::is_assignable)).
//! - [`Variant`] is implemented by Rust types that can be registered directly,
//!   usually through `#[derive(Variant)]`.
//!
//! ```ignore
//! use polymorph_catalog::{TypeCatalog, Variant};
//!
//! #[derive(Default, Variant)]
//! #[variant(namespace = "game", abstract_type)]
//! struct Weapon;
//!
//! #[derive(Default, Variant)]
//! #[variant(namespace = "game.melee", base = "game.Weapon")]
//! struct Sword;
//!
//! let mut catalog = TypeCatalog::new();
//! let weapon = catalog.register::<Weapon>()?;
//! catalog.register_default::<Sword>()?;
//! assert_eq!(catalog.derived_from(weapon).len(), 1);
//! ```

mod catalog;
mod error;
mod info;
mod variant;

pub use catalog::{Constructor, TypeCatalog};
pub use error::CatalogError;
pub use info::{MenuOverride, TypeInfo, TypeKey};
pub use variant::Variant;

/// Derive macro for [`Variant`].
pub use polymorph_macro::Variant;
