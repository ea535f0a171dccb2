//! [`TypeSelector`]: the menu for one polymorphic field type.

use std::sync::{Arc, OnceLock};

use polymorph_catalog::{CatalogError, TypeCatalog, TypeKey};

use crate::menu::{Menu, MenuEntryKind, MenuId};
use crate::query::candidates;
use crate::tree::TypeTree;
use crate::{SelectorConfig, SelectorError};

/// Outcome of picking a menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Clear the field.
    Null,
    /// Replace the field with a new instance of this type.
    Type(TypeKey),
}

/// Type selection menu for fields declared as `base`.
///
/// The menu is compiled the first time it is needed and then reused, so
/// creating selectors is cheap and opening one repeatedly does not rebuild it.
pub struct TypeSelector {
    catalog: Arc<TypeCatalog>,
    base: TypeKey,
    config: SelectorConfig,
    menu: OnceLock<Menu>,
}

impl TypeSelector {
    /// Create a selector for `base`, which must belong to `catalog`.
    ///
    /// Fails if `config` does not pass [`SelectorConfig::validate`].
    pub fn new(
        catalog: Arc<TypeCatalog>,
        base: TypeKey,
        config: SelectorConfig,
    ) -> Result<Self, SelectorError> {
        config.validate()?;
        if catalog.info(base).is_none() {
            return Err(CatalogError::InvalidKey(base).into());
        }
        Ok(Self {
            catalog,
            base,
            config,
            menu: OnceLock::new(),
        })
    }

    /// Create a selector for the type registered under `base_name`.
    pub fn for_type(
        catalog: Arc<TypeCatalog>,
        base_name: &str,
        config: SelectorConfig,
    ) -> Result<Self, SelectorError> {
        let base = catalog.require(base_name)?;
        Self::new(catalog, base, config)
    }

    pub fn base(&self) -> TypeKey {
        self.base
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Types offered by this selector, sorted by full name.
    pub fn candidates(&self) -> Vec<TypeKey> {
        candidates(&self.catalog, self.base, &self.config)
    }

    /// The compiled menu, built on first access.
    pub fn menu(&self) -> &Menu {
        self.menu.get_or_init(|| {
            let candidates = self.candidates();
            let tree = TypeTree::build(&self.catalog, &candidates, &self.config);
            Menu::compile(&tree, &self.catalog, &self.config)
        })
    }

    /// Returns true once [`menu`](Self::menu) has been built.
    pub fn is_compiled(&self) -> bool {
        self.menu.get().is_some()
    }

    /// Resolve a picked entry.
    ///
    /// Folders, disabled items and unknown ids select nothing.
    pub fn select(&self, id: MenuId) -> Option<Selection> {
        let entry = self.menu().entry(id)?;
        let MenuEntryKind::Item { target, enabled } = entry.kind else {
            return None;
        };
        if !enabled {
            log::debug!("Ignoring disabled entry \"{}\"", entry.label);
            return None;
        }
        Some(match target {
            Some(key) => Selection::Type(key),
            None => Selection::Null,
        })
    }

    /// Resolve an entry by its label path, e.g. `["Game", "Fx", "Spark"]`.
    pub fn select_path(&self, path: &[&str]) -> Option<Selection> {
        self.select(self.menu().find_path(path)?)
    }

    /// Search type items; see [`Menu::search`].
    pub fn search(&self, query: &str) -> Vec<MenuId> {
        self.menu().search(query)
    }

    /// Button label for the value a field currently holds.
    pub fn label_for(&self, current: Option<TypeKey>) -> &str {
        self.catalog.display_name(current, &self.config.null_label)
    }

    /// Returns true if `current` may stay in a field of this selector's type.
    ///
    /// An empty field is always accepted.
    pub fn accepts(&self, current: Option<TypeKey>) -> bool {
        current.is_none_or(|ty| self.catalog.is_assignable(self.base, ty))
    }
}

#[cfg(test)]
mod tests {
    use polymorph_catalog::TypeInfo;

    use super::*;

    fn catalog() -> Arc<TypeCatalog> {
        let mut catalog = TypeCatalog::new();
        for info in [
            TypeInfo::new("Game.IEffect").abstract_type(),
            TypeInfo::new("Game.Fx.Spark")
                .with_base("Game.IEffect")
                .with_default_constructor(),
            TypeInfo::new("Game.Fx.Smoke").with_base("Game.IEffect"),
            TypeInfo::new("Game.Other"),
        ] {
            catalog.register_info(info).unwrap();
        }
        Arc::new(catalog)
    }

    fn selector() -> TypeSelector {
        TypeSelector::for_type(catalog(), "Game.IEffect", SelectorConfig::default()).unwrap()
    }

    #[test]
    fn menu_is_lazy() {
        let selector = selector();
        assert!(!selector.is_compiled());
        let first = selector.menu() as *const Menu;
        assert!(selector.is_compiled());
        assert_eq!(first, selector.menu() as *const Menu);
    }

    #[test]
    fn unknown_base() {
        let result = TypeSelector::for_type(catalog(), "Game.Missing", SelectorConfig::default());
        assert!(matches!(
            result,
            Err(SelectorError::Catalog(CatalogError::UnknownType(_)))
        ));
        let result = TypeSelector::new(catalog(), TypeKey(77), SelectorConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn invalid_config_rejected() {
        let config = SelectorConfig::default().with_max_nodes(0);
        let result = TypeSelector::for_type(catalog(), "Game.IEffect", config);
        assert!(matches!(result, Err(SelectorError::InvalidConfig(_))));

        let config = SelectorConfig {
            null_label: String::new(),
            ..SelectorConfig::default()
        };
        let base = catalog().key_of("Game.IEffect").unwrap();
        assert!(TypeSelector::new(catalog(), base, config).is_err());
    }

    #[test]
    fn select_enabled_item() {
        let selector = selector();
        let spark = selector.catalog().key_of("Game.Fx.Spark").unwrap();
        assert_eq!(
            selector.select_path(&["Game", "Fx", "Spark"]),
            Some(Selection::Type(spark))
        );
    }

    #[test]
    fn disabled_and_folders_select_nothing() {
        let selector = selector();
        assert_eq!(selector.select_path(&["Game", "Fx", "Smoke"]), None);
        assert_eq!(selector.select_path(&["Game"]), None);
        assert_eq!(selector.select(selector.menu().root()), None);
        assert_eq!(selector.select(MenuId(999)), None);
    }

    #[test]
    fn null_item_clears() {
        let selector = selector();
        let null = selector.menu().null_item();
        assert_eq!(selector.select(null), Some(Selection::Null));
    }

    #[test]
    fn labels() {
        let selector = selector();
        let spark = selector.catalog().key_of("Game.Fx.Spark");
        assert_eq!(selector.label_for(None), "<null>");
        assert_eq!(selector.label_for(spark), "Spark");
    }

    #[test]
    fn accepts_only_assignable() {
        let selector = selector();
        let catalog = selector.catalog();
        assert!(selector.accepts(None));
        assert!(selector.accepts(catalog.key_of("Game.Fx.Smoke")));
        assert!(!selector.accepts(catalog.key_of("Game.Other")));
    }
}
