//! Type descriptors stored in a [`TypeCatalog`](crate::TypeCatalog).

/// A compact handle to a type registered in a [`TypeCatalog`](crate::TypeCatalog).
///
/// Keys are handed out in registration order and stay valid for the
/// lifetime of the catalog that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeKey(pub u32);

impl TypeKey {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TypeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TypeKey({})", self.0)
    }
}

/// Overrides how a type is labelled and where it is filed in the selector menu.
///
/// ```
/// use polymorph_catalog::MenuOverride;
///
/// // Rename only; the folders still follow the namespace.
/// let renamed = MenuOverride::named("Big Sword");
/// assert!(renamed.folder.is_none());
///
/// // Move to the top level of the menu, keep the type name.
/// let top = MenuOverride::in_folder("", "");
/// assert_eq!(top.folder.as_deref(), Some(""));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuOverride {
    /// Display name. Empty means "use the type's own name".
    pub name: String,
    /// Folder path. `None` keeps the namespace folders, `Some("")` places the
    /// item at the top level, anything else is split on the folder separators.
    pub folder: Option<String>,
}

impl MenuOverride {
    /// Override the display name only.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            folder: None,
        }
    }

    /// Override both the display name and the folder path.
    pub fn in_folder(name: impl Into<String>, folder: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            folder: Some(folder.into()),
        }
    }

    /// Returns true if the folder path was set explicitly.
    pub fn is_folder_set(&self) -> bool {
        self.folder.is_some()
    }
}

/// Reflection data for a single type.
///
/// Built with a small builder API:
///
/// ```
/// use polymorph_catalog::TypeInfo;
///
/// let info = TypeInfo::new("Game.Weapons.Sword")
///     .with_base("Game.IWeapon")
///     .with_default_constructor();
/// assert_eq!(info.name, "Sword");
/// assert_eq!(info.namespace, "Game.Weapons");
/// assert_eq!(info.full_name(), "Game.Weapons.Sword");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeInfo {
    /// Simple type name (e.g. `"Sword"`).
    pub name: String,
    /// Dotted namespace, empty for the global namespace.
    pub namespace: String,
    /// Full names of direct supertypes and implemented interfaces.
    pub bases: Vec<String>,
    /// Abstract classes and interfaces are never offered as choices.
    pub is_abstract: bool,
    /// Open generic templates (`Foo<T>`) are never offered as choices.
    pub is_generic_definition: bool,
    /// Value types can always be created without an explicit constructor.
    pub is_value_type: bool,
    /// Whether the type can be created with no arguments.
    pub has_default_constructor: bool,
    /// Optional display name / folder override.
    pub menu_override: Option<MenuOverride>,
}

impl TypeInfo {
    /// Create a descriptor from a full dotted name. The part after the last
    /// `.` becomes the type name, everything before it the namespace.
    pub fn new(full_name: &str) -> Self {
        let (namespace, name) = match full_name.rfind('.') {
            Some(pos) => (&full_name[..pos], &full_name[pos + 1..]),
            None => ("", full_name),
        };
        Self {
            name: name.to_string(),
            namespace: namespace.to_string(),
            ..Self::default()
        }
    }

    /// Full dotted name used as the catalog lookup key.
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Replace the namespace.
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Add a direct supertype by full name.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.bases.push(base.into());
        self
    }

    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn generic_definition(mut self) -> Self {
        self.is_generic_definition = true;
        self
    }

    pub fn value_type(mut self) -> Self {
        self.is_value_type = true;
        self
    }

    pub fn with_default_constructor(mut self) -> Self {
        self.has_default_constructor = true;
        self
    }

    /// Attach a menu override.
    pub fn with_override(mut self, menu_override: MenuOverride) -> Self {
        self.menu_override = Some(menu_override);
        self
    }

    /// Name shown in menus and labels: the override name when non-empty,
    /// otherwise the type name.
    pub fn display_name(&self) -> &str {
        match &self.menu_override {
            Some(o) if !o.name.is_empty() => &o.name,
            _ => &self.name,
        }
    }

    /// Returns true if selecting this type can produce an instance.
    pub fn is_constructible(&self) -> bool {
        self.is_value_type || self.has_default_constructor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_splits_namespace() {
        let info = TypeInfo::new("System.Collections.Generic.List");
        assert_eq!(info.namespace, "System.Collections.Generic");
        assert_eq!(info.name, "List");
    }

    #[test]
    fn new_global_namespace() {
        let info = TypeInfo::new("Thing");
        assert_eq!(info.namespace, "");
        assert_eq!(info.full_name(), "Thing");
    }

    #[test]
    fn display_name_prefers_override() {
        let info = TypeInfo::new("A.Thing").with_override(MenuOverride::named("Nice Thing"));
        assert_eq!(info.display_name(), "Nice Thing");
    }

    #[test]
    fn empty_override_name_falls_back() {
        let info = TypeInfo::new("A.Thing").with_override(MenuOverride::in_folder("", "Misc"));
        assert_eq!(info.display_name(), "Thing");
    }

    #[test]
    fn constructible_flags() {
        assert!(!TypeInfo::new("A").is_constructible());
        assert!(TypeInfo::new("A").value_type().is_constructible());
        assert!(TypeInfo::new("A").with_default_constructor().is_constructible());
    }
}
