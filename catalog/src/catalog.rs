//! The [`TypeCatalog`] registry.
//!
//! Stores a [`TypeInfo`] per registered type plus a reverse supertype index,
//! so that "every type deriving from X" can be answered without scanning the
//! whole catalog.

use std::any::Any;
use std::collections::{HashMap, HashSet, VecDeque};

use crate::{CatalogError, TypeInfo, TypeKey, Variant};

/// Type-erased default constructor for a registered type.
pub type Constructor = fn() -> Box<dyn Any + Send + Sync>;

#[derive(Debug)]
struct CatalogEntry {
    info: TypeInfo,
    /// Cached `info.full_name()`.
    full_name: String,
    /// Present only for types registered through [`TypeCatalog::register_default`].
    construct: Option<Constructor>,
}

/// Registry of types that may be offered by a type selector.
///
/// ```
/// use polymorph_catalog::{TypeCatalog, TypeInfo};
///
/// let mut catalog = TypeCatalog::new();
/// let weapon = catalog
///     .register_info(TypeInfo::new("Game.IWeapon").abstract_type())
///     .unwrap();
/// let sword = catalog
///     .register_info(TypeInfo::new("Game.Sword").with_base("Game.IWeapon"))
///     .unwrap();
///
/// assert_eq!(catalog.derived_from(weapon), vec![sword]);
/// assert!(catalog.is_assignable(weapon, sword));
/// ```
#[derive(Debug)]
pub struct TypeCatalog {
    entries: Vec<CatalogEntry>,
    lookup: HashMap<String, TypeKey>,
    /// Supertype full name → types listing it as a direct supertype.
    derived: HashMap<String, Vec<TypeKey>>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            lookup: HashMap::new(),
            derived: HashMap::new(),
        }
    }

    /// Register a type from its descriptor alone.
    ///
    /// The type is listed by selectors but [`instantiate`](Self::instantiate)
    /// will fail for it, because no constructor is known.
    pub fn register_info(&mut self, info: TypeInfo) -> Result<TypeKey, CatalogError> {
        self.insert(info, None)
    }

    /// Register a [`Variant`] that has no `Default` implementation.
    ///
    /// The type shows up in menus but cannot be picked unless its descriptor
    /// declares a value type.
    pub fn register<T: Variant>(&mut self) -> Result<TypeKey, CatalogError> {
        self.insert(T::type_info(), None)
    }

    /// Register a [`Variant`] that can be created with `T::default()`.
    pub fn register_default<T: Variant + Default>(&mut self) -> Result<TypeKey, CatalogError> {
        let construct: Constructor = || -> Box<dyn Any + Send + Sync> { Box::new(T::default()) };
        self.insert(T::type_info().with_default_constructor(), Some(construct))
    }

    fn insert(
        &mut self,
        info: TypeInfo,
        construct: Option<Constructor>,
    ) -> Result<TypeKey, CatalogError> {
        let full_name = info.full_name();
        if self.lookup.contains_key(&full_name) {
            return Err(CatalogError::DuplicateType(full_name));
        }

        let key = TypeKey(self.entries.len() as u32);
        for base in &info.bases {
            self.derived.entry(base.clone()).or_default().push(key);
        }
        log::debug!("Registered type {full_name} as {key}");

        self.lookup.insert(full_name.clone(), key);
        self.entries.push(CatalogEntry {
            info,
            full_name,
            construct,
        });
        Ok(key)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a type by its full dotted name.
    pub fn key_of(&self, full_name: &str) -> Option<TypeKey> {
        self.lookup.get(full_name).copied()
    }

    /// Like [`key_of`](Self::key_of), but reports unknown names as an error.
    pub fn require(&self, full_name: &str) -> Result<TypeKey, CatalogError> {
        self.key_of(full_name)
            .ok_or_else(|| CatalogError::UnknownType(full_name.to_string()))
    }

    /// Descriptor for a key, or `None` if the key is not from this catalog.
    pub fn info(&self, key: TypeKey) -> Option<&TypeInfo> {
        self.entries.get(key.index()).map(|e| &e.info)
    }

    /// Full dotted name for a key.
    pub fn full_name(&self, key: TypeKey) -> Option<&str> {
        self.entries.get(key.index()).map(|e| e.full_name.as_str())
    }

    /// Iterate over all registered types in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeKey, &TypeInfo)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (TypeKey(i as u32), &e.info))
    }

    /// All types that transitively list `base` as a supertype, `base` excluded.
    ///
    /// Results are in breadth-first discovery order. Cycles in the supertype
    /// graph are tolerated.
    pub fn derived_from(&self, base: TypeKey) -> Vec<TypeKey> {
        let Some(entry) = self.entries.get(base.index()) else {
            return Vec::new();
        };

        let mut visited = HashSet::from([base]);
        let mut result = Vec::new();
        let mut queue = VecDeque::from([entry.full_name.as_str()]);

        while let Some(name) = queue.pop_front() {
            for &child in self.derived.get(name).into_iter().flatten() {
                if visited.insert(child) {
                    result.push(child);
                    queue.push_back(&self.entries[child.index()].full_name);
                }
            }
        }

        result
    }

    /// Returns true if a value of type `ty` can be stored in a field of type `base`.
    pub fn is_assignable(&self, base: TypeKey, ty: TypeKey) -> bool {
        if base == ty {
            return self.info(base).is_some();
        }
        let Some(base_name) = self.full_name(base) else {
            return false;
        };
        self.any_supertype(ty, |name| name == base_name)
    }

    /// Returns true if `ty` is, or transitively derives from, one of `roots`.
    pub fn derives_from_any<S: AsRef<str>>(&self, ty: TypeKey, roots: &[S]) -> bool {
        let is_root = |name: &str| roots.iter().any(|r| r.as_ref() == name);
        match self.full_name(ty) {
            Some(name) if is_root(name) => true,
            Some(_) => self.any_supertype(ty, is_root),
            None => false,
        }
    }

    /// Walk the supertypes of `ty` breadth-first until `pred` matches.
    ///
    /// Supertypes that are not registered are still tested by name, they just
    /// have no supertypes of their own.
    fn any_supertype(&self, ty: TypeKey, mut pred: impl FnMut(&str) -> bool) -> bool {
        let Some(entry) = self.entries.get(ty.index()) else {
            return false;
        };

        let mut visited: HashSet<&str> = HashSet::from([entry.full_name.as_str()]);
        let mut queue: VecDeque<&str> = entry.info.bases.iter().map(String::as_str).collect();

        while let Some(name) = queue.pop_front() {
            if !visited.insert(name) {
                continue;
            }
            if pred(name) {
                return true;
            }
            if let Some(parent) = self.lookup.get(name) {
                queue.extend(
                    self.entries[parent.index()]
                        .info
                        .bases
                        .iter()
                        .map(String::as_str),
                );
            }
        }

        false
    }

    /// Label for the type currently held by a field.
    ///
    /// `None` (an empty field) and keys from another catalog map to `null_label`.
    pub fn display_name<'a>(&'a self, key: Option<TypeKey>, null_label: &'a str) -> &'a str {
        key.and_then(|k| self.info(k))
            .map_or(null_label, TypeInfo::display_name)
    }

    /// Returns true if selecting the type can produce an instance.
    pub fn is_constructible(&self, key: TypeKey) -> bool {
        self.info(key).is_some_and(TypeInfo::is_constructible)
    }

    /// Create a default instance of a type registered with
    /// [`register_default`](Self::register_default).
    pub fn instantiate(&self, key: TypeKey) -> Result<Box<dyn Any + Send + Sync>, CatalogError> {
        let entry = self
            .entries
            .get(key.index())
            .ok_or(CatalogError::InvalidKey(key))?;
        let construct = entry
            .construct
            .ok_or_else(|| CatalogError::NotConstructible(entry.full_name.clone()))?;
        log::debug!("Instantiating {}", entry.full_name);
        Ok(construct())
    }
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weapons() -> (TypeCatalog, TypeKey) {
        let mut catalog = TypeCatalog::new();
        let weapon = catalog
            .register_info(TypeInfo::new("Game.IWeapon").abstract_type())
            .unwrap();
        catalog
            .register_info(TypeInfo::new("Game.Melee").with_base("Game.IWeapon").abstract_type())
            .unwrap();
        catalog
            .register_info(
                TypeInfo::new("Game.Sword")
                    .with_base("Game.Melee")
                    .with_default_constructor(),
            )
            .unwrap();
        catalog
            .register_info(TypeInfo::new("Game.Bow").with_base("Game.IWeapon"))
            .unwrap();
        catalog.register_info(TypeInfo::new("Game.Shield")).unwrap();
        (catalog, weapon)
    }

    fn names(catalog: &TypeCatalog, keys: &[TypeKey]) -> Vec<String> {
        keys.iter()
            .map(|k| catalog.full_name(*k).unwrap().to_string())
            .collect()
    }

    #[test]
    fn register_and_lookup() {
        let (catalog, weapon) = weapons();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.key_of("Game.IWeapon"), Some(weapon));
        assert_eq!(catalog.info(weapon).unwrap().name, "IWeapon");
        assert!(catalog.key_of("Game.Axe").is_none());
    }

    #[test]
    fn catalog_is_debug() {
        let (catalog, _) = weapons();
        let dump = format!("{catalog:?}");
        assert!(dump.contains("Game.Bow"));
        assert!(dump.contains("Game.IWeapon"));
    }

    #[test]
    fn duplicate_rejected() {
        let (mut catalog, _) = weapons();
        let err = catalog.register_info(TypeInfo::new("Game.Bow")).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateType("Game.Bow".into()));
    }

    #[test]
    fn require_unknown() {
        let (catalog, _) = weapons();
        assert!(matches!(
            catalog.require("Nope"),
            Err(CatalogError::UnknownType(_))
        ));
    }

    #[test]
    fn derived_is_transitive() {
        let (catalog, weapon) = weapons();
        let derived = catalog.derived_from(weapon);
        assert_eq!(
            names(&catalog, &derived),
            vec!["Game.Melee", "Game.Bow", "Game.Sword"]
        );
    }

    #[test]
    fn derived_of_leaf_is_empty() {
        let (catalog, _) = weapons();
        let shield = catalog.key_of("Game.Shield").unwrap();
        assert!(catalog.derived_from(shield).is_empty());
    }

    #[test]
    fn derived_tolerates_cycles() {
        let mut catalog = TypeCatalog::new();
        let a = catalog
            .register_info(TypeInfo::new("A").with_base("B"))
            .unwrap();
        let b = catalog
            .register_info(TypeInfo::new("B").with_base("A"))
            .unwrap();
        assert_eq!(catalog.derived_from(a), vec![b]);
        assert_eq!(catalog.derived_from(b), vec![a]);
        assert!(catalog.is_assignable(a, b));
    }

    #[test]
    fn assignability() {
        let (catalog, weapon) = weapons();
        let sword = catalog.key_of("Game.Sword").unwrap();
        let shield = catalog.key_of("Game.Shield").unwrap();
        assert!(catalog.is_assignable(weapon, sword));
        assert!(catalog.is_assignable(weapon, weapon));
        assert!(!catalog.is_assignable(weapon, shield));
        assert!(!catalog.is_assignable(sword, weapon));
    }

    #[test]
    fn derives_from_unregistered_root() {
        let mut catalog = TypeCatalog::new();
        let asset = catalog
            .register_info(TypeInfo::new("Game.Prefab").with_base("Engine.Object"))
            .unwrap();
        assert!(catalog.derives_from_any(asset, &["Engine.Object"]));
        assert!(!catalog.derives_from_any(asset, &["Engine.Component"]));
    }

    #[test]
    fn root_itself_counts() {
        let (catalog, weapon) = weapons();
        assert!(catalog.derives_from_any(weapon, &["Game.IWeapon"]));
    }

    #[test]
    fn display_names() {
        let (catalog, weapon) = weapons();
        assert_eq!(catalog.display_name(None, "<null>"), "<null>");
        assert_eq!(catalog.display_name(Some(weapon), "<null>"), "IWeapon");
        assert_eq!(catalog.display_name(Some(TypeKey(99)), "<null>"), "<null>");
    }

    #[test]
    fn instantiate_without_constructor() {
        let (catalog, _) = weapons();
        let sword = catalog.key_of("Game.Sword").unwrap();
        assert!(catalog.is_constructible(sword));
        assert_eq!(
            catalog.instantiate(sword).unwrap_err(),
            CatalogError::NotConstructible("Game.Sword".into())
        );
        assert_eq!(
            catalog.instantiate(TypeKey(42)).unwrap_err(),
            CatalogError::InvalidKey(TypeKey(42))
        );
    }

    #[derive(Default, Debug, PartialEq)]
    struct Lantern {
        fuel: u32,
    }

    impl Variant for Lantern {
        fn type_info() -> TypeInfo {
            TypeInfo::new("Game.Items.Lantern")
        }
    }

    #[test]
    fn register_default_constructs() {
        let mut catalog = TypeCatalog::new();
        let key = catalog.register_default::<Lantern>().unwrap();
        assert!(catalog.info(key).unwrap().has_default_constructor);

        let value = catalog.instantiate(key).unwrap();
        assert_eq!(value.downcast_ref::<Lantern>(), Some(&Lantern { fuel: 0 }));
    }

    #[test]
    fn register_without_default_is_listed_only() {
        let mut catalog = TypeCatalog::new();
        let key = catalog.register::<Lantern>().unwrap();
        assert!(!catalog.is_constructible(key));
        assert!(catalog.instantiate(key).is_err());
    }
}
