//! Intermediate folder tree built from a flat candidate list.
//!
//! Each candidate is filed under a folder path, taken from its
//! [`MenuOverride`](polymorph_catalog::MenuOverride) when present and from its
//! namespace otherwise. Folders are created on first use, so candidates that
//! share a path prefix share the folders.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use polymorph_catalog::{TypeCatalog, TypeInfo, TypeKey};

use crate::SelectorConfig;

/// A folder or item in a [`TypeTree`].
///
/// A node with children is a folder; a node without children is an item.
#[derive(Debug, Clone, Default)]
pub struct TreeNode {
    name: String,
    children: BTreeMap<String, TreeNode>,
    target: Option<TypeKey>,
}

impl TreeNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type filed at this node, if any.
    pub fn target(&self) -> Option<TypeKey> {
        self.target
    }

    pub fn is_folder(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns the child named `name`, creating it if it doesn't exist.
    pub fn get_or_add_child(&mut self, name: &str) -> &mut TreeNode {
        self.children
            .entry(name.to_string())
            .or_insert_with(|| TreeNode::new(name))
    }

    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.get(name)
    }

    /// Children without children of their own, in [menu order](menu_order).
    pub fn items(&self) -> impl Iterator<Item = &TreeNode> + '_ {
        self.sorted_children().into_iter().filter(|node| !node.is_folder())
    }

    /// Children that have children, in [menu order](menu_order).
    pub fn folders(&self) -> impl Iterator<Item = &TreeNode> + '_ {
        self.sorted_children().into_iter().filter(|node| node.is_folder())
    }

    fn sorted_children(&self) -> Vec<&TreeNode> {
        let mut children: Vec<_> = self.children.values().collect();
        children.sort_by(|a, b| menu_order(&a.name, &b.name));
        children
    }
}

/// Order of labels within a menu folder: case-insensitive, with an ordinal
/// tie-break so that labels differing only in case keep a stable order.
pub fn menu_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Folder tree of selectable types, the input to
/// [`Menu::compile`](crate::Menu::compile).
#[derive(Debug, Clone, Default)]
pub struct TypeTree {
    root: TreeNode,
    len: usize,
}

impl TypeTree {
    /// File every candidate into a fresh tree.
    ///
    /// Candidates are inserted in the given order. If two candidates end up
    /// with the same folder path and name, the later one replaces the
    /// earlier one.
    pub fn build(catalog: &TypeCatalog, candidates: &[TypeKey], config: &SelectorConfig) -> Self {
        let mut tree = Self::default();

        for &key in candidates {
            let Some(info) = catalog.info(key) else {
                log::warn!("Skipping {key}: not registered in this catalog");
                continue;
            };
            let (folders, name) = menu_path(info, &config.folder_separators);
            tree.insert(&folders, &name, key, catalog);
        }

        log::debug!("Built type tree with {} entries", tree.len);
        tree
    }

    fn insert(&mut self, folders: &[String], name: &str, key: TypeKey, catalog: &TypeCatalog) {
        let mut node = &mut self.root;
        for folder in folders {
            node = node.get_or_add_child(folder);
        }

        let leaf = node.get_or_add_child(name);
        match leaf.target.replace(key) {
            Some(previous) => log::warn!(
                "Menu entry {}/{name} is claimed by both {} and {}; keeping the latter",
                folders.join("/"),
                catalog.full_name(previous).unwrap_or("?"),
                catalog.full_name(key).unwrap_or("?"),
            ),
            None => self.len += 1,
        }
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Number of distinct menu entries holding a type.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Follow a path of segment names from the root.
    pub fn find(&self, path: &[&str]) -> Option<&TreeNode> {
        path.iter()
            .try_fold(&self.root, |node, segment| node.child(segment))
    }
}

/// Folder segments and item name for a type.
///
/// - With an override, the name is the override name unless it is empty.
///   The folders come from the override folder when it was set (an empty
///   folder means top level), split on any of `separators`; otherwise they
///   come from the namespace.
/// - Without an override, the type name and namespace are used.
///
/// Namespaces are always split on `.`. Empty segments are dropped.
pub fn menu_path(info: &TypeInfo, separators: &[char]) -> (Vec<String>, String) {
    let namespace_folders = || split_segments(&info.namespace, &['.']);

    match &info.menu_override {
        Some(menu_override) => {
            let folders = match &menu_override.folder {
                Some(folder) => split_segments(folder, separators),
                None => namespace_folders(),
            };
            (folders, info.display_name().to_string())
        }
        None => (namespace_folders(), info.name.clone()),
    }
}

fn split_segments(path: &str, separators: &[char]) -> Vec<String> {
    path.split(separators)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
