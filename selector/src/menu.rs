//! Flattened dropdown menu compiled from a [`TypeTree`].
//!
//! The menu is an arena of [`MenuEntry`] values addressed by [`MenuId`].
//! Folders list their children as [`MenuSlot`]s, which are either entries
//! or separators. The layout is:
//!
//! ```text
//! Select Type
//!   <null>
//!   ---
//!   <root folders, ascending>
//!   ---                      (only when the root has folders and items)
//!   <root items, ascending>
//! ```
//!
//! and every folder below the root repeats the folders / separator / items
//! pattern.

use std::fmt;

use polymorph_catalog::{TypeCatalog, TypeKey};

use crate::SelectorConfig;
use crate::tree::{TreeNode, TypeTree};

/// Index of an entry in a [`Menu`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MenuId(pub u32);

impl MenuId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// One position in a folder's child list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSlot {
    Entry(MenuId),
    Separator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntryKind {
    Folder {
        children: Vec<MenuSlot>,
    },
    Item {
        /// `None` for the entry that clears the field.
        target: Option<TypeKey>,
        /// Disabled items are shown but cannot be selected.
        enabled: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    /// `None` only for the root.
    pub parent: Option<MenuId>,
    pub kind: MenuEntryKind,
}

impl MenuEntry {
    fn folder(label: &str, parent: Option<MenuId>) -> Self {
        Self {
            label: label.to_string(),
            parent,
            kind: MenuEntryKind::Folder {
                children: Vec::new(),
            },
        }
    }

    fn item(label: &str, parent: MenuId, target: Option<TypeKey>, enabled: bool) -> Self {
        Self {
            label: label.to_string(),
            parent: Some(parent),
            kind: MenuEntryKind::Item { target, enabled },
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, MenuEntryKind::Folder { .. })
    }

    /// Folders are always enabled.
    pub fn is_enabled(&self) -> bool {
        match self.kind {
            MenuEntryKind::Folder { .. } => true,
            MenuEntryKind::Item { enabled, .. } => enabled,
        }
    }

    /// The type an item selects. `None` for folders and the null item.
    pub fn target(&self) -> Option<TypeKey> {
        match self.kind {
            MenuEntryKind::Item { target, .. } => target,
            MenuEntryKind::Folder { .. } => None,
        }
    }
}

/// A compiled type selection menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    entries: Vec<MenuEntry>,
    truncated: bool,
}

impl Menu {
    const ROOT: MenuId = MenuId(0);
    const NULL_ITEM: MenuId = MenuId(1);

    /// Compile a tree into a menu.
    ///
    /// Folders are expanded depth-first from an explicit stack. At most
    /// `config.max_nodes` tree folders (the root included) are expanded; any
    /// folder left on the stack after that stays empty and the menu is
    /// flagged as [truncated](Self::is_truncated).
    pub fn compile(tree: &TypeTree, catalog: &TypeCatalog, config: &SelectorConfig) -> Self {
        let mut menu = Self {
            entries: vec![MenuEntry::folder(&config.title, None)],
            truncated: false,
        };

        menu.push(MenuEntry::item(&config.null_label, Self::ROOT, None, true));
        menu.push_separator(Self::ROOT);

        let mut stack: Vec<(&TreeNode, MenuId)> = vec![(tree.root(), Self::ROOT)];
        let mut expanded = 0;

        while expanded < config.max_nodes {
            let Some((node, parent)) = stack.pop() else {
                break;
            };
            expanded += 1;

            if let Some(key) = node.target()
                && node.is_folder()
            {
                log::warn!(
                    "{} is hidden behind the folder \"{}\"",
                    catalog.full_name(key).unwrap_or("?"),
                    node.name()
                );
            }

            let mut has_folders = false;
            for folder in node.folders() {
                let id = menu.push(MenuEntry::folder(folder.name(), Some(parent)));
                stack.push((folder, id));
                has_folders = true;
            }

            let mut items = node.items().peekable();
            if has_folders && items.peek().is_some() {
                menu.push_separator(parent);
            }

            for item in items {
                let target = item.target();
                let enabled = target.is_some_and(|key| catalog.is_constructible(key));
                menu.push(MenuEntry::item(item.name(), parent, target, enabled));
            }
        }

        if !stack.is_empty() {
            log::warn!(
                "Menu \"{}\" hit the limit of {} folders; {} folders left empty",
                config.title,
                config.max_nodes,
                stack.len()
            );
            menu.truncated = true;
        }

        log::debug!(
            "Compiled menu \"{}\" with {} entries",
            config.title,
            menu.entries.len()
        );
        menu
    }

    /// Append an entry and link it into its parent folder.
    fn push(&mut self, entry: MenuEntry) -> MenuId {
        let id = MenuId(self.entries.len() as u32);
        if let Some(parent) = entry.parent {
            self.slots_mut(parent).push(MenuSlot::Entry(id));
        }
        self.entries.push(entry);
        id
    }

    fn push_separator(&mut self, folder: MenuId) {
        self.slots_mut(folder).push(MenuSlot::Separator);
    }

    fn slots_mut(&mut self, folder: MenuId) -> &mut Vec<MenuSlot> {
        match &mut self.entries[folder.index()].kind {
            MenuEntryKind::Folder { children } => children,
            MenuEntryKind::Item { .. } => unreachable!("menu items have no children"),
        }
    }

    pub fn root(&self) -> MenuId {
        Self::ROOT
    }

    /// The entry that clears the field.
    pub fn null_item(&self) -> MenuId {
        Self::NULL_ITEM
    }

    pub fn entry(&self, id: MenuId) -> Option<&MenuEntry> {
        self.entries.get(id.index())
    }

    /// Child slots of a folder. Empty for items and unknown ids.
    pub fn children(&self, id: MenuId) -> &[MenuSlot] {
        match self.entry(id).map(|e| &e.kind) {
            Some(MenuEntryKind::Folder { children }) => children.as_slice(),
            _ => &[],
        }
    }

    /// Number of entries, the root and the null item included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if the folder budget ran out during compilation.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Iterate over all entries with their ids, in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (MenuId, &MenuEntry)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (MenuId(i as u32), e))
    }

    /// Items that select a type, in arena order.
    pub fn type_items(&self) -> impl Iterator<Item = (MenuId, &MenuEntry)> + '_ {
        self.iter().filter(|(_, e)| e.target().is_some())
    }

    /// Labels from below the root down to `id`, e.g. `["Game", "Fx", "Spark"]`.
    pub fn path_of(&self, id: MenuId) -> Vec<&str> {
        let mut path = Vec::new();
        let mut current = self.entry(id);
        while let Some(entry) = current {
            let Some(parent) = entry.parent else {
                break;
            };
            path.push(entry.label.as_str());
            current = self.entry(parent);
        }
        path.reverse();
        path
    }

    /// Find an entry by its label path from the root.
    pub fn find_path(&self, path: &[&str]) -> Option<MenuId> {
        path.iter().try_fold(Self::ROOT, |folder, label| {
            self.children(folder).iter().find_map(|slot| match slot {
                MenuSlot::Entry(id) if self.entries[id.index()].label == *label => Some(*id),
                _ => None,
            })
        })
    }

    /// Search type items by label.
    ///
    /// Matching is case-insensitive and every whitespace-separated word of
    /// `query` must occur in the label. Labels starting with the first word
    /// come first, the rest is ordered by label. A blank query matches nothing.
    pub fn search(&self, query: &str) -> Vec<MenuId> {
        let words: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        let Some(first) = words.first() else {
            return Vec::new();
        };

        let mut hits: Vec<(bool, String, MenuId)> = self
            .type_items()
            .filter_map(|(id, entry)| {
                let label = entry.label.to_lowercase();
                words
                    .iter()
                    .all(|w| label.contains(w.as_str()))
                    .then(|| (!label.starts_with(first.as_str()), label, id))
            })
            .collect();

        hits.sort();
        hits.into_iter().map(|(_, _, id)| id).collect()
    }

    fn fmt_folder(&self, f: &mut fmt::Formatter<'_>, folder: MenuId, depth: usize) -> fmt::Result {
        for slot in self.children(folder) {
            let indent = "  ".repeat(depth);
            match slot {
                MenuSlot::Separator => writeln!(f, "{indent}---")?,
                MenuSlot::Entry(id) => {
                    let entry = &self.entries[id.index()];
                    match entry.kind {
                        MenuEntryKind::Folder { .. } => {
                            writeln!(f, "{indent}{}/", entry.label)?;
                            self.fmt_folder(f, *id, depth + 1)?;
                        }
                        MenuEntryKind::Item { enabled: true, .. } => {
                            writeln!(f, "{indent}{}", entry.label)?
                        }
                        MenuEntryKind::Item { enabled: false, .. } => {
                            writeln!(f, "{indent}{} (disabled)", entry.label)?
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Renders an indented outline of the menu.
impl fmt::Display for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.entries[Self::ROOT.index()].label)?;
        self.fmt_folder(f, Self::ROOT, 1)
    }
}
