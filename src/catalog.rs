//! The path-indexed store of catalog entries.
//!
//! [`Catalog`] owns every [`Item`] keyed by its path. Only [`Catalog::add`]
//! validates; the other mutations are unconditional.
//!
//! Soft references (VLAN ids, `connected_to`, `reserved_ip_path`) are not
//! followed by [`Catalog::delete`]. A caller deleting a VLAN, port or IP must
//! clear or rewrite the entries pointing at it, or the next validation of
//! those entries fails.

use crate::error::{Error, Result};
use crate::models::{Equipment, FolderKind, Item, Port, StaticFolder, Vlan};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Catalog {
    items: HashMap<String, Item>,
}

impl Catalog {
    /// Catalog holding the six static folders.
    pub fn new() -> Catalog {
        let mut catalog = Catalog::empty();
        for kind in FolderKind::ALL {
            catalog.put_unchecked(StaticFolder::new(kind).into());
        }
        catalog
    }

    /// Catalog with nothing in it, not even the folders.
    pub fn empty() -> Catalog {
        Catalog {
            items: HashMap::new(),
        }
    }

    /// Number of entries, folders included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Exact lookup by path.
    pub fn get(&self, path: &str) -> Option<&Item> {
        self.items.get(path)
    }

    /// Every entry, in no particular order.
    pub fn all(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Entries whose parent path is `parent_path`, in sibling order.
    ///
    /// An empty `parent_path` lists the roots.
    pub fn children_of(&self, parent_path: &str) -> Vec<&Item> {
        let mut children: Vec<&Item> = self
            .items
            .values()
            .filter(|item| item.parent_path() == parent_path)
            .collect();
        children.sort_by(|a, b| a.compare(b));
        children
    }

    /// Entries whose parent path is `parent_path`, unsorted.
    pub(crate) fn children_unordered<'a>(
        &'a self,
        parent_path: &'a str,
    ) -> impl Iterator<Item = &'a Item> + 'a {
        self.items
            .values()
            .filter(move |item| item.parent_path() == parent_path)
    }

    /// Children of `parent`, or the roots for `None`.
    pub fn get_children(&self, parent: Option<&Item>) -> Vec<&Item> {
        match parent {
            Some(item) => self.children_of(&item.path()),
            None => self.children_of(""),
        }
    }

    /// Resolve a navigation label back to the entry under `parent`.
    pub fn get_by_parent_and_display_id(
        &self,
        parent: Option<&Item>,
        display_id: &str,
    ) -> Option<&Item> {
        self.get_children(parent)
            .into_iter()
            .find(|item| item.display_id() == display_id)
    }

    /// The entry `item` lives under, if stored.
    pub fn parent_of(&self, item: &Item) -> Option<&Item> {
        self.get(item.parent_path())
    }

    /// Validate `item` and store it. On error nothing changes.
    ///
    /// Re-adding an identical entry is a no-op; a different entry already
    /// stored at the same path is rejected.
    pub fn add(&mut self, item: Item) -> Result<()> {
        let path = item.path();
        if let Some(existing) = self.items.get(&path) {
            if *existing != item {
                return Err(Error::invalid(
                    &path,
                    "raw_id",
                    format!("a {} already exists at this path", existing.kind_name()),
                ));
            }
        }
        item.validate(self)?;
        log::debug!("add {} {path}", item.kind_name());
        self.items.insert(path, item);
        Ok(())
    }

    /// Store `item` without validation, replacing whatever is at its path.
    ///
    /// Only for multi-step updates the caller has already validated, such as a
    /// rename: put the replacement first, then remove the original, so an
    /// interruption never loses the entry.
    pub fn put_unchecked(&mut self, item: Item) {
        let path = item.path();
        log::debug!("put {} {path}", item.kind_name());
        self.items.insert(path, item);
    }

    /// Remove the entry at `path` and all its descendants, deepest first.
    ///
    /// Returns how many entries were removed.
    pub fn delete(&mut self, path: &str) -> usize {
        let child_paths: Vec<String> = self.children_unordered(path).map(Item::path).collect();
        let mut removed: usize = child_paths.iter().map(|child| self.delete(child)).sum();
        if self.items.remove(path).is_some() {
            removed += 1;
        }
        log::debug!("delete {path}: {removed} entries removed");
        removed
    }

    /// Remove exactly the entry at `path`; children stay behind.
    pub fn remove(&mut self, path: &str) -> Option<Item> {
        let removed = self.items.remove(path);
        if removed.is_some() {
            log::debug!("remove {path}");
        }
        removed
    }

    /// The VLAN with numeric id `id`.
    pub fn find_vlan_by_id(&self, id: u16) -> Option<&Vlan> {
        self.children_unordered(FolderKind::Vlans.name())
            .find_map(|item| match item {
                Item::Vlan(vlan) if vlan.id().ok() == Some(id) => Some(vlan),
                _ => None,
            })
    }

    /// The device a port belongs to.
    ///
    /// # Panics
    ///
    /// If the port's parent is not equipment. Validation rules that out, so
    /// reaching it means the caller stored an unvalidated port.
    pub fn port_equipment(&self, port: &Port) -> &Equipment {
        match self.get(&port.base.parent_path) {
            Some(Item::Equipment(equipment)) => equipment,
            other => panic!(
                "port {} has parent {:?}, expected equipment",
                port.base.path(),
                other.map(Item::kind_name)
            ),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::new()
    }
}
