//! Runtime registry of distribution generators and user centerings.
//!
//! Entries are keyed by name and optionally indexed by a
//! [`DistributionTag`]. Centering conventions beyond the built-in pair are
//! keyed by [`CenteringTag`]. The registry is an ordinary value: create one, install
//! the built-ins with [`install_builtins`](crate::distribution::install_builtins)
//! or [`DistributionRegistry::with_builtins`], register your own
//! distributions, then hand it to builders by reference.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use crate::{
    centering::CenteringEntry,
    distribution::{DistributionEntry, install_builtins},
    error::{GridError, Result},
    tags::{CenteringTag, DistributionTag},
};

/// Both lookup maps, guarded together so a registration is never observed
/// half-applied.
#[derive(Default)]
struct Inner {
    /// Name to generator pair.
    entries: HashMap<String, DistributionEntry>,
    /// Tag to registered name.
    tags: HashMap<DistributionTag, String>,
    /// Centering tag to its name and converter.
    centerings: HashMap<CenteringTag, (String, CenteringEntry)>,
}

/// Name- and tag-keyed store of distribution generator pairs.
///
/// Registration inserts or overwrites; there is no removal. Lookups take a
/// shared lock and return cloned, `Arc`-backed entries, so generators never
/// run while the lock is held.
#[derive(Default)]
pub struct DistributionRegistry {
    /// Guarded maps.
    inner: RwLock<Inner>,
}

impl DistributionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built-in distribution installed.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        install_builtins(&registry);
        registry
    }

    /// Register `entry` under `name`, replacing any previous entry.
    pub fn register(&self, name: impl Into<String>, entry: DistributionEntry) {
        let name = name.into();
        debug!(name = %name, "registering distribution");
        self.inner.write().entries.insert(name, entry);
    }

    /// Register `entry` under `name` and bind `tag` to that name.
    ///
    /// Both maps are updated under one write lock. Rebinding a tag replaces
    /// its previous name.
    pub fn register_with_tag(
        &self,
        name: impl Into<String>,
        entry: DistributionEntry,
        tag: DistributionTag,
    ) {
        let name = name.into();
        debug!(name = %name, tag = tag.id(), "registering distribution");
        let mut inner = self.inner.write();
        inner.entries.insert(name.clone(), entry);
        inner.tags.insert(tag, name);
    }

    /// The entry registered under `name`.
    pub fn find(&self, name: &str) -> Option<DistributionEntry> {
        self.inner.read().entries.get(name).cloned()
    }

    /// The name bound to `tag`.
    pub fn name_for_tag(&self, tag: DistributionTag) -> Option<String> {
        self.inner.read().tags.get(&tag).cloned()
    }

    /// The entry for `tag`, via its bound name.
    pub fn find_by_tag(&self, tag: DistributionTag) -> Option<DistributionEntry> {
        let inner = self.inner.read();
        inner
            .tags
            .get(&tag)
            .and_then(|name| inner.entries.get(name))
            .cloned()
    }

    /// Resolve `tag` to its name and entry, reporting which step failed.
    pub fn resolve(&self, tag: DistributionTag) -> Result<(String, DistributionEntry)> {
        let inner = self.inner.read();
        let name = inner
            .tags
            .get(&tag)
            .ok_or(GridError::UnregisteredTag { tag })?;
        let entry = inner
            .entries
            .get(name)
            .ok_or_else(|| GridError::MissingEntry { name: name.clone() })?;
        Ok((name.clone(), entry.clone()))
    }

    /// The tag bound to `name`, if any.
    pub fn tag_for_name(&self, name: &str) -> Option<DistributionTag> {
        self.inner
            .read()
            .tags
            .iter()
            .filter(|(_, n)| n.as_str() == name)
            .map(|(tag, _)| *tag)
            .min()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.read().entries.keys().cloned().collect();
        names.sort();
        names
    }

    /// Tag bindings in tag order.
    pub fn tags(&self) -> Vec<(DistributionTag, String)> {
        let mut tags: Vec<_> = self
            .inner
            .read()
            .tags
            .iter()
            .map(|(tag, name)| (*tag, name.clone()))
            .collect();
        tags.sort_by_key(|(tag, _)| *tag);
        tags
    }

    /// Register a user centering under `tag`, replacing any previous one.
    ///
    /// The builder handles [`CenteringTag::FaceCentered`] and
    /// [`CenteringTag::CellCentered`] itself and only consults this table for
    /// [`CenteringTag::Custom`] tags.
    pub fn register_centering(
        &self,
        name: impl Into<String>,
        entry: CenteringEntry,
        tag: CenteringTag,
    ) {
        let name = name.into();
        debug!(name = %name, tag = %tag, "registering centering");
        self.inner.write().centerings.insert(tag, (name, entry));
    }

    /// The converter registered under `tag`.
    pub fn find_centering(&self, tag: CenteringTag) -> Option<CenteringEntry> {
        self.inner
            .read()
            .centerings
            .get(&tag)
            .map(|(_, entry)| entry.clone())
    }

    /// Resolve a centering `tag` to its name and converter.
    pub fn resolve_centering(&self, tag: CenteringTag) -> Result<(String, CenteringEntry)> {
        self.inner
            .read()
            .centerings
            .get(&tag)
            .cloned()
            .ok_or(GridError::UnregisteredCentering { tag })
    }

    /// Registered centerings in tag order.
    pub fn centerings(&self) -> Vec<(CenteringTag, String)> {
        let mut centerings: Vec<_> = self
            .inner
            .read()
            .centerings
            .iter()
            .map(|(tag, (name, _))| (*tag, name.clone()))
            .collect();
        centerings.sort_by_key(|(tag, _)| *tag);
        centerings
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }
}
