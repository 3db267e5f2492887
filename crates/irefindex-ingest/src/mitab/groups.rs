//! Run-wide group bookkeeping
//!
//! Group nodes (identical groups, similar groups, MI vocabulary terms) are described
//! the first time a record mentions them and only linked afterwards. The tracker
//! remembers which `(kind, id)` pairs have been described; the backing store decides
//! whether that memory is local to one mapper or shared between workers.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::trace;

use crate::rdf::QName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    /// Taxon-sequence-identical group (irogid)
    Identical,
    /// Taxon-sequence-similar group (icrogid)
    Similar,
    /// Any other node described once, keyed by its qualified name
    Defined,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub kind: GroupKind,
    pub id: String,
}

impl GroupKey {
    pub fn new(kind: GroupKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

/// Set of keys whose description has been emitted
pub trait GroupStore {
    /// Record the key; true only for the caller that inserted it first
    fn insert_if_absent(&mut self, key: GroupKey) -> bool;

    fn contains(&self, key: &GroupKey) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Single-process store
#[derive(Debug, Default)]
pub struct InMemoryGroupStore {
    seen: HashSet<GroupKey>,
}

impl GroupStore for InMemoryGroupStore {
    fn insert_if_absent(&mut self, key: GroupKey) -> bool {
        self.seen.insert(key)
    }

    fn contains(&self, key: &GroupKey) -> bool {
        self.seen.contains(key)
    }

    fn len(&self) -> usize {
        self.seen.len()
    }
}

/// Store shared between mappers running on several threads.
///
/// Clones share one set; the insert happens under the lock, so exactly one caller
/// wins for each key.
#[derive(Debug, Clone, Default)]
pub struct SharedGroupStore {
    seen: Arc<Mutex<HashSet<GroupKey>>>,
}

impl SharedGroupStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GroupStore for SharedGroupStore {
    fn insert_if_absent(&mut self, key: GroupKey) -> bool {
        // A panicked holder cannot leave the set half-updated
        let mut seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
        seen.insert(key)
    }

    fn contains(&self, key: &GroupKey) -> bool {
        let seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
        seen.contains(key)
    }

    fn len(&self) -> usize {
        let seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
        seen.len()
    }
}

#[derive(Debug, Default)]
pub struct GroupTracker<S: GroupStore = InMemoryGroupStore> {
    store: S,
}

impl GroupTracker<InMemoryGroupStore> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: GroupStore> GroupTracker<S> {
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    /// True the first time `(kind, id)` is seen; the caller then emits the description
    pub fn ensure_described(&mut self, id: &str, kind: GroupKind, taxon: Option<&QName>) -> bool {
        let first = self.store.insert_if_absent(GroupKey::new(kind, id));
        if first {
            trace!(id, ?kind, taxon = ?taxon.map(ToString::to_string), "Describing group");
        }
        first
    }

    pub fn is_described(&self, id: &str, kind: GroupKind) -> bool {
        self.store.contains(&GroupKey::new(kind, id))
    }

    pub fn described_count(&self) -> usize {
        self.store.len()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
