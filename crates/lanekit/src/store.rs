//! External collaborator seams.
//!
//! Lanekit owns no persistence. The hosting application implements
//! [`DataStore`] over whatever backend it has (a server API, a local
//! database, a sync engine) and [`PermissionGate`] over its membership
//! model. [`MemoryStore`] is a reference implementation used by tests and
//! example hosts.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::StoreError;
use crate::id::{ItemId, ScopeId, UserId};

/// One row of a sibling listing: an item and its sort key.
#[derive(Debug, Clone, PartialEq)]
pub struct SortEntry {
    /// The item's opaque identifier.
    pub id: ItemId,
    /// The item's sort key. Ascending key order is display order.
    pub key: f64,
}

impl SortEntry {
    /// Create an entry.
    pub fn new(id: impl Into<ItemId>, key: f64) -> Self {
        Self { id: id.into(), key }
    }
}

/// Abstract persistence interface for ordered sibling lists.
///
/// Writes are fire-and-forget from the controller's point of view: the
/// implementation may queue them, but must apply a
/// rebalance-then-update pair in order against the same scope.
pub trait DataStore: Send + Sync {
    /// List the siblings of a scope in ascending key order.
    fn list_siblings(&self, scope: &ScopeId) -> Result<Vec<SortEntry>, StoreError>;

    /// Persist a new sort key for one item.
    ///
    /// Returns [`StoreError::ConcurrentModification`] if the sibling set
    /// changed since the caller's last read.
    fn update_sort_key(&self, item: &ItemId, key: f64) -> Result<(), StoreError>;

    /// Replace every sibling key in a scope in one pass.
    ///
    /// `keys` covers all siblings in their current display order.
    fn rebalance(&self, scope: &ScopeId, keys: &[SortEntry]) -> Result<(), StoreError>;
}

/// Abstract permission check consumed before a drag may start.
pub trait PermissionGate: Send + Sync {
    /// Whether `user` may reorder items within `scope`.
    fn can_reorder(&self, user: &UserId, scope: &ScopeId) -> bool;
}

/// A permission gate that allows everything. Useful for single-user hosts
/// and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAll;

impl PermissionGate for AllowAll {
    fn can_reorder(&self, _user: &UserId, _scope: &ScopeId) -> bool {
        true
    }
}

/// In-memory [`DataStore`] reference implementation.
///
/// Keeps one sibling list per scope and counts writes, which lets tests
/// assert the controller's exactly-one-write-per-drag guarantee.
#[derive(Default)]
pub struct MemoryStore {
    scopes: RwLock<HashMap<ScopeId, Vec<SortEntry>>>,
    writes: RwLock<WriteCounters>,
}

/// Write counters tracked by [`MemoryStore`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WriteCounters {
    /// Calls to [`DataStore::update_sort_key`].
    pub updates: usize,
    /// Calls to [`DataStore::rebalance`].
    pub rebalances: usize,
}

impl WriteCounters {
    /// Total persistence-facing write calls.
    pub fn total(&self) -> usize {
        self.updates + self.rebalances
    }
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one scope with entries.
    pub fn seed(&self, scope: impl Into<ScopeId>, entries: Vec<SortEntry>) {
        self.scopes.write().insert(scope.into(), entries);
    }

    /// Write counters accumulated so far.
    pub fn write_counters(&self) -> WriteCounters {
        *self.writes.read()
    }

    /// Current entries of a scope in ascending key order.
    pub fn entries(&self, scope: &ScopeId) -> Vec<SortEntry> {
        let mut entries = self
            .scopes
            .read()
            .get(scope)
            .cloned()
            .unwrap_or_default();
        entries.sort_by(|a, b| a.key.total_cmp(&b.key));
        entries
    }
}

impl DataStore for MemoryStore {
    fn list_siblings(&self, scope: &ScopeId) -> Result<Vec<SortEntry>, StoreError> {
        Ok(self.entries(scope))
    }

    fn update_sort_key(&self, item: &ItemId, key: f64) -> Result<(), StoreError> {
        let mut scopes = self.scopes.write();
        let entry = scopes
            .values_mut()
            .flat_map(|entries| entries.iter_mut())
            .find(|entry| entry.id == *item)
            .ok_or_else(|| StoreError::Unavailable(format!("unknown item '{item}'")))?;
        entry.key = key;
        self.writes.write().updates += 1;
        Ok(())
    }

    fn rebalance(&self, scope: &ScopeId, keys: &[SortEntry]) -> Result<(), StoreError> {
        let mut scopes = self.scopes.write();
        let entries = scopes
            .get_mut(scope)
            .ok_or_else(|| StoreError::Unavailable(format!("unknown scope '{scope}'")))?;
        *entries = keys.to_vec();
        self.writes.write().rebalances += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> (MemoryStore, ScopeId) {
        let store = MemoryStore::new();
        let scope = ScopeId::from("board-1");
        store.seed(
            scope.clone(),
            vec![
                SortEntry::new("a", 1.0),
                SortEntry::new("b", 2.0),
                SortEntry::new("c", 3.0),
            ],
        );
        (store, scope)
    }

    #[test]
    fn test_list_siblings_sorted() {
        let store = MemoryStore::new();
        let scope = ScopeId::from("board-1");
        store.seed(
            scope.clone(),
            vec![SortEntry::new("b", 2.0), SortEntry::new("a", 1.0)],
        );

        let rows = store.list_siblings(&scope).unwrap();
        assert_eq!(rows[0].id, ItemId::from("a"));
        assert_eq!(rows[1].id, ItemId::from("b"));
    }

    #[test]
    fn test_update_counts_writes() {
        let (store, scope) = seeded();
        store.update_sort_key(&ItemId::from("b"), 0.5).unwrap();

        assert_eq!(store.write_counters().updates, 1);
        let rows = store.list_siblings(&scope).unwrap();
        assert_eq!(rows[0].id, ItemId::from("b"));
    }

    #[test]
    fn test_update_unknown_item() {
        let (store, _) = seeded();
        let err = store.update_sort_key(&ItemId::from("nope"), 1.0);
        assert!(matches!(err, Err(StoreError::Unavailable(_))));
        assert_eq!(store.write_counters().updates, 0);
    }

    #[test]
    fn test_rebalance_replaces_keys() {
        let (store, scope) = seeded();
        store
            .rebalance(
                &scope,
                &[
                    SortEntry::new("a", 0.0),
                    SortEntry::new("b", 65536.0),
                    SortEntry::new("c", 131072.0),
                ],
            )
            .unwrap();

        let rows = store.list_siblings(&scope).unwrap();
        assert_eq!(rows[2].key, 131072.0);
        assert_eq!(store.write_counters().rebalances, 1);
        assert_eq!(store.write_counters().total(), 1);
    }

    #[test]
    fn test_allow_all_gate() {
        let gate = AllowAll;
        assert!(gate.can_reorder(&UserId::from("anyone"), &ScopeId::from("anywhere")));
    }
}
