//! Signal-emitting ordered sibling list.
//!
//! `OrderedListModel` holds one parent scope's children in ascending
//! sort-key order and notifies observers of every mutation. The hosting
//! view subscribes to the signal bundle; the drag controller consults the
//! store directly, so the model is a pure view-side mirror.
//!
//! Invariant: within the model no two entries share a key, and entry order
//! always equals ascending key order.

use parking_lot::RwLock;

use lanekit_core::Signal;

use crate::error::{ReorderError, Result};
use crate::id::ItemId;
use crate::model::ordering::{self, DEFAULT_STEP};
use crate::store::SortEntry;

/// Change notifications emitted by [`OrderedListModel`].
pub struct ListSignals {
    /// A row was inserted at the carried position.
    pub rows_inserted: Signal<usize>,
    /// The row at the carried position was removed.
    pub rows_removed: Signal<usize>,
    /// An item's key changed (possibly moving it).
    pub key_changed: Signal<(ItemId, f64)>,
    /// The whole list was renumbered; order is unchanged, keys are not.
    pub rebalanced: Signal<()>,
    /// The list content was replaced wholesale.
    pub reset: Signal<()>,
}

impl ListSignals {
    fn new() -> Self {
        Self {
            rows_inserted: Signal::new(),
            rows_removed: Signal::new(),
            key_changed: Signal::new(),
            rebalanced: Signal::new(),
            reset: Signal::new(),
        }
    }
}

/// Neighbor keys of a target slot.
///
/// `position` addresses the slot in the listing that remains after
/// `exclude` (the item being moved, if any) is removed; positions past the
/// end are treated as the tail slot.
pub fn slot_neighbors(
    entries: &[SortEntry],
    position: usize,
    exclude: Option<&ItemId>,
) -> (Option<f64>, Option<f64>) {
    let keys: Vec<f64> = entries
        .iter()
        .filter(|entry| exclude.is_none_or(|id| entry.id != *id))
        .map(|entry| entry.key)
        .collect();

    let position = position.min(keys.len());
    let prev = position.checked_sub(1).map(|i| keys[i]);
    let next = keys.get(position).copied();
    (prev, next)
}

/// One parent scope's ordered children.
pub struct OrderedListModel {
    entries: RwLock<Vec<SortEntry>>,
    step: f64,
    signals: ListSignals,
}

impl Default for OrderedListModel {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderedListModel {
    /// Create an empty model with the default key step.
    pub fn new() -> Self {
        Self::with_step(DEFAULT_STEP)
    }

    /// Create an empty model with an explicit key step.
    pub fn with_step(step: f64) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            step,
            signals: ListSignals::new(),
        }
    }

    /// The signal bundle observers subscribe to.
    pub fn signals(&self) -> &ListSignals {
        &self.signals
    }

    /// Number of items in the list.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Snapshot of the entries in display order.
    pub fn entries(&self) -> Vec<SortEntry> {
        self.entries.read().clone()
    }

    /// Display position of an item, if present.
    pub fn position_of(&self, id: &ItemId) -> Option<usize> {
        self.entries.read().iter().position(|entry| entry.id == *id)
    }

    /// Neighbor keys of a target slot, optionally excluding an item being
    /// moved. See [`slot_neighbors`].
    pub fn neighbors(&self, position: usize, exclude: Option<&ItemId>) -> (Option<f64>, Option<f64>) {
        slot_neighbors(&self.entries.read(), position, exclude)
    }

    /// Load a scope's rows as fetched from the store.
    ///
    /// Rows arrive in display order. If every row carries a key the list is
    /// re-sorted by key and adopted as-is. Rows with a missing key (legacy
    /// data) force a sequential renumbering of the whole list in the given
    /// order; the return value reports that repair so the caller can
    /// persist the new keys with a rebalance write.
    pub fn adopt_rows(&self, rows: Vec<(ItemId, Option<f64>)>) -> bool {
        let needs_repair = rows.iter().any(|(_, key)| key.is_none());

        let entries = if needs_repair {
            tracing::debug!(
                target: "lanekit::model",
                rows = rows.len(),
                "rows with missing sort keys, renumbering"
            );
            let keys = ordering::rebalanced_keys(rows.len(), self.step);
            rows.into_iter()
                .zip(keys)
                .map(|((id, _), key)| SortEntry { id, key })
                .collect()
        } else {
            let mut entries: Vec<SortEntry> = rows
                .into_iter()
                .map(|(id, key)| SortEntry {
                    id,
                    key: key.unwrap_or_default(),
                })
                .collect();
            entries.sort_by(|a, b| a.key.total_cmp(&b.key));
            entries
        };

        *self.entries.write() = entries;
        self.signals.reset.emit(());
        needs_repair
    }

    /// Append a fresh item at the tail, computing its key.
    ///
    /// Returns the assigned key.
    pub fn append(&self, id: impl Into<ItemId>) -> f64 {
        let mut entries = self.entries.write();
        let key = ordering::append_key(entries.last().map(|entry| entry.key), self.step);
        entries.push(SortEntry {
            id: id.into(),
            key,
        });
        let position = entries.len() - 1;
        drop(entries);

        self.signals.rows_inserted.emit(position);
        key
    }

    /// Insert a fresh item between existing siblings.
    ///
    /// `position` is the display slot the item should land in; positions
    /// past the end append. Fails with [`ReorderError::PrecisionExhausted`]
    /// when the neighbor keys cannot be bisected; call
    /// [`rebalance`](Self::rebalance) and retry.
    pub fn insert_at(&self, id: impl Into<ItemId>, position: usize) -> Result<f64> {
        let mut entries = self.entries.write();
        let position = position.min(entries.len());
        let (prev, next) = slot_neighbors(&entries, position, None);

        let assignment = ordering::compute_key(prev, next, self.step);
        if assignment.needs_rebalance {
            return Err(ReorderError::PrecisionExhausted {
                prev: prev.unwrap_or_default(),
                next: next.unwrap_or_default(),
            });
        }

        entries.insert(
            position,
            SortEntry {
                id: id.into(),
                key: assignment.base,
            },
        );
        drop(entries);

        self.signals.rows_inserted.emit(position);
        Ok(assignment.base)
    }

    /// Remove an item, returning its entry.
    pub fn remove(&self, id: &ItemId) -> Option<SortEntry> {
        let mut entries = self.entries.write();
        let position = entries.iter().position(|entry| entry.id == *id)?;
        let removed = entries.remove(position);
        drop(entries);

        self.signals.rows_removed.emit(position);
        Some(removed)
    }

    /// Apply a committed key change, keeping the list key-ordered.
    ///
    /// Returns `false` if the item is unknown.
    pub fn set_key(&self, id: &ItemId, key: f64) -> bool {
        let mut entries = self.entries.write();
        let Some(position) = entries.iter().position(|entry| entry.id == *id) else {
            return false;
        };
        entries[position].key = key;
        entries.sort_by(|a, b| a.key.total_cmp(&b.key));
        drop(entries);

        self.signals.key_changed.emit((id.clone(), key));
        true
    }

    /// Renumber every entry sequentially, preserving display order.
    ///
    /// Returns the new key table so the caller can persist it via
    /// [`crate::store::DataStore::rebalance`].
    pub fn rebalance(&self) -> Vec<SortEntry> {
        let mut entries = self.entries.write();
        let keys = ordering::rebalanced_keys(entries.len(), self.step);
        for (entry, key) in entries.iter_mut().zip(keys) {
            entry.key = key;
        }
        let table = entries.clone();
        drop(entries);

        tracing::debug!(
            target: "lanekit::model",
            rows = table.len(),
            "sibling list rebalanced"
        );
        self.signals.rebalanced.emit(());
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn ids(model: &OrderedListModel) -> Vec<String> {
        model
            .entries()
            .iter()
            .map(|entry| entry.id.as_str().to_string())
            .collect()
    }

    #[test]
    fn test_adopt_rows_sorted_by_key() {
        let model = OrderedListModel::new();
        let repaired = model.adopt_rows(vec![
            (ItemId::from("b"), Some(2.0)),
            (ItemId::from("a"), Some(1.0)),
        ]);

        assert!(!repaired);
        assert_eq!(ids(&model), ["a", "b"]);
    }

    #[test]
    fn test_adopt_rows_repairs_missing_keys() {
        let model = OrderedListModel::new();
        let repaired = model.adopt_rows(vec![
            (ItemId::from("a"), Some(5.0)),
            (ItemId::from("b"), None),
            (ItemId::from("c"), Some(9.0)),
        ]);

        assert!(repaired);
        // Given order is kept, keys are sequential.
        assert_eq!(ids(&model), ["a", "b", "c"]);
        let entries = model.entries();
        assert_eq!(entries[0].key, 0.0);
        assert_eq!(entries[1].key, DEFAULT_STEP);
        assert_eq!(entries[2].key, 2.0 * DEFAULT_STEP);
    }

    #[test]
    fn test_append_assigns_increasing_keys() {
        let model = OrderedListModel::new();
        let first = model.append("a");
        let second = model.append("b");

        assert_eq!(first, 0.0);
        assert!(second > first);
        assert_eq!(ids(&model), ["a", "b"]);
    }

    #[test]
    fn test_insert_between() {
        let model = OrderedListModel::new();
        model.adopt_rows(vec![
            (ItemId::from("a"), Some(1.0)),
            (ItemId::from("b"), Some(2.0)),
        ]);

        let key = model.insert_at("c", 1).unwrap();
        assert_eq!(key, 1.5);
        assert_eq!(ids(&model), ["a", "c", "b"]);
    }

    #[test]
    fn test_insert_precision_exhausted_then_rebalance() {
        let model = OrderedListModel::new();
        model.adopt_rows(vec![
            (ItemId::from("a"), Some(1.0)),
            (ItemId::from("b"), Some(1.0000000001)),
        ]);

        // Keep squeezing new items into the same boundary until the keys
        // stop bisecting.
        let mut exhausted = false;
        for i in 0..128 {
            match model.insert_at(format!("mid-{i}"), 1) {
                Ok(_) => {}
                Err(ReorderError::PrecisionExhausted { .. }) => {
                    exhausted = true;
                    break;
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert!(exhausted);

        let before = ids(&model);
        let table = model.rebalance();

        // Order preserved, keys strictly increasing and evenly spaced.
        assert_eq!(ids(&model), before);
        for pair in table.windows(2) {
            assert_eq!(pair[1].key - pair[0].key, DEFAULT_STEP);
        }

        // The retried insert now succeeds.
        model.insert_at("late", 1).unwrap();
    }

    #[test]
    fn test_slot_neighbors_excluding_moved_item() {
        let entries = vec![
            SortEntry::new("a", 1.0),
            SortEntry::new("b", 2.0),
            SortEntry::new("c", 3.0),
        ];

        // Move "a" to the slot between "b" and "c": in the remaining
        // listing [b, c] that is position 1.
        let moved = ItemId::from("a");
        assert_eq!(slot_neighbors(&entries, 1, Some(&moved)), (Some(2.0), Some(3.0)));

        // Head and tail slots.
        assert_eq!(slot_neighbors(&entries, 0, Some(&moved)), (None, Some(2.0)));
        assert_eq!(slot_neighbors(&entries, 9, Some(&moved)), (Some(3.0), None));
    }

    #[test]
    fn test_remove_and_set_key_signals() {
        let model = OrderedListModel::new();
        model.adopt_rows(vec![
            (ItemId::from("a"), Some(1.0)),
            (ItemId::from("b"), Some(2.0)),
        ]);

        let removed_at = Arc::new(Mutex::new(Vec::new()));
        let recv = removed_at.clone();
        model.signals().rows_removed.connect(move |&position| {
            recv.lock().push(position);
        });

        let key_changes = Arc::new(Mutex::new(Vec::new()));
        let recv = key_changes.clone();
        model.signals().key_changed.connect(move |change| {
            recv.lock().push(change.clone());
        });

        model.remove(&ItemId::from("a"));
        assert_eq!(*removed_at.lock(), vec![0]);

        assert!(model.set_key(&ItemId::from("b"), 0.5));
        assert_eq!(key_changes.lock().len(), 1);
        assert!(!model.set_key(&ItemId::from("zz"), 1.0));
    }

    #[test]
    fn test_set_key_reorders() {
        let model = OrderedListModel::new();
        model.adopt_rows(vec![
            (ItemId::from("a"), Some(1.0)),
            (ItemId::from("b"), Some(2.0)),
            (ItemId::from("c"), Some(3.0)),
        ]);

        model.set_key(&ItemId::from("c"), 1.5);
        assert_eq!(ids(&model), ["a", "c", "b"]);
    }
}
