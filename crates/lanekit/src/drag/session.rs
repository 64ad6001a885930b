//! Drag session state machine.
//!
//! One controller tracks one reorder gesture at a time for one sibling
//! scope. Pointer events are delivered serially by the host's UI loop, so
//! transitions take `&mut self` and run to completion.
//!
//! The controller's persistence contract: exactly one store write per
//! completed drag - a single key update, or a rebalance-then-update pair
//! when the assigner cannot bisect the target slot's neighbors. Cancel
//! issues zero writes from any point in the gesture.

use std::sync::Arc;

use lanekit_core::{PerfSpan, Property, ReadOnlyProperty, Signal};

use crate::context::ReorderContext;
use crate::drag::geometry::{Point, RowGeometry, clamp_slot};
use crate::error::{ReorderError, Result, StoreError};
use crate::id::ItemId;
use crate::model::list::slot_neighbors;
use crate::model::ordering::{self, DEFAULT_STEP};
use crate::store::{DataStore, PermissionGate, SortEntry};

/// Phase of the drag state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// No gesture in progress.
    Idle,
    /// A gesture is in progress; the placeholder tracks the pointer.
    Dragging,
}

/// Ephemeral state of one in-progress gesture.
///
/// Created on gesture start, dropped on drop or cancel, never persisted.
#[derive(Debug, Clone)]
pub struct DragSession {
    /// The item being moved.
    pub item: ItemId,
    /// The item's display index when the gesture started.
    pub original_index: usize,
    /// The slot the item will land in if dropped now.
    pub placeholder_index: usize,
    /// Vertical distance from the grabbed row's top to the pointer at
    /// gesture start; the host offsets its drag proxy by this.
    pub grab_offset: f32,
    /// Sibling listing captured at gesture start. Neighbor lookup on drop
    /// runs against this unmodified order.
    snapshot: Vec<SortEntry>,
}

/// The single update emitted for a completed drag.
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderRequest {
    /// The moved item.
    pub item: ItemId,
    /// Its committed sort key.
    pub key: f64,
    /// Whether a full rebalance write preceded the key update.
    pub rebalanced: bool,
}

/// Change notifications emitted by [`DragController`].
pub struct DragSignals {
    /// A gesture entered `Dragging`.
    pub drag_started: Signal<ItemId>,
    /// The placeholder moved to a new slot.
    pub placeholder_moved: Signal<usize>,
    /// A drop was committed to the store.
    pub reorder_committed: Signal<ReorderRequest>,
    /// A gesture was cancelled; nothing was written.
    pub drag_cancelled: Signal<ItemId>,
    /// The `dragging` property flipped.
    pub dragging_changed: Signal<bool>,
}

impl DragSignals {
    fn new() -> Self {
        Self {
            drag_started: Signal::new(),
            placeholder_moved: Signal::new(),
            reorder_committed: Signal::new(),
            drag_cancelled: Signal::new(),
            dragging_changed: Signal::new(),
        }
    }
}

/// Controller for reorder gestures within one sibling scope.
pub struct DragController {
    context: ReorderContext,
    store: Arc<dyn DataStore>,
    permissions: Arc<dyn PermissionGate>,
    geometry: RowGeometry,
    step: f64,
    session: Option<DragSession>,
    /// Set after a drop's writes are issued; cleared by
    /// [`write_settled`](Self::write_settled). While set, new gestures are
    /// refused so a rebalance cannot race a concurrent insert.
    write_in_flight: bool,
    dragging: Property<bool>,
    signals: DragSignals,
}

impl DragController {
    /// Create a controller for one scope/user context.
    pub fn new(
        context: ReorderContext,
        store: Arc<dyn DataStore>,
        permissions: Arc<dyn PermissionGate>,
        geometry: RowGeometry,
    ) -> Self {
        Self {
            context,
            store,
            permissions,
            geometry,
            step: DEFAULT_STEP,
            session: None,
            write_in_flight: false,
            dragging: Property::new(false),
            signals: DragSignals::new(),
        }
    }

    /// Override the key spacing used for fresh and rebalanced keys.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// The signal bundle observers subscribe to.
    pub fn signals(&self) -> &DragSignals {
        &self.signals
    }

    /// The context this controller was constructed with.
    pub fn context(&self) -> &ReorderContext {
        &self.context
    }

    /// Current phase.
    pub fn phase(&self) -> DragPhase {
        if self.session.is_some() {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    /// Whether a gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Reactive view of the dragging flag, for host bindings.
    pub fn dragging(&self) -> ReadOnlyProperty<'_, bool> {
        ReadOnlyProperty::new(&self.dragging)
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Whether a drag could start right now.
    ///
    /// Hosts use this to decide whether to show a drag affordance at all:
    /// a user without reorder permission never sees one.
    pub fn can_drag(&self) -> bool {
        !self.write_in_flight
            && self
                .permissions
                .can_reorder(&self.context.user, &self.context.scope)
    }

    /// Mark the previously issued store write as settled, allowing the
    /// next gesture. Called by the host when its write completes.
    pub fn write_settled(&mut self) {
        self.write_in_flight = false;
    }

    /// Start a gesture on `item` at the given pointer position.
    ///
    /// Refused while a session is active, while a previous write for this
    /// scope is unsettled, or when the permission gate rejects the
    /// context. On success the sibling listing is snapshotted and
    /// `drag_started` is emitted.
    pub fn begin_drag(&mut self, item: ItemId, pointer: Point) -> Result<()> {
        if self.session.is_some() {
            return Err(ReorderError::SessionActive);
        }
        if self.write_in_flight {
            return Err(ReorderError::WriteInFlight {
                scope: self.context.scope.clone(),
            });
        }
        if !self
            .permissions
            .can_reorder(&self.context.user, &self.context.scope)
        {
            return Err(ReorderError::PermissionDenied {
                user: self.context.user.clone(),
                scope: self.context.scope.clone(),
            });
        }

        let snapshot = self.store.list_siblings(&self.context.scope)?;
        let original_index = snapshot
            .iter()
            .position(|entry| entry.id == item)
            .ok_or_else(|| ReorderError::UnknownItem { item: item.clone() })?;

        let row_top = self.geometry.origin_y + original_index as f32 * self.geometry.row_height
            - self.geometry.scroll_offset;

        tracing::debug!(
            target: "lanekit::drag",
            item = %item,
            original_index,
            siblings = snapshot.len(),
            "drag started"
        );

        self.session = Some(DragSession {
            item: item.clone(),
            original_index,
            placeholder_index: original_index,
            grab_offset: pointer.y - row_top,
            snapshot,
        });

        if self.dragging.set(true) {
            self.signals.dragging_changed.emit(true);
        }
        self.signals.drag_started.emit(item);
        Ok(())
    }

    /// Track a pointer move, repositioning the placeholder.
    ///
    /// Returns the placeholder slot after the move, or `None` when no
    /// gesture is active (stray move events are ignored).
    /// `placeholder_moved` is emitted only when the slot actually changes.
    pub fn pointer_moved(&mut self, pointer: Point) -> Option<usize> {
        let geometry = self.geometry;
        let session = self.session.as_mut()?;

        let slot = geometry.placeholder_slot(pointer.y);
        let slot = clamp_slot(slot, session.snapshot.len());

        if slot != session.placeholder_index {
            session.placeholder_index = slot;
            self.signals.placeholder_moved.emit(slot);
        }
        Some(slot)
    }

    /// Drop: commit the gesture with a single reorder write.
    ///
    /// Neighbors are taken from the snapshot order with the moved item
    /// excluded. If the assigner reports precision exhaustion, one
    /// rebalance write renumbers the scope and the computation is retried
    /// against the fresh keys. If the store reports a concurrent sibling
    /// change, the listing is re-fetched and the computation retried once;
    /// a second failure surfaces [`ReorderError::ConcurrentModification`]
    /// with the data unchanged.
    ///
    /// An update is issued even when the item lands back on its original
    /// slot: the recomputed key may differ while the order does not.
    pub fn complete_drag(&mut self) -> Result<ReorderRequest> {
        let session = self.session.take().ok_or(ReorderError::NoActiveSession)?;
        if self.dragging.set(false) {
            self.signals.dragging_changed.emit(false);
        }

        let _span = PerfSpan::new("complete_drag");
        let DragSession {
            item,
            placeholder_index,
            snapshot,
            ..
        } = session;

        let (prev, next) = slot_neighbors(&snapshot, placeholder_index, Some(&item));
        let assignment = ordering::compute_key(prev, next, self.step);

        let (key, rebalanced) = if assignment.needs_rebalance {
            let key = self.rebalance_and_recompute(&snapshot, placeholder_index, &item)?;
            (key, true)
        } else {
            (assignment.base, false)
        };

        let key = self.write_key(&item, key, placeholder_index)?;
        self.write_in_flight = true;

        let request = ReorderRequest {
            item,
            key,
            rebalanced,
        };
        tracing::debug!(
            target: "lanekit::drag",
            item = %request.item,
            key = request.key,
            rebalanced = request.rebalanced,
            "reorder committed"
        );
        self.signals.reorder_committed.emit(request.clone());
        Ok(request)
    }

    /// Abort the gesture from any point in `Dragging`.
    ///
    /// The session is discarded, the store sees zero calls, and the host
    /// restores the item's original position visually. Returns the moved
    /// item's id, or `None` when no gesture was active.
    pub fn cancel(&mut self) -> Option<ItemId> {
        let session = self.session.take()?;
        if self.dragging.set(false) {
            self.signals.dragging_changed.emit(false);
        }

        tracing::debug!(target: "lanekit::drag", item = %session.item, "drag cancelled");
        self.signals.drag_cancelled.emit(session.item.clone());
        Some(session.item)
    }

    /// Renumber the scope, then recompute the slot key against the fresh
    /// table.
    fn rebalance_and_recompute(
        &mut self,
        snapshot: &[SortEntry],
        placeholder_index: usize,
        item: &ItemId,
    ) -> Result<f64> {
        let keys = ordering::rebalanced_keys(snapshot.len(), self.step);
        let table: Vec<SortEntry> = snapshot
            .iter()
            .zip(keys)
            .map(|(entry, key)| SortEntry {
                id: entry.id.clone(),
                key,
            })
            .collect();

        self.store.rebalance(&self.context.scope, &table)?;
        // The scope has been written; fence the next gesture even if the
        // follow-up update fails.
        self.write_in_flight = true;

        let (prev, next) = slot_neighbors(&table, placeholder_index, Some(item));
        let retry = ordering::compute_key(prev, next, self.step);
        if retry.needs_rebalance {
            return Err(ReorderError::PrecisionExhausted {
                prev: prev.unwrap_or_default(),
                next: next.unwrap_or_default(),
            });
        }
        Ok(retry.base)
    }

    /// Issue the single key update, retrying once against re-fetched rows
    /// on a concurrent sibling change.
    fn write_key(&mut self, item: &ItemId, key: f64, placeholder_index: usize) -> Result<f64> {
        match self.store.update_sort_key(item, key) {
            Ok(()) => Ok(key),
            Err(StoreError::ConcurrentModification) => {
                tracing::debug!(
                    target: "lanekit::drag",
                    item = %item,
                    "siblings changed during drop, retrying against fresh rows"
                );
                let rows = self.store.list_siblings(&self.context.scope)?;
                let (prev, next) = slot_neighbors(&rows, placeholder_index, Some(item));
                let retry = ordering::compute_key(prev, next, self.step);
                if retry.needs_rebalance {
                    return Err(ReorderError::ConcurrentModification);
                }
                match self.store.update_sort_key(item, retry.base) {
                    Ok(()) => Ok(retry.base),
                    Err(StoreError::ConcurrentModification) => {
                        Err(ReorderError::ConcurrentModification)
                    }
                    Err(other) => Err(other.into()),
                }
            }
            Err(other) => Err(other.into()),
        }
    }
}
