//! Reusable core of a kanban board view: fractional sort ordering and a
//! drag-to-reorder state machine, independent of any rendering stack.
//!
//! The central pieces:
//!
//! - [`model::ordering`]: derives a dropped item's sort key from its two
//!   slot neighbors alone, so a reorder is a single-row write.
//! - [`drag::DragController`]: the gesture state machine. One session at a
//!   time, placeholder tracking from row geometry, exactly one store write
//!   per completed drag, zero writes on cancel.
//! - [`model::OrderedListModel`]: an observable sibling list over the same
//!   keys, for hosts that render from a model rather than raw rows.
//! - [`model::calendar`]: projection of scheduled/due cards onto calendar
//!   events.
//!
//! Persistence and permissions stay on the host's side of the
//! [`store::DataStore`] and [`store::PermissionGate`] seams.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use lanekit::drag::{DragController, Point, RowGeometry, DRAG_ROW_HEIGHT};
//! use lanekit::store::{AllowAll, MemoryStore, SortEntry};
//! use lanekit::{ItemId, ReorderContext};
//!
//! let store = Arc::new(MemoryStore::new());
//! store.seed(
//!     "list-1",
//!     vec![SortEntry::new("a", 1.0), SortEntry::new("b", 2.0)],
//! );
//!
//! let mut controller = DragController::new(
//!     ReorderContext::new("list-1", "alice"),
//!     store.clone(),
//!     Arc::new(AllowAll),
//!     RowGeometry::default(),
//! );
//!
//! controller.begin_drag(ItemId::from("a"), Point::new(0.0, 10.0))?;
//! controller.pointer_moved(Point::new(0.0, DRAG_ROW_HEIGHT + 10.0));
//! let request = controller.complete_drag()?;
//! assert!(request.key > 2.0);
//! # Ok::<(), lanekit::ReorderError>(())
//! ```

pub mod context;
pub mod drag;
pub mod error;
pub mod id;
pub mod model;
pub mod store;

pub use context::ReorderContext;
pub use error::{ReorderError, Result, StoreError};
pub use id::{ItemId, ScopeId, UserId};

// Re-export the reactive primitives so hosts depend on one crate.
pub use lanekit_core::{
    ConnectionGuard, ConnectionId, PerfSpan, Property, ReadOnlyProperty, Signal,
};
