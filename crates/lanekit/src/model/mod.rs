//! Data models behind the board views.
//!
//! [`ordering`] is the pure sort-key assigner, [`list`] wraps it in an
//! observable sibling list, and [`calendar`] projects scheduled cards onto
//! calendar events.

pub mod calendar;
pub mod list;
pub mod ordering;

pub use calendar::{CalendarEvent, CalendarEventKind, ScheduledCard, events_in_interval};
pub use list::{ListSignals, OrderedListModel, slot_neighbors};
pub use ordering::{DEFAULT_STEP, KeyAssignment, append_key, compute_key, rebalanced_keys};
