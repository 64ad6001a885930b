//! Drag-to-reorder gestures.
//!
//! [`DragController`] runs the gesture state machine; [`geometry`] holds
//! the pixel math that maps pointer positions to placeholder slots. The
//! host wires pointer events into the controller and renders the
//! placeholder where the controller says.

pub mod geometry;
pub mod session;

pub use geometry::{DRAG_ROW_HEIGHT, Point, RowGeometry, RowInterleave, clamp_slot};
pub use session::{DragController, DragPhase, DragSession, DragSignals, ReorderRequest};
