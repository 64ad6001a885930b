//! Row geometry for drag gestures.
//!
//! All pixel math lives here, away from the ordering logic, so placeholder
//! positioning is unit-testable without a rendering environment. The host
//! owns the actual rendering; it feeds pointer positions in and places the
//! placeholder where these functions say.

/// A point in the host's pointer coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Row height every sibling is compressed to while a drag is active.
///
/// Compressing rows to a fixed height makes each drop target the same size
/// and keeps the slot math a single division. Presentation only; no data
/// model effect.
pub const DRAG_ROW_HEIGHT: f32 = 150.0;

/// Vertical geometry of the sibling container during a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowGeometry {
    /// Top of the container in pointer coordinates.
    pub origin_y: f32,
    /// Current scroll offset of the container.
    pub scroll_offset: f32,
    /// Height of one (compressed) row.
    pub row_height: f32,
}

impl Default for RowGeometry {
    fn default() -> Self {
        Self {
            origin_y: 0.0,
            scroll_offset: 0.0,
            row_height: DRAG_ROW_HEIGHT,
        }
    }
}

impl RowGeometry {
    /// The slot under a pointer: `floor(cursor_y_in_container / row_height)`.
    ///
    /// `pointer_y` is in the same coordinate space as
    /// [`origin_y`](Self::origin_y). Pointers above the container map to
    /// slot 0; callers clamp the upper bound against their item count with
    /// [`clamp_slot`].
    pub fn placeholder_slot(&self, pointer_y: f32) -> usize {
        let container_y = pointer_y - self.origin_y + self.scroll_offset;
        if container_y <= 0.0 || self.row_height <= 0.0 {
            return 0;
        }
        (container_y / self.row_height) as usize
    }

    /// Scroll offset that keeps the grabbed row under the cursor after the
    /// siblings collapse to [`row_height`](Self::row_height) (and again when
    /// they expand back on release).
    pub fn anchored_scroll_top(&self, placeholder_top: f32, pointer_y: f32) -> f32 {
        placeholder_top + self.origin_y - pointer_y
    }
}

/// Clamp a raw slot into the valid placeholder range `[0, item_count - 1]`.
pub fn clamp_slot(slot: usize, item_count: usize) -> usize {
    if item_count == 0 {
        0
    } else {
        slot.min(item_count - 1)
    }
}

/// Mapping from item slots to the host's concrete row indices when
/// decorative rows (e.g. per-item section headers) are interleaved with
/// item rows.
///
/// The default of two rows per item matches a header/content pair. The
/// ratio is a property of the hosting view's row structure, not a law: a
/// host with a different structure must construct its own interleave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowInterleave {
    /// Concrete rows occupied per item (header rows + the item row).
    pub rows_per_item: usize,
}

impl Default for RowInterleave {
    fn default() -> Self {
        Self { rows_per_item: 2 }
    }
}

impl RowInterleave {
    /// The host row index where the placeholder for `slot` belongs,
    /// clamped to the host's `total_rows`.
    pub fn decorated_row(&self, slot: usize, total_rows: usize) -> usize {
        let row = (slot + 1) * self.rows_per_item;
        if total_rows == 0 {
            0
        } else {
            row.min(total_rows - 1)
        }
    }
}
