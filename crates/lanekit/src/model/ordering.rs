//! Fractional sort-key assignment.
//!
//! Dropping an item into a new slot must not renumber every sibling: the
//! new key is derived only from the keys of the two neighbors of the target
//! slot. Keys are plain `f64`s whose only meaningful property is relative
//! order.
//!
//! Bisecting the same boundary repeatedly eventually exhausts floating
//! point precision: the midpoint of two adjacent representable values
//! rounds onto one of them. [`compute_key`] reports that case as
//! `needs_rebalance` and the caller renumbers the whole sibling list with
//! [`rebalanced_keys`] before retrying the single insert. That is this
//! module's only failure mode, and it is recoverable.
//!
//! All functions here are pure and deterministic; none of them look at
//! locale or float environment settings.

/// Default spacing between freshly assigned keys.
///
/// A power of two, so sums and midpoints of rebalanced keys stay exact in
/// binary floating point for a long run of boundary inserts.
pub const DEFAULT_STEP: f64 = 65536.0;

/// The result of a key computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyAssignment {
    /// The key to assign to the moved item.
    pub base: f64,
    /// Whether the neighbors were too close to bisect. When set, `base`
    /// must not be used; rebalance the list and recompute.
    pub needs_rebalance: bool,
}

/// Compute a sort key that orders an item between two neighbors.
///
/// `prev` and `next` are the keys of the items immediately before and after
/// the target slot, or `None` at the list boundaries:
///
/// - head insert (`prev` is `None`): one step below `next`
/// - tail insert (`next` is `None`): one step above `prev`
/// - empty list (both `None`): `0.0`
/// - otherwise: the midpoint of the two keys
///
/// The midpoint degenerates when the neighbors are numerically adjacent;
/// that is reported via [`KeyAssignment::needs_rebalance`] rather than by
/// returning a colliding key.
pub fn compute_key(prev: Option<f64>, next: Option<f64>, step: f64) -> KeyAssignment {
    let assignment = match (prev, next) {
        (None, None) => KeyAssignment {
            base: 0.0,
            needs_rebalance: false,
        },
        (None, Some(next)) => KeyAssignment {
            base: next - step,
            needs_rebalance: false,
        },
        (Some(prev), None) => KeyAssignment {
            base: prev + step,
            needs_rebalance: false,
        },
        (Some(prev), Some(next)) => {
            debug_assert!(prev < next, "neighbor keys out of order: {prev} >= {next}");
            let base = (prev + next) / 2.0;
            KeyAssignment {
                base,
                needs_rebalance: base == prev || base == next,
            }
        }
    };

    if assignment.needs_rebalance {
        tracing::debug!(
            target: "lanekit::ordering",
            ?prev,
            ?next,
            "sort keys exhausted precision, rebalance required"
        );
    }

    assignment
}

/// Fresh keys for a full renumbering pass: `0, step, 2*step, …`.
///
/// Assigned to all siblings in their current display order, so the pass is
/// order-preserving and restores full spacing at every boundary.
pub fn rebalanced_keys(count: usize, step: f64) -> Vec<f64> {
    (0..count).map(|i| i as f64 * step).collect()
}

/// Key for an item appended at the tail of a list.
///
/// `current_max` is the largest existing key, or `None` for an empty list.
pub fn append_key(current_max: Option<f64>, step: f64) -> f64 {
    match current_max {
        Some(max) => max + step,
        None => 0.0,
    }
}
