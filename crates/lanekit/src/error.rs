//! Error types for Lanekit.
//!
//! Every error here is recoverable at the gesture boundary: the controller
//! returns to `Idle`, the host surfaces a notice or retries, and no data is
//! left half-written.

use crate::id::{ItemId, ScopeId, UserId};

/// Result type alias for reorder operations.
pub type Result<T> = std::result::Result<T, ReorderError>;

/// Errors reported by the external data store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The sibling set changed between the caller's read and this write.
    #[error("sibling set changed since it was read")]
    ConcurrentModification,

    /// The store could not service the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur during a reorder gesture.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReorderError {
    /// The assigner cannot produce a key strictly between the two
    /// neighbors. Recoverable: rebalance the sibling list and retry.
    #[error("no representable sort key between {prev} and {next}; rebalance required")]
    PrecisionExhausted { prev: f64, next: f64 },

    /// The user may not reorder items in this scope. The drag never starts
    /// and the host should not show a drag affordance.
    #[error("user '{user}' may not reorder items in scope '{scope}'")]
    PermissionDenied { user: UserId, scope: ScopeId },

    /// The sibling set changed during the gesture and one retry against
    /// re-fetched rows also failed. Data is left unchanged; the host should
    /// show a "reorder failed, refresh" notice.
    #[error("siblings changed during reorder; refresh and try again")]
    ConcurrentModification,

    /// A previous reorder write for this scope has not settled yet.
    #[error("a reorder write for scope '{scope}' is still in flight")]
    WriteInFlight { scope: ScopeId },

    /// A drag session is already active on this controller.
    #[error("a drag session is already active")]
    SessionActive,

    /// No drag session is active.
    #[error("no drag session is active")]
    NoActiveSession,

    /// The dragged item is not among the scope's siblings.
    #[error("item '{item}' is not a sibling of this scope")]
    UnknownItem { item: ItemId },

    /// The data store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
