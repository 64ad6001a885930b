//! Reorder context.
//!
//! The controller is constructed with an explicit context object instead of
//! reading a process-wide "current board" or "current user". This keeps the
//! library testable and lets one host drive several boards side by side.

use crate::id::{ScopeId, UserId};

/// Identifies which sibling scope a controller operates on and on whose
/// behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderContext {
    /// The parent scope whose children are being reordered.
    pub scope: ScopeId,
    /// The user driving the gesture.
    pub user: UserId,
}

impl ReorderContext {
    /// Create a context for one scope/user pair.
    pub fn new(scope: impl Into<ScopeId>, user: impl Into<UserId>) -> Self {
        Self {
            scope: scope.into(),
            user: user.into(),
        }
    }
}
