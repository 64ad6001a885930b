//! Opaque identifiers for board entities.
//!
//! Identity comes from the external data store; Lanekit never inspects or
//! derives anything from the contents of these ids.

use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            /// Create an id from its store representation.
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// The raw id string as handed out by the store.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::new(raw)
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }
    };
}

string_id! {
    /// Identifies one orderable item (a swimlane, list, or card).
    ItemId
}

string_id! {
    /// Identifies the parent scope an ordered list lives in (a board for
    /// swimlanes, a list for cards).
    ScopeId
}

string_id! {
    /// Identifies the user driving a gesture, for permission checks.
    UserId
}
