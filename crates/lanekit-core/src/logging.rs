//! Logging facilities for Lanekit.
//!
//! Lanekit uses the `tracing` crate for instrumentation. The library never
//! installs a subscriber; hosts do:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!     // Your application code...
//! }
//! ```
//!
//! Log lines carry per-subsystem targets so hosts can filter, e.g.
//! `RUST_LOG=lanekit::drag=debug`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core reactive primitives target.
    pub const CORE: &str = "lanekit_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "lanekit_core::signal";
    /// Ordering/sort-key target.
    pub const ORDERING: &str = "lanekit::ordering";
    /// Sibling list model target.
    pub const MODEL: &str = "lanekit::model";
    /// Drag session controller target.
    pub const DRAG: &str = "lanekit::drag";
}

/// A guard that times an operation as a tracing span.
///
/// The span stays active until the guard is dropped, so subscribers that
/// record span timings see the full duration of the operation.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "lanekit::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span() {
        tracing_subscriber::fmt()
            .with_test_writer()
            .try_init()
            .ok();

        // Just ensure it compiles and doesn't panic
        let _span = PerfSpan::new("test_operation");
    }
}
