//! Metric names and descriptions for the store runtime.
//!
//! Metrics are emitted through the `metrics` facade. Nothing is recorded
//! until the host installs a recorder; without one every call is a no-op.
//!
//! # Example
//!
//! ```rust,no_run
//! use todo_store_runtime::metrics::register_metrics;
//!
//! // After installing a recorder of your choice:
//! register_metrics();
//! ```

use metrics::{Unit, describe_counter, describe_gauge, describe_histogram};

// Re-export metrics macros for use in other modules
pub use metrics::{counter, gauge, histogram};

/// Actions handed to a reducer, labelled by `action`
pub const ACTIONS_TOTAL: &str = "store.actions.total";

/// Actions that resolved to a no-op, labelled by `action`
pub const ACTIONS_NOOP: &str = "store.actions.noop";

/// Wall time spent inside `Reducer::reduce`
pub const REDUCER_DURATION: &str = "store.reducer.duration_seconds";

/// Actions waiting in a shared store's queue
pub const QUEUE_DEPTH: &str = "store.queue.depth";

/// Sends rejected because the shared store was shutting down
pub const REJECTED_TOTAL: &str = "store.shutdown.rejected_actions";

/// Register all metric descriptions.
///
/// Safe to call more than once.
pub fn register_metrics() {
    describe_counter!(
        ACTIONS_TOTAL,
        "Total number of actions processed by reducers"
    );
    describe_counter!(
        ACTIONS_NOOP,
        "Total number of actions that left the state unchanged"
    );
    describe_histogram!(
        REDUCER_DURATION,
        Unit::Seconds,
        "Time taken to execute reducers"
    );
    describe_gauge!(
        QUEUE_DEPTH,
        "Number of actions queued for the single writer"
    );
    describe_counter!(
        REJECTED_TOTAL,
        "Total number of actions rejected during shutdown"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_without_recorder_is_harmless() {
        register_metrics();
        register_metrics();
        counter!(ACTIONS_TOTAL, "action" => "add").increment(1);
    }
}
