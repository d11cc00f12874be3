//! # Todo Store Testing
//!
//! Testing utilities and helpers for the todo store reducer architecture.
//!
//! This crate provides:
//! - Deterministic implementations of Environment traits
//! - A Given-When-Then harness for reducers ([`ReducerTest`])
//! - Assertion helpers for transitions and identifier sets
//!
//! ## Example
//!
//! ```ignore
//! use todo_store_testing::{ReducerTest, assertions};
//!
//! #[test]
//! fn add_appends() {
//!     ReducerTest::new(TodoReducer::new())
//!         .with_env(TodoEnvironment::sequential())
//!         .given_state(Snapshot::default())
//!         .when_action(TodoAction::add("Buy milk"))
//!         .then_transition(assertions::assert_changed)
//!         .then_state(|s| assert_eq!(s.len(), 1))
//!         .run();
//! }
//! ```

use std::sync::{Mutex, Once, PoisonError};
use todo_store_core::environment::IdGenerator;


pub use reducer_test::{ReducerTest, assertions};

/// Deterministic implementations of Environment traits
pub mod mocks {
    use super::{IdGenerator, Mutex, PoisonError};
    use std::collections::VecDeque;

    /// Id generator that replays a fixed script
    ///
    /// Hands out the scripted ids in order (duplicates included, which is the
    /// point: it lets tests provoke collisions). Once the script runs out it
    /// keeps counting upward from the last scripted id.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_store_testing::mocks::ScriptedIdGenerator;
    /// use todo_store_core::environment::IdGenerator;
    ///
    /// let ids = ScriptedIdGenerator::new([7, 7]);
    /// assert_eq!(ids.next_id(), 7);
    /// assert_eq!(ids.next_id(), 7);
    /// assert_eq!(ids.next_id(), 8);
    /// ```
    #[derive(Debug)]
    pub struct ScriptedIdGenerator {
        inner: Mutex<Script>,
    }

    #[derive(Debug)]
    struct Script {
        pending: VecDeque<u64>,
        last: u64,
    }

    impl ScriptedIdGenerator {
        /// Create a generator that replays `ids`
        #[must_use]
        pub fn new(ids: impl IntoIterator<Item = u64>) -> Self {
            Self {
                inner: Mutex::new(Script {
                    pending: ids.into_iter().collect(),
                    last: 0,
                }),
            }
        }

        /// Number of scripted ids not yet handed out
        #[must_use]
        pub fn remaining(&self) -> usize {
            self.inner
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pending
                .len()
        }
    }

    impl IdGenerator for ScriptedIdGenerator {
        fn next_id(&self) -> u64 {
            let mut script = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            let id = script
                .pending
                .pop_front()
                .unwrap_or_else(|| script.last.wrapping_add(1));
            script.last = id;
            id
        }
    }
}

/// Test helpers and utilities
pub mod helpers {
    use super::Once;
    use std::collections::HashSet;
    use std::hash::Hash;

    static TRACING: Once = Once::new();

    /// Install a `tracing` subscriber that writes through the test harness
    ///
    /// Respects `RUST_LOG`; defaults to `warn`. Only the first call installs
    /// anything.
    pub fn init_test_tracing() {
        TRACING.call_once(|| {
            let filter = tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_test_writer()
                .try_init();
        });
    }

    /// Returns true if no item occurs twice
    #[must_use]
    pub fn all_distinct<T, I>(items: I) -> bool
    where
        T: Eq + Hash,
        I: IntoIterator<Item = T>,
    {
        let mut seen = HashSet::new();
        items.into_iter().all(|item| seen.insert(item))
    }
}

// Re-export commonly used items
pub use helpers::{all_distinct, init_test_tracing};
pub use mocks::ScriptedIdGenerator;
