//! # Todo Store Runtime
//!
//! Runtime implementation for the todo store reducer architecture.
//!
//! This crate provides the stores that own state and feed actions through a
//! reducer.
//!
//! ## Core Components
//!
//! - **Store**: Single-owner synchronous store (`&mut self` dispatch)
//! - **SharedStore**: Cloneable handle to a single writer task; actions are
//!   queued and applied strictly in arrival order, and every change is
//!   published to subscribers
//!
//! ## Example
//!
//! ```ignore
//! use todo_store_runtime::Store;
//!
//! let mut store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action, get the resulting state back
//! let state = store.send(Action::DoSomething);
//!
//! // Read state
//! let value = store.state().some_field;
//! ```

use std::time::Instant;
use todo_store_core::{action::Action, reducer::Reducer};

/// Metric names and registration
pub mod metrics;

/// Single-writer store for hosts with several concurrent callers
pub mod shared;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during `SharedStore` operations
    ///
    /// Reducers themselves are total, so the only failures are about the
    /// writer task being unavailable.
    #[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after `shutdown()`.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// The writer task is gone
        ///
        /// Its queue or reply channel was dropped before the action was
        /// applied, typically because the runtime is shutting down.
        #[error("Store writer channel closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use todo_store_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_queue_capacity(256);
/// assert_eq!(config.queue_capacity, 256);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of actions waiting for the writer
    ///
    /// Senders wait when the queue is full. Zero is treated as one.
    pub queue_capacity: usize,
}

impl StoreConfig {
    /// Default queue capacity
    pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(queue_capacity: usize) -> Self {
        Self { queue_capacity }
    }

    /// Set the queue capacity
    #[must_use]
    pub const fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Queue capacity actually used for the channel
    #[must_use]
    pub const fn effective_queue_capacity(&self) -> usize {
        if self.queue_capacity == 0 {
            1
        } else {
            self.queue_capacity
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_QUEUE_CAPACITY)
    }
}

/// Run one action through the reducer and swap in the new state
///
/// Shared by [`Store`] and the writer task of [`shared::SharedStore`] so both
/// log and record metrics identically. Returns whether the state changed.
fn reduce_into<R>(
    reducer: &R,
    state: &mut R::State,
    action: R::Action,
    environment: &R::Environment,
) -> bool
where
    R: Reducer,
    R::Action: Action,
{
    let name = action.name();
    ::metrics::counter!(metrics::ACTIONS_TOTAL, "action" => name).increment(1);

    let start = Instant::now();
    let transition = reducer.reduce(state, action, environment);
    ::metrics::histogram!(metrics::REDUCER_DURATION).record(start.elapsed().as_secs_f64());

    let changed = transition.apply(state);
    if changed {
        tracing::debug!(action = name, "State changed");
    } else {
        ::metrics::counter!(metrics::ACTIONS_NOOP, "action" => name).increment(1);
        tracing::trace!(action = name, "Action was a no-op");
    }
    changed
}

/// Synchronous single-owner store
pub mod store {
    use super::{Action, Reducer, reduce_into};

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store owns:
    /// 1. State (the latest value produced by the reducer)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    ///
    /// Mutation goes through [`Store::send`] only, and requires `&mut self`,
    /// so there is exactly one writer and no locking.
    ///
    /// # Type Parameters
    ///
    /// - `R`: Reducer implementation; state, action and environment types
    ///   come from it
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mut store = Store::new(Snapshot::default(), TodoReducer::new(), env);
    ///
    /// let snapshot = store.send(TodoAction::Add { text: "Buy milk".into() });
    /// assert_eq!(snapshot.len(), 1);
    /// ```
    pub struct Store<R>
    where
        R: Reducer,
    {
        state: R::State,
        reducer: R,
        environment: R::Environment,
    }

    impl<R> Store<R>
    where
        R: Reducer,
        R::Action: Action,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub const fn new(initial_state: R::State, reducer: R, environment: R::Environment) -> Self {
            Self {
                state: initial_state,
                reducer,
                environment,
            }
        }

        /// Send an action to the store
        ///
        /// 1. Calls the reducer with (state, action, environment)
        /// 2. Replaces the state if the reducer produced a new one
        /// 3. Returns the state as it is after the action
        pub fn send(&mut self, action: R::Action) -> &R::State {
            reduce_into(&self.reducer, &mut self.state, action, &self.environment);
            &self.state
        }

        /// Current state
        #[must_use]
        pub const fn state(&self) -> &R::State {
            &self.state
        }

        /// Injected dependencies
        #[must_use]
        pub const fn environment(&self) -> &R::Environment {
            &self.environment
        }

        /// Consume the store, returning its state
        #[must_use]
        pub fn into_state(self) -> R::State {
            self.state
        }
    }

    impl<R> std::fmt::Debug for Store<R>
    where
        R: Reducer,
        R::State: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Store").field("state", &self.state).finish_non_exhaustive()
        }
    }
}

// Re-export for convenience
pub use shared::SharedStore;
pub use store::Store;
