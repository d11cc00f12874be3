//! The `TodoStore` handle handed to the view layer.
//!
//! Wraps a runtime [`Store`] running [`TodoReducer`]. Each operation returns
//! the snapshot to render next; unchanged snapshots come back as the same
//! value so a view can skip work with [`Snapshot::ptr_eq`].

use crate::config::Config;
use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{Snapshot, TodoAction, TodoId};
use todo_store_runtime::{SharedStore, Store};

/// Single-owner todo list state container
#[derive(Debug)]
pub struct TodoStore {
    inner: Store<TodoReducer>,
}

impl TodoStore {
    /// Empty store with sequential ids
    #[must_use]
    pub fn new() -> Self {
        Self::with_environment(TodoEnvironment::sequential())
    }

    /// Empty store with the given environment
    #[must_use]
    pub fn with_environment(env: TodoEnvironment) -> Self {
        Self {
            inner: Store::new(Snapshot::new(), TodoReducer::new(), env),
        }
    }

    /// Empty store configured from `config`
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::with_environment(config.environment())
    }

    /// The latest snapshot
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.inner.state().clone()
    }

    /// Apply any action, returning the resulting snapshot
    pub fn dispatch(&mut self, action: TodoAction) -> Snapshot {
        self.inner.send(action).clone()
    }

    /// Append a todo; blank text is ignored
    pub fn add(&mut self, text: impl Into<String>) -> Snapshot {
        self.dispatch(TodoAction::add(text))
    }

    /// Invert `is_liked` on `id`; unknown ids are ignored
    pub fn toggle_liked(&mut self, id: TodoId) -> Snapshot {
        self.dispatch(TodoAction::ToggleLiked { id })
    }

    /// Invert `is_saved` on `id`; unknown ids are ignored
    pub fn toggle_saved(&mut self, id: TodoId) -> Snapshot {
        self.dispatch(TodoAction::ToggleSaved { id })
    }

    /// Delete `id`; unknown ids are ignored
    pub fn remove(&mut self, id: TodoId) -> Snapshot {
        self.dispatch(TodoAction::Remove { id })
    }
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of liked todos in `snapshot`
#[must_use]
pub fn liked_count(snapshot: &Snapshot) -> usize {
    snapshot.liked_count()
}

/// Number of saved todos in `snapshot`
#[must_use]
pub fn saved_count(snapshot: &Snapshot) -> usize {
    snapshot.saved_count()
}

/// Todo list behind a single-writer queue, for hosts with several windows
pub type SharedTodoStore = SharedStore<TodoReducer>;

/// Spawn a [`SharedTodoStore`] configured from `config`
///
/// # Panics
///
/// Panics if called outside of a Tokio runtime.
#[must_use]
pub fn shared_store(config: &Config) -> SharedTodoStore {
    SharedStore::with_config(
        Snapshot::new(),
        TodoReducer::new(),
        config.environment(),
        config.store_config(),
    )
}
