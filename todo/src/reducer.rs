//! Reducer logic for the todo list.
//!
//! All four operations are total: blank text and unknown ids resolve to
//! [`Transition::Unchanged`] instead of an error.

use crate::types::{Snapshot, Todo, TodoAction, TodoId};
use std::sync::Arc;
use todo_store_core::{
    environment::{IdGenerator, RandomIdGenerator, SequentialIdGenerator},
    reducer::{Reducer, Transition},
};

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Source of ids for new todos
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }

    /// Environment handing out 1, 2, 3, ...
    #[must_use]
    pub fn sequential() -> Self {
        Self::new(Arc::new(SequentialIdGenerator::new()))
    }

    /// Environment handing out random 64-bit ids
    #[must_use]
    pub fn random() -> Self {
        Self::new(Arc::new(RandomIdGenerator))
    }
}

impl Default for TodoEnvironment {
    fn default() -> Self {
        Self::sequential()
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment").finish_non_exhaustive()
    }
}

/// True if `text` holds nothing but whitespace or byte order marks
fn is_blank(text: &str) -> bool {
    text.chars().all(|c| c.is_whitespace() || c == '\u{FEFF}')
}

/// Reducer for the todo list
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Draws ids until one is not already in `state`
    ///
    /// Sequential ids never collide; random or scripted generators might.
    fn fresh_id(state: &Snapshot, env: &TodoEnvironment) -> TodoId {
        loop {
            let id = TodoId::new(env.ids.next_id());
            if !state.contains(id) {
                return id;
            }
            tracing::warn!(%id, "Generated id already in use, drawing another");
        }
    }

    /// Copy-on-write update of the todo matching `id`
    fn update(
        state: &Snapshot,
        id: TodoId,
        change: impl FnOnce(&Todo) -> Todo,
    ) -> Transition<Snapshot> {
        match state.position(id) {
            Some(index) => {
                let updated = change(&state.as_slice()[index]);
                Transition::Changed(state.replaced(index, updated))
            },
            None => Transition::Unchanged,
        }
    }
}

impl Reducer for TodoReducer {
    type State = Snapshot;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Transition<Self::State> {
        match action {
            TodoAction::Add { text } => {
                if is_blank(&text) {
                    return Transition::Unchanged;
                }
                let id = Self::fresh_id(state, env);
                tracing::debug!(%id, "Adding todo");
                Transition::Changed(state.appended(Todo::new(id, text)))
            },

            TodoAction::ToggleLiked { id } => Self::update(state, id, Todo::with_liked_toggled),

            TodoAction::ToggleSaved { id } => Self::update(state, id, Todo::with_saved_toggled),

            TodoAction::Remove { id } => match state.position(id) {
                Some(index) => Transition::Changed(state.without(index)),
                None => Transition::Unchanged,
            },
        }
    }
}

/// Pure `(snapshot, action) → snapshot`
///
/// Returns `snapshot` itself (same value, see [`Snapshot::ptr_eq`]) when the
/// action is a no-op, and a new snapshot otherwise.
#[must_use]
pub fn apply(snapshot: &Snapshot, action: TodoAction, env: &TodoEnvironment) -> Snapshot {
    TodoReducer.reduce(snapshot, action, env).resolve(snapshot)
}
