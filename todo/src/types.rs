//! Domain types for the todo list.
//!
//! A todo list is an ordered sequence of records, each carrying two
//! independent flags. The list is only ever observed through [`Snapshot`]
//! values, which are never modified once built: every change produces a new
//! snapshot and leaves older ones intact.

use serde::{Deserialize, Serialize, Serializer};
use std::sync::Arc;
use thiserror::Error;
use todo_store_macros::Action;

/// Unique identifier for a todo item
///
/// Assigned when the item is added and never reused within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// Wraps a raw identifier
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique identifier
    pub id: TodoId,
    /// Text of the todo, as entered
    pub value: String,
    /// Whether the todo is liked
    pub is_liked: bool,
    /// Whether the todo is saved
    pub is_saved: bool,
}

impl Todo {
    /// Creates a new todo with both flags unset
    #[must_use]
    pub const fn new(id: TodoId, value: String) -> Self {
        Self {
            id,
            value,
            is_liked: false,
            is_saved: false,
        }
    }

    /// Copy of this todo with `is_liked` inverted
    #[must_use]
    pub fn with_liked_toggled(&self) -> Self {
        Self {
            is_liked: !self.is_liked,
            ..self.clone()
        }
    }

    /// Copy of this todo with `is_saved` inverted
    #[must_use]
    pub fn with_saved_toggled(&self) -> Self {
        Self {
            is_saved: !self.is_saved,
            ..self.clone()
        }
    }
}

/// Errors building a snapshot from untrusted records
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Two records share an id
    #[error("Duplicate todo id {0}")]
    DuplicateId(TodoId),
}

/// Immutable, ordered view of the todo list at one point in time
///
/// Order is insertion order; display numbering is position + 1. All ids are
/// pairwise distinct.
///
/// Cloning is cheap (reference counted). Equality compares content; use
/// [`Snapshot::ptr_eq`] to ask whether two snapshots are the same value.
#[derive(Clone, Debug, Deserialize)]
#[serde(try_from = "Vec<Todo>")]
pub struct Snapshot {
    todos: Arc<[Todo]>,
}

impl Snapshot {
    /// Creates an empty snapshot
    #[must_use]
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Wraps records already known to have distinct ids
    pub(crate) fn from_vec(todos: Vec<Todo>) -> Self {
        Self {
            todos: Arc::from(todos),
        }
    }

    /// Returns the number of todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.todos.len()
    }

    /// Returns true if there are no todos
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Iterates over the todos in display order
    pub fn iter(&self) -> std::slice::Iter<'_, Todo> {
        self.todos.iter()
    }

    /// The todos as a slice, in display order
    #[must_use]
    pub fn as_slice(&self) -> &[Todo] {
        &self.todos
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// Returns the zero-based position of a todo
    #[must_use]
    pub fn position(&self, id: TodoId) -> Option<usize> {
        self.todos.iter().position(|todo| todo.id == id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn contains(&self, id: TodoId) -> bool {
        self.position(id).is_some()
    }

    /// Iterates over the ids in display order
    pub fn ids(&self) -> impl Iterator<Item = TodoId> + '_ {
        self.todos.iter().map(|todo| todo.id)
    }

    /// Returns the number of liked todos
    ///
    /// Recomputed on every call.
    #[must_use]
    pub fn liked_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.is_liked).count()
    }

    /// Returns the number of saved todos
    ///
    /// Recomputed on every call.
    #[must_use]
    pub fn saved_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.is_saved).count()
    }

    /// Returns true if both snapshots are the very same value
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.todos, &b.todos)
    }

    /// New snapshot with `todo` appended
    pub(crate) fn appended(&self, todo: Todo) -> Self {
        let mut todos = Vec::with_capacity(self.todos.len() + 1);
        todos.extend_from_slice(&self.todos);
        todos.push(todo);
        Self::from_vec(todos)
    }

    /// New snapshot with the todo at `index` swapped for `todo`
    pub(crate) fn replaced(&self, index: usize, todo: Todo) -> Self {
        let mut todos = self.todos.to_vec();
        todos[index] = todo;
        Self::from_vec(todos)
    }

    /// New snapshot without the todo at `index`
    pub(crate) fn without(&self, index: usize) -> Self {
        let mut todos = self.todos.to_vec();
        todos.remove(index);
        Self::from_vec(todos)
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.todos[..] == other.todos[..]
    }
}

impl Eq for Snapshot {}

impl TryFrom<Vec<Todo>> for Snapshot {
    type Error = SnapshotError;

    fn try_from(todos: Vec<Todo>) -> Result<Self, Self::Error> {
        let mut seen = std::collections::HashSet::with_capacity(todos.len());
        if let Some(duplicate) = todos.iter().find(|todo| !seen.insert(todo.id)) {
            return Err(SnapshotError::DuplicateId(duplicate.id));
        }
        Ok(Self::from_vec(todos))
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.todos.iter())
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Todo;
    type IntoIter = std::slice::Iter<'a, Todo>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Every operation the todo list accepts
///
/// The serialized form is tagged by `type` (`add`, `toggle_liked`,
/// `toggle_saved`, `remove`).
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TodoAction {
    /// Append a new todo; ignored if `text` is blank
    Add {
        /// Text of the todo
        text: String,
    },

    /// Invert `is_liked` on one todo; ignored for unknown ids
    ToggleLiked {
        /// Todo to toggle
        id: TodoId,
    },

    /// Invert `is_saved` on one todo; ignored for unknown ids
    ToggleSaved {
        /// Todo to toggle
        id: TodoId,
    },

    /// Delete one todo; ignored for unknown ids
    Remove {
        /// Todo to delete
        id: TodoId,
    },
}

impl TodoAction {
    /// Shorthand for [`TodoAction::Add`]
    #[must_use]
    pub fn add(text: impl Into<String>) -> Self {
        Self::Add { text: text.into() }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;

    fn sample() -> Snapshot {
        Snapshot::from_vec(vec![
            Todo::new(TodoId::new(1), "a".to_string()),
            Todo::new(TodoId::new(2), "b".to_string()).with_liked_toggled(),
            Todo::new(TodoId::new(3), "c".to_string())
                .with_liked_toggled()
                .with_saved_toggled(),
        ])
    }

    #[test]
    fn todo_id_display() {
        assert_eq!(TodoId::new(42).to_string(), "42");
    }

    #[test]
    fn todo_new_has_flags_unset() {
        let todo = Todo::new(TodoId::new(1), "Test todo".to_string());
        assert_eq!(todo.id, TodoId::new(1));
        assert_eq!(todo.value, "Test todo");
        assert!(!todo.is_liked);
        assert!(!todo.is_saved);
    }

    #[test]
    fn toggles_flip_one_flag_and_copy() {
        let todo = Todo::new(TodoId::new(1), "Test".to_string());
        let liked = todo.with_liked_toggled();

        assert!(liked.is_liked);
        assert!(!liked.is_saved);
        assert!(!todo.is_liked, "original is untouched");

        let saved = liked.with_saved_toggled();
        assert!(saved.is_liked && saved.is_saved);
        assert_eq!(saved.with_liked_toggled().with_saved_toggled(), todo);
    }

    #[test]
    fn snapshot_queries() {
        let snapshot = sample();
        assert_eq!(snapshot.len(), 3);
        assert!(!snapshot.is_empty());
        assert_eq!(snapshot.liked_count(), 2);
        assert_eq!(snapshot.saved_count(), 1);
        assert_eq!(snapshot.position(TodoId::new(3)), Some(2));
        assert_eq!(snapshot.get(TodoId::new(2)).map(|t| t.value.as_str()), Some("b"));
        assert!(!snapshot.contains(TodoId::new(9)));
        assert_eq!(
            snapshot.ids().collect::<Vec<_>>(),
            vec![TodoId::new(1), TodoId::new(2), TodoId::new(3)]
        );
    }

    #[test]
    fn snapshot_builders_leave_original_alone() {
        let original = sample();

        let appended = original.appended(Todo::new(TodoId::new(4), "d".to_string()));
        let replaced = original.replaced(0, original.as_slice()[0].with_saved_toggled());
        let removed = original.without(1);

        assert_eq!(original, sample());
        assert_eq!(appended.len(), 4);
        assert!(replaced.as_slice()[0].is_saved);
        assert_eq!(
            removed.ids().collect::<Vec<_>>(),
            vec![TodoId::new(1), TodoId::new(3)]
        );
    }

    #[test]
    fn snapshot_equality_is_by_content() {
        let a = sample();
        let b = sample();
        assert_eq!(a, b);
        assert!(!Snapshot::ptr_eq(&a, &b));
        assert!(Snapshot::ptr_eq(&a, &a.clone()));
    }

    #[test]
    fn snapshot_json_uses_original_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            json[2],
            serde_json::json!({"id": 3, "value": "c", "isLiked": true, "isSaved": true})
        );

        let back: Snapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn snapshot_rejects_duplicate_ids() {
        let todos = vec![
            Todo::new(TodoId::new(1), "a".to_string()),
            Todo::new(TodoId::new(1), "b".to_string()),
        ];
        assert_eq!(
            Snapshot::try_from(todos),
            Err(SnapshotError::DuplicateId(TodoId::new(1)))
        );

        let json = r#"[{"id":5,"value":"x","isLiked":false,"isSaved":false},
                       {"id":5,"value":"y","isLiked":false,"isSaved":false}]"#;
        assert!(serde_json::from_str::<Snapshot>(json).is_err());
    }

    #[test]
    fn action_names() {
        assert_eq!(TodoAction::add("x").name(), "add");
        assert_eq!(TodoAction::ToggleLiked { id: TodoId::new(1) }.name(), "toggle_liked");
        assert_eq!(TodoAction::ToggleSaved { id: TodoId::new(1) }.name(), "toggle_saved");
        assert_eq!(TodoAction::Remove { id: TodoId::new(1) }.name(), "remove");
    }

    #[test]
    fn action_json_is_tagged() {
        let json = serde_json::to_value(TodoAction::ToggleSaved { id: TodoId::new(7) }).unwrap();
        assert_eq!(json, serde_json::json!({"type": "toggle_saved", "id": 7}));
    }
}
