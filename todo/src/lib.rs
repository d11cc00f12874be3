//! # Todo
//!
//! A liked/saved todo list built on the todo store reducer architecture.
//!
//! This crate showcases:
//! - Immutable snapshots shared by reference counting
//! - A total reducer: blank text and unknown ids are no-ops, never errors
//! - Pluggable id generation (sequential or random) injected through the
//!   environment
//! - Both a single-owner [`TodoStore`] and a queued [`SharedTodoStore`]
//!
//! ## Architecture
//!
//! The todo list is a **pure state machine**:
//! - Every operation maps `(snapshot, action)` to a snapshot
//! - A no-op hands back the very same snapshot, so views can skip
//!   re-rendering with [`Snapshot::ptr_eq`]
//! - Counts are derived on read, never stored
//!
//! ## Example
//!
//! ```
//! use todo::{TodoStore, liked_count};
//!
//! let mut store = TodoStore::new();
//! store.add("buy milk");
//! let snapshot = store.add("walk dog");
//!
//! let first = snapshot.as_slice()[0].id;
//! let snapshot = store.toggle_liked(first);
//! assert_eq!(liked_count(&snapshot), 1);
//! ```

pub mod cli;
pub mod config;
pub mod reducer;
pub mod store;
pub mod types;

pub use config::{Config, ConfigError, IdStrategy};
pub use reducer::{TodoEnvironment, TodoReducer, apply};
pub use store::{SharedTodoStore, TodoStore, liked_count, saved_count, shared_store};
pub use types::{Snapshot, SnapshotError, Todo, TodoAction, TodoId};
