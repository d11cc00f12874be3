//! # Todo Store Core
//!
//! Core traits and types for the todo store reducer architecture.
//!
//! ## Core Concepts
//!
//! - **State**: An immutable value describing the domain at one point in time
//! - **Action**: Every input the reducer accepts, as a tagged enum
//! - **Reducer**: Pure function `(State, Action, Environment) → Transition<State>`
//! - **Transition**: Either `Unchanged` (a defined no-op) or `Changed(next)`
//! - **Environment**: Injected dependencies, here only identifier generation
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Previous states are never mutated; a change produces a new value
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```ignore
//! use todo_store_core::reducer::{Reducer, Transition};
//!
//! impl Reducer for TodoReducer {
//!     type State = Snapshot;
//!     type Action = TodoAction;
//!     type Environment = TodoEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &Snapshot,
//!         action: TodoAction,
//!         env: &TodoEnvironment,
//!     ) -> Transition<Snapshot> {
//!         // Business logic goes here
//!         Transition::Unchanged
//!     }
//! }
//! ```

pub mod action;
pub mod environment;
pub mod reducer;

// Re-export commonly used types
pub use action::Action;
pub use environment::{IdGenerator, RandomIdGenerator, SequentialIdGenerator};
pub use reducer::{Reducer, Transition};
