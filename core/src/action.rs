//! Action module - Unified input type for reducers
//!
//! Actions represent every state transition a reducer understands. The
//! runtime only needs one thing from them: a stable name to put in log
//! fields and metric labels. `#[derive(Action)]` from `todo-store-macros`
//! implements this trait.

/// A reducer input with a stable, human-readable name
pub trait Action {
    /// Returns the stable name of this action (e.g. `"toggle_liked"`)
    fn name(&self) -> &'static str;
}
