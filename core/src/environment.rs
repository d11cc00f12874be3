//! Environment module - Dependency injection traits
//!
//! All sources of non-determinism a reducer needs are abstracted behind traits
//! and injected via the Environment parameter. For the todo domain that is
//! only identifier generation.

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// `IdGenerator` trait - abstracts identifier generation for testability
///
/// Implementations must never hand out the same value twice within a session.
/// Time-based schemes are not acceptable: two requests within the same clock
/// tick would collide.
///
/// # Examples
///
/// ```
/// use todo_store_core::environment::{IdGenerator, SequentialIdGenerator};
///
/// let ids = SequentialIdGenerator::new();
/// assert_eq!(ids.next_id(), 1);
/// assert_eq!(ids.next_id(), 2);
/// ```
pub trait IdGenerator: Send + Sync {
    /// Produce the next identifier
    fn next_id(&self) -> u64;
}

/// Monotonic counter - the default generator
///
/// Starts at 1 and increases by one per call. Wraps only after `u64::MAX`
/// calls, which is not reachable in a session.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    /// Create a generator whose first id is 1
    #[must_use]
    pub const fn new() -> Self {
        Self::starting_at(1)
    }

    /// Create a generator whose first id is `first`
    #[must_use]
    pub const fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

/// Random 64-bit ids taken from a UUID v4
///
/// Collisions are astronomically unlikely but not impossible, so consumers
/// that require uniqueness must still check against the ids already in use.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> u64 {
        let (high, low) = Uuid::new_v4().as_u64_pair();
        high ^ low
    }
}
