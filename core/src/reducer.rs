//! Reducer module - The core trait for business logic
//!
//! Reducers are pure functions: `(State, Action, Environment) → Transition<State>`
//!
//! They never mutate the state they are given. A reducer either reports that
//! the action was a defined no-op, or hands back a brand new state value.

/// Outcome of reducing a single action
///
/// `Unchanged` is a legitimate result, not a failure: unknown identifiers and
/// rejected input resolve to it so callers can keep the previous state value
/// as-is (and observers can skip re-rendering).
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Transition<S> {
    /// The action did not change anything
    Unchanged,

    /// The action produced a new state
    Changed(S),
}

impl<S> Transition<S> {
    /// Returns true if the action produced a new state
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        matches!(self, Self::Changed(_))
    }

    /// Returns true if the action was a no-op
    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// Replace `current` with the new state, if any
    ///
    /// Returns whether `current` was replaced.
    pub fn apply(self, current: &mut S) -> bool {
        match self {
            Self::Changed(next) => {
                *current = next;
                true
            },
            Self::Unchanged => false,
        }
    }

    /// Resolve to the state that should be observed after this transition
    ///
    /// For a no-op this is a clone of `current`, so callers that keep cheap
    /// reference-counted states get the very same value back.
    pub fn resolve(self, current: &S) -> S
    where
        S: Clone,
    {
        match self {
            Self::Changed(next) => next,
            Self::Unchanged => current.clone(),
        }
    }
}

/// The Reducer trait - core abstraction for business logic
///
/// # Type Parameters
///
/// - `State`: The domain state this reducer operates on
/// - `Action`: The action type this reducer processes
/// - `Environment`: The injected dependencies this reducer needs
///
/// # Example
///
/// ```ignore
/// impl Reducer for TodoReducer {
///     type State = Snapshot;
///     type Action = TodoAction;
///     type Environment = TodoEnvironment;
///
///     fn reduce(
///         &self,
///         state: &Snapshot,
///         action: TodoAction,
///         env: &TodoEnvironment,
///     ) -> Transition<Snapshot> {
///         match action {
///             TodoAction::Remove { id } => match state.position(id) {
///                 Some(index) => Transition::Changed(state.without(index)),
///                 None => Transition::Unchanged,
///             },
///             _ => Transition::Unchanged,
///         }
///     }
/// }
/// ```
pub trait Reducer {
    /// The state type this reducer operates on
    type State;

    /// The action type this reducer processes
    type Action;

    /// The environment type with injected dependencies
    type Environment;

    /// Reduce an action against the current state
    ///
    /// This is a pure function that:
    /// 1. Decides whether the action applies to `state`
    /// 2. Builds the next state without touching `state`
    ///
    /// # Arguments
    ///
    /// - `state`: The current state (read-only)
    /// - `action`: The action to process
    /// - `env`: Reference to injected dependencies
    ///
    /// # Returns
    ///
    /// [`Transition::Changed`] with the next state, or [`Transition::Unchanged`]
    fn reduce(
        &self,
        state: &Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Transition<Self::State>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy)]
    enum Step {
        Bump,
        Hold,
    }

    struct Doubler;

    impl Reducer for Doubler {
        type State = u32;
        type Action = Step;
        type Environment = ();

        fn reduce(&self, state: &u32, action: Step, _env: &()) -> Transition<u32> {
            match action {
                Step::Bump => Transition::Changed(state * 2),
                Step::Hold => Transition::Unchanged,
            }
        }
    }

    #[test]
    fn apply_replaces_only_on_change() {
        let mut state = 3;

        assert!(Doubler.reduce(&state, Step::Bump, &()).apply(&mut state));
        assert_eq!(state, 6);

        assert!(!Doubler.reduce(&state, Step::Hold, &()).apply(&mut state));
        assert_eq!(state, 6);
    }

    #[test]
    fn resolve_falls_back_to_current() {
        let unchanged: Transition<u32> = Transition::Unchanged;
        assert!(unchanged.is_unchanged());
        assert_eq!(unchanged.resolve(&7), 7);

        let changed = Transition::Changed(9);
        assert!(changed.is_changed());
        assert_eq!(changed.resolve(&7), 9);
    }
}
