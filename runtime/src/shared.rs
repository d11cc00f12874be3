//! Single-writer store shared between tasks.
//!
//! Every [`SharedStore`] handle feeds one bounded queue. A spawned writer task
//! owns the state, pops actions in arrival order and runs them through the
//! reducer, so concurrent callers never interleave inside a transition. The
//! latest state is published on a `watch` channel: readers and subscribers
//! never touch the queue.

use crate::{StoreConfig, StoreError, metrics, reduce_into};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use todo_store_core::{action::Action, reducer::Reducer};
use tokio::sync::{mpsc, oneshot, watch};

/// Work item for the writer task
enum Command<A, S> {
    /// Apply an action and reply with the resulting state
    Send {
        action: A,
        reply: oneshot::Sender<Result<S, StoreError>>,
    },
    /// Close the queue, then reply once everything queued before it has been
    /// applied. `Send`s that arrive later are rejected.
    Close { reply: oneshot::Sender<()> },
}

/// Cloneable handle to a single-writer store
///
/// # Example
///
/// ```ignore
/// let store = SharedStore::new(Snapshot::default(), TodoReducer::new(), env);
///
/// let window = store.clone();
/// tokio::spawn(async move {
///     window.send(TodoAction::Add { text: "Walk dog".into() }).await
/// });
///
/// let mut updates = store.subscribe();
/// updates.changed().await?;
/// ```
pub struct SharedStore<R>
where
    R: Reducer,
{
    queue: mpsc::Sender<Command<R::Action, R::State>>,
    latest: watch::Receiver<R::State>,
    shutdown: Arc<AtomicBool>,
}

impl<R> SharedStore<R>
where
    R: Reducer + Send + 'static,
    R::Action: Action + Send + 'static,
    R::State: Clone + Send + Sync + 'static,
    R::Environment: Send + 'static,
{
    /// Create a store with the default [`StoreConfig`] and spawn its writer
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    #[must_use]
    pub fn new(initial_state: R::State, reducer: R, environment: R::Environment) -> Self {
        Self::with_config(initial_state, reducer, environment, StoreConfig::default())
    }

    /// Create a store with custom configuration and spawn its writer
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    #[must_use]
    pub fn with_config(
        initial_state: R::State,
        reducer: R,
        environment: R::Environment,
        config: StoreConfig,
    ) -> Self {
        let capacity = config.effective_queue_capacity();
        let (queue, inbox) = mpsc::channel(capacity);
        let (publisher, latest) = watch::channel(initial_state.clone());

        tracing::debug!(queue_capacity = capacity, "Spawning store writer");
        tokio::spawn(run_writer(initial_state, reducer, environment, inbox, publisher));

        Self {
            queue,
            latest,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Send an action and wait for the state it produced
    ///
    /// Actions from all handles are applied one at a time in the order they
    /// reach the queue. The returned state is the one right after this
    /// action, even if other actions have been applied since.
    ///
    /// # Errors
    ///
    /// - [`StoreError::ShutdownInProgress`] after [`SharedStore::shutdown`]
    /// - [`StoreError::ChannelClosed`] if the writer task is gone
    #[tracing::instrument(skip_all, name = "store_send", fields(action = action.name()))]
    pub async fn send(&self, action: R::Action) -> Result<R::State, StoreError> {
        if self.shutdown.load(Ordering::Acquire) {
            tracing::warn!("Rejected action: store is shutting down");
            ::metrics::counter!(metrics::REJECTED_TOTAL).increment(1);
            return Err(StoreError::ShutdownInProgress);
        }

        let (reply, result) = oneshot::channel();
        self.queue
            .send(Command::Send { action, reply })
            .await
            .map_err(|_| StoreError::ChannelClosed)?;
        self.record_queue_depth();

        result.await.map_err(|_| StoreError::ChannelClosed)?
    }

    /// Stop accepting actions and wait for queued ones to be applied
    ///
    /// Sends issued after this call fail with
    /// [`StoreError::ShutdownInProgress`]. Calling it twice is harmless.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ChannelClosed`] if the writer task is gone.
    pub async fn shutdown(&self) -> Result<(), StoreError> {
        tracing::info!("Initiating store shutdown");
        self.shutdown.store(true, Ordering::Release);

        let (reply, drained) = oneshot::channel();
        self.queue
            .send(Command::Close { reply })
            .await
            .map_err(|_| StoreError::ChannelClosed)?;
        drained.await.map_err(|_| StoreError::ChannelClosed)?;

        tracing::info!("Store queue drained");
        Ok(())
    }

    /// Returns true once [`SharedStore::shutdown`] has been called
    #[must_use]
    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    /// Read the latest published state via a closure
    ///
    /// ```ignore
    /// let liked = store.state(|s| s.liked_count());
    /// ```
    pub fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&R::State) -> T,
    {
        f(&*self.latest.borrow())
    }

    /// Subscribe to state changes
    ///
    /// The receiver is woken only when an action actually changes the state;
    /// no-ops are not published.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<R::State> {
        self.latest.clone()
    }

    fn record_queue_depth(&self) {
        let depth = self.queue.max_capacity() - self.queue.capacity();
        #[allow(clippy::cast_precision_loss)] // queue depths are tiny
        ::metrics::gauge!(metrics::QUEUE_DEPTH).set(depth as f64);
    }
}

impl<R> Clone for SharedStore<R>
where
    R: Reducer,
{
    fn clone(&self) -> Self {
        Self {
            queue: self.queue.clone(),
            latest: self.latest.clone(),
            shutdown: Arc::clone(&self.shutdown),
        }
    }
}

/// The writer loop: sole owner of the state
///
/// Exits when every [`SharedStore`] handle has been dropped.
async fn run_writer<R>(
    mut state: R::State,
    reducer: R,
    environment: R::Environment,
    mut inbox: mpsc::Receiver<Command<R::Action, R::State>>,
    publisher: watch::Sender<R::State>,
) where
    R: Reducer,
    R::Action: Action,
    R::State: Clone,
{
    let mut closed = false;

    while let Some(command) = inbox.recv().await {
        match command {
            // Raced past the shutdown flag and landed behind `Close`
            Command::Send { action, reply } if closed => {
                tracing::warn!(action = action.name(), "Rejected action queued after shutdown");
                ::metrics::counter!(metrics::REJECTED_TOTAL).increment(1);
                let _ = reply.send(Err(StoreError::ShutdownInProgress));
            },
            Command::Send { action, reply } => {
                if reduce_into(&reducer, &mut state, action, &environment) {
                    publisher.send_replace(state.clone());
                }
                // The caller may have given up waiting; the action still counts.
                let _ = reply.send(Ok(state.clone()));
            },
            Command::Close { reply } => {
                closed = true;
                let _ = reply.send(());
            },
        }
    }

    tracing::debug!("Store writer stopped");
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use todo_store_core::reducer::Transition;
    use todo_store_macros::Action;

    #[derive(Debug, Clone, Action)]
    enum Tally {
        Add(u32),
        Nothing,
    }

    #[derive(Clone)]
    struct TallyReducer;

    impl Reducer for TallyReducer {
        type State = Vec<u32>;
        type Action = Tally;
        type Environment = ();

        fn reduce(&self, state: &Vec<u32>, action: Tally, _env: &()) -> Transition<Vec<u32>> {
            match action {
                Tally::Add(n) => {
                    let mut next = state.clone();
                    next.push(n);
                    Transition::Changed(next)
                },
                Tally::Nothing => Transition::Unchanged,
            }
        }
    }

    #[tokio::test]
    async fn send_returns_state_after_action() {
        let store = SharedStore::new(Vec::new(), TallyReducer, ());

        assert_eq!(store.send(Tally::Add(1)).await.unwrap(), vec![1]);
        assert_eq!(store.send(Tally::Add(2)).await.unwrap(), vec![1, 2]);
        assert_eq!(store.state(Vec::len), 2);
    }

    #[tokio::test]
    async fn subscribers_skip_noops() {
        let store = SharedStore::new(Vec::new(), TallyReducer, ());
        let mut updates = store.subscribe();

        store.send(Tally::Nothing).await.unwrap();
        assert!(!updates.has_changed().unwrap());

        store.send(Tally::Add(7)).await.unwrap();
        assert!(updates.has_changed().unwrap());
        assert_eq!(*updates.borrow_and_update(), vec![7]);
    }

    #[tokio::test]
    async fn shutdown_rejects_new_actions() {
        let store = SharedStore::new(Vec::new(), TallyReducer, ());
        store.send(Tally::Add(1)).await.unwrap();

        store.shutdown().await.unwrap();
        assert!(store.is_shutting_down());

        let result = store.send(Tally::Add(2)).await;
        assert_eq!(result, Err(StoreError::ShutdownInProgress));
        assert_eq!(store.state(Clone::clone), vec![1]);
    }

    #[tokio::test]
    async fn send_queued_behind_close_is_rejected() {
        let store = SharedStore::new(Vec::new(), TallyReducer, ());
        store.send(Tally::Add(1)).await.unwrap();
        store.shutdown().await.unwrap();

        // Enqueue directly, as a sender that read the flag just before shutdown would
        let (reply, result) = oneshot::channel();
        store
            .queue
            .send(Command::Send {
                action: Tally::Add(2),
                reply,
            })
            .await
            .unwrap();

        assert_eq!(result.await.unwrap(), Err(StoreError::ShutdownInProgress));
        assert_eq!(store.state(Clone::clone), vec![1]);
    }

    #[tokio::test]
    async fn zero_capacity_queue_still_works() {
        let store = SharedStore::with_config(
            Vec::new(),
            TallyReducer,
            (),
            StoreConfig::default().with_queue_capacity(0),
        );
        assert_eq!(store.send(Tally::Add(3)).await.unwrap(), vec![3]);
    }
}
