//! Integration tests for action ordering in both stores
//!
//! Each handle's actions must be applied in the order it sent them, exactly
//! once, whatever the interleaving with other handles.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::sync::Arc;
use todo_store_core::reducer::{Reducer, Transition};
use todo_store_macros::Action;
use todo_store_runtime::{SharedStore, Store, StoreConfig, StoreError};
use todo_store_testing::{ReducerTest, assertions, helpers};
use tokio_test::{assert_err, assert_ok};

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone, Action)]
enum LogAction {
    /// Append an entry
    Push { from: u32, seq: u32 },
    /// Drop everything
    Clear,
}

#[derive(Clone)]
struct LogReducer;

impl Reducer for LogReducer {
    type State = Arc<Vec<(u32, u32)>>;
    type Action = LogAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> Transition<Self::State> {
        match action {
            LogAction::Push { from, seq } => {
                let mut next = state.as_ref().clone();
                next.push((from, seq));
                Transition::Changed(Arc::new(next))
            },
            LogAction::Clear if state.is_empty() => Transition::Unchanged,
            LogAction::Clear => Transition::Changed(Arc::new(Vec::new())),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn clear_on_empty_log_is_a_noop() {
    ReducerTest::new(LogReducer)
        .with_env(())
        .given_state(Arc::new(Vec::new()))
        .when_action(LogAction::Clear)
        .then_transition(assertions::assert_unchanged)
        .run();
}

#[test]
fn sync_store_keeps_state_value_on_noop() {
    let mut store = Store::new(Arc::new(Vec::new()), LogReducer, ());
    let before = Arc::clone(store.send(LogAction::Push { from: 0, seq: 0 }));

    store.send(LogAction::Push { from: 0, seq: 1 });
    store.send(LogAction::Clear);
    let after = Arc::clone(store.send(LogAction::Clear));

    assert!(after.is_empty());
    assert_eq!(before.as_slice(), [(0, 0)]);
    assert!(Arc::ptr_eq(&after, store.state()));
}

#[tokio::test]
async fn per_sender_order_is_preserved() {
    helpers::init_test_tracing();
    let store = SharedStore::with_config(
        Arc::new(Vec::new()),
        LogReducer,
        (),
        StoreConfig::default().with_queue_capacity(4),
    );

    let tasks: Vec<_> = (0..4)
        .map(|from| {
            let store = store.clone();
            tokio::spawn(async move {
                for seq in 0..50 {
                    assert_ok!(store.send(LogAction::Push { from, seq }).await);
                }
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    let log = store.state(|log| Arc::clone(log));
    assert_eq!(log.len(), 200);
    for from in 0..4 {
        let seqs: Vec<u32> = log
            .iter()
            .filter(|(f, _)| *f == from)
            .map(|(_, seq)| *seq)
            .collect();
        assert_eq!(seqs, (0..50).collect::<Vec<_>>());
    }
}

#[tokio::test]
async fn shutdown_drains_queued_actions_first() {
    let store = SharedStore::new(Arc::new(Vec::new()), LogReducer, ());
    let sender = store.clone();

    let pending = tokio::spawn(async move {
        for seq in 0..10 {
            let _ = sender.send(LogAction::Push { from: 1, seq }).await;
        }
    });
    pending.await.unwrap();

    assert_ok!(store.shutdown().await);
    let err = assert_err!(store.send(LogAction::Clear).await);
    assert_eq!(err, StoreError::ShutdownInProgress);
    assert_eq!(store.state(|log| log.len()), 10);
}
