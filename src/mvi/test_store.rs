//! Deterministic harness for asserting reducer and effect behavior.
//!
//! Unlike [`Store`](super::Store), a `TestStore` reduces on the caller's
//! task: `send` applies an action immediately, and actions produced by
//! effects wait in a queue until the test explicitly `receive`s them.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use super::cancel::CancelToken;
use super::effect::Deliver;
use super::engine::EffectRuntime;
use super::reducer::Reducer;

type Received<A> = mpsc::UnboundedReceiver<(A, Option<CancelToken>)>;

pub struct TestStore<R: Reducer> {
    reducer: R,
    state: R::State,
    effects: EffectRuntime,
    deliver: Deliver<R::Action>,
    received: Received<R::Action>,
    timeout: Duration,
}

impl<R: Reducer> TestStore<R> {
    pub fn new(initial: R::State, reducer: R) -> Self {
        let (tx, received) = mpsc::unbounded_channel();
        let deliver: Deliver<R::Action> = Arc::new(move |action: R::Action, token: Option<CancelToken>| {
            let _ = tx.send((action, token));
        });
        Self {
            reducer,
            state: initial,
            effects: EffectRuntime::new(),
            deliver,
            received,
            timeout: Duration::from_secs(1),
        }
    }

    /// How long [`TestStore::receive`] waits for an effect action.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn state(&self) -> &R::State {
        &self.state
    }

    pub fn effects(&self) -> &EffectRuntime {
        &self.effects
    }

    /// Reduce `action` and assert the state equals the current state with
    /// `update` applied.
    #[track_caller]
    pub fn send(&mut self, action: R::Action, update: impl FnOnce(&mut R::State)) {
        let mut expected = self.state.clone();
        update(&mut expected);
        let description = format!("{action:?}");
        let effect = self.reducer.reduce(&mut self.state, action);
        assert_eq!(
            self.state, expected,
            "state after sending {description} does not match expectation"
        );
        self.effects.launch(effect, &self.deliver);
    }

    /// Wait for the next live effect action, assert it equals `expected`,
    /// reduce it and assert the resulting state.
    pub async fn receive(&mut self, expected: R::Action, update: impl FnOnce(&mut R::State))
    where
        R::Action: PartialEq,
    {
        let Some(action) = self.next_live().await else {
            panic!("expected to receive {expected:?}, but no action arrived within {:?}", self.timeout);
        };
        assert_eq!(action, expected, "received an unexpected action");

        let mut state = self.state.clone();
        update(&mut state);
        let effect = self.reducer.reduce(&mut self.state, action);
        assert_eq!(
            self.state, state,
            "state after receiving {expected:?} does not match expectation"
        );
        self.effects.launch(effect, &self.deliver);
    }

    /// Reduce the next `count` live effect actions without asserting on them.
    pub async fn skip_received(&mut self, count: usize) {
        for skipped in 0..count {
            let Some(action) = self.next_live().await else {
                panic!("expected {count} actions to skip, only {skipped} arrived");
            };
            let effect = self.reducer.reduce(&mut self.state, action);
            self.effects.launch(effect, &self.deliver);
        }
    }

    /// Assert that every effect action was received and every effect finished.
    pub async fn finish(mut self) {
        let wait = async {
            while self.effects.in_flight() > 0 {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        };
        let settled = tokio::time::timeout(self.timeout, wait).await.is_ok();

        let mut unreceived = Vec::new();
        while let Ok((action, token)) = self.received.try_recv() {
            if !token.is_some_and(|t| t.is_cancelled()) {
                unreceived.push(format!("{action:?}"));
            }
        }
        assert!(
            unreceived.is_empty(),
            "test store finished with unreceived actions: {unreceived:?}"
        );
        assert!(
            settled,
            "test store finished with {} effect(s) still in flight",
            self.effects.in_flight()
        );
    }

    async fn next_live(&mut self) -> Option<R::Action> {
        let received = &mut self.received;
        let wait = async {
            loop {
                let (action, token) = received.recv().await?;
                match token {
                    Some(token) if token.is_cancelled() => {
                        tracing::trace!(action = ?action, "skipping action from cancelled effect");
                    }
                    _ => return Some(action),
                }
            }
        };
        tokio::time::timeout(self.timeout, wait).await.ok().flatten()
    }
}

impl<R: Reducer> Drop for TestStore<R> {
    fn drop(&mut self) {
        self.effects.cancel_all();
    }
}
