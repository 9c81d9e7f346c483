//! Shared test utilities and fake capabilities.

#![allow(dead_code, unused_imports)]

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use parking_lot::Mutex;

use newtca::capabilities::{Environment, FactClient, FactError, ManualClock};
use newtca::mvi::BoxFuture;

pub const FACT: &str = "42 is the answer";

/// Answers every request with [`FACT`] and records the requested numbers.
#[derive(Clone, Default)]
pub struct FixedFacts {
    pub requests: Arc<Mutex<Vec<i64>>>,
}

impl FactClient for FixedFacts {
    fn fetch(&self, number: i64) -> BoxFuture<Result<String, FactError>> {
        self.requests.lock().push(number);
        Box::pin(async { Ok(FACT.to_string()) })
    }
}

/// Always fails with a 500.
pub struct FailingFacts;

impl FactClient for FailingFacts {
    fn fetch(&self, _number: i64) -> BoxFuture<Result<String, FactError>> {
        Box::pin(async { Err(FactError::Status(500)) })
    }
}

/// Never answers. `dropped` flips once a request future is dropped.
#[derive(Clone, Default)]
pub struct PendingFacts {
    pub dropped: Arc<AtomicBool>,
}

impl PendingFacts {
    pub fn was_dropped(&self) -> bool {
        self.dropped.load(Ordering::SeqCst)
    }
}

struct DropProbe(Arc<AtomicBool>);

impl Drop for DropProbe {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

struct Forever(DropProbe);

impl Future for Forever {
    type Output = Result<String, FactError>;

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        Poll::Pending
    }
}

impl FactClient for PendingFacts {
    fn fetch(&self, _number: i64) -> BoxFuture<Result<String, FactError>> {
        Box::pin(Forever(DropProbe(Arc::clone(&self.dropped))))
    }
}

/// Environment with the given fact client and a hand-driven clock.
pub fn manual_env(facts: impl FactClient) -> (Environment, ManualClock) {
    let clock = ManualClock::new();
    let env = Environment::new(Arc::new(facts), Arc::new(clock.clone()), Duration::from_secs(1));
    (env, clock)
}

/// Yield until `done` holds, giving spawned effects a chance to run.
pub async fn settle(mut done: impl FnMut() -> bool) {
    for _ in 0..100 {
        if done() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition did not hold after yielding");
}
