//! Effect runtime: spawns effect work on tokio and tracks it for cancellation.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use super::cancel::{CancelId, CancelToken, Registry};
use super::effect::{Deliver, Effect, EffectKind, Order, Sender};

/// Forgets a task's registration when the task ends, including by panic.
struct Completion {
    registry: Arc<Mutex<Registry>>,
    key: Option<CancelId>,
    seq: u64,
}

impl Drop for Completion {
    fn drop(&mut self) {
        self.registry.lock().complete(self.key.as_ref(), self.seq);
    }
}

/// Executes [`Effect`] descriptions and owns the cancellation registry.
///
/// Cheap to clone; clones share the registry.
#[derive(Clone, Default)]
pub struct EffectRuntime {
    registry: Arc<Mutex<Registry>>,
}

impl EffectRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Launch an effect. Cancellations and immediate actions are applied
    /// synchronously, in the order they appear; async work is spawned.
    pub(crate) fn launch<A: Send + 'static>(
        &self,
        effect: Effect<A>,
        deliver: &Deliver<A>,
    ) -> Vec<JoinHandle<()>> {
        let mut handles = Vec::new();
        self.launch_into(effect, deliver, None, &mut handles);
        handles
    }

    fn launch_into<A: Send + 'static>(
        &self,
        effect: Effect<A>,
        deliver: &Deliver<A>,
        parent: Option<&CancelToken>,
        handles: &mut Vec<JoinHandle<()>>,
    ) {
        match effect.into_kind() {
            EffectKind::None => {}
            EffectKind::Emit(action) => {
                if parent.is_some_and(CancelToken::is_cancelled) {
                    tracing::trace!("dropping immediate action from cancelled sequence");
                    return;
                }
                deliver(action, parent.cloned());
            }
            EffectKind::Cancel(key) => {
                if self.registry.lock().cancel(&key) {
                    tracing::debug!(key = %key, "effect cancelled");
                }
            }
            EffectKind::CancelUnder(prefix) => {
                let count = self.registry.lock().cancel_under(&prefix);
                if count > 0 {
                    tracing::debug!(scope = %prefix, count, "scoped effects cancelled");
                }
            }
            EffectKind::Merge(effects) => {
                for effect in effects {
                    self.launch_into(effect, deliver, parent, handles);
                }
            }
            EffectKind::Run { key, scope, work } => {
                let token = parent.map_or_else(CancelToken::new, CancelToken::child);
                let done = self.track(key, scope, &token);
                let future = work(Sender::new(Arc::clone(deliver), token.clone()));
                handles.push(tokio::spawn(async move {
                    tokio::select! {
                        biased;
                        _ = token.cancelled() => {
                            tracing::trace!(key = ?done.key.as_ref().map(ToString::to_string), "effect task stopped");
                        }
                        _ = future => {}
                    }
                    drop(done);
                }));
            }
            EffectKind::Group {
                key,
                scope,
                order: Order::Concurrent,
                effects,
            } => {
                let token = parent.map_or_else(CancelToken::new, CancelToken::child);
                let done = self.track(key, scope, &token);
                let mut members = Vec::new();
                for effect in effects {
                    self.launch_into(effect, deliver, Some(&token), &mut members);
                }
                handles.push(tokio::spawn(async move {
                    let all = async {
                        for handle in members {
                            let _ = handle.await;
                        }
                    };
                    tokio::select! {
                        biased;
                        _ = token.cancelled() => {}
                        _ = all => {}
                    }
                    drop(done);
                }));
            }
            EffectKind::Group {
                key,
                scope,
                order: Order::Sequential,
                effects,
            } => {
                let token = parent.map_or_else(CancelToken::new, CancelToken::child);
                let done = self.track(key, scope, &token);
                let runtime = self.clone();
                let deliver = Arc::clone(deliver);
                handles.push(tokio::spawn(async move {
                    let sequence = async {
                        for effect in effects {
                            if token.is_cancelled() {
                                break;
                            }
                            let mut step = Vec::new();
                            runtime.launch_into(effect, &deliver, Some(&token), &mut step);
                            for handle in step {
                                let _ = handle.await;
                            }
                        }
                    };
                    tokio::select! {
                        biased;
                        _ = token.cancelled() => {}
                        _ = sequence => {}
                    }
                    drop(done);
                }));
            }
        }
    }

    fn track(&self, key: Option<CancelId>, scope: CancelId, token: &CancelToken) -> Completion {
        let seq = self
            .registry
            .lock()
            .register(key.clone(), scope, token.clone());
        Completion {
            registry: Arc::clone(&self.registry),
            key,
            seq,
        }
    }

    /// Cancel the effect registered under `key`. Returns whether one was running.
    pub fn cancel(&self, key: &CancelId) -> bool {
        self.registry.lock().cancel(key)
    }

    /// Cancel every effect whose key or scope lies under `prefix`.
    pub fn cancel_under(&self, prefix: &CancelId) -> usize {
        self.registry.lock().cancel_under(prefix)
    }

    pub fn cancel_all(&self) -> usize {
        self.registry.lock().cancel_all()
    }

    /// Number of effect tasks that have neither finished nor been cancelled.
    pub fn in_flight(&self) -> usize {
        self.registry.lock().len()
    }

    pub fn is_running(&self, key: &CancelId) -> bool {
        self.registry.lock().contains(key)
    }
}
