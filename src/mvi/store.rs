//! Store: owns the root state and serializes every mutation.
//!
//! A single spawned task receives actions in order, runs the reducer,
//! publishes the new snapshot and launches the returned effect. Actions
//! produced by effects go back through the same queue.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use super::cancel::CancelToken;
use super::effect::Deliver;
use super::engine::EffectRuntime;
use super::error::StoreError;
use super::reducer::Reducer;

enum Message<A> {
    Action {
        action: A,
        token: Option<CancelToken>,
    },
    Shutdown(oneshot::Sender<()>),
}

type SendFn<A> = Arc<dyn Fn(A) -> Result<(), StoreError> + Send + Sync>;
type ReadFn<S> = Arc<dyn Fn() -> S + Send + Sync>;

/// Root store handle.
///
/// Must be created inside a tokio runtime. Dropping every handle (the store
/// and all scoped handles) stops the dispatch loop and cancels all effects.
pub struct Store<S, A> {
    handle: ScopedStore<S, A>,
    sender: mpsc::UnboundedSender<Message<A>>,
    effects: EffectRuntime,
    task: JoinHandle<()>,
}

impl<S, A> Store<S, A>
where
    S: Clone + PartialEq + Send + Sync + 'static,
    A: Send + 'static,
{
    pub fn new<R>(initial: S, reducer: R) -> Self
    where
        R: Reducer<State = S, Action = A>,
    {
        let (sender, receiver) = mpsc::unbounded_channel();
        let shared = Arc::new(RwLock::new(initial.clone()));
        let (version_tx, version_rx) = watch::channel(0u64);
        let effects = EffectRuntime::new();

        let weak = sender.downgrade();
        let deliver: Deliver<A> = Arc::new(move |action: A, token: Option<CancelToken>| match weak.upgrade() {
            Some(sender) => {
                if sender.send(Message::Action { action, token }).is_err() {
                    tracing::trace!("store closed, dropping effect action");
                }
            }
            None => tracing::trace!("store dropped, dropping effect action"),
        });

        let task = tokio::spawn(dispatch_loop(
            reducer,
            initial,
            Arc::clone(&shared),
            version_tx,
            receiver,
            effects.clone(),
            deliver,
        ));

        let send_tx = sender.clone();
        let handle = ScopedStore {
            send: Arc::new(move |action| {
                send_tx
                    .send(Message::Action {
                        action,
                        token: None,
                    })
                    .map_err(|_| StoreError::Closed)
            }),
            read: Arc::new(move || shared.read().clone()),
            version: version_rx,
        };

        tracing::info!("store started");
        Self {
            handle,
            sender,
            effects,
            task,
        }
    }

    /// Enqueue an action. Returns once it is queued, not once it is reduced.
    pub fn send(&self, action: A) -> Result<(), StoreError> {
        self.handle.send(action)
    }

    /// Latest published state snapshot.
    pub fn state(&self) -> S {
        self.handle.state()
    }

    /// Observe a projection; see [`ScopedStore::observe`].
    pub fn observe<V, F>(&self, project: F) -> Observer<V>
    where
        V: Clone + PartialEq + Send + Sync + 'static,
        F: Fn(&S) -> V + Send + Sync + 'static,
    {
        self.handle.observe(project)
    }

    /// Child handle; see [`ScopedStore::scope`].
    pub fn scope<CS, CA, FS, FA>(&self, to_state: FS, to_action: FA) -> ScopedStore<CS, CA>
    where
        CS: Clone + Send + Sync + 'static,
        CA: Send + 'static,
        FS: Fn(&S) -> CS + Send + Sync + 'static,
        FA: Fn(CA) -> A + Send + Sync + 'static,
    {
        self.handle.scope(to_state, to_action)
    }

    /// Clonable handle to the whole store.
    pub fn handle(&self) -> ScopedStore<S, A> {
        self.handle.clone()
    }

    pub fn effects(&self) -> &EffectRuntime {
        &self.effects
    }

    /// Stop after every action queued so far has been reduced, then cancel
    /// all in-flight effects.
    pub async fn shutdown(self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.sender.send(Message::Shutdown(ack_tx)).is_ok() {
            let _ = ack_rx.await;
        }
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "store task ended abnormally");
        }
    }
}

async fn dispatch_loop<R: Reducer>(
    reducer: R,
    mut state: R::State,
    shared: Arc<RwLock<R::State>>,
    version: watch::Sender<u64>,
    mut receiver: mpsc::UnboundedReceiver<Message<R::Action>>,
    effects: EffectRuntime,
    deliver: Deliver<R::Action>,
) {
    while let Some(message) = receiver.recv().await {
        let (action, token) = match message {
            Message::Action { action, token } => (action, token),
            Message::Shutdown(ack) => {
                let _ = ack.send(());
                break;
            }
        };
        if token.is_some_and(|t| t.is_cancelled()) {
            tracing::trace!(action = ?action, "dropping action from cancelled effect");
            continue;
        }

        tracing::debug!(action = ?action, "dispatch");
        let effect = reducer.reduce(&mut state, action);

        let changed = *shared.read() != state;
        if changed {
            *shared.write() = state.clone();
            version.send_modify(|v| *v += 1);
        }
        effects.launch(effect, &deliver);
    }

    let cancelled = effects.cancel_all();
    tracing::info!(cancelled, "store stopped");
}

/// Handle restricted to a projection of the state and an embedding of
/// actions. Sends go through the root store's serialized queue.
pub struct ScopedStore<S, A> {
    send: SendFn<A>,
    read: ReadFn<S>,
    version: watch::Receiver<u64>,
}

impl<S, A> Clone for ScopedStore<S, A> {
    fn clone(&self) -> Self {
        Self {
            send: Arc::clone(&self.send),
            read: Arc::clone(&self.read),
            version: self.version.clone(),
        }
    }
}

impl<S, A> ScopedStore<S, A>
where
    S: Send + Sync + 'static,
    A: Send + 'static,
{
    pub fn send(&self, action: A) -> Result<(), StoreError> {
        (self.send)(action)
    }

    pub fn state(&self) -> S {
        (self.read)()
    }

    pub fn scope<CS, CA, FS, FA>(&self, to_state: FS, to_action: FA) -> ScopedStore<CS, CA>
    where
        CS: Send + Sync + 'static,
        CA: Send + 'static,
        FS: Fn(&S) -> CS + Send + Sync + 'static,
        FA: Fn(CA) -> A + Send + Sync + 'static,
    {
        let send = Arc::clone(&self.send);
        let read = Arc::clone(&self.read);
        ScopedStore {
            send: Arc::new(move |action| send(to_action(action))),
            read: Arc::new(move || to_state(&read())),
            version: self.version.clone(),
        }
    }

    /// Watch a projection of the state. The observer only wakes when the
    /// projected value differs from the last one it returned.
    pub fn observe<V, F>(&self, project: F) -> Observer<V>
    where
        V: Clone + PartialEq + Send + Sync + 'static,
        F: Fn(&S) -> V + Send + Sync + 'static,
    {
        let read = Arc::clone(&self.read);
        let read: ReadFn<V> = Arc::new(move || project(&read()));
        let mut version = self.version.clone();
        version.borrow_and_update();
        let last = read();
        Observer {
            read,
            version,
            last,
        }
    }
}

/// Equality-deduplicated view of a store projection.
pub struct Observer<V> {
    read: ReadFn<V>,
    version: watch::Receiver<u64>,
    last: V,
}

impl<V: Clone + PartialEq> Observer<V> {
    /// The value last returned by [`Observer::changed`] (or the initial one).
    pub fn current(&self) -> &V {
        &self.last
    }

    /// Wait until the projection differs from [`Observer::current`].
    /// Returns `None` once the store has stopped.
    pub async fn changed(&mut self) -> Option<V> {
        loop {
            self.version.changed().await.ok()?;
            let next = (self.read)();
            if next != self.last {
                self.last = next.clone();
                return Some(next);
            }
        }
    }
}
