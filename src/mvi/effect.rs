//! Effect descriptions returned by reducers.
//!
//! An [`Effect`] is inert data until the [`EffectRuntime`](super::EffectRuntime)
//! launches it. Reducers build effects, scopes re-tag and namespace them, and
//! only the runtime ever spawns work.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::cancel::{CancelId, CancelToken, KeySegment};

/// Boxed, sendable future used at capability boundaries.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// Delivery sink for actions produced by effects. The token, when present,
/// belongs to the task that produced the action.
pub(crate) type Deliver<A> = Arc<dyn Fn(A, Option<CancelToken>) + Send + Sync>;

type Work<A> = Box<dyn FnOnce(Sender<A>) -> BoxFuture<()> + Send>;

/// Handle a running effect uses to feed actions back into the store.
pub struct Sender<A> {
    deliver: Deliver<A>,
    token: CancelToken,
}

impl<A: Send + 'static> Sender<A> {
    pub(crate) fn new(deliver: Deliver<A>, token: CancelToken) -> Self {
        Self { deliver, token }
    }

    /// Deliver an action. Returns `false` once the task has been cancelled,
    /// in which case the action is dropped.
    pub fn send(&self, action: A) -> bool {
        if self.token.is_cancelled() {
            tracing::trace!("dropping action from cancelled effect");
            return false;
        }
        (self.deliver)(action, Some(self.token.clone()));
        true
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    fn contramap<B: Send + 'static>(self, f: Arc<dyn Fn(B) -> A + Send + Sync>) -> Sender<B> {
        let deliver = self.deliver;
        Sender {
            deliver: Arc::new(move |action: B, token: Option<CancelToken>| deliver(f(action), token)),
            token: self.token,
        }
    }
}

impl<A> Clone for Sender<A> {
    fn clone(&self) -> Self {
        Self {
            deliver: Arc::clone(&self.deliver),
            token: self.token.clone(),
        }
    }
}

pub(crate) enum EffectKind<A> {
    None,
    Emit(A),
    Run {
        key: Option<CancelId>,
        scope: CancelId,
        work: Work<A>,
    },
    Group {
        key: Option<CancelId>,
        scope: CancelId,
        order: Order,
        effects: Vec<Effect<A>>,
    },
    Cancel(CancelId),
    CancelUnder(CancelId),
    Merge(Vec<Effect<A>>),
}

/// How the members of a tracked group run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Order {
    /// Each member starts once the previous one finished.
    Sequential,
    /// Members start together; the group ends when all of them did.
    Concurrent,
}

/// Side effect description: nothing, an immediate action, async work, a
/// cancellation, or a combination of those.
#[must_use = "effects do nothing unless returned to the store"]
pub struct Effect<A> {
    kind: EffectKind<A>,
}

impl<A: Send + 'static> Effect<A> {
    pub fn none() -> Self {
        Self {
            kind: EffectKind::None,
        }
    }

    /// Deliver `action` right after the current reduction.
    pub fn send(action: A) -> Self {
        Self {
            kind: EffectKind::Emit(action),
        }
    }

    /// Async work that may emit any number of actions through its [`Sender`].
    ///
    /// The closure runs when the effect is launched; the future it returns is
    /// spawned.
    pub fn run<F, Fut>(work: F) -> Self
    where
        F: FnOnce(Sender<A>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            kind: EffectKind::Run {
                key: None,
                scope: CancelId::root(),
                work: Box::new(move |sender| Box::pin(work(sender))),
            },
        }
    }

    /// Async work that completes with exactly one action.
    pub fn task<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = A> + Send + 'static,
    {
        Self::run(move |sender| async move {
            sender.send(future.await);
        })
    }

    /// Cancel the in-flight effect registered under `id`. Absent keys are a no-op.
    pub fn cancel(id: impl Into<CancelId>) -> Self {
        Self {
            kind: EffectKind::Cancel(id.into()),
        }
    }

    /// Cancel every in-flight effect whose key or scope lies under `prefix`.
    pub(crate) fn cancel_under(prefix: CancelId) -> Self {
        Self {
            kind: EffectKind::CancelUnder(prefix),
        }
    }

    /// Launch all effects in order, running concurrently.
    pub fn merge(effects: impl IntoIterator<Item = Effect<A>>) -> Self {
        let mut flat = Vec::new();
        for effect in effects {
            match effect.kind {
                EffectKind::None => {}
                EffectKind::Merge(inner) => flat.extend(inner),
                kind => flat.push(Effect { kind }),
            }
        }
        match flat.len() {
            0 => Self::none(),
            1 => flat.remove(0),
            _ => Self {
                kind: EffectKind::Merge(flat),
            },
        }
    }

    /// Run effects one after another; each starts when the previous finishes.
    pub fn concatenate(effects: impl IntoIterator<Item = Effect<A>>) -> Self {
        let effects: Vec<_> = effects.into_iter().filter(|e| !e.is_none()).collect();
        if effects.is_empty() {
            return Self::none();
        }
        Self {
            kind: EffectKind::Group {
                key: None,
                scope: CancelId::root(),
                order: Order::Sequential,
                effects,
            },
        }
    }

    pub fn merge_with(self, other: Effect<A>) -> Self {
        Self::merge([self, other])
    }

    /// Register the async parts of this effect under `id`, replacing any
    /// effect already running under that key.
    ///
    /// A merged effect is registered as one unit: its members keep running
    /// concurrently and `cancel(id)` stops all of them.
    pub fn cancellable(self, id: impl Into<CancelId>) -> Self {
        let id = id.into();
        let kind = match self.kind {
            EffectKind::Run { scope, work, .. } => EffectKind::Run {
                key: Some(scope.clone().joined(&id)),
                scope,
                work,
            },
            EffectKind::Group {
                scope,
                order,
                effects,
                ..
            } => EffectKind::Group {
                key: Some(scope.clone().joined(&id)),
                scope,
                order,
                effects,
            },
            EffectKind::Merge(effects) => {
                let scope = common_scope(&effects);
                EffectKind::Group {
                    key: Some(scope.clone().joined(&id)),
                    scope,
                    order: Order::Concurrent,
                    effects,
                }
            }
            other => other,
        };
        Self { kind }
    }

    pub fn is_none(&self) -> bool {
        matches!(self.kind, EffectKind::None)
    }

    /// Transform every action this effect produces.
    pub fn map<B, F>(self, f: F) -> Effect<B>
    where
        B: Send + 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        self.map_shared(Arc::new(f))
    }

    fn map_shared<B: Send + 'static>(self, f: Arc<dyn Fn(A) -> B + Send + Sync>) -> Effect<B> {
        let kind = match self.kind {
            EffectKind::None => EffectKind::None,
            EffectKind::Emit(action) => EffectKind::Emit(f(action)),
            EffectKind::Run { key, scope, work } => EffectKind::Run {
                key,
                scope,
                work: Box::new(move |sender: Sender<B>| work(sender.contramap(f))),
            },
            EffectKind::Group {
                key,
                scope,
                order,
                effects,
            } => EffectKind::Group {
                key,
                scope,
                order,
                effects: effects
                    .into_iter()
                    .map(|effect| effect.map_shared(Arc::clone(&f)))
                    .collect(),
            },
            EffectKind::Cancel(id) => EffectKind::Cancel(id),
            EffectKind::CancelUnder(id) => EffectKind::CancelUnder(id),
            EffectKind::Merge(effects) => EffectKind::Merge(
                effects
                    .into_iter()
                    .map(|effect| effect.map_shared(Arc::clone(&f)))
                    .collect(),
            ),
        };
        Effect { kind }
    }

    /// Prepend `segment` to every key, scope and cancellation in this effect.
    pub(crate) fn namespaced(self, segment: KeySegment) -> Self {
        let kind = match self.kind {
            EffectKind::Run { key, scope, work } => EffectKind::Run {
                key: key.map(|key| key.prefixed(segment.clone())),
                scope: scope.prefixed(segment),
                work,
            },
            EffectKind::Group {
                key,
                scope,
                order,
                effects,
            } => EffectKind::Group {
                key: key.map(|key| key.prefixed(segment.clone())),
                scope: scope.prefixed(segment.clone()),
                order,
                effects: effects
                    .into_iter()
                    .map(|effect| effect.namespaced(segment.clone()))
                    .collect(),
            },
            EffectKind::Cancel(id) => EffectKind::Cancel(id.prefixed(segment)),
            EffectKind::CancelUnder(id) => EffectKind::CancelUnder(id.prefixed(segment)),
            EffectKind::Merge(effects) => EffectKind::Merge(
                effects
                    .into_iter()
                    .map(|effect| effect.namespaced(segment.clone()))
                    .collect(),
            ),
            other => other,
        };
        Self { kind }
    }

    pub(crate) fn into_kind(self) -> EffectKind<A> {
        self.kind
    }
}

/// Deepest scope shared by every tracked member of `effects`.
fn common_scope<A>(effects: &[Effect<A>]) -> CancelId {
    let mut scopes = effects.iter().filter_map(|effect| match &effect.kind {
        EffectKind::Run { scope, .. } | EffectKind::Group { scope, .. } => Some(scope),
        _ => None,
    });
    match scopes.next() {
        Some(first) => scopes.fold(first.clone(), |common, scope| common.common_prefix(scope)),
        None => CancelId::root(),
    }
}

impl<A: fmt::Debug> fmt::Debug for Effect<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            EffectKind::None => f.write_str("Effect::None"),
            EffectKind::Emit(action) => f.debug_tuple("Effect::Send").field(action).finish(),
            EffectKind::Run { key, scope, .. } => f
                .debug_struct("Effect::Run")
                .field("key", &key.as_ref().map(ToString::to_string))
                .field("scope", &scope.to_string())
                .finish_non_exhaustive(),
            EffectKind::Group {
                key, order, effects, ..
            } => f
                .debug_struct(match order {
                    Order::Sequential => "Effect::Concatenate",
                    Order::Concurrent => "Effect::Group",
                })
                .field("key", &key.as_ref().map(ToString::to_string))
                .field("effects", effects)
                .finish(),
            EffectKind::Cancel(id) => write!(f, "Effect::Cancel({id})"),
            EffectKind::CancelUnder(id) => write!(f, "Effect::CancelUnder({id})"),
            EffectKind::Merge(effects) => f.debug_tuple("Effect::Merge").field(effects).finish(),
        }
    }
}
