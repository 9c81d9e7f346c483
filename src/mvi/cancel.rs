//! Cancellation keys, cooperative cancellation tokens, and the registry of
//! in-flight effect tasks.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::Notify;

/// One component of a cancellation path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeySegment {
    /// Static name: a scope name or a feature-local key.
    Name(&'static str),
    /// Runtime identity: an element id or a presentation generation.
    Id(String),
}

impl fmt::Display for KeySegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySegment::Name(name) => f.write_str(name),
            KeySegment::Id(id) => write!(f, "#{id}"),
        }
    }
}

/// Hierarchical cancellation key.
///
/// Features create short keys (`CancelId::new("timer")`). Every scope an
/// effect passes through on the way to the store prepends its own segment,
/// so the same child reducer embedded twice never shares a key, and a parent
/// can cancel a whole subtree by prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CancelId {
    path: Vec<KeySegment>,
}

impl CancelId {
    pub fn new(name: &'static str) -> Self {
        Self {
            path: vec![KeySegment::Name(name)],
        }
    }

    /// The empty path. Every key lies under it.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: impl IntoIterator<Item = KeySegment>) -> Self {
        Self {
            path: segments.into_iter().collect(),
        }
    }

    /// Returns this key with `segment` prepended.
    pub fn prefixed(mut self, segment: KeySegment) -> Self {
        self.path.insert(0, segment);
        self
    }

    /// Returns this key with `other` appended.
    pub fn joined(mut self, other: &CancelId) -> Self {
        self.path.extend(other.path.iter().cloned());
        self
    }

    pub fn starts_with(&self, prefix: &CancelId) -> bool {
        self.path.starts_with(&prefix.path)
    }

    /// Longest path both keys start with.
    pub(crate) fn common_prefix(&self, other: &CancelId) -> CancelId {
        let len = self
            .path
            .iter()
            .zip(&other.path)
            .take_while(|(a, b)| a == b)
            .count();
        Self {
            path: self.path[..len].to_vec(),
        }
    }

    pub fn segments(&self) -> &[KeySegment] {
        &self.path
    }
}

impl From<&'static str> for CancelId {
    fn from(name: &'static str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for CancelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return f.write_str("/");
        }
        for (index, segment) in self.path.iter().enumerate() {
            if index > 0 {
                f.write_str("/")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

#[derive(Default)]
struct TokenInner {
    cancelled: AtomicBool,
    notify: Notify,
    children: Mutex<Vec<Weak<TokenInner>>>,
}

impl TokenInner {
    fn cancel(&self) {
        if self.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        self.notify.notify_waiters();
        let children = std::mem::take(&mut *self.children.lock());
        for child in children.iter().filter_map(Weak::upgrade) {
            child.cancel();
        }
    }
}

/// Cooperative cancellation flag shared between the registry and one task.
///
/// Cancelling a token cancels every token derived from it with
/// [`CancelToken::child`].
#[derive(Clone, Default)]
pub struct CancelToken {
    inner: Arc<TokenInner>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a token that is cancelled together with this one.
    pub fn child(&self) -> CancelToken {
        let child = CancelToken::new();
        let mut children = self.inner.children.lock();
        if self.is_cancelled() {
            child.inner.cancel();
        } else {
            children.retain(|weak| weak.strong_count() > 0);
            children.push(Arc::downgrade(&child.inner));
        }
        child
    }

    pub fn cancel(&self) {
        self.inner.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once the token is cancelled.
    pub async fn cancelled(&self) {
        // Register interest before checking the flag so a concurrent
        // cancel() between the check and the await is not lost.
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

impl fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

struct Registration {
    seq: u64,
    token: CancelToken,
}

/// Book-keeping of every effect task that has not finished yet.
///
/// Keyed tasks are unique per key. Un-keyed tasks are tracked anonymously
/// under the scope they were launched from so a prefix cancel reaches them.
#[derive(Default)]
pub(crate) struct Registry {
    keyed: HashMap<CancelId, Registration>,
    anonymous: HashMap<u64, (CancelId, CancelToken)>,
    next_seq: u64,
}

impl Registry {
    /// Track a new task. A previous task under the same key is cancelled first.
    pub(crate) fn register(
        &mut self,
        key: Option<CancelId>,
        scope: CancelId,
        token: CancelToken,
    ) -> u64 {
        self.next_seq += 1;
        let seq = self.next_seq;
        match key {
            Some(key) => {
                if let Some(previous) = self.keyed.remove(&key) {
                    tracing::debug!(key = %key, "replacing in-flight effect");
                    previous.token.cancel();
                }
                self.keyed.insert(key, Registration { seq, token });
            }
            None => {
                self.anonymous.insert(seq, (scope, token));
            }
        }
        seq
    }

    /// Forget a finished task. A newer task registered under the same key
    /// is left alone.
    pub(crate) fn complete(&mut self, key: Option<&CancelId>, seq: u64) {
        match key {
            Some(key) => {
                if self.keyed.get(key).is_some_and(|r| r.seq == seq) {
                    self.keyed.remove(key);
                }
            }
            None => {
                self.anonymous.remove(&seq);
            }
        }
    }

    pub(crate) fn cancel(&mut self, key: &CancelId) -> bool {
        match self.keyed.remove(key) {
            Some(registration) => {
                registration.token.cancel();
                true
            }
            None => false,
        }
    }

    pub(crate) fn cancel_under(&mut self, prefix: &CancelId) -> usize {
        let mut cancelled = 0;
        self.keyed.retain(|key, registration| {
            if key.starts_with(prefix) {
                registration.token.cancel();
                cancelled += 1;
                false
            } else {
                true
            }
        });
        self.anonymous.retain(|_, (scope, token)| {
            if scope.starts_with(prefix) {
                token.cancel();
                cancelled += 1;
                false
            } else {
                true
            }
        });
        cancelled
    }

    pub(crate) fn cancel_all(&mut self) -> usize {
        self.cancel_under(&CancelId::root())
    }

    pub(crate) fn len(&self) -> usize {
        self.keyed.len() + self.anonymous.len()
    }

    pub(crate) fn contains(&self, key: &CancelId) -> bool {
        self.keyed.contains_key(key)
    }
}
