//! Navigation stack state and the reducer that drives its elements.

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::ser::{Serialize, SerializeSeq, Serializer};

use super::cancel::{CancelId, KeySegment};
use super::effect::Effect;
use super::reducer::Reducer;
use super::scope::{CasePath, StatePath};
use super::{Action, FeatureState};

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of one pushed stack element. Never reused, not even by a stack
/// that replaced this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StackElementId(u64);

impl StackElementId {
    fn next() -> Self {
        Self(NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for StackElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered navigation stack, root first.
///
/// Equality compares the element states in order, not their ids.
#[derive(Clone)]
pub struct StackState<S> {
    elements: Vec<(StackElementId, S)>,
}

impl<S> StackState<S> {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, state: S) -> StackElementId {
        let id = StackElementId::next();
        self.elements.push((id, state));
        id
    }

    /// Truncate to `len` elements. Returns the ids that were removed.
    pub fn pop_to(&mut self, len: usize) -> Vec<StackElementId> {
        if len >= self.elements.len() {
            return Vec::new();
        }
        self.elements.drain(len..).map(|(id, _)| id).collect()
    }

    pub fn pop_to_root(&mut self) -> Vec<StackElementId> {
        self.pop_to(0)
    }

    /// Remove the element `id` and everything above it.
    pub fn pop_from(&mut self, id: StackElementId) -> Vec<StackElementId> {
        match self.elements.iter().position(|(existing, _)| *existing == id) {
            Some(position) => self.pop_to(position),
            None => Vec::new(),
        }
    }

    pub fn get(&self, id: StackElementId) -> Option<&S> {
        self.elements
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, state)| state)
    }

    pub fn get_mut(&mut self, id: StackElementId) -> Option<&mut S> {
        self.elements
            .iter_mut()
            .find(|(existing, _)| *existing == id)
            .map(|(_, state)| state)
    }

    pub fn ids(&self) -> impl Iterator<Item = StackElementId> + '_ {
        self.elements.iter().map(|(id, _)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StackElementId, &S)> + '_ {
        self.elements.iter().map(|(id, state)| (*id, state))
    }

    pub fn last(&self) -> Option<(StackElementId, &S)> {
        self.elements.last().map(|(id, state)| (*id, state))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<S> Default for StackState<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PartialEq> PartialEq for StackState<S> {
    fn eq(&self, other: &Self) -> bool {
        self.elements.len() == other.elements.len()
            && self
                .elements
                .iter()
                .zip(&other.elements)
                .all(|((_, a), (_, b))| a == b)
    }
}

impl<S: fmt::Debug> fmt::Debug for StackState<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<S: Serialize> Serialize for StackState<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut seq = serializer.serialize_seq(Some(self.elements.len()))?;
        for (_, state) in &self.elements {
            seq.serialize_element(state)?;
        }
        seq.end()
    }
}

/// Action routed through a navigation stack.
#[derive(Debug, Clone, PartialEq)]
pub enum StackAction<S, A> {
    Element { id: StackElementId, action: A },
    Push(S),
    /// Truncate the stack to the given length.
    PopTo(usize),
    PopFrom(StackElementId),
}

impl<S, A> StackAction<S, A> {
    pub fn pop_to_root() -> Self {
        StackAction::PopTo(0)
    }
}

impl<S: FeatureState, A: Action> Action for StackAction<S, A> {}

/// Runs `element` on the addressed stack element, then the parent reducer,
/// then applies structural stack actions.
///
/// Elements that leave the stack have every effect in their namespace
/// cancelled before any other effect of the step.
pub struct ForEachStack<P: Reducer, R: Reducer> {
    parent: P,
    name: &'static str,
    stack: StatePath<P::State, StackState<R::State>>,
    action: CasePath<P::Action, StackAction<R::State, R::Action>>,
    element: R,
}

impl<P: Reducer, R: Reducer> ForEachStack<P, R> {
    pub fn new(
        parent: P,
        name: &'static str,
        stack: StatePath<P::State, StackState<R::State>>,
        action: CasePath<P::Action, StackAction<R::State, R::Action>>,
        element: R,
    ) -> Self {
        Self {
            parent,
            name,
            stack,
            action,
            element,
        }
    }

    fn ids(&self, state: &mut P::State) -> Vec<StackElementId> {
        self.stack
            .get_mut(state)
            .map(|stack| stack.ids().collect())
            .unwrap_or_default()
    }

    fn namespace(&self, id: StackElementId) -> CancelId {
        CancelId::from_segments([KeySegment::Name(self.name), KeySegment::Id(id.to_string())])
    }
}

impl<P: Reducer, R: Reducer> Reducer for ForEachStack<P, R> {
    type State = P::State;
    type Action = P::Action;

    fn reduce(&self, state: &mut P::State, action: P::Action) -> Effect<P::Action> {
        let before = self.ids(state);
        let routed = self.action.extract(action.clone());

        let mut touched = None;
        let element_effect = match &routed {
            Some(StackAction::Element { id, action: child }) => {
                let id = *id;
                match self.stack.get_mut(state).and_then(|s| s.get_mut(id)) {
                    Some(element) => {
                        touched = Some(id);
                        let embed = self.action.embed_fn();
                        self.element
                            .reduce(element, child.clone())
                            .map(move |action| embed(StackAction::Element { id, action }))
                            .namespaced(KeySegment::Id(id.to_string()))
                            .namespaced(KeySegment::Name(self.name))
                    }
                    None => {
                        tracing::debug!(stack = self.name, id = %id, action = ?child, "no stack element with this id, ignoring action");
                        Effect::none()
                    }
                }
            }
            _ => Effect::none(),
        };

        let parent_effect = self.parent.reduce(state, action);

        if let Some(stack) = self.stack.get_mut(state) {
            match routed {
                Some(StackAction::Push(element)) => {
                    let id = stack.push(element);
                    tracing::debug!(stack = self.name, id = %id, depth = stack.len(), "pushed");
                }
                Some(StackAction::PopTo(len)) => {
                    stack.pop_to(len);
                }
                Some(StackAction::PopFrom(id)) => {
                    stack.pop_from(id);
                }
                Some(StackAction::Element { .. }) | None => {}
            }
        }

        let after: HashSet<_> = self.ids(state).into_iter().collect();
        let removed: Vec<_> = before.into_iter().filter(|id| !after.contains(id)).collect();
        let element_effect = match touched {
            Some(id) if removed.contains(&id) => Effect::none(),
            _ => element_effect,
        };
        if !removed.is_empty() {
            tracing::debug!(stack = self.name, removed = removed.len(), "stack elements torn down");
        }
        let teardown = Effect::merge(removed.into_iter().map(|id| Effect::cancel_under(self.namespace(id))));

        Effect::merge([teardown, element_effect, parent_effect])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack_of(n: usize) -> (StackState<usize>, Vec<StackElementId>) {
        let mut stack = StackState::new();
        let ids = (0..n).map(|i| stack.push(i)).collect();
        (stack, ids)
    }

    #[test]
    fn pop_to_truncates_and_reports_removed() {
        let (mut stack, ids) = stack_of(3);
        assert_eq!(stack.pop_to(1), vec![ids[1], ids[2]]);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.last().map(|(_, s)| *s), Some(0));
    }

    #[test]
    fn pop_to_beyond_len_is_noop() {
        let (mut stack, _) = stack_of(2);
        assert!(stack.pop_to(5).is_empty());
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn pop_from_removes_element_and_above() {
        let (mut stack, ids) = stack_of(4);
        assert_eq!(stack.pop_from(ids[2]), vec![ids[2], ids[3]]);
        assert_eq!(stack.ids().collect::<Vec<_>>(), vec![ids[0], ids[1]]);
        assert!(stack.pop_from(ids[3]).is_empty());
    }

    #[test]
    fn ids_are_not_reused() {
        let (mut stack, ids) = stack_of(2);
        stack.pop_to_root();
        assert!(stack.is_empty());
        let fresh = stack.push(9);
        assert!(!ids.contains(&fresh));
        assert_eq!(stack.get(fresh), Some(&9));
    }

    #[test]
    fn a_replacement_stack_gets_fresh_ids() {
        let (_, old) = stack_of(2);
        let (replacement, new) = stack_of(2);
        assert!(new.iter().all(|id| !old.contains(id)));
        assert_eq!(replacement, stack_of(2).0);
    }
}
