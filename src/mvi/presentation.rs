//! Optional destination slot and the reducer that drives its child.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::ser::{Serialize, Serializer};

use super::cancel::{CancelId, KeySegment};
use super::effect::Effect;
use super::reducer::Reducer;
use super::scope::{CasePath, StatePath};
use super::Action;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Slot holding at most one presented child state.
///
/// Every presentation gets a process-wide unique generation, so effects
/// started by a previous occupant can be told apart from the current one
/// even when the whole slot was replaced. Equality only looks at the
/// presented value.
#[derive(Clone)]
pub struct PresentationState<S> {
    current: Option<S>,
    generation: u64,
}

impl<S> PresentationState<S> {
    pub fn new() -> Self {
        Self {
            current: None,
            generation: 0,
        }
    }

    /// Present `state`, replacing whatever was presented before.
    pub fn present(&mut self, state: S) {
        self.generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);
        self.current = Some(state);
    }

    pub fn dismiss(&mut self) -> Option<S> {
        self.current.take()
    }

    pub fn get(&self) -> Option<&S> {
        self.current.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut S> {
        self.current.as_mut()
    }

    pub fn is_presented(&self) -> bool {
        self.current.is_some()
    }

    pub(crate) fn presented_generation(&self) -> Option<u64> {
        self.current.as_ref().map(|_| self.generation)
    }
}

impl<S> Default for PresentationState<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PartialEq> PartialEq for PresentationState<S> {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current
    }
}

impl<S: fmt::Debug> fmt::Debug for PresentationState<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.current {
            Some(state) => f.debug_tuple("Presented").field(state).finish(),
            None => f.write_str("Dismissed"),
        }
    }
}

impl<S: Serialize> Serialize for PresentationState<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        self.current.serialize(serializer)
    }
}

/// Action routed through a presentation slot.
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationAction<A> {
    /// The view dismissed the destination (swipe, back, close).
    Dismiss,
    /// Action for the presented child.
    Presented(A),
}

impl<A: Action> Action for PresentationAction<A> {}

/// Runs `child` on the presented state, then the parent reducer.
///
/// `PresentationAction::Dismiss` clears the slot after the parent ran. When
/// the slot is cleared or replaced, effects of the previous child are
/// cancelled before any other effect of the step.
pub struct IfLet<P: Reducer, R: Reducer> {
    parent: P,
    name: &'static str,
    presentation: StatePath<P::State, PresentationState<R::State>>,
    action: CasePath<P::Action, PresentationAction<R::Action>>,
    child: R,
}

impl<P: Reducer, R: Reducer> IfLet<P, R> {
    pub fn new(
        parent: P,
        name: &'static str,
        presentation: StatePath<P::State, PresentationState<R::State>>,
        action: CasePath<P::Action, PresentationAction<R::Action>>,
        child: R,
    ) -> Self {
        Self {
            parent,
            name,
            presentation,
            action,
            child,
        }
    }

    fn generation(&self, state: &mut P::State) -> Option<u64> {
        self.presentation
            .get_mut(state)
            .and_then(|slot| slot.presented_generation())
    }

    fn namespace(&self, generation: u64) -> CancelId {
        CancelId::from_segments([
            KeySegment::Name(self.name),
            KeySegment::Id(generation.to_string()),
        ])
    }
}

impl<P: Reducer, R: Reducer> Reducer for IfLet<P, R> {
    type State = P::State;
    type Action = P::Action;

    fn reduce(&self, state: &mut P::State, action: P::Action) -> Effect<P::Action> {
        let before = self.generation(state);

        let mut dismiss = false;
        let child_effect = match self.action.extract(action.clone()) {
            Some(PresentationAction::Presented(child_action)) => {
                match (before, self.presentation.get_mut(state).and_then(|s| s.get_mut())) {
                    (Some(generation), Some(child)) => {
                        let embed = self.action.embed_fn();
                        self.child
                            .reduce(child, child_action)
                            .map(move |action| embed(PresentationAction::Presented(action)))
                            .namespaced(KeySegment::Id(generation.to_string()))
                            .namespaced(KeySegment::Name(self.name))
                    }
                    _ => {
                        tracing::debug!(destination = self.name, action = ?child_action, "nothing presented, ignoring action");
                        Effect::none()
                    }
                }
            }
            Some(PresentationAction::Dismiss) => {
                dismiss = true;
                Effect::none()
            }
            None => Effect::none(),
        };

        let parent_effect = self.parent.reduce(state, action);

        if dismiss {
            if let Some(slot) = self.presentation.get_mut(state) {
                slot.dismiss();
            }
        }

        match before {
            Some(generation) if self.generation(state) != Some(generation) => {
                tracing::debug!(destination = self.name, generation, "destination torn down");
                Effect::merge([
                    Effect::cancel_under(self.namespace(generation)),
                    parent_effect,
                ])
            }
            _ => Effect::merge([child_effect, parent_effect]),
        }
    }
}
