//! Reducer trait for MVI architecture.

use std::marker::PhantomData;

use super::action::Action;
use super::effect::Effect;
use super::identified::{ForEach, Identifiable, IdentifiedAction, IdentifiedVec};
use super::presentation::{IfLet, PresentationAction, PresentationState};
use super::scope::{CasePath, StatePath};
use super::stack::{ForEachStack, StackAction, StackState};
use super::state::FeatureState;

/// Reducer transforms state based on actions.
///
/// The reducer is the only place where state transitions happen. It mutates
/// the state in place and describes follow-up work as an [`Effect`]; it must
/// never perform I/O itself.
pub trait Reducer: Send + Sync + 'static {
    /// The state type this reducer operates on.
    type State: FeatureState;

    /// The action type this reducer handles.
    type Action: Action;

    /// Process an action, mutating `state` and returning the effect to run.
    fn reduce(&self, state: &mut Self::State, action: Self::Action) -> Effect<Self::Action>;
}

/// Reducer built from a plain function or closure.
pub struct Reduce<S, A, F> {
    f: F,
    _marker: PhantomData<fn(&mut S, A)>,
}

impl<S, A, F> Reduce<S, A, F>
where
    F: Fn(&mut S, A) -> Effect<A>,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _marker: PhantomData,
        }
    }
}

impl<S, A, F> Reducer for Reduce<S, A, F>
where
    S: FeatureState,
    A: Action,
    F: Fn(&mut S, A) -> Effect<A> + Send + Sync + 'static,
{
    type State = S;
    type Action = A;

    fn reduce(&self, state: &mut S, action: A) -> Effect<A> {
        (self.f)(state, action)
    }
}

/// Runs two reducers over the same state in order and merges their effects.
pub struct Combine<R1, R2> {
    first: R1,
    second: R2,
}

impl<R1, R2> Reducer for Combine<R1, R2>
where
    R1: Reducer,
    R2: Reducer<State = R1::State, Action = R1::Action>,
{
    type State = R1::State;
    type Action = R1::Action;

    fn reduce(&self, state: &mut Self::State, action: Self::Action) -> Effect<Self::Action> {
        let first = self.first.reduce(state, action.clone());
        let second = self.second.reduce(state, action);
        first.merge_with(second)
    }
}

/// Composition helpers available on every reducer.
pub trait ReducerExt: Reducer + Sized {
    /// Run `other` after `self` for every action.
    fn combine<R>(self, other: R) -> Combine<Self, R>
    where
        R: Reducer<State = Self::State, Action = Self::Action>,
    {
        Combine {
            first: self,
            second: other,
        }
    }

    /// Drive an optional child through a presentation slot.
    ///
    /// The child runs before `self`. Effects of a dismissed or replaced child
    /// are cancelled as part of the same reduction.
    fn if_let<R: Reducer>(
        self,
        name: &'static str,
        presentation: StatePath<Self::State, PresentationState<R::State>>,
        action: CasePath<Self::Action, PresentationAction<R::Action>>,
        child: R,
    ) -> IfLet<Self, R> {
        IfLet::new(self, name, presentation, action, child)
    }

    /// Drive every element of an identified collection with `element`.
    fn for_each<R>(
        self,
        name: &'static str,
        elements: StatePath<Self::State, IdentifiedVec<R::State>>,
        action: CasePath<Self::Action, IdentifiedAction<<R::State as Identifiable>::Id, R::Action>>,
        element: R,
    ) -> ForEach<Self, R>
    where
        R: Reducer,
        R::State: Identifiable,
    {
        ForEach::new(self, name, elements, action, element)
    }

    /// Drive every element of a navigation stack with `element`.
    fn for_each_stack<R: Reducer>(
        self,
        name: &'static str,
        stack: StatePath<Self::State, StackState<R::State>>,
        action: CasePath<Self::Action, StackAction<R::State, R::Action>>,
        element: R,
    ) -> ForEachStack<Self, R> {
        ForEachStack::new(self, name, stack, action, element)
    }
}

impl<R: Reducer> ReducerExt for R {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Tally {
        log: Vec<&'static str>,
    }
    impl FeatureState for Tally {}

    #[derive(Debug, Clone, PartialEq)]
    struct Ping;
    impl Action for Ping {}

    #[test]
    fn combined_reducers_run_in_declared_order() {
        let first = Reduce::new(|state: &mut Tally, _: Ping| {
            state.log.push("first");
            Effect::none()
        });
        let second = Reduce::new(|state: &mut Tally, _: Ping| {
            state.log.push("second");
            Effect::send(Ping)
        });
        let reducer = first.combine(second);

        let mut state = Tally::default();
        let effect = reducer.reduce(&mut state, Ping);
        assert_eq!(state.log, vec!["first", "second"]);
        assert!(!effect.is_none());
    }
}
