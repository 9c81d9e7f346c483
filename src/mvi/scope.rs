//! Embedding a child reducer into a parent through explicit lenses.

use std::fmt;

use super::cancel::KeySegment;
use super::effect::Effect;
use super::reducer::Reducer;
use super::{Action, FeatureState};

/// Mutable accessor from a parent state to an optional child state.
///
/// Struct fields always resolve; enum cases resolve only while the parent
/// is in that case.
pub struct StatePath<P, C> {
    get_mut: fn(&mut P) -> Option<&mut C>,
}

impl<P, C> StatePath<P, C> {
    pub fn new(get_mut: fn(&mut P) -> Option<&mut C>) -> Self {
        Self { get_mut }
    }

    pub fn get_mut<'a>(&self, parent: &'a mut P) -> Option<&'a mut C> {
        (self.get_mut)(parent)
    }
}

impl<P, C> Clone for StatePath<P, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, C> Copy for StatePath<P, C> {}

/// Extract/embed pair between a parent action enum and one of its cases.
pub struct CasePath<P, C> {
    extract: fn(P) -> Option<C>,
    embed: fn(C) -> P,
}

impl<P, C> CasePath<P, C> {
    pub fn new(extract: fn(P) -> Option<C>, embed: fn(C) -> P) -> Self {
        Self { extract, embed }
    }

    pub fn extract(&self, parent: P) -> Option<C> {
        (self.extract)(parent)
    }

    pub fn embed(&self, child: C) -> P {
        (self.embed)(child)
    }

    pub fn embed_fn(&self) -> fn(C) -> P {
        self.embed
    }
}

impl<P, C> Clone for CasePath<P, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, C> Copy for CasePath<P, C> {}

/// Build a [`StatePath`] to a struct field.
///
/// ```ignore
/// let path = state_field!(RootState => NumberState, number);
/// ```
#[macro_export]
macro_rules! state_field {
    ($parent:ty => $child:ty, $field:ident) => {{
        fn get_mut(state: &mut $parent) -> ::core::option::Option<&mut $child> {
            ::core::option::Option::Some(&mut state.$field)
        }
        $crate::mvi::StatePath::new(get_mut)
    }};
}

/// Build a [`StatePath`] to the payload of one enum case.
#[macro_export]
macro_rules! state_case {
    ($parent:ident => $child:ty, $variant:ident) => {{
        fn get_mut(state: &mut $parent) -> ::core::option::Option<&mut $child> {
            match state {
                $parent::$variant(inner) => ::core::option::Option::Some(inner),
                #[allow(unreachable_patterns)]
                _ => ::core::option::Option::None,
            }
        }
        $crate::mvi::StatePath::new(get_mut)
    }};
}

/// Build a [`CasePath`] for a single-payload action case.
#[macro_export]
macro_rules! action_case {
    ($parent:ident => $child:ty, $variant:ident) => {{
        fn extract(action: $parent) -> ::core::option::Option<$child> {
            match action {
                $parent::$variant(inner) => ::core::option::Option::Some(inner),
                #[allow(unreachable_patterns)]
                _ => ::core::option::Option::None,
            }
        }
        fn embed(action: $child) -> $parent {
            $parent::$variant(action)
        }
        $crate::mvi::CasePath::new(extract, embed)
    }};
}

/// Runs a child reducer on a substate for actions of one parent case.
///
/// Child actions are re-tagged with the parent case and every effect key is
/// namespaced under `name`.
pub struct Scope<P, PA, R: Reducer> {
    name: &'static str,
    state: StatePath<P, R::State>,
    action: CasePath<PA, R::Action>,
    child: R,
}

impl<P, PA, R: Reducer> Scope<P, PA, R> {
    pub fn new(
        name: &'static str,
        state: StatePath<P, R::State>,
        action: CasePath<PA, R::Action>,
        child: R,
    ) -> Self {
        Self {
            name,
            state,
            action,
            child,
        }
    }
}

impl<P, PA, R> Reducer for Scope<P, PA, R>
where
    P: FeatureState,
    PA: Action,
    R: Reducer,
{
    type State = P;
    type Action = PA;

    fn reduce(&self, state: &mut P, action: PA) -> Effect<PA> {
        let Some(child_action) = self.action.extract(action) else {
            return Effect::none();
        };
        let Some(child_state) = self.state.get_mut(state) else {
            tracing::debug!(scope = self.name, action = ?child_action, "child state absent, ignoring action");
            return Effect::none();
        };
        self.child
            .reduce(child_state, child_action)
            .map(self.action.embed_fn())
            .namespaced(KeySegment::Name(self.name))
    }
}

impl<P, PA, R: Reducer> fmt::Debug for Scope<P, PA, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope").field("name", &self.name).finish()
    }
}
