use crate::capabilities::Environment;
use crate::features::item::{ItemAction, ItemReducer, ItemState};
use crate::features::number::{NumberAction, NumberReducer, NumberState};
use crate::features::stack_nav::action::{PathAction, StackNavAction};
use crate::features::stack_nav::state::{PathState, StackNavState};
use crate::mvi::{Effect, ForEachStack, Reducer, ReducerExt, Scope, StackAction, StackState};
use crate::{action_case, state_case, state_field};

/// Routes path actions to the screen in the matching case.
pub struct PathReducer {
    item: Scope<PathState, PathAction, ItemReducer>,
    number: Scope<PathState, PathAction, NumberReducer>,
}

impl PathReducer {
    pub fn new(env: Environment) -> Self {
        Self {
            item: Scope::new(
                "item",
                state_case!(PathState => ItemState, Item),
                action_case!(PathAction => ItemAction, Item),
                ItemReducer,
            ),
            number: Scope::new(
                "number",
                state_case!(PathState => NumberState, Number),
                action_case!(PathAction => NumberAction, Number),
                NumberReducer::new(env),
            ),
        }
    }
}

impl Reducer for PathReducer {
    type State = PathState;
    type Action = PathAction;

    fn reduce(&self, state: &mut PathState, action: PathAction) -> Effect<PathAction> {
        Effect::merge([
            self.number.reduce(state, action.clone()),
            self.item.reduce(state, action),
        ])
    }
}

struct StackNavCore;

impl Reducer for StackNavCore {
    type State = StackNavState;
    type Action = StackNavAction;

    fn reduce(&self, state: &mut StackNavState, action: StackNavAction) -> Effect<StackNavAction> {
        match action {
            StackNavAction::NavigateToNumber => {
                state.path.push(PathState::Number(NumberState::new()));
                Effect::none()
            }
            StackNavAction::Path(_) => Effect::none(),
        }
    }
}

pub struct StackNavReducer {
    inner: ForEachStack<StackNavCore, PathReducer>,
}

impl StackNavReducer {
    pub fn new(env: Environment) -> Self {
        Self {
            inner: StackNavCore.for_each_stack(
                "path",
                state_field!(StackNavState => StackState<PathState>, path),
                action_case!(StackNavAction => StackAction<PathState, PathAction>, Path),
                PathReducer::new(env),
            ),
        }
    }
}

impl Reducer for StackNavReducer {
    type State = StackNavState;
    type Action = StackNavAction;

    fn reduce(&self, state: &mut StackNavState, action: StackNavAction) -> Effect<StackNavAction> {
        self.inner.reduce(state, action)
    }
}
