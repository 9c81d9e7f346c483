use crate::capabilities::Environment;
use crate::features::for_each::{ForEachAction, ForEachReducer, ForEachState};
use crate::features::navigation::{NavigationAction, NavigationDelegate, NavigationReducer, NavigationState};
use crate::features::number::{NumberAction, NumberReducer, NumberState};
use crate::features::root::action::RootAction;
use crate::features::root::state::{RootState, RootTab};
use crate::features::stack_nav::{StackNavAction, StackNavReducer, StackNavState};
use crate::mvi::{Effect, Reducer, Scope};
use crate::{action_case, state_field};

/// Root reducer: tab selection and delegate handling first, then every tab.
pub struct RootReducer {
    number: Scope<RootState, RootAction, NumberReducer>,
    navigation: Scope<RootState, RootAction, NavigationReducer>,
    stack: Scope<RootState, RootAction, StackNavReducer>,
    for_each: Scope<RootState, RootAction, ForEachReducer>,
}

impl RootReducer {
    pub fn new(env: Environment) -> Self {
        Self {
            number: Scope::new(
                "number",
                state_field!(RootState => NumberState, number),
                action_case!(RootAction => NumberAction, Number),
                NumberReducer::new(env.clone()),
            ),
            navigation: Scope::new(
                "navigation",
                state_field!(RootState => NavigationState, navigation),
                action_case!(RootAction => NavigationAction, Navigation),
                NavigationReducer::new(),
            ),
            stack: Scope::new(
                "stack",
                state_field!(RootState => StackNavState, stack),
                action_case!(RootAction => StackNavAction, Stack),
                StackNavReducer::new(env.clone()),
            ),
            for_each: Scope::new(
                "for_each",
                state_field!(RootState => ForEachState, for_each),
                action_case!(RootAction => ForEachAction, ForEach),
                ForEachReducer::new(env),
            ),
        }
    }

    fn reduce_core(&self, state: &mut RootState, action: &RootAction) {
        match action {
            RootAction::Navigation(NavigationAction::Delegate(NavigationDelegate::SwitchToNumberTab)) => {
                state.selected_tab = RootTab::Number;
            }
            RootAction::SelectedTab(tab) => {
                state.selected_tab = *tab;
            }
            RootAction::Navigation(_)
            | RootAction::Number(_)
            | RootAction::Stack(_)
            | RootAction::ForEach(_) => {}
        }
    }
}

impl Reducer for RootReducer {
    type State = RootState;
    type Action = RootAction;

    fn reduce(&self, state: &mut RootState, action: RootAction) -> Effect<RootAction> {
        self.reduce_core(state, &action);
        Effect::merge([
            self.number.reduce(state, action.clone()),
            self.navigation.reduce(state, action.clone()),
            self.stack.reduce(state, action.clone()),
            self.for_each.reduce(state, action),
        ])
    }
}
