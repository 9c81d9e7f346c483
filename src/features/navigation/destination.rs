use crate::features::item::{ItemAction, ItemReducer, ItemState};
use crate::features::navigation::action::DestinationAction;
use crate::features::navigation::state::DestinationState;
use crate::mvi::{Effect, Reducer, Scope};
use crate::{action_case, state_case};

/// Drives whichever item destination is presented. Alerts and dialogs carry
/// no behavior of their own; their buttons are handled by the parent.
pub struct DestinationReducer {
    full_screen_cover: Scope<DestinationState, DestinationAction, ItemReducer>,
    navigation: Scope<DestinationState, DestinationAction, ItemReducer>,
    sheet: Scope<DestinationState, DestinationAction, ItemReducer>,
}

impl DestinationReducer {
    pub fn new() -> Self {
        Self {
            full_screen_cover: Scope::new(
                "item_as_full_screen_cover",
                state_case!(DestinationState => ItemState, ItemAsFullScreenCover),
                action_case!(DestinationAction => ItemAction, ItemAsFullScreenCover),
                ItemReducer,
            ),
            navigation: Scope::new(
                "item_as_navigation",
                state_case!(DestinationState => ItemState, ItemAsNavigation),
                action_case!(DestinationAction => ItemAction, ItemAsNavigation),
                ItemReducer,
            ),
            sheet: Scope::new(
                "item_as_sheet",
                state_case!(DestinationState => ItemState, ItemAsSheet),
                action_case!(DestinationAction => ItemAction, ItemAsSheet),
                ItemReducer,
            ),
        }
    }
}

impl Default for DestinationReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for DestinationReducer {
    type State = DestinationState;
    type Action = DestinationAction;

    fn reduce(&self, state: &mut DestinationState, action: DestinationAction) -> Effect<DestinationAction> {
        Effect::merge([
            self.sheet.reduce(state, action.clone()),
            self.navigation.reduce(state, action.clone()),
            self.full_screen_cover.reduce(state, action),
        ])
    }
}
