use crate::features::item::ItemState;
use crate::features::navigation::action::{
    AlertAction, DestinationAction, DialogAction, NavigationAction, NavigationDelegate,
};
use crate::features::navigation::destination::DestinationReducer;
use crate::features::navigation::state::{DestinationState, NavigationState};
use crate::mvi::{Effect, IfLet, PresentationAction, PresentationState, Reducer, ReducerExt};
use crate::{action_case, state_field};

/// Screen-level behavior, before the destination child is attached.
struct NavigationCore;

impl Reducer for NavigationCore {
    type State = NavigationState;
    type Action = NavigationAction;

    fn reduce(&self, state: &mut NavigationState, action: NavigationAction) -> Effect<NavigationAction> {
        match action {
            NavigationAction::CloseSheetButtonTapped => {
                state.destination.dismiss();
                Effect::none()
            }
            NavigationAction::Delegate(_) => Effect::none(),
            NavigationAction::Destination(PresentationAction::Presented(
                DestinationAction::Alert(AlertAction::Reset),
            ))
            | NavigationAction::Destination(PresentationAction::Presented(
                DestinationAction::Dialog(DialogAction::Reset),
            )) => {
                tracing::info!("reset!");
                state.destination.dismiss();
                Effect::none()
            }
            NavigationAction::Destination(PresentationAction::Presented(
                DestinationAction::Dialog(DialogAction::Confirmation),
            )) => {
                state.destination.dismiss();
                Effect::none()
            }
            NavigationAction::Destination(_) => Effect::none(),
            NavigationAction::ShowItemAsFullScreenCover(item) => {
                state
                    .destination
                    .present(DestinationState::ItemAsFullScreenCover(ItemState::new(item)));
                Effect::none()
            }
            NavigationAction::ShowItemAsNavigation(item) => {
                state
                    .destination
                    .present(DestinationState::ItemAsNavigation(ItemState::new(item)));
                Effect::none()
            }
            NavigationAction::ShowItemAsSheet(item) => {
                state
                    .destination
                    .present(DestinationState::ItemAsSheet(ItemState::new(item)));
                Effect::none()
            }
            NavigationAction::ShowConfirmationDialogTapped => {
                state.destination.present(DestinationState::confirmation_dialog());
                Effect::none()
            }
            NavigationAction::ShowHelloAlertTapped => {
                state.destination.present(DestinationState::hello_alert());
                Effect::none()
            }
            NavigationAction::ShowWarningAlertTapped => {
                state.destination.present(DestinationState::warning_alert());
                Effect::none()
            }
            NavigationAction::SwitchToNumberTabTapped => Effect::send(NavigationAction::Delegate(
                NavigationDelegate::SwitchToNumberTab,
            )),
        }
    }
}

/// Navigation screen with its destination slot.
pub struct NavigationReducer {
    inner: IfLet<NavigationCore, DestinationReducer>,
}

impl NavigationReducer {
    pub fn new() -> Self {
        Self {
            inner: NavigationCore.if_let(
                "destination",
                state_field!(NavigationState => PresentationState<DestinationState>, destination),
                action_case!(NavigationAction => PresentationAction<DestinationAction>, Destination),
                DestinationReducer::new(),
            ),
        }
    }
}

impl Default for NavigationReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for NavigationReducer {
    type State = NavigationState;
    type Action = NavigationAction;

    fn reduce(&self, state: &mut NavigationState, action: NavigationAction) -> Effect<NavigationAction> {
        self.inner.reduce(state, action)
    }
}
