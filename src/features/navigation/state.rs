use serde::Serialize;

use crate::features::item::{Item, ItemState};
use crate::features::navigation::action::{AlertAction, DialogAction};
use crate::mvi::{AlertState, ButtonRole, ButtonState, ConfirmationDialogState, FeatureState, PresentationState};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationState {
    pub item: Item,
    pub destination: PresentationState<DestinationState>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            item: Item::new("Pencil"),
            destination: PresentationState::new(),
        }
    }
}

impl FeatureState for NavigationState {}

/// Everything the navigation screen can present. At most one at a time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "state", rename_all = "snake_case")]
pub enum DestinationState {
    Alert(AlertState<AlertAction>),
    Dialog(ConfirmationDialogState<DialogAction>),
    ItemAsFullScreenCover(ItemState),
    ItemAsNavigation(ItemState),
    ItemAsSheet(ItemState),
}

impl FeatureState for DestinationState {}

impl DestinationState {
    pub fn hello_alert() -> Self {
        DestinationState::Alert(
            AlertState::new("Hello 🤗")
                .message("Hello hello!")
                .button(ButtonState::new("Ok")),
        )
    }

    pub fn warning_alert() -> Self {
        DestinationState::Alert(
            AlertState::new("Warning ❗️")
                .message("is this a warning?")
                .button(
                    ButtonState::new("Reset")
                        .role(ButtonRole::Destructive)
                        .action(AlertAction::Reset),
                ),
        )
    }

    pub fn confirmation_dialog() -> Self {
        DestinationState::Dialog(
            ConfirmationDialogState::new("This is a title")
                .message("Are you sure you want to reset?")
                .button(ButtonState::new("Reset").action(DialogAction::Reset)),
        )
    }
}
