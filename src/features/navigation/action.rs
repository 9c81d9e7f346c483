use crate::features::item::{Item, ItemAction};
use crate::mvi::{Action, PresentationAction};

#[derive(Debug, Clone, PartialEq)]
pub enum NavigationAction {
    CloseSheetButtonTapped,
    Delegate(NavigationDelegate),
    Destination(PresentationAction<DestinationAction>),
    ShowItemAsFullScreenCover(Item),
    ShowItemAsNavigation(Item),
    ShowItemAsSheet(Item),
    ShowConfirmationDialogTapped,
    ShowHelloAlertTapped,
    ShowWarningAlertTapped,
    /// Asks the parent to switch tabs via [`NavigationDelegate::SwitchToNumberTab`].
    SwitchToNumberTabTapped,
}

impl Action for NavigationAction {}

/// Messages for whoever embeds the navigation feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDelegate {
    SwitchToNumberTab,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertAction {
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    Confirmation,
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DestinationAction {
    Alert(AlertAction),
    Dialog(DialogAction),
    ItemAsFullScreenCover(ItemAction),
    ItemAsNavigation(ItemAction),
    ItemAsSheet(ItemAction),
}

impl Action for DestinationAction {}
