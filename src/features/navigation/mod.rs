//! Alerts, a confirmation dialog, and an item presented as push target,
//! sheet or full-screen cover, all sharing one destination slot.

mod action;
mod destination;
mod reducer;
mod state;

pub use action::{AlertAction, DestinationAction, DialogAction, NavigationAction, NavigationDelegate};
pub use destination::DestinationReducer;
pub use reducer::NavigationReducer;
pub use state::{DestinationState, NavigationState};
