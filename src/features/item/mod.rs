mod action;
mod reducer;
mod state;

pub use action::ItemAction;
pub use reducer::ItemReducer;
pub use state::{Item, ItemState};
