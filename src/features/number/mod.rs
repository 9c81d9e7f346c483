mod action;
mod reducer;
mod state;

pub use action::NumberAction;
pub use reducer::NumberReducer;
pub use state::{NumberState, NumberViewState};
