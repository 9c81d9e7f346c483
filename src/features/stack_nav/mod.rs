//! Push/pop navigation over a stack of number and item screens.

mod action;
mod reducer;
mod state;

pub use action::{PathAction, StackNavAction};
pub use reducer::{PathReducer, StackNavReducer};
pub use state::{PathState, StackNavState};
