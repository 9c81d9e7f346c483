//! Tab container embedding every demo feature.

mod action;
mod reducer;
mod state;

pub use action::RootAction;
pub use reducer::RootReducer;
pub use state::{RootState, RootTab};
