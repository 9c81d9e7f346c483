//! A list of independent number counters.

mod action;
mod reducer;
mod state;

pub use action::ForEachAction;
pub use reducer::ForEachReducer;
pub use state::ForEachState;
