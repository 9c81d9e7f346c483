//! Line-oriented driver standing in for the views.
//!
//! Commands read from stdin become root actions; the projection of the
//! selected tab is printed whenever it changes.

mod args;
mod command;
mod view;

pub use args::Args;
pub use command::{parse_command, CommandError, Input, HELP};
pub use view::{Screen, TabView};
