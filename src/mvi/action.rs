//! Base trait for actions in MVI architecture.

use std::fmt;

/// Marker trait for action values.
///
/// Actions represent:
/// - User intents (button taps, toggles)
/// - Effect results (API responses, timer ticks)
/// - Navigation events (presentation, stack pushes and pops)
///
/// Actions are processed by reducers to produce new states. They are cloned
/// when several embedded reducers observe the same action.
pub trait Action: Clone + fmt::Debug + Send + 'static {}
