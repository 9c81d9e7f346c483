//! Composable state runtime with cancellable effects, plus the demo
//! features that exercise it.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Store ──→ Reducer ──→ State ──→ View
//!   ↑                     │
//!   │                     ▼
//!   └──────────────── Effect (async, keyed)
//! ```
//!
//! - [`mvi`]: the kernel (reducers, effects, store, scoping, collections,
//!   presentation and stack navigation)
//! - [`capabilities`]: injected collaborators effects call into
//! - [`features`]: number, item, navigation, stack, for-each and root features
//! - [`config`], [`logging`], [`cli`]: ambient plumbing for the binary

pub mod capabilities;
pub mod cli;
pub mod config;
pub mod features;
pub mod logging;
pub mod mvi;
