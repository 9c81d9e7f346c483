//! Model-View-Intent (MVI) runtime primitives.
//!
//! This module provides the kernel every feature is built on: pure reducers,
//! effect descriptions, the effect runtime, and the store that serializes
//! dispatch.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Reducer ──→ State ──→ View
//!    ↑          │                   │
//!    │          ▼                   │
//!    ├──── Effect runtime           │
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: value-typed snapshot, compared with `PartialEq`
//! - **Action**: user intents and effect results
//! - **Reducer**: mutates state in place and describes effects, never does I/O
//! - **Effect**: async work keyed by a [`CancelId`], namespaced by scope path
//! - **Store**: single serialization point for state mutation

mod action;
mod alert;
mod cancel;
mod effect;
mod engine;
mod error;
mod identified;
mod presentation;
mod reducer;
mod scope;
mod stack;
mod state;
mod store;
mod test_store;

pub use action::Action;
pub use alert::{AlertState, ButtonRole, ButtonState, ConfirmationDialogState};
pub use cancel::{CancelId, CancelToken, KeySegment};
pub use effect::{BoxFuture, Effect, Sender};
pub use engine::EffectRuntime;
pub use error::StoreError;
pub use identified::{ForEach, Identifiable, IdentifiedAction, IdentifiedVec};
pub use presentation::{IfLet, PresentationAction, PresentationState};
pub use reducer::{Combine, Reduce, Reducer, ReducerExt};
pub use scope::{CasePath, Scope, StatePath};
pub use stack::{ForEachStack, StackAction, StackElementId, StackState};
pub use state::FeatureState;
pub use store::{Observer, ScopedStore, Store};
pub use test_store::TestStore;
