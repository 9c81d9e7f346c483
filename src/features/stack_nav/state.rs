use serde::Serialize;

use crate::features::item::ItemState;
use crate::features::number::NumberState;
use crate::mvi::{FeatureState, StackState};

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StackNavState {
    pub path: StackState<PathState>,
}

impl FeatureState for StackNavState {}

/// A screen on the navigation stack.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", content = "state", rename_all = "snake_case")]
pub enum PathState {
    Item(ItemState),
    Number(NumberState),
}

impl FeatureState for PathState {}
