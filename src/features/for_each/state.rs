use serde::Serialize;

use crate::features::number::NumberState;
use crate::mvi::{FeatureState, IdentifiedVec};

pub const INITIAL_NUMBERS: usize = 9;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForEachState {
    pub numbers: IdentifiedVec<NumberState>,
}

impl Default for ForEachState {
    fn default() -> Self {
        Self {
            numbers: (0..INITIAL_NUMBERS).map(|_| NumberState::new()).collect(),
        }
    }
}

impl FeatureState for ForEachState {}
