use serde::Serialize;
use uuid::Uuid;

use crate::mvi::{FeatureState, Identifiable};

/// Counter with a trivia fact and an auto-increment timer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberState {
    pub id: Uuid,
    pub count: i64,
    pub fact: String,
    pub is_retrieving_fact: bool,
    pub is_timer_on: bool,
}

impl NumberState {
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    pub fn with_id(id: Uuid) -> Self {
        Self {
            id,
            count: 0,
            fact: String::new(),
            is_retrieving_fact: false,
            is_timer_on: false,
        }
    }
}

impl Default for NumberState {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureState for NumberState {}

impl Identifiable for NumberState {
    type Id = Uuid;

    fn id(&self) -> Uuid {
        self.id
    }
}

/// What the number view renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberViewState {
    pub count: i64,
    pub fact: String,
    pub is_retrieving_fact: bool,
    pub is_timer_on: bool,
}

impl From<&NumberState> for NumberViewState {
    fn from(state: &NumberState) -> Self {
        Self {
            count: state.count,
            fact: state.fact.clone(),
            is_retrieving_fact: state.is_retrieving_fact,
            is_timer_on: state.is_timer_on,
        }
    }
}
