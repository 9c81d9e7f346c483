use crate::features::item::ItemAction;
use crate::features::number::NumberAction;
use crate::features::stack_nav::state::PathState;
use crate::mvi::{Action, StackAction};

#[derive(Debug, Clone, PartialEq)]
pub enum StackNavAction {
    /// Push a fresh number screen.
    NavigateToNumber,
    Path(StackAction<PathState, PathAction>),
}

impl Action for StackNavAction {}

#[derive(Debug, Clone, PartialEq)]
pub enum PathAction {
    Item(ItemAction),
    Number(NumberAction),
}

impl Action for PathAction {}
