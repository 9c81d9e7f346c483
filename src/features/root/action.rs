use crate::features::for_each::ForEachAction;
use crate::features::navigation::NavigationAction;
use crate::features::number::NumberAction;
use crate::features::root::state::RootTab;
use crate::features::stack_nav::StackNavAction;
use crate::mvi::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum RootAction {
    ForEach(ForEachAction),
    Navigation(NavigationAction),
    Number(NumberAction),
    SelectedTab(RootTab),
    Stack(StackNavAction),
}

impl Action for RootAction {}
