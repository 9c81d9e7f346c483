use serde::Serialize;

use crate::features::for_each::ForEachState;
use crate::features::navigation::NavigationState;
use crate::features::number::NumberViewState;
use crate::features::root::{RootState, RootTab};
use crate::features::stack_nav::StackNavState;

/// What the selected tab shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TabView {
    Number(NumberViewState),
    Navigation(NavigationState),
    Stack(StackNavState),
    ForEach(ForEachState),
}

/// Projection printed by the driver: the selected tab and its content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Screen {
    pub tab: RootTab,
    pub image: &'static str,
    pub view: TabView,
}

impl Screen {
    pub fn of(state: &RootState) -> Self {
        let tab = state.selected_tab;
        let view = match tab {
            RootTab::Number => TabView::Number(NumberViewState::from(&state.number)),
            RootTab::Navigation => TabView::Navigation(state.navigation.clone()),
            RootTab::Stack => TabView::Stack(state.stack.clone()),
            RootTab::ForEach => TabView::ForEach(state.for_each.clone()),
        };
        Self {
            tab,
            image: tab.system_image(),
            view,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_tab_projects_view_state() {
        let mut state = RootState::default();
        state.number.count = 4;
        let screen = Screen::of(&state);
        assert_eq!(screen.tab, RootTab::Number);
        assert_eq!(screen.image, "textformat.123");
        match screen.view {
            TabView::Number(view) => assert_eq!(view.count, 4),
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn json_names_the_tab() {
        let mut state = RootState::default();
        state.selected_tab = RootTab::ForEach;
        let json = Screen::of(&state).to_json().unwrap();
        assert!(json.contains("\"tab\": \"for_each\""), "{json}");
    }
}
