use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::features::for_each::ForEachState;
use crate::features::navigation::NavigationState;
use crate::features::number::NumberState;
use crate::features::stack_nav::StackNavState;
use crate::mvi::FeatureState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RootTab {
    #[default]
    Number,
    Navigation,
    Stack,
    ForEach,
}

impl RootTab {
    pub const ALL: [RootTab; 4] = [
        RootTab::Number,
        RootTab::Navigation,
        RootTab::Stack,
        RootTab::ForEach,
    ];

    pub fn title(self) -> &'static str {
        match self {
            RootTab::Number => "number",
            RootTab::Navigation => "navigation",
            RootTab::Stack => "stack",
            RootTab::ForEach => "forEach",
        }
    }

    pub fn system_image(self) -> &'static str {
        match self {
            RootTab::Number => "textformat.123",
            RootTab::Navigation => "figure.sailing",
            RootTab::Stack => "square.stack.3d.down.forward",
            RootTab::ForEach => "arrow.2.squarepath",
        }
    }
}

impl fmt::Display for RootTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for RootTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RootTab::ALL
            .into_iter()
            .find(|tab| tab.title().eq_ignore_ascii_case(s) || s.replace(['-', '_'], "").eq_ignore_ascii_case(tab.title()))
            .ok_or_else(|| format!("unknown tab '{s}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RootState {
    pub for_each: ForEachState,
    pub navigation: NavigationState,
    pub number: NumberState,
    pub selected_tab: RootTab,
    pub stack: StackNavState,
}

impl FeatureState for RootState {}
