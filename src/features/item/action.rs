use crate::mvi::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum ItemAction {
    NameChanged(String),
    FavoriteToggled,
}

impl Action for ItemAction {}
