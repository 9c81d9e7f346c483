use serde::Serialize;

use crate::mvi::FeatureState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub name: String,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Detail screen for one item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemState {
    pub item: Item,
    pub is_favorite: bool,
}

impl ItemState {
    pub fn new(item: Item) -> Self {
        Self {
            item,
            is_favorite: false,
        }
    }
}

impl FeatureState for ItemState {}
