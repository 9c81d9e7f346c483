use crate::features::item::action::ItemAction;
use crate::features::item::state::ItemState;
use crate::mvi::{Effect, Reducer};

pub struct ItemReducer;

impl Reducer for ItemReducer {
    type State = ItemState;
    type Action = ItemAction;

    fn reduce(&self, state: &mut ItemState, action: ItemAction) -> Effect<ItemAction> {
        match action {
            ItemAction::NameChanged(name) => state.item.name = name,
            ItemAction::FavoriteToggled => state.is_favorite = !state.is_favorite,
        }
        Effect::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::item::state::Item;

    #[test]
    fn favorite_toggles_back_and_forth() {
        let mut state = ItemState::new(Item::new("Pencil"));
        let _ = ItemReducer.reduce(&mut state, ItemAction::FavoriteToggled);
        assert!(state.is_favorite);
        let _ = ItemReducer.reduce(&mut state, ItemAction::FavoriteToggled);
        assert!(!state.is_favorite);
    }

    #[test]
    fn rename_replaces_name() {
        let mut state = ItemState::new(Item::new("Pencil"));
        let _ = ItemReducer.reduce(&mut state, ItemAction::NameChanged("Pen".into()));
        assert_eq!(state.item, Item::new("Pen"));
    }
}
