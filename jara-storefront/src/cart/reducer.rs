//! Cart reducer
//!
//! Every cart mutation is a [`CartAction`] applied by [`reduce`]. The
//! reducer is pure: it never touches storage and never fails; an action
//! that refers to a pack or item that does not exist leaves the cart as is.

use shared::models::{CartItem, CartState, Pack};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Append an empty pack and make it active
    AddPack,
    /// Copy a pack's items into a new pack placed right after it
    DuplicatePack { pack_id: String },
    RemovePack { pack_id: String },
    SetActivePack { pack_id: String },
    /// Add to the active pack, merging with an existing line of the same id
    AddItem { item: CartItem },
    /// Set a line's quantity; 0 removes the line
    UpdateItemQuantity {
        pack_id: String,
        item_id: String,
        quantity: u32,
    },
    SetBrownBagQuantity { quantity: u32 },
    ClearCart,
    /// Replace the whole state (restore from storage)
    Restore { state: CartState },
}

impl CartAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddPack => "ADD_PACK",
            Self::DuplicatePack { .. } => "DUPLICATE_PACK",
            Self::RemovePack { .. } => "REMOVE_PACK",
            Self::SetActivePack { .. } => "SET_ACTIVE_PACK",
            Self::AddItem { .. } => "ADD_ITEM",
            Self::UpdateItemQuantity { .. } => "UPDATE_ITEM_QUANTITY",
            Self::SetBrownBagQuantity { .. } => "SET_BROWN_BAG_QUANTITY",
            Self::ClearCart => "CLEAR_CART",
            Self::Restore { .. } => "RESTORE",
        }
    }
}

/// Apply `action` to `state`, returning the next state
pub fn reduce(state: &CartState, action: CartAction) -> CartState {
    let mut next = state.clone();
    match action {
        CartAction::AddPack => {
            let pack = Pack::new();
            next.active_pack_id = Some(pack.id.clone());
            next.packs.push(pack);
        }
        CartAction::DuplicatePack { pack_id } => {
            match next.packs.iter().position(|p| p.id == pack_id) {
                Some(index) => {
                    let copy = Pack {
                        items: next.packs[index].items.clone(),
                        ..Pack::new()
                    };
                    next.active_pack_id = Some(copy.id.clone());
                    next.packs.insert(index + 1, copy);
                }
                None => debug!(pack_id = %pack_id, "DUPLICATE_PACK: unknown pack"),
            }
        }
        CartAction::RemovePack { pack_id } => {
            next.packs.retain(|p| p.id != pack_id);
            if next.active_pack_id.as_deref() == Some(pack_id.as_str()) {
                next.active_pack_id = next.packs.last().map(|p| p.id.clone());
            }
        }
        CartAction::SetActivePack { pack_id } => {
            if next.pack(&pack_id).is_some() {
                next.active_pack_id = Some(pack_id);
            } else {
                debug!(pack_id = %pack_id, "SET_ACTIVE_PACK: unknown pack");
            }
        }
        CartAction::AddItem { item } => {
            if item.quantity == 0 {
                return next;
            }
            let index = match next.active_pack().map(|p| p.id.clone()) {
                Some(id) => next.packs.iter().position(|p| p.id == id),
                None => None,
            };
            let index = match index {
                Some(i) => i,
                None => {
                    let pack = Pack::new();
                    next.active_pack_id = Some(pack.id.clone());
                    next.packs.push(pack);
                    next.packs.len() - 1
                }
            };
            let pack = &mut next.packs[index];
            match pack.items.iter_mut().find(|i| i.id == item.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity)
                }
                None => pack.items.push(item),
            }
        }
        CartAction::UpdateItemQuantity {
            pack_id,
            item_id,
            quantity,
        } => {
            if let Some(pack) = next.packs.iter_mut().find(|p| p.id == pack_id) {
                if quantity == 0 {
                    pack.items.retain(|i| i.id != item_id);
                } else if let Some(item) = pack.items.iter_mut().find(|i| i.id == item_id) {
                    item.quantity = quantity;
                }
            }
        }
        CartAction::SetBrownBagQuantity { quantity } => {
            next.brown_bag_quantity = quantity;
        }
        CartAction::ClearCart => next = CartState::default(),
        CartAction::Restore { state } => next = state,
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn jollof(quantity: u32) -> CartItem {
        CartItem::new("6f1c2a4e-8f0b-4d7e-9a51-1c2b3d4e5f60", "Jollof Rice", dec!(1000), quantity)
    }

    #[test]
    fn test_add_item_creates_first_pack() {
        let state = reduce(&CartState::default(), CartAction::AddItem { item: jollof(2) });
        assert_eq!(state.packs.len(), 1);
        assert_eq!(state.active_pack_id.as_deref(), Some(state.packs[0].id.as_str()));
        assert_eq!(state.item_count(), 2);
    }

    #[test]
    fn test_add_item_merges_same_id() {
        let state = reduce(&CartState::default(), CartAction::AddItem { item: jollof(1) });
        let state = reduce(&state, CartAction::AddItem { item: jollof(2) });
        assert_eq!(state.packs[0].items.len(), 1);
        assert_eq!(state.packs[0].items[0].quantity, 3);
    }

    #[test]
    fn test_merged_quantity_saturates() {
        let state = reduce(&CartState::default(), CartAction::AddItem { item: jollof(u32::MAX - 1) });
        let state = reduce(&state, CartAction::AddItem { item: jollof(5) });
        assert_eq!(state.packs[0].items[0].quantity, u32::MAX);
    }

    #[test]
    fn test_zero_quantity_add_is_ignored() {
        let state = reduce(&CartState::default(), CartAction::AddItem { item: jollof(0) });
        assert!(state.packs.is_empty());
    }

    #[test]
    fn test_duplicate_pack_inserts_after_source() {
        let state = reduce(&CartState::default(), CartAction::AddItem { item: jollof(1) });
        let state = reduce(&state, CartAction::AddPack);
        let first = state.packs[0].id.clone();

        let state = reduce(&state, CartAction::DuplicatePack { pack_id: first.clone() });
        assert_eq!(state.packs.len(), 3);
        assert_eq!(state.packs[1].items, state.packs[0].items);
        assert_ne!(state.packs[1].id, first);
        assert_eq!(state.active_pack_id.as_deref(), Some(state.packs[1].id.as_str()));
    }

    #[test]
    fn test_remove_active_pack_moves_active_to_last() {
        let state = reduce(&CartState::default(), CartAction::AddPack);
        let state = reduce(&state, CartAction::AddPack);
        let second = state.packs[1].id.clone();

        let state = reduce(&state, CartAction::RemovePack { pack_id: second });
        assert_eq!(state.packs.len(), 1);
        assert_eq!(state.active_pack_id.as_deref(), Some(state.packs[0].id.as_str()));

        let only = state.packs[0].id.clone();
        let state = reduce(&state, CartAction::RemovePack { pack_id: only });
        assert!(state.active_pack_id.is_none());
    }

    #[test]
    fn test_set_active_pack_ignores_unknown() {
        let state = reduce(&CartState::default(), CartAction::AddPack);
        let before = state.active_pack_id.clone();
        let state = reduce(
            &state,
            CartAction::SetActivePack {
                pack_id: "missing".into(),
            },
        );
        assert_eq!(state.active_pack_id, before);
    }

    #[test]
    fn test_update_quantity_zero_removes_line() {
        let state = reduce(&CartState::default(), CartAction::AddItem { item: jollof(2) });
        let pack_id = state.packs[0].id.clone();
        let item_id = state.packs[0].items[0].id.clone();

        let state = reduce(
            &state,
            CartAction::UpdateItemQuantity {
                pack_id: pack_id.clone(),
                item_id: item_id.clone(),
                quantity: 5,
            },
        );
        assert_eq!(state.item_count(), 5);

        let state = reduce(
            &state,
            CartAction::UpdateItemQuantity {
                pack_id,
                item_id,
                quantity: 0,
            },
        );
        assert!(state.is_empty());
        // The pack itself survives
        assert_eq!(state.packs.len(), 1);
    }

    #[test]
    fn test_clear_cart() {
        let state = reduce(&CartState::default(), CartAction::AddItem { item: jollof(2) });
        let state = reduce(&state, CartAction::SetBrownBagQuantity { quantity: 3 });
        let state = reduce(&state, CartAction::ClearCart);
        assert_eq!(state, CartState::default());
    }
}
