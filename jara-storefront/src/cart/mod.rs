//! Cart state, reducer and totals

mod reducer;
mod store;
mod totals;

pub use reducer::{CartAction, reduce};
pub use store::CartStore;
pub use totals::{
    OrderTotals, calculate_discount, calculate_subtotal, calculate_total, clamp_discount,
};

use shared::models::{CartItem, CartState, OrderItem};
use shared::util::is_valid_uuid;

/// Order lines built from a cart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderLines {
    pub items: Vec<OrderItem>,
    /// Lines dropped because their id is not a UUID
    pub dropped: Vec<CartItem>,
}

/// Flatten packs into order lines, numbering packs from 1
///
/// Lines whose id is not a UUID cannot be submitted; they are returned in
/// `dropped` so the caller can warn the user.
pub fn build_order_lines(cart: &CartState) -> OrderLines {
    let mut lines = OrderLines::default();
    for (index, pack) in cart.packs.iter().enumerate() {
        for item in &pack.items {
            if is_valid_uuid(&item.id) {
                lines.items.push(OrderItem {
                    id: item.id.clone(),
                    name: item.name.clone(),
                    price: item.price,
                    quantity: item.quantity,
                    pack_number: Some(index + 1),
                });
            } else {
                tracing::warn!(item_id = %item.id, name = %item.name, "Dropping cart item with invalid id");
                lines.dropped.push(item.clone());
            }
        }
    }
    lines
}

/// The cart without lines that cannot be submitted
///
/// Totals, fees and the provider amount are all priced from this cart so
/// the customer never pays for a dropped line.
pub fn billable_cart(cart: &CartState) -> CartState {
    let mut billable = cart.clone();
    for pack in &mut billable.packs {
        pack.items.retain(|item| is_valid_uuid(&item.id));
    }
    billable
}
