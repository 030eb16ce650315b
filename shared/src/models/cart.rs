//! Cart models
//!
//! A cart is an ordered list of packs; each pack groups the items that are
//! prepared and bagged together. New items land in the active pack.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default price of one brown bag (packaging add-on), in Naira
pub const BROWN_BAG_PRICE: Decimal = Decimal::from_parts(200, 0, 0, false, 0);

/// A single line in a pack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Menu item id (must be a UUID before order submission)
    pub id: String,
    pub name: String,
    /// Unit price in Naira
    pub price: Decimal,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal, quantity: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity,
        }
    }

    /// price × quantity
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// A group of items bagged together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pack {
    pub id: String,
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl Pack {
    /// Create an empty pack with a fresh id
    pub fn new() -> Self {
        Self {
            id: crate::util::new_id(),
            items: Vec::new(),
        }
    }

    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Pack {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete cart state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    #[serde(default)]
    pub packs: Vec<Pack>,
    /// Pack that new items are appended to
    #[serde(default)]
    pub active_pack_id: Option<String>,
    #[serde(default)]
    pub brown_bag_quantity: u32,
}

impl CartState {
    /// True when no pack holds any item
    pub fn is_empty(&self) -> bool {
        self.packs.iter().all(Pack::is_empty)
    }

    pub fn item_count(&self) -> u32 {
        self.packs
            .iter()
            .flat_map(|p| p.items.iter())
            .fold(0u32, |count, i| count.saturating_add(i.quantity))
    }

    pub fn pack(&self, pack_id: &str) -> Option<&Pack> {
        self.packs.iter().find(|p| p.id == pack_id)
    }

    pub fn active_pack(&self) -> Option<&Pack> {
        self.active_pack_id
            .as_deref()
            .and_then(|id| self.pack(id))
    }

    /// Σ(price × quantity) over every pack, excluding brown bags
    pub fn items_subtotal(&self) -> Decimal {
        self.packs.iter().map(Pack::subtotal).sum()
    }

    /// Stable fingerprint of the cart contents, used to decide whether
    /// fee inputs changed.
    pub fn contents_key(&self) -> String {
        let mut key = String::new();
        for pack in &self.packs {
            key.push_str(&pack.id);
            key.push('[');
            for item in &pack.items {
                key.push_str(&format!("{}:{}x{};", item.id, item.price, item.quantity));
            }
            key.push(']');
        }
        key.push_str(&format!("bb{}", self.brown_bag_quantity));
        key
    }
}
