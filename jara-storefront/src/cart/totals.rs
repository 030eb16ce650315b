//! Order money math
//!
//! `subtotal = Σ(price × quantity) + brown bags × brown bag price`
//! `total = subtotal − subtotal × discount / 100 + delivery fee + service fee`
//!
//! The discount applies to the subtotal only, never to fees.

use rust_decimal::Decimal;
use shared::models::{CartState, FeeQuote};

/// Clamp a discount percentage into `0..=100`
pub fn clamp_discount(percent: Decimal) -> Decimal {
    percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

pub fn calculate_subtotal(cart: &CartState, brown_bag_price: Decimal) -> Decimal {
    cart.items_subtotal() + Decimal::from(cart.brown_bag_quantity) * brown_bag_price
}

pub fn calculate_discount(subtotal: Decimal, discount_percent: Decimal) -> Decimal {
    subtotal * clamp_discount(discount_percent) / Decimal::ONE_HUNDRED
}

pub fn calculate_total(subtotal: Decimal, discount_percent: Decimal, fees: &FeeQuote) -> Decimal {
    let delivery = fees.delivery_fee.max(Decimal::ZERO);
    let service = fees.service_fee.max(Decimal::ZERO);
    subtotal - calculate_discount(subtotal, discount_percent) + delivery + service
}

/// Full breakdown shown in the cart and sent with the order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub delivery_fee: Decimal,
    pub service_fee: Decimal,
    pub total: Decimal,
}

impl OrderTotals {
    pub fn compute(
        cart: &CartState,
        brown_bag_price: Decimal,
        discount_percent: Decimal,
        fees: &FeeQuote,
    ) -> Self {
        let subtotal = calculate_subtotal(cart, brown_bag_price);
        Self {
            subtotal,
            discount: calculate_discount(subtotal, discount_percent),
            delivery_fee: fees.delivery_fee,
            service_fee: fees.service_fee,
            total: calculate_total(subtotal, discount_percent, fees),
        }
    }
}
