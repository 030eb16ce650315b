//! Order DTOs

use super::business::Customer;
use super::cart::CartState;
use super::location::Coordinates;
use super::payment::{PaymentMethod, PaymentStatus};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Line item as submitted with an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    /// 1-based pack number the item belongs to
    #[serde(default)]
    pub pack_number: Option<usize>,
}

/// Vendor reference inside the order payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBusiness {
    pub id: String,
    pub name: String,
}

/// Delivery address inside the order payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAddress {
    pub address: String,
    pub state: String,
    pub local_government: String,
    pub locality: String,
    pub local_government_id: String,
    pub coordinates: Option<Coordinates>,
}

/// Money breakdown of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFees {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub delivery_fee: Decimal,
    pub service_fee: Decimal,
    pub brown_bag_quantity: u32,
    pub total: Decimal,
}

/// Payment part of the order payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayment {
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    #[serde(default)]
    pub transaction_ref: Option<String>,
    pub amount: Decimal,
}

/// `POST /api/orders` body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub user: Customer,
    pub business: OrderBusiness,
    pub items: Vec<OrderItem>,
    pub delivery_address: OrderAddress,
    pub fees: OrderFees,
    pub payment: OrderPayment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_instructions: Option<String>,
    pub promo_codes: Vec<String>,
}

/// Order as echoed back on creation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedOrder {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedOrderData {
    pub order: CreatedOrder,
}

/// `POST /api/orders` envelope
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<CreatedOrderData>,
}

/// Full order detail used to hydrate the receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    pub id: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub subtotal: Decimal,
    #[serde(default)]
    pub discount: Decimal,
    #[serde(default)]
    pub delivery_fee: Decimal,
    #[serde(default)]
    pub service_fee: Decimal,
    #[serde(default)]
    pub total: Decimal,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub delivery_address: Option<String>,
    #[serde(default)]
    pub transaction_ref: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// `GET /api/orders/:id` payload: either `{order: {...}}` or the order itself
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OrderDetailsData {
    Wrapped { order: OrderDetails },
    Bare(OrderDetails),
}

impl OrderDetailsData {
    pub fn into_inner(self) -> OrderDetails {
        match self {
            Self::Wrapped { order } => order,
            Self::Bare(order) => order,
        }
    }
}

/// `GET /api/orders/:id` envelope
#[derive(Debug, Clone, Deserialize)]
pub struct OrderDetailsResponse {
    pub data: Option<OrderDetailsData>,
}

/// `POST /api/save-for-later` body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SaveForLaterRequest {
    pub source: String,
    pub vendor_id: String,
    pub cart: CartState,
}
