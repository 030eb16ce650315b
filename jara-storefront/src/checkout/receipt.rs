use crate::cart::OrderTotals;
use crate::payment::OrderDraft;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::{OrderDetails, OrderItem, PaymentMethod};

/// Where the receipt data came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptSource {
    Server,
    /// Detail fetch failed; rebuilt from what was submitted
    Local,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub order_id: String,
    pub items: Vec<OrderItem>,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub delivery_fee: Decimal,
    pub service_fee: Decimal,
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    pub delivery_address: String,
    pub transaction_ref: Option<String>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub source: ReceiptSource,
}

impl Receipt {
    /// Receipt from the server's order details; missing fields fall back
    /// to the submitted draft
    pub fn from_details(
        details: OrderDetails,
        draft: &OrderDraft,
        method: PaymentMethod,
        transaction_ref: Option<String>,
    ) -> Self {
        let items = if details.items.is_empty() {
            draft.items.clone()
        } else {
            details.items
        };
        // Older order records carry no money breakdown
        let totals = if details.total.is_zero() {
            draft.totals
        } else {
            OrderTotals {
                subtotal: details.subtotal,
                discount: details.discount,
                delivery_fee: details.delivery_fee,
                service_fee: details.service_fee,
                total: details.total,
            }
        };
        Self {
            order_id: details.id,
            items,
            subtotal: totals.subtotal,
            discount: totals.discount,
            delivery_fee: totals.delivery_fee,
            service_fee: totals.service_fee,
            total: totals.total,
            payment_method: details.payment_method.unwrap_or(method),
            delivery_address: details
                .delivery_address
                .unwrap_or_else(|| draft.address.context_address.clone()),
            transaction_ref: details.transaction_ref.or(transaction_ref),
            status: details.status,
            created_at: details.created_at.unwrap_or_else(Utc::now),
            source: ReceiptSource::Server,
        }
    }

    /// Receipt rebuilt from the submitted draft
    pub fn local(
        order_id: &str,
        draft: &OrderDraft,
        method: PaymentMethod,
        transaction_ref: Option<String>,
    ) -> Self {
        Self {
            order_id: order_id.to_string(),
            items: draft.items.clone(),
            subtotal: draft.totals.subtotal,
            discount: draft.totals.discount,
            delivery_fee: draft.totals.delivery_fee,
            service_fee: draft.totals.service_fee,
            total: draft.totals.total,
            payment_method: method,
            delivery_address: draft.address.context_address.clone(),
            transaction_ref,
            status: None,
            created_at: Utc::now(),
            source: ReceiptSource::Local,
        }
    }
}
