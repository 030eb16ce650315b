//! Payment processor
//!
//! Wallet balance gate, provider configuration and order submission.

use super::service::UnifiedPaymentService;
use crate::cart::{CartAction, CartStore, OrderTotals};
use crate::checkout::{CheckoutView, Receipt};
use crate::error::CheckoutError;
use jara_client::OrderApi;
use rust_decimal::Decimal;
use shared::models::{
    AuthSession, Business, CURRENCY, DeliveryAddress, InvalidPaymentMethod, OrderAddress, OrderBusiness, OrderFees,
    OrderItem, OrderPayload, OrderPayment, PaymentConfig, PaymentMetadata, PaymentMethod,
    PaymentStatus, ReferencePurpose, to_minor_units,
};
use std::sync::Arc;

/// Everything needed to submit an order, captured when "Place Order" passes
/// its gates
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub session: AuthSession,
    pub business: Business,
    pub items: Vec<OrderItem>,
    pub address: DeliveryAddress,
    pub totals: OrderTotals,
    pub brown_bag_quantity: u32,
    pub delivery_instructions: Option<String>,
    pub vendor_instructions: Option<String>,
    pub promo_codes: Vec<String>,
}

impl OrderDraft {
    /// Fails when the address has no local government id
    pub fn to_payload(
        &self,
        method: PaymentMethod,
        status: PaymentStatus,
        transaction_ref: Option<String>,
    ) -> Result<OrderPayload, CheckoutError> {
        let local_government_id = self
            .address
            .local_government_id()
            .ok_or(CheckoutError::AddressInvalid)?;
        let details = &self.address.location_details;
        Ok(OrderPayload {
            user: self.session.user.clone(),
            business: OrderBusiness {
                id: self.business.id.clone(),
                name: self.business.name.clone(),
            },
            items: self.items.clone(),
            delivery_address: OrderAddress {
                address: self.address.context_address.clone(),
                state: details.state.clone(),
                local_government: details.local_government.clone(),
                locality: details.locality.clone(),
                local_government_id: local_government_id.to_string(),
                coordinates: self.address.coordinates,
            },
            fees: OrderFees {
                subtotal: self.totals.subtotal,
                discount: self.totals.discount,
                delivery_fee: self.totals.delivery_fee,
                service_fee: self.totals.service_fee,
                brown_bag_quantity: self.brown_bag_quantity,
                total: self.totals.total,
            },
            payment: OrderPayment {
                method,
                status,
                transaction_ref,
                amount: self.totals.total,
            },
            delivery_instructions: non_blank(&self.delivery_instructions),
            vendor_instructions: non_blank(&self.vendor_instructions),
            promo_codes: self.promo_codes.clone(),
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Order created and receipt shown
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfirmation {
    pub order_id: String,
    pub receipt: Receipt,
}

pub struct PaymentProcessor {
    payments: Arc<UnifiedPaymentService>,
    orders: Arc<dyn OrderApi>,
    cart: Arc<CartStore>,
    view: Arc<dyn CheckoutView>,
}

impl PaymentProcessor {
    pub fn new(
        payments: Arc<UnifiedPaymentService>,
        orders: Arc<dyn OrderApi>,
        cart: Arc<CartStore>,
        view: Arc<dyn CheckoutView>,
    ) -> Self {
        Self {
            payments,
            orders,
            cart,
            view,
        }
    }

    /// Check the live wallet balance, then submit as a wallet order
    ///
    /// An insufficient balance aborts before any order request is made.
    pub async fn process_wallet_payment(
        &self,
        draft: &OrderDraft,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let balance = self
            .payments
            .get_wallet_balance(&draft.session.user.id, &draft.session.token)
            .await?;
        let total = draft.totals.total;
        if balance < total {
            tracing::info!(%balance, %total, "Wallet balance too low for order");
            return Err(CheckoutError::InsufficientBalance { balance, total });
        }
        let reference = UnifiedPaymentService::generate_reference(ReferencePurpose::WalletPay);
        self.process_order(draft, PaymentMethod::Wallet, PaymentStatus::Paid, Some(reference))
            .await
    }

    /// Build the provider configuration for a display label
    ///
    /// Returns `Ok(None)` when no public key is configured: online payment
    /// is unavailable and retrying will not help.
    pub fn configure_paystack(
        &self,
        label: &str,
        total: Decimal,
        email: &str,
        display_label: &str,
        delivery_fee: Decimal,
        service_fee: Decimal,
    ) -> Result<Option<PaymentConfig>, CheckoutError> {
        let method = PaymentMethod::from_label(label)?;
        if !method.uses_provider() {
            return Err(InvalidPaymentMethod(label.to_string()).into());
        }
        let Some(public_key) = self.payments.public_key() else {
            tracing::error!("Paystack public key is not configured");
            return Ok(None);
        };
        Ok(Some(PaymentConfig {
            reference: UnifiedPaymentService::generate_reference(ReferencePurpose::Order),
            email: email.to_string(),
            amount: to_minor_units(total),
            public_key: public_key.to_string(),
            currency: CURRENCY.to_string(),
            channels: method.provider_channels(),
            label: display_label.to_string(),
            metadata: PaymentMetadata {
                payment_method: method.as_str().to_string(),
                delivery_fee,
                service_fee,
                user_id: None,
            },
        }))
    }

    /// Submit the order
    ///
    /// On success the cart is cleared, the panel closed and the receipt
    /// shown; a failed detail fetch only downgrades the receipt to a local
    /// one. On failure the cart is left untouched.
    pub async fn process_order(
        &self,
        draft: &OrderDraft,
        method: PaymentMethod,
        status: PaymentStatus,
        transaction_ref: Option<String>,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let payload = draft.to_payload(method, status, transaction_ref.clone())?;
        let token = &draft.session.token;

        let created = match self.orders.create_order(&payload, token).await {
            Ok(order) => order,
            Err(e) => {
                tracing::error!(method = %method, error = %e, "Order submission failed");
                return Err(CheckoutError::OrderFailed(e.user_message()));
            }
        };
        tracing::info!(order_id = %created.id, method = %method, total = %draft.totals.total, "Order created");

        self.cart.dispatch(CartAction::ClearCart);
        self.view.close_panel();

        let receipt = match self.orders.order_details(&created.id, token).await {
            Ok(details) => Receipt::from_details(details, draft, method, transaction_ref),
            Err(e) => {
                tracing::warn!(order_id = %created.id, error = %e, "Order details unavailable, using local receipt");
                Receipt::local(&created.id, draft, method, transaction_ref)
            }
        };
        self.view.show_receipt(&receipt);

        Ok(OrderConfirmation {
            order_id: created.id,
            receipt,
        })
    }
}
