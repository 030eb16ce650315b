//! Cart checkout state machine
//!
//! ```text
//! Editing ─► PlacingOrder ─► AwaitingPayment ─► SubmittingOrder ─► Receipt
//!    ▲             │                │                   │
//!    │             │            (cancel)                └──────► Failed
//!    └─────────────┴────────────────┘
//! Editing ─► SavingForLater ─► Editing
//! ```
//!
//! "Place Order" passes four gates in a fixed order: cart non-empty,
//! customer signed in, address valid, payment method valid. A gate failure
//! scrolls to the offending section, raises a toast and stops. Fees must
//! also be settled before anything is charged.

use super::receipt::Receipt;
use super::view::{CheckoutSection, CheckoutView};
use crate::auth::AuthState;
use crate::cart::{
    CartAction, CartStore, OrderTotals, billable_cart, build_order_lines, clamp_discount,
};
use crate::config::StorefrontConfig;
use crate::error::CheckoutError;
use crate::fees::{FeeCalculator, FeeInputs, FeeState};
use crate::notify::{Notification, Notifier};
use crate::payment::{
    OrderConfirmation, OrderDraft, PROVIDER, PaymentProcessor, UnifiedPaymentService,
    WidgetOutcome,
};
use jara_client::OrderApi;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use shared::{AppError, ErrorCode};
use shared::models::{
    BROWN_BAG_PRICE, Business, CartState, DeliveryAddress, FeeQuote, PaymentConfig,
    PaymentMethod, PaymentStatus, ProviderTransaction, SaveForLaterRequest,
};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// State
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutPhase {
    Editing,
    PlacingOrder,
    AwaitingPayment,
    SubmittingOrder,
    Receipt,
    Failed,
    SavingForLater,
}

impl CheckoutPhase {
    fn is_busy(&self) -> bool {
        matches!(
            self,
            Self::PlacingOrder | Self::AwaitingPayment | Self::SubmittingOrder | Self::SavingForLater
        )
    }
}

/// Payment captured and order confirmed are separate milestones
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PaymentProgress {
    #[default]
    NotStarted,
    /// Provider payment verified; the order does not exist yet
    Captured { reference: String },
    Confirmed { order_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedPromo {
    pub code: String,
    /// Percentage off the subtotal, `0..=100`
    pub percent: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutState {
    pub phase: CheckoutPhase,
    pub address: DeliveryAddress,
    pub payment_label: Option<String>,
    pub promos: Vec<AppliedPromo>,
    pub delivery_instructions: Option<String>,
    pub vendor_instructions: Option<String>,
    pub is_processing: bool,
    pub is_submitting: bool,
    pub is_saving_for_later: bool,
    pub payment_config: Option<PaymentConfig>,
    pub payment_progress: PaymentProgress,
    pub order_id: Option<String>,
    pub receipt: Option<Receipt>,
    pub last_error: Option<String>,
}

impl Default for CheckoutState {
    fn default() -> Self {
        Self {
            phase: CheckoutPhase::Editing,
            address: DeliveryAddress::default(),
            payment_label: None,
            promos: Vec::new(),
            delivery_instructions: None,
            vendor_instructions: None,
            is_processing: false,
            is_submitting: false,
            is_saving_for_later: false,
            payment_config: None,
            payment_progress: PaymentProgress::NotStarted,
            order_id: None,
            receipt: None,
            last_error: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    pub brown_bag_price: Decimal,
    pub save_for_later_close_delay: Duration,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            brown_bag_price: BROWN_BAG_PRICE,
            save_for_later_close_delay: Duration::from_millis(1500),
        }
    }
}

impl From<&StorefrontConfig> for CheckoutSettings {
    fn from(config: &StorefrontConfig) -> Self {
        Self {
            brown_bag_price: config.brown_bag_price,
            save_for_later_close_delay: config.save_for_later_close_delay,
        }
    }
}

/// Services the checkout is wired to
pub struct CheckoutDeps {
    pub cart: Arc<CartStore>,
    pub auth: Arc<AuthState>,
    pub fees: Arc<FeeCalculator>,
    pub payments: Arc<UnifiedPaymentService>,
    pub processor: Arc<PaymentProcessor>,
    pub orders: Arc<dyn OrderApi>,
    pub notifier: Arc<dyn Notifier>,
    pub view: Arc<dyn CheckoutView>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlaceOrderOutcome {
    Placed(OrderConfirmation),
    /// Customer closed the provider popup
    Cancelled,
}

/// Provider payment awaiting the popup result
struct PendingPayment {
    draft: OrderDraft,
    method: PaymentMethod,
}

// ============================================================================
// Orchestrator
// ============================================================================

pub struct CheckoutOrchestrator {
    deps: CheckoutDeps,
    business: Business,
    settings: CheckoutSettings,
    state: Mutex<CheckoutState>,
    pending: Mutex<Option<PendingPayment>>,
}

impl CheckoutOrchestrator {
    pub fn new(deps: CheckoutDeps, business: Business, settings: CheckoutSettings) -> Self {
        Self {
            deps,
            business,
            settings,
            state: Mutex::new(CheckoutState::default()),
            pending: Mutex::new(None),
        }
    }

    pub fn state(&self) -> CheckoutState {
        self.state.lock().clone()
    }

    pub fn business(&self) -> &Business {
        &self.business
    }

    pub fn fee_state(&self) -> FeeState {
        self.deps.fees.state()
    }

    fn update(&self, f: impl FnOnce(&mut CheckoutState)) {
        f(&mut self.state.lock());
    }

    // ========== Inputs ==========

    /// Address chosen through the address selector
    pub fn set_address(&self, address: DeliveryAddress) {
        self.update(|s| s.address = address);
    }

    pub fn set_payment_method(&self, label: impl Into<String>) {
        let label = label.into();
        self.update(|s| s.payment_label = Some(label));
    }

    pub fn set_delivery_instructions(&self, text: Option<String>) {
        self.update(|s| s.delivery_instructions = text);
    }

    pub fn set_vendor_instructions(&self, text: Option<String>) {
        self.update(|s| s.vendor_instructions = text);
    }

    /// Apply (or re-apply) a promo code; returns the effective discount
    pub fn apply_promo_code(&self, code: &str, percent: Decimal) -> Decimal {
        let code = code.trim().to_uppercase();
        let percent = clamp_discount(percent);
        self.update(|s| {
            s.promos.retain(|p| p.code != code);
            s.promos.push(AppliedPromo { code, percent });
        });
        self.discount_percent()
    }

    pub fn remove_promo_code(&self, code: &str) {
        let code = code.trim().to_uppercase();
        self.update(|s| s.promos.retain(|p| p.code != code));
    }

    /// Promo codes do not stack: the largest percentage applies
    pub fn discount_percent(&self) -> Decimal {
        self.state
            .lock()
            .promos
            .iter()
            .map(|p| p.percent)
            .max()
            .unwrap_or(Decimal::ZERO)
    }

    // ========== Money ==========

    /// Totals over the billable lines with the current fees
    pub fn totals(&self) -> OrderTotals {
        let cart = billable_cart(&self.deps.cart.snapshot());
        self.price(&cart, &self.deps.fees.state().quote())
    }

    fn price(&self, cart: &CartState, fees: &FeeQuote) -> OrderTotals {
        OrderTotals::compute(
            cart,
            self.settings.brown_bag_price,
            self.discount_percent(),
            fees,
        )
    }

    fn fee_inputs(&self) -> FeeInputs {
        let cart = billable_cart(&self.deps.cart.snapshot());
        let address = self.state.lock().address.clone();
        self.fee_inputs_for(cart, address)
    }

    fn fee_inputs_for(&self, cart: CartState, address: DeliveryAddress) -> FeeInputs {
        let items = self.price(&cart, &FeeQuote::default());
        FeeInputs {
            cart,
            address,
            business: Some(self.business.clone()),
            order_value: items.subtotal - items.discount,
        }
    }

    /// Re-run the fee calculation if its inputs changed
    pub async fn refresh_fees(&self) -> FeeState {
        let inputs = self.fee_inputs();
        self.deps.fees.on_inputs_changed(&inputs).await
    }

    /// Force a fee recalculation ("Try again")
    pub async fn retry_fees(&self) -> FeeState {
        let inputs = self.fee_inputs();
        self.deps.fees.recalculate(&inputs).await
    }

    // ========== Place order ==========

    pub async fn place_order(&self) -> Result<PlaceOrderOutcome, CheckoutError> {
        self.begin(CheckoutPhase::PlacingOrder)?;

        let (draft, method, label) = match self.check_gates().await {
            Ok(v) => v,
            Err(e) => {
                self.update(|s| {
                    s.phase = CheckoutPhase::Editing;
                    s.is_processing = false;
                    s.last_error = Some(e.to_string());
                });
                self.report(&e);
                return Err(e);
            }
        };
        tracing::info!(method = %method, total = %draft.totals.total, "Placing order");

        let result = match method {
            PaymentMethod::Wallet => {
                self.update(|s| s.is_submitting = true);
                self.deps
                    .processor
                    .process_wallet_payment(&draft)
                    .await
                    .map(PlaceOrderOutcome::Placed)
            }
            PaymentMethod::CashOnDelivery => {
                self.update(|s| {
                    s.phase = CheckoutPhase::SubmittingOrder;
                    s.is_submitting = true;
                });
                self.deps
                    .processor
                    .process_order(&draft, method, PaymentStatus::Pending, None)
                    .await
                    .map(PlaceOrderOutcome::Placed)
            }
            _ => self.start_provider_payment(draft, method, &label).await,
        };
        self.finish(result)
    }

    /// Move into a busy phase unless another operation holds it
    fn begin(&self, phase: CheckoutPhase) -> Result<(), CheckoutError> {
        let mut state = self.state.lock();
        if state.phase.is_busy() {
            return Err(CheckoutError::Busy);
        }
        state.phase = phase;
        state.last_error = None;
        match phase {
            CheckoutPhase::SavingForLater => state.is_saving_for_later = true,
            _ => {
                state.is_processing = true;
                state.payment_progress = PaymentProgress::NotStarted;
            }
        }
        Ok(())
    }

    /// The four ordered gates, then item and fee checks
    ///
    /// Fees are settled against the exact cart and address being
    /// submitted; a quote for an earlier address is never charged.
    async fn check_gates(&self) -> Result<(OrderDraft, PaymentMethod, String), CheckoutError> {
        let view = &self.deps.view;

        let cart = self.deps.cart.snapshot();
        if cart.is_empty() {
            view.scroll_to(CheckoutSection::Cart);
            return Err(CheckoutError::CartEmpty);
        }

        let Some(session) = self.deps.auth.current() else {
            view.open_login();
            return Err(CheckoutError::NotAuthenticated);
        };

        let state = self.state();
        let address = state.address.clone();
        if !address.is_complete() {
            view.scroll_to(CheckoutSection::Address);
            return Err(CheckoutError::AddressInvalid);
        }

        let Some(label) = state.payment_label.clone() else {
            view.scroll_to(CheckoutSection::PaymentMethod);
            return Err(CheckoutError::PaymentMethodRequired);
        };
        let method = PaymentMethod::from_label(&label).inspect_err(|_| {
            view.scroll_to(CheckoutSection::PaymentMethod);
        })?;

        let lines = build_order_lines(&cart);
        if !lines.dropped.is_empty() {
            let names: Vec<&str> = lines.dropped.iter().map(|i| i.name.as_str()).collect();
            self.deps.notifier.notify(Notification::warning(
                ErrorCode::CartItemInvalid,
                format!(
                    "Some items are no longer available and were left out: {}",
                    names.join(", ")
                ),
            ));
        }
        if lines.items.is_empty() {
            view.scroll_to(CheckoutSection::Cart);
            return Err(CheckoutError::NoValidItems);
        }
        let billable = billable_cart(&cart);

        let inputs = self.fee_inputs_for(billable.clone(), address.clone());
        let fees = self.deps.fees.on_inputs_changed(&inputs).await;
        if fees.blocks_checkout() {
            view.scroll_to(CheckoutSection::Fees);
            let message = fees
                .fee_error
                .unwrap_or_else(|| "Delivery fees are still being calculated".to_string());
            return Err(CheckoutError::FeesUnavailable(message));
        }

        let totals = self.price(&billable, &fees.quote());
        let draft = OrderDraft {
            session,
            business: self.business.clone(),
            items: lines.items,
            address,
            totals,
            brown_bag_quantity: cart.brown_bag_quantity,
            delivery_instructions: state.delivery_instructions,
            vendor_instructions: state.vendor_instructions,
            promo_codes: state.promos.into_iter().map(|p| p.code).collect(),
        };
        Ok((draft, method, label))
    }

    async fn start_provider_payment(
        &self,
        draft: OrderDraft,
        method: PaymentMethod,
        label: &str,
    ) -> Result<PlaceOrderOutcome, CheckoutError> {
        let config = self
            .deps
            .processor
            .configure_paystack(
                label,
                draft.totals.total,
                &draft.session.user.email,
                &self.business.name,
                draft.totals.delivery_fee,
                draft.totals.service_fee,
            )?
            .ok_or(CheckoutError::PaymentNotConfigured)?;

        *self.pending.lock() = Some(PendingPayment { draft, method });
        self.update(|s| {
            s.phase = CheckoutPhase::AwaitingPayment;
            s.is_submitting = true;
            s.payment_config = Some(config.clone());
        });
        tracing::info!(reference = %config.reference, amount = config.amount, "Opening payment widget");

        match self.deps.payments.widget().open(&config).await {
            Ok(WidgetOutcome::Success(transaction)) => self
                .complete_provider_payment(transaction)
                .await
                .map(PlaceOrderOutcome::Placed),
            Ok(WidgetOutcome::Cancelled) => {
                self.handle_paystack_close();
                Ok(PlaceOrderOutcome::Cancelled)
            }
            Err(e) => {
                self.pending.lock().take();
                Err(CheckoutError::Widget(e))
            }
        }
    }

    /// Provider success callback for hosts that deliver it out of band
    pub async fn handle_paystack_success(
        &self,
        transaction: ProviderTransaction,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let result = self
            .complete_provider_payment(transaction)
            .await
            .map(PlaceOrderOutcome::Placed);
        match self.finish(result)? {
            PlaceOrderOutcome::Placed(confirmation) => Ok(confirmation),
            PlaceOrderOutcome::Cancelled => Err(CheckoutError::Busy),
        }
    }

    /// Verify the provider payment, then submit with the channel actually used
    async fn complete_provider_payment(
        &self,
        transaction: ProviderTransaction,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let Some(pending) = self.pending.lock().take() else {
            return Err(CheckoutError::PaymentVerificationFailed(
                "No payment is in progress".into(),
            ));
        };

        let method = transaction
            .channel
            .as_deref()
            .and_then(PaymentMethod::from_channel)
            .unwrap_or(pending.method);
        if method != pending.method {
            tracing::info!(selected = %pending.method, used = %method, "Provider channel overrides selected method");
        }
        self.update(|s| s.phase = CheckoutPhase::SubmittingOrder);

        let verified = self
            .deps
            .payments
            .verify_payment(&transaction.reference, PROVIDER, &pending.draft.session.token)
            .await?;
        self.update(|s| {
            s.payment_progress = PaymentProgress::Captured {
                reference: verified.reference().to_string(),
            }
        });

        self.deps
            .processor
            .process_order(
                &pending.draft,
                method,
                PaymentStatus::Paid,
                Some(verified.reference().to_string()),
            )
            .await
    }

    /// Popup closed without paying: back to editing, nothing charged
    pub fn handle_paystack_close(&self) {
        self.pending.lock().take();
        self.update(|s| {
            s.phase = CheckoutPhase::Editing;
            s.is_processing = false;
            s.is_submitting = false;
            s.payment_config = None;
        });
        tracing::info!("Payment window closed by customer");
        self.deps
            .notifier
            .notify(Notification::info("Payment cancelled. You can try again when ready"));
    }

    fn finish(
        &self,
        result: Result<PlaceOrderOutcome, CheckoutError>,
    ) -> Result<PlaceOrderOutcome, CheckoutError> {
        match &result {
            Ok(PlaceOrderOutcome::Placed(confirmation)) => {
                self.update(|s| {
                    s.phase = CheckoutPhase::Receipt;
                    s.is_processing = false;
                    s.is_submitting = false;
                    s.payment_config = None;
                    s.payment_progress = PaymentProgress::Confirmed {
                        order_id: confirmation.order_id.clone(),
                    };
                    s.order_id = Some(confirmation.order_id.clone());
                    s.receipt = Some(confirmation.receipt.clone());
                    s.promos.clear();
                    s.delivery_instructions = None;
                    s.vendor_instructions = None;
                });
                self.deps
                    .notifier
                    .notify(Notification::success("Order placed successfully"));
            }
            Ok(PlaceOrderOutcome::Cancelled) => {}
            Err(e) => {
                let captured = match &self.state.lock().payment_progress {
                    PaymentProgress::Captured { reference } => Some(reference.clone()),
                    _ => None,
                };
                let message = match captured {
                    Some(reference) => format!(
                        "Your payment was received but the order could not be placed: {}. Please contact support with reference {}",
                        e, reference
                    ),
                    None => e.to_string(),
                };
                self.update(|s| {
                    s.phase = CheckoutPhase::Failed;
                    s.is_processing = false;
                    s.is_submitting = false;
                    s.payment_config = None;
                    s.last_error = Some(message.clone());
                });
                self.deps
                    .notifier
                    .notify(Notification::error(e.error_code(), message));
            }
        }
        result
    }

    fn report(&self, error: &CheckoutError) {
        let app = AppError::from(error);
        tracing::debug!(code = app.code.code(), details = ?app.details, "Checkout blocked: {}", app.message);
        self.deps.notifier.notify(Notification::from(app));
    }

    /// Leave the receipt (or failure) screen and start a new cart
    pub fn reset(&self) {
        self.update(|s| {
            if !s.phase.is_busy() {
                s.phase = CheckoutPhase::Editing;
                s.receipt = None;
                s.order_id = None;
                s.last_error = None;
                s.payment_progress = PaymentProgress::NotStarted;
            }
        });
    }

    // ========== Save for later ==========

    /// Store the cart server-side and empty it locally
    pub async fn save_for_later(&self) -> Result<(), CheckoutError> {
        let cart = self.deps.cart.snapshot();
        if cart.is_empty() {
            self.deps.view.scroll_to(CheckoutSection::Cart);
            let e = CheckoutError::CartEmpty;
            self.report(&e);
            return Err(e);
        }
        let Some(session) = self.deps.auth.current() else {
            self.deps.view.open_login();
            let e = CheckoutError::NotAuthenticated;
            self.report(&e);
            return Err(e);
        };
        self.begin(CheckoutPhase::SavingForLater)?;

        let request = SaveForLaterRequest {
            source: "cart".to_string(),
            vendor_id: self.business.id.clone(),
            cart,
        };
        let result = self
            .deps
            .orders
            .save_for_later(&request, &session.token)
            .await;
        self.update(|s| {
            s.phase = CheckoutPhase::Editing;
            s.is_saving_for_later = false;
        });

        match result {
            Ok(()) => {
                tracing::info!(vendor_id = %self.business.id, "Cart saved for later");
                self.deps.cart.dispatch(CartAction::ClearCart);
                self.deps
                    .notifier
                    .notify(Notification::success("Cart saved for later"));
                tokio::time::sleep(self.settings.save_for_later_close_delay).await;
                self.deps.view.close_panel();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Save for later failed");
                let e = CheckoutError::SaveForLaterFailed(e.user_message());
                self.report(&e);
                Err(e)
            }
        }
    }
}
