//! Shared fakes for storefront integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use jara_client::{
    ClientError, ClientResult, DeliveryZoneApi, FeeApi, OrderApi, PaymentApi, RecentAddressApi,
    SearchApi,
};
use jara_storefront::address::{Geolocator, PlaceSuggestion, PlacesProvider, ResolvedPlace};
use jara_storefront::cart::CartAction;
use jara_storefront::checkout::{
    CheckoutDeps, CheckoutOrchestrator, CheckoutSection, CheckoutSettings, CheckoutView, Receipt,
};
use jara_storefront::error::AddressError;
use jara_storefront::fees::FeeCalculator;
use jara_storefront::payment::{PaymentProcessor, PaymentWidget, UnifiedPaymentService, WidgetOutcome};
use jara_storefront::{AuthState, CartStore, RecordingNotifier};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use shared::models::*;
use shared::util::new_id;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

// ============================================================================
// Backend
// ============================================================================

/// In-memory backend with scripted answers and call counters
pub struct FakeBackend {
    pub fee_quote: Mutex<Option<FeeQuote>>,
    pub fee_delay: Mutex<Duration>,
    pub fee_requests: Mutex<Vec<FeeCalculationRequest>>,

    pub deliverable: Mutex<bool>,
    pub zone_fails: Mutex<bool>,
    pub zone_calls: AtomicUsize,
    pub zone_delay: Mutex<Duration>,
    pub lga_id: Mutex<Option<String>>,
    pub lga_calls: AtomicUsize,

    pub balance: Mutex<Decimal>,
    pub verified: Mutex<bool>,
    pub verify_calls: AtomicUsize,
    pub fund_requests: Mutex<Vec<WalletFundingRequest>>,

    pub create_error: Mutex<Option<String>>,
    pub orders: Mutex<Vec<OrderPayload>>,
    pub details_available: Mutex<bool>,
    pub saved: Mutex<Vec<SaveForLaterRequest>>,

    pub search_response: Mutex<SearchResponse>,
    pub search_queries: Mutex<Vec<BusinessSearchQuery>>,
    pub search_delay: Mutex<Duration>,
    pub search_error: Mutex<Option<u16>>,

    pub account_addresses: Mutex<Vec<RecentAddress>>,
    pub synced_addresses: Mutex<Vec<(RecentAddress, String)>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            fee_quote: Mutex::new(Some(FeeQuote {
                delivery_fee: dec!(300),
                service_fee: dec!(100),
            })),
            fee_delay: Mutex::new(Duration::ZERO),
            fee_requests: Mutex::new(Vec::new()),
            deliverable: Mutex::new(true),
            zone_fails: Mutex::new(false),
            zone_calls: AtomicUsize::new(0),
            zone_delay: Mutex::new(Duration::ZERO),
            lga_id: Mutex::new(Some("lg-eti-osa".into())),
            lga_calls: AtomicUsize::new(0),
            balance: Mutex::new(dec!(10000)),
            verified: Mutex::new(true),
            verify_calls: AtomicUsize::new(0),
            fund_requests: Mutex::new(Vec::new()),
            create_error: Mutex::new(None),
            orders: Mutex::new(Vec::new()),
            details_available: Mutex::new(true),
            saved: Mutex::new(Vec::new()),
            search_response: Mutex::new(SearchResponse::default()),
            search_queries: Mutex::new(Vec::new()),
            search_delay: Mutex::new(Duration::ZERO),
            search_error: Mutex::new(None),
            account_addresses: Mutex::new(Vec::new()),
            synced_addresses: Mutex::new(Vec::new()),
        }
    }
}

impl FakeBackend {
    pub fn order_count(&self) -> usize {
        self.orders.lock().len()
    }

    pub fn last_order(&self) -> Option<OrderPayload> {
        self.orders.lock().last().cloned()
    }
}

#[async_trait]
impl FeeApi for FakeBackend {
    async fn calculate_fees(&self, request: &FeeCalculationRequest) -> ClientResult<FeeQuote> {
        self.fee_requests.lock().push(request.clone());
        let delay = *self.fee_delay.lock();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let quote = *self.fee_quote.lock();
        quote.ok_or_else(|| ClientError::Rejected("Fee service unavailable".into()))
    }
}

#[async_trait]
impl DeliveryZoneApi for FakeBackend {
    async fn lookup_local_government(
        &self,
        _address: &str,
        _city: &str,
        _state: &str,
    ) -> ClientResult<LocalGovernmentLookup> {
        self.lga_calls.fetch_add(1, Ordering::SeqCst);
        Ok(LocalGovernmentLookup {
            local_government_id: self.lga_id.lock().clone(),
            local_government_name: None,
            is_deliverable: true,
        })
    }

    async fn verify_zone(&self, _request: &ZoneVerificationRequest) -> ClientResult<ZoneVerification> {
        self.zone_calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.zone_delay.lock();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if *self.zone_fails.lock() {
            return Err(ClientError::Http {
                status: 500,
                message: String::new(),
            });
        }
        Ok(ZoneVerification {
            is_deliverable: *self.deliverable.lock(),
            message: None,
        })
    }
}

#[async_trait]
impl PaymentApi for FakeBackend {
    async fn wallet_balance(&self, _user_id: &str, _token: &str) -> ClientResult<Decimal> {
        Ok(*self.balance.lock())
    }

    async fn verify_payment(
        &self,
        _reference: &str,
        _provider: &str,
        _token: &str,
    ) -> ClientResult<PaymentVerificationResponse> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        let verified = *self.verified.lock();
        Ok(serde_json::from_value(serde_json::json!({
            "success": true,
            "message": if verified { "Verified" } else { "Transaction was not successful" },
            "data": { "isSuccessful": verified }
        }))?)
    }

    async fn fund_wallet(
        &self,
        request: &WalletFundingRequest,
        _token: &str,
    ) -> ClientResult<WalletBalance> {
        self.fund_requests.lock().push(request.clone());
        let mut balance = self.balance.lock();
        *balance += request.amount;
        Ok(WalletBalance { balance: *balance })
    }
}

#[async_trait]
impl OrderApi for FakeBackend {
    async fn create_order(&self, payload: &OrderPayload, _token: &str) -> ClientResult<CreatedOrder> {
        if let Some(message) = self.create_error.lock().clone() {
            return Err(ClientError::Http {
                status: 400,
                message,
            });
        }
        let mut orders = self.orders.lock();
        orders.push(payload.clone());
        Ok(CreatedOrder {
            id: format!("order-{}", orders.len()),
            status: Some("pending".into()),
        })
    }

    async fn order_details(&self, order_id: &str, _token: &str) -> ClientResult<OrderDetails> {
        if !*self.details_available.lock() {
            return Err(ClientError::Timeout);
        }
        let payload = self
            .orders
            .lock()
            .last()
            .cloned()
            .ok_or_else(|| ClientError::Rejected("Order not found".into()))?;
        Ok(OrderDetails {
            id: order_id.to_string(),
            items: payload.items,
            subtotal: payload.fees.subtotal,
            discount: payload.fees.discount,
            delivery_fee: payload.fees.delivery_fee,
            service_fee: payload.fees.service_fee,
            total: payload.fees.total,
            payment_method: Some(payload.payment.method),
            delivery_address: Some(payload.delivery_address.address),
            transaction_ref: payload.payment.transaction_ref,
            status: Some("pending".into()),
            created_at: None,
            updated_at: None,
        })
    }

    async fn save_for_later(&self, request: &SaveForLaterRequest, _token: &str) -> ClientResult<()> {
        self.saved.lock().push(request.clone());
        Ok(())
    }
}

#[async_trait]
impl RecentAddressApi for FakeBackend {
    async fn recent_addresses(&self, _user_id: &str, _token: &str) -> ClientResult<Vec<RecentAddress>> {
        Ok(self.account_addresses.lock().clone())
    }

    async fn save_recent_address(&self, entry: &RecentAddress, token: &str) -> ClientResult<()> {
        self.synced_addresses.lock().push((entry.clone(), token.to_string()));
        Ok(())
    }
}

#[async_trait]
impl SearchApi for FakeBackend {
    async fn search_businesses(&self, query: &BusinessSearchQuery) -> ClientResult<SearchResponse> {
        self.search_queries.lock().push(query.clone());
        let delay = *self.search_delay.lock();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if let Some(status) = *self.search_error.lock() {
            return Err(ClientError::Http {
                status,
                message: String::new(),
            });
        }
        Ok(self.search_response.lock().clone())
    }
}

// ============================================================================
// UI seams
// ============================================================================

/// Popup that answers with a scripted outcome
#[derive(Default)]
pub struct ScriptedWidget {
    pub outcome: Mutex<Option<WidgetOutcome>>,
    pub opened: Mutex<Vec<PaymentConfig>>,
}

impl ScriptedWidget {
    pub fn will_pay(&self, channel: &str) {
        *self.outcome.lock() = Some(WidgetOutcome::Success(ProviderTransaction {
            reference: String::new(),
            channel: Some(channel.to_string()),
            status: Some("success".into()),
            transaction: Some("tx-1".into()),
        }));
    }

    pub fn will_cancel(&self) {
        *self.outcome.lock() = Some(WidgetOutcome::Cancelled);
    }
}

#[async_trait]
impl PaymentWidget for ScriptedWidget {
    async fn open(&self, config: &PaymentConfig) -> Result<WidgetOutcome, String> {
        self.opened.lock().push(config.clone());
        match self.outcome.lock().clone() {
            // The provider echoes the reference it was opened with
            Some(WidgetOutcome::Success(mut tx)) => {
                tx.reference = config.reference.clone();
                Ok(WidgetOutcome::Success(tx))
            }
            Some(WidgetOutcome::Cancelled) | None => Ok(WidgetOutcome::Cancelled),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    ScrollTo(CheckoutSection),
    OpenLogin,
    ClosePanel,
    ShowReceipt(String),
}

#[derive(Default)]
pub struct RecordingView {
    pub events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().clone()
    }
}

impl CheckoutView for RecordingView {
    fn scroll_to(&self, section: CheckoutSection) {
        self.events.lock().push(ViewEvent::ScrollTo(section));
    }

    fn open_login(&self) {
        self.events.lock().push(ViewEvent::OpenLogin);
    }

    fn close_panel(&self) {
        self.events.lock().push(ViewEvent::ClosePanel);
    }

    fn show_receipt(&self, receipt: &Receipt) {
        self.events
            .lock()
            .push(ViewEvent::ShowReceipt(receipt.order_id.clone()));
    }
}

// ============================================================================
// Places
// ============================================================================

#[derive(Default)]
pub struct FakePlaces {
    pub places: Mutex<HashMap<String, ResolvedPlace>>,
    pub here: Mutex<Option<ResolvedPlace>>,
    pub autocomplete_calls: AtomicUsize,
}

impl FakePlaces {
    pub fn add(&self, place_id: &str, place: ResolvedPlace) {
        self.places.lock().insert(place_id.to_string(), place);
    }
}

#[async_trait]
impl PlacesProvider for FakePlaces {
    async fn autocomplete(&self, input: &str) -> Result<Vec<PlaceSuggestion>, AddressError> {
        self.autocomplete_calls.fetch_add(1, Ordering::SeqCst);
        let needle = input.to_lowercase();
        let mut suggestions: Vec<PlaceSuggestion> = self
            .places
            .lock()
            .iter()
            .filter(|(_, p)| p.address.to_lowercase().contains(&needle))
            .map(|(id, p)| PlaceSuggestion {
                place_id: id.clone(),
                description: p.address.clone(),
            })
            .collect();
        suggestions.sort_by(|a, b| a.place_id.cmp(&b.place_id));
        Ok(suggestions)
    }

    async fn resolve(&self, place_id: &str) -> Result<ResolvedPlace, AddressError> {
        self.places
            .lock()
            .get(place_id)
            .cloned()
            .ok_or_else(|| AddressError::Places(format!("unknown place {}", place_id)))
    }

    async fn reverse_geocode(&self, coordinates: Coordinates) -> Result<ResolvedPlace, AddressError> {
        let mut place = self
            .here
            .lock()
            .clone()
            .ok_or_else(|| AddressError::Places("no result".into()))?;
        place.coordinates = Some(coordinates);
        Ok(place)
    }
}

pub struct FixedGeolocator(pub Option<Coordinates>);

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<Coordinates, AddressError> {
        self.0
            .ok_or_else(|| AddressError::LocationUnavailable("permission denied".into()))
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn customer_session() -> AuthSession {
    AuthSession {
        user: Customer {
            id: "user-1".into(),
            email: "ada@example.com".into(),
            name: Some("Ada".into()),
            phone: None,
        },
        token: "token-1".into(),
    }
}

pub fn vendor() -> Business {
    Business {
        id: "biz-1".into(),
        name: "Mama Put Kitchen".into(),
        address: Some("7 Admiralty Way, Lekki".into()),
        coordinates: Some(Coordinates::new(6.4474, 3.4723)),
        business_type: Some("restaurant".into()),
    }
}

pub fn lekki_details() -> LocationDetails {
    LocationDetails {
        state: "Lagos".into(),
        local_government: "Eti-Osa".into(),
        locality: "Lekki".into(),
        local_government_id: None,
    }
}

pub fn valid_address() -> DeliveryAddress {
    let mut location_details = lekki_details();
    location_details.local_government_id = Some("lg-eti-osa".into());
    DeliveryAddress {
        context_address: "12 Admiralty Way, Lekki".into(),
        location_details,
        coordinates: Some(Coordinates::new(6.4433, 3.4712)),
        is_address_valid: true,
        source: AddressSource::Manual,
    }
}

pub fn menu_item(name: &str, price: Decimal, quantity: u32) -> CartItem {
    CartItem::new(new_id(), name, price, quantity)
}

// ============================================================================
// Checkout harness
// ============================================================================

pub struct Harness {
    pub backend: Arc<FakeBackend>,
    pub widget: Arc<ScriptedWidget>,
    pub view: Arc<RecordingView>,
    pub notifier: Arc<RecordingNotifier>,
    pub cart: Arc<CartStore>,
    pub auth: Arc<AuthState>,
    pub processor: Arc<PaymentProcessor>,
    pub checkout: CheckoutOrchestrator,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_key(Some("pk_test_123".into()))
    }

    pub fn with_key(public_key: Option<String>) -> Self {
        let backend = Arc::new(FakeBackend::default());
        let widget = Arc::new(ScriptedWidget::default());
        let view = Arc::new(RecordingView::default());
        let notifier = Arc::new(RecordingNotifier::new());
        let cart = Arc::new(CartStore::new());
        let auth = Arc::new(AuthState::new());

        let payments = Arc::new(UnifiedPaymentService::new(
            backend.clone(),
            widget.clone(),
            public_key,
        ));
        let processor = Arc::new(PaymentProcessor::new(
            payments.clone(),
            backend.clone(),
            cart.clone(),
            view.clone(),
        ));
        let fees = Arc::new(FeeCalculator::new(
            backend.clone(),
            Coordinates::new(6.5244, 3.3792),
        ));
        let checkout = CheckoutOrchestrator::new(
            CheckoutDeps {
                cart: cart.clone(),
                auth: auth.clone(),
                fees,
                payments,
                processor: processor.clone(),
                orders: backend.clone(),
                notifier: notifier.clone(),
                view: view.clone(),
            },
            vendor(),
            CheckoutSettings {
                save_for_later_close_delay: Duration::from_millis(1500),
                ..Default::default()
            },
        );

        Self {
            backend,
            widget,
            view,
            notifier,
            cart,
            auth,
            processor,
            checkout,
        }
    }

    pub fn add_item(&self, name: &str, price: Decimal, quantity: u32) {
        self.cart.dispatch(CartAction::AddItem {
            item: menu_item(name, price, quantity),
        });
    }

    /// Signed in, one ₦1,500 line, valid address, fees calculated
    pub async fn ready(&self, label: &str) {
        self.auth.sign_in(customer_session());
        self.add_item("Jollof Rice", dec!(1500), 1);
        self.checkout.set_address(valid_address());
        self.checkout.set_payment_method(label);
        self.checkout.refresh_fees().await;
    }
}
