//! Typed backend API
//!
//! One trait per backend area. [`NetworkHttpClient`](crate::NetworkHttpClient)
//! implements all of them; the storefront core takes them as
//! `Arc<dyn Trait>` so each seam can be faked independently.

mod delivery_zone;
mod fees;
mod locations;
mod orders;
mod payments;
mod recent_addresses;
mod search;

use crate::ClientResult;
use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::models::{
    BusinessSearchQuery, CreatedOrder, FeeCalculationRequest, FeeQuote, GeoState,
    LocalGovernment, LocalGovernmentLookup, Locality, OrderDetails, OrderPayload,
    PaymentVerificationResponse, RecentAddress, SaveForLaterRequest, SearchResponse, WalletBalance,
    WalletFundingRequest, ZoneVerification, ZoneVerificationRequest,
};

/// Fee calculation (`/api/fees`)
#[async_trait]
pub trait FeeApi: Send + Sync {
    async fn calculate_fees(&self, request: &FeeCalculationRequest) -> ClientResult<FeeQuote>;
}

/// Delivery zone lookups (`/api/delivery-zone`)
#[async_trait]
pub trait DeliveryZoneApi: Send + Sync {
    async fn lookup_local_government(
        &self,
        address: &str,
        city: &str,
        state: &str,
    ) -> ClientResult<LocalGovernmentLookup>;

    async fn verify_zone(&self, request: &ZoneVerificationRequest) -> ClientResult<ZoneVerification>;
}

/// Wallet and payment verification
#[async_trait]
pub trait PaymentApi: Send + Sync {
    async fn wallet_balance(&self, user_id: &str, token: &str) -> ClientResult<Decimal>;

    async fn verify_payment(
        &self,
        reference: &str,
        provider: &str,
        token: &str,
    ) -> ClientResult<PaymentVerificationResponse>;

    async fn fund_wallet(
        &self,
        request: &WalletFundingRequest,
        token: &str,
    ) -> ClientResult<WalletBalance>;
}

/// Orders (`/api/orders`, `/api/save-for-later`)
#[async_trait]
pub trait OrderApi: Send + Sync {
    async fn create_order(&self, payload: &OrderPayload, token: &str) -> ClientResult<CreatedOrder>;

    async fn order_details(&self, order_id: &str, token: &str) -> ClientResult<OrderDetails>;

    async fn save_for_later(&self, request: &SaveForLaterRequest, token: &str) -> ClientResult<()>;
}

/// Business search (`/businesses/search`)
#[async_trait]
pub trait SearchApi: Send + Sync {
    async fn search_businesses(&self, query: &BusinessSearchQuery) -> ClientResult<SearchResponse>;
}

/// Geography lookups (`/delivery-locations`)
#[async_trait]
pub trait LocationApi: Send + Sync {
    async fn states(&self) -> ClientResult<Vec<GeoState>>;

    async fn local_governments_for_state(&self, state_id: &str) -> ClientResult<Vec<LocalGovernment>>;

    async fn local_governments(&self) -> ClientResult<Vec<LocalGovernment>>;

    async fn localities(&self, local_government_id: &str) -> ClientResult<Vec<Locality>>;
}

/// Recent addresses saved to the customer's account (`/api/recent-addresses`)
#[async_trait]
pub trait RecentAddressApi: Send + Sync {
    async fn recent_addresses(&self, user_id: &str, token: &str) -> ClientResult<Vec<RecentAddress>>;

    async fn save_recent_address(&self, entry: &RecentAddress, token: &str) -> ClientResult<()>;
}
