//! Domain models shared by the client and the storefront core

pub mod business;
pub mod cart;
pub mod delivery_zone;
pub mod fees;
pub mod location;
pub mod order;
pub mod payment;
pub mod search;

pub use business::{AuthSession, Business, Customer};
pub use cart::{BROWN_BAG_PRICE, CartItem, CartState, Pack};
pub use delivery_zone::{
    GeoState, LocalGovernment, LocalGovernmentLookup, Locality, LocationListResponse,
    ZoneVerification, ZoneVerificationRequest,
};
pub use fees::{FeeCalculationRequest, FeeCalculationResponse, FeeQuote};
pub use location::{
    AddressSource, AddressType, Coordinates, DeliveryAddress, LocationDetails, RecentAddress,
};
pub use order::{
    CreateOrderResponse, CreatedOrder, OrderAddress, OrderBusiness, OrderDetails,
    OrderDetailsResponse, OrderFees, OrderItem, OrderPayload, OrderPayment, SaveForLaterRequest,
};
pub use payment::{
    CURRENCY, InvalidPaymentMethod, PaymentConfig, PaymentMetadata, PaymentMethod, PaymentStatus,
    PaymentVerificationResponse, ProviderTransaction, ReferencePurpose, WalletBalance,
    WalletBalanceResponse, WalletFundingRequest, WalletFundingResponse, to_minor_units,
};
pub use search::{BusinessSearchQuery, BusinessSummary, SearchResponse, VoiceSearchInfo};
