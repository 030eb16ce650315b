//! Jara Client - HTTP client for the storefront backend
//!
//! Provides typed calls for every backend endpoint the storefront core
//! depends on. The core only sees the traits in [`api`], so tests can swap
//! in fakes without a network.

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use api::{
    DeliveryZoneApi, FeeApi, LocationApi, OrderApi, PaymentApi, RecentAddressApi, SearchApi,
};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, NetworkErrorKind};
pub use http::{HttpClient, NetworkHttpClient};
