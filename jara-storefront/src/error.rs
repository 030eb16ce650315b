//! Storefront error types
//!
//! Each error maps onto a stable [`ErrorCode`] so notifications carry a
//! code the UI can key translations and analytics on.

use jara_client::ClientError;
use rust_decimal::Decimal;
use shared::{AppError, ErrorCode};
use shared::models::InvalidPaymentMethod;
use thiserror::Error;

/// Checkout, payment and order errors
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    CartEmpty,

    #[error("Please sign in to place your order")]
    NotAuthenticated,

    #[error("Please select a valid delivery address")]
    AddressInvalid,

    #[error("Please select a payment method")]
    PaymentMethodRequired,

    #[error(transparent)]
    InvalidPaymentMethod(#[from] InvalidPaymentMethod),

    #[error("{0}")]
    FeesUnavailable(String),

    #[error("No valid items left in your cart")]
    NoValidItems,

    #[error("Insufficient wallet balance")]
    InsufficientBalance { balance: Decimal, total: Decimal },

    #[error("Online payment is not configured")]
    PaymentNotConfigured,

    #[error("Payment verification failed: {0}")]
    PaymentVerificationFailed(String),

    #[error("Payment window error: {0}")]
    Widget(String),

    #[error("{0}")]
    OrderFailed(String),

    #[error("{0}")]
    SaveForLaterFailed(String),

    #[error("A checkout is already in progress")]
    Busy,

    #[error("{}", .0.user_message())]
    Client(#[from] ClientError),
}

impl CheckoutError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::CartEmpty => ErrorCode::CartEmpty,
            Self::NotAuthenticated => ErrorCode::NotAuthenticated,
            Self::AddressInvalid => ErrorCode::AddressInvalid,
            Self::PaymentMethodRequired => ErrorCode::PaymentMethodRequired,
            Self::InvalidPaymentMethod(_) => ErrorCode::PaymentInvalidMethod,
            Self::FeesUnavailable(_) => ErrorCode::FeeCalculationFailed,
            Self::NoValidItems => ErrorCode::CartItemInvalid,
            Self::InsufficientBalance { .. } => ErrorCode::InsufficientBalance,
            Self::PaymentNotConfigured => ErrorCode::PaymentNotConfigured,
            Self::PaymentVerificationFailed(_) => ErrorCode::PaymentVerificationFailed,
            Self::Widget(_) => ErrorCode::PaymentFailed,
            Self::OrderFailed(_) => ErrorCode::OrderFailed,
            Self::SaveForLaterFailed(_) => ErrorCode::SaveForLaterFailed,
            Self::Busy => ErrorCode::ValidationFailed,
            Self::Client(e) => e.error_code(),
        }
    }
}

impl From<&CheckoutError> for AppError {
    fn from(err: &CheckoutError) -> Self {
        let app = AppError::with_message(err.error_code(), err.to_string());
        match err {
            CheckoutError::InsufficientBalance { balance, total } => app
                .with_detail("balance", balance.to_string())
                .with_detail("total", total.to_string()),
            CheckoutError::InvalidPaymentMethod(e) => app.with_detail("label", e.0.clone()),
            _ => app,
        }
    }
}

/// Address selection and verification errors
#[derive(Debug, Error)]
pub enum AddressError {
    #[error("We don't deliver from that location yet")]
    NotDeliverable,

    #[error("Please choose a more specific address")]
    Unresolvable,

    #[error("Could not get your current location: {0}")]
    LocationUnavailable(String),

    #[error("Address lookup failed: {0}")]
    Places(String),

    #[error("{}", .0.user_message())]
    Client(#[from] ClientError),
}

impl AddressError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotDeliverable => ErrorCode::AddressNotDeliverable,
            Self::Unresolvable | Self::Places(_) => ErrorCode::AddressInvalid,
            Self::LocationUnavailable(_) => ErrorCode::LocationUnavailable,
            Self::Client(e) => e.error_code(),
        }
    }
}

/// Search panel errors
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Didn't catch that. Please try speaking again")]
    EmptyVoiceInput,

    #[error("{0}")]
    Request(String),
}

impl SearchError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyVoiceInput => ErrorCode::VoiceInputEmpty,
            Self::Request(_) => ErrorCode::SearchFailed,
        }
    }
}

/// Local persistence errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

impl StorageError {
    pub fn error_code(&self) -> ErrorCode {
        ErrorCode::StorageError
    }
}
