//! Unified error codes for the storefront
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Cart errors
//! - 3xxx: Address / delivery zone errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Fee errors
//! - 7xxx: Network errors
//! - 8xxx: Search errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 values so the UI layer can map them to copy
/// without parsing message strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Required field missing
    RequiredField = 3,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Session has expired
    SessionExpired = 1002,

    // ==================== 2xxx: Cart ====================
    /// Cart is empty
    CartEmpty = 2001,
    /// Cart item has an invalid identifier
    CartItemInvalid = 2002,
    /// Pack not found
    PackNotFound = 2003,

    // ==================== 3xxx: Address ====================
    /// No address selected or address not resolved
    AddressInvalid = 3001,
    /// Address is outside the delivery zones
    AddressNotDeliverable = 3002,
    /// Local government could not be resolved
    LocalGovernmentMissing = 3003,
    /// Geolocation unavailable or denied
    LocationUnavailable = 3004,

    // ==================== 4xxx: Order ====================
    /// Order submission failed
    OrderFailed = 4001,
    /// Order not found
    OrderNotFound = 4002,
    /// Save for later failed
    SaveForLaterFailed = 4003,

    // ==================== 5xxx: Payment ====================
    /// Payment processing failed
    PaymentFailed = 5001,
    /// Wallet balance is below the order total
    InsufficientBalance = 5002,
    /// Invalid payment method
    PaymentInvalidMethod = 5003,
    /// No payment method selected
    PaymentMethodRequired = 5004,
    /// Payment provider is not configured
    PaymentNotConfigured = 5005,
    /// Payment could not be verified
    PaymentVerificationFailed = 5006,
    /// Payment cancelled by the user
    PaymentCancelled = 5007,

    // ==================== 6xxx: Fee ====================
    /// Fee calculation inputs are missing
    FeeInputsMissing = 6001,
    /// Fee calculation failed
    FeeCalculationFailed = 6002,

    // ==================== 7xxx: Network ====================
    /// Request timed out
    NetworkTimeout = 7001,
    /// Could not reach the server
    NetworkUnavailable = 7002,
    /// Server returned an error status
    ServerError = 7003,
    /// Too many requests
    RateLimited = 7004,
    /// Response did not match the expected shape
    InvalidResponse = 7005,

    // ==================== 8xxx: Search ====================
    /// Search failed
    SearchFailed = 8001,
    /// Voice input could not be understood
    VoiceInputEmpty = 8002,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Configuration error
    ConfigError = 9002,
    /// Local storage error
    StorageError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "Please log in to continue",
            ErrorCode::SessionExpired => "Your session has expired",

            // Cart
            ErrorCode::CartEmpty => "Your cart is empty",
            ErrorCode::CartItemInvalid => "Some items in your cart are invalid",
            ErrorCode::PackNotFound => "Pack not found",

            // Address
            ErrorCode::AddressInvalid => "Please select a valid delivery address",
            ErrorCode::AddressNotDeliverable => "We don't deliver from that location yet",
            ErrorCode::LocalGovernmentMissing => "We could not determine your local government",
            ErrorCode::LocationUnavailable => "Your location is unavailable",

            // Order
            ErrorCode::OrderFailed => "Failed to place order",
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::SaveForLaterFailed => "Failed to save cart for later",

            // Payment
            ErrorCode::PaymentFailed => "Payment failed",
            ErrorCode::InsufficientBalance => "Insufficient wallet balance",
            ErrorCode::PaymentInvalidMethod => "Invalid payment method",
            ErrorCode::PaymentMethodRequired => "Please select a payment method",
            ErrorCode::PaymentNotConfigured => "Payment is not configured",
            ErrorCode::PaymentVerificationFailed => "Payment could not be verified",
            ErrorCode::PaymentCancelled => "Payment cancelled",

            // Fee
            ErrorCode::FeeInputsMissing => "Delivery details are incomplete",
            ErrorCode::FeeCalculationFailed => "Unable to calculate delivery fees",

            // Network
            ErrorCode::NetworkTimeout => "The request timed out. Please try again",
            ErrorCode::NetworkUnavailable => "Network error. Please check your connection",
            ErrorCode::ServerError => "Server error. Please try again later",
            ErrorCode::RateLimited => "Too many requests. Please wait a moment",
            ErrorCode::InvalidResponse => "Unexpected response from server",

            // Search
            ErrorCode::SearchFailed => "Search failed",
            ErrorCode::VoiceInputEmpty => "We didn't catch that. Please try again",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::StorageError => "Local storage error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::SessionExpired),

            // Cart
            2001 => Ok(ErrorCode::CartEmpty),
            2002 => Ok(ErrorCode::CartItemInvalid),
            2003 => Ok(ErrorCode::PackNotFound),

            // Address
            3001 => Ok(ErrorCode::AddressInvalid),
            3002 => Ok(ErrorCode::AddressNotDeliverable),
            3003 => Ok(ErrorCode::LocalGovernmentMissing),
            3004 => Ok(ErrorCode::LocationUnavailable),

            // Order
            4001 => Ok(ErrorCode::OrderFailed),
            4002 => Ok(ErrorCode::OrderNotFound),
            4003 => Ok(ErrorCode::SaveForLaterFailed),

            // Payment
            5001 => Ok(ErrorCode::PaymentFailed),
            5002 => Ok(ErrorCode::InsufficientBalance),
            5003 => Ok(ErrorCode::PaymentInvalidMethod),
            5004 => Ok(ErrorCode::PaymentMethodRequired),
            5005 => Ok(ErrorCode::PaymentNotConfigured),
            5006 => Ok(ErrorCode::PaymentVerificationFailed),
            5007 => Ok(ErrorCode::PaymentCancelled),

            // Fee
            6001 => Ok(ErrorCode::FeeInputsMissing),
            6002 => Ok(ErrorCode::FeeCalculationFailed),

            // Network
            7001 => Ok(ErrorCode::NetworkTimeout),
            7002 => Ok(ErrorCode::NetworkUnavailable),
            7003 => Ok(ErrorCode::ServerError),
            7004 => Ok(ErrorCode::RateLimited),
            7005 => Ok(ErrorCode::InvalidResponse),

            // Search
            8001 => Ok(ErrorCode::SearchFailed),
            8002 => Ok(ErrorCode::VoiceInputEmpty),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::ConfigError),
            9003 => Ok(ErrorCode::StorageError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
