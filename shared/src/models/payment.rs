//! Payment models
//!
//! Payment methods are chosen in the UI by display label and travel to the
//! backend as snake_case identifiers. Paystack reports the channel that was
//! actually used, which may differ from the one requested.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Currency sent to the payment provider
pub const CURRENCY: &str = "NGN";

/// Internal payment method identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Wallet,
    Card,
    BankTransfer,
    Ussd,
    Qr,
    CashOnDelivery,
    MobileMoney,
}

/// Unknown display label
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid payment method: {0}")]
pub struct InvalidPaymentMethod(pub String);

impl PaymentMethod {
    /// Map a display label to its method. Case-sensitive.
    pub fn from_label(label: &str) -> Result<Self, InvalidPaymentMethod> {
        match label {
            "Wallet" => Ok(Self::Wallet),
            "Pay with Card" => Ok(Self::Card),
            "Pay with Bank Transfer" => Ok(Self::BankTransfer),
            "Pay with USSD" => Ok(Self::Ussd),
            "Pay with QR Code" => Ok(Self::Qr),
            "Cash on Delivery" => Ok(Self::CashOnDelivery),
            other => Err(InvalidPaymentMethod(other.to_string())),
        }
    }

    /// Map a provider channel to the method that was actually used
    pub fn from_channel(channel: &str) -> Option<Self> {
        match channel {
            "card" => Some(Self::Card),
            "bank" | "bank_transfer" => Some(Self::BankTransfer),
            "ussd" => Some(Self::Ussd),
            "qr" => Some(Self::Qr),
            "mobile_money" => Some(Self::MobileMoney),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wallet => "wallet",
            Self::Card => "card",
            Self::BankTransfer => "bank_transfer",
            Self::Ussd => "ussd",
            Self::Qr => "qr",
            Self::CashOnDelivery => "cash_on_delivery",
            Self::MobileMoney => "mobile_money",
        }
    }

    /// Display label shown in the payment method picker
    pub fn label(&self) -> &'static str {
        match self {
            Self::Wallet => "Wallet",
            Self::Card => "Pay with Card",
            Self::BankTransfer => "Pay with Bank Transfer",
            Self::Ussd => "Pay with USSD",
            Self::Qr => "Pay with QR Code",
            Self::CashOnDelivery => "Cash on Delivery",
            Self::MobileMoney => "Mobile Money",
        }
    }

    /// Whether this method goes through the payment provider widget
    pub fn uses_provider(&self) -> bool {
        !matches!(self, Self::Wallet | Self::CashOnDelivery)
    }

    /// Provider channels to offer for this method
    pub fn provider_channels(&self) -> Vec<String> {
        let channels: &[&str] = match self {
            Self::Card => &["card"],
            Self::BankTransfer => &["bank", "bank_transfer"],
            Self::Ussd => &["ussd"],
            Self::Qr => &["qr"],
            Self::MobileMoney => &["mobile_money"],
            Self::Wallet | Self::CashOnDelivery => &[],
        };
        channels.iter().map(|c| c.to_string()).collect()
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert Naira to kobo (×100, rounded half away from zero)
pub fn to_minor_units(amount: Decimal) -> i64 {
    (amount * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}

/// What a payment reference is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferencePurpose {
    Order,
    WalletFund,
    WalletPay,
}

impl ReferencePurpose {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::WalletFund => "wallet_fund",
            Self::WalletPay => "wallet_pay",
        }
    }
}

/// Metadata attached to a provider transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMetadata {
    pub payment_method: String,
    #[serde(default)]
    pub delivery_fee: Decimal,
    #[serde(default)]
    pub service_fee: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Provider-agnostic payment configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfig {
    pub reference: String,
    pub email: String,
    /// Amount in kobo
    pub amount: i64,
    pub public_key: String,
    pub currency: String,
    pub channels: Vec<String>,
    pub label: String,
    pub metadata: PaymentMetadata,
}

/// Transaction handed back by the provider on success
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderTransaction {
    pub reference: String,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub transaction: Option<String>,
}

/// Order payment state sent with the order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

// =============================================================================
// Wallet / verification DTOs
// =============================================================================

/// `GET /api/wallet/balance` envelope
#[derive(Debug, Clone, Deserialize)]
pub struct WalletBalanceResponse {
    pub data: WalletBalance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletBalance {
    pub balance: Decimal,
}

/// `GET /api/payments/verify/:reference` envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentVerificationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<PaymentVerificationData>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentVerificationData {
    #[serde(default)]
    pub is_successful: bool,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub channel: Option<String>,
}

impl PaymentVerificationResponse {
    /// Verified only when both the envelope and the payload say so
    pub fn is_verified(&self) -> bool {
        self.success && self.data.as_ref().is_some_and(|d| d.is_successful)
    }
}

/// `POST /api/wallet/fund` body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletFundingRequest {
    pub user_id: String,
    pub amount: Decimal,
    pub reference: String,
    pub provider: String,
}

/// `POST /api/wallet/fund` envelope
#[derive(Debug, Clone, Deserialize)]
pub struct WalletFundingResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<WalletBalance>,
}
