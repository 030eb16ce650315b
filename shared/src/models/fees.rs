//! Delivery and service fee DTOs

use super::location::Coordinates;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Delivery and service fee for a cart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeQuote {
    pub delivery_fee: Decimal,
    pub service_fee: Decimal,
}

impl FeeQuote {
    pub fn total(&self) -> Decimal {
        self.delivery_fee + self.service_fee
    }
}

/// `POST /api/fees/calculate` body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeCalculationRequest {
    pub business_id: String,
    pub business_address: String,
    pub business_coordinates: Coordinates,
    pub delivery_address: String,
    pub delivery_coordinates: Coordinates,
    pub num_packs: usize,
    pub order_value: Decimal,
    pub local_government_id: String,
}

/// `POST /api/fees/calculate` envelope
#[derive(Debug, Clone, Deserialize)]
pub struct FeeCalculationResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<FeeQuote>,
}

impl FeeCalculationResponse {
    /// The quote, when the envelope reports success and fees are sane
    pub fn into_quote(self) -> Result<FeeQuote, String> {
        let ok = self.status.as_deref() == Some("success");
        match (ok, self.data) {
            (true, Some(quote))
                if !quote.delivery_fee.is_sign_negative()
                    && !quote.service_fee.is_sign_negative() =>
            {
                Ok(quote)
            }
            (true, Some(_)) => Err("Received negative fees".to_string()),
            _ => Err(self
                .message
                .unwrap_or_else(|| "Failed to calculate fees".to_string())),
        }
    }
}
