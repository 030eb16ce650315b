//! Unified payment service
//!
//! Wallet balance, provider verification and wallet funding. Funding takes
//! a [`VerifiedPayment`], which only [`UnifiedPaymentService::verify_payment`]
//! can produce, so a wallet can never be funded from an unverified
//! reference.

use super::widget::{PaymentWidget, WidgetOutcome};
use crate::error::CheckoutError;
use jara_client::PaymentApi;
use rust_decimal::Decimal;
use shared::models::{
    AuthSession, CURRENCY, PaymentConfig, PaymentMetadata, PaymentMethod, ReferencePurpose,
    WalletFundingRequest, to_minor_units,
};
use std::sync::Arc;

/// Provider name sent to the verification and funding endpoints
pub const PROVIDER: &str = "paystack";

/// Proof that the backend confirmed a provider payment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedPayment {
    reference: String,
    provider: String,
}

impl VerifiedPayment {
    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }
}

/// Result of a standalone wallet top-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FundingOutcome {
    Funded { reference: String, balance: Decimal },
    Cancelled,
}

pub struct UnifiedPaymentService {
    api: Arc<dyn PaymentApi>,
    widget: Arc<dyn PaymentWidget>,
    public_key: Option<String>,
}

impl UnifiedPaymentService {
    pub fn new(
        api: Arc<dyn PaymentApi>,
        widget: Arc<dyn PaymentWidget>,
        public_key: Option<String>,
    ) -> Self {
        Self {
            api,
            widget,
            public_key,
        }
    }

    pub fn public_key(&self) -> Option<&str> {
        self.public_key.as_deref()
    }

    pub fn widget(&self) -> &Arc<dyn PaymentWidget> {
        &self.widget
    }

    /// `{prefix}_{timestamp_ms}_{0..=999999}`
    pub fn generate_reference(purpose: ReferencePurpose) -> String {
        shared::util::generate_reference(purpose.prefix())
    }

    pub async fn get_wallet_balance(
        &self,
        user_id: &str,
        token: &str,
    ) -> Result<Decimal, CheckoutError> {
        let balance = self.api.wallet_balance(user_id, token).await?;
        tracing::debug!(user_id, %balance, "Fetched wallet balance");
        Ok(balance)
    }

    /// Verified only when the envelope reports success and the payload
    /// reports a successful transaction. HTTP 200 alone is not enough.
    pub async fn verify_payment(
        &self,
        reference: &str,
        provider: &str,
        token: &str,
    ) -> Result<VerifiedPayment, CheckoutError> {
        let response = self.api.verify_payment(reference, provider, token).await?;
        if response.is_verified() {
            tracing::info!(reference, provider, "Payment verified");
            Ok(VerifiedPayment {
                reference: reference.to_string(),
                provider: provider.to_string(),
            })
        } else {
            let reason = response
                .message
                .unwrap_or_else(|| "Payment could not be confirmed".to_string());
            tracing::warn!(reference, provider, reason = %reason, "Payment verification failed");
            Err(CheckoutError::PaymentVerificationFailed(reason))
        }
    }

    /// Credit a verified payment to the customer's wallet
    pub async fn fund_wallet(
        &self,
        payment: &VerifiedPayment,
        user_id: &str,
        amount: Decimal,
        token: &str,
    ) -> Result<Decimal, CheckoutError> {
        let request = WalletFundingRequest {
            user_id: user_id.to_string(),
            amount,
            reference: payment.reference.clone(),
            provider: payment.provider.clone(),
        };
        let wallet = self.api.fund_wallet(&request, token).await?;
        tracing::info!(user_id, reference = %payment.reference, %amount, "Wallet funded");
        Ok(wallet.balance)
    }

    /// Top up the wallet through the provider popup: reference, popup,
    /// verification, then funding.
    pub async fn fund_wallet_via_provider(
        &self,
        session: &AuthSession,
        amount: Decimal,
    ) -> Result<FundingOutcome, CheckoutError> {
        let public_key = self
            .public_key
            .clone()
            .ok_or(CheckoutError::PaymentNotConfigured)?;
        let reference = Self::generate_reference(ReferencePurpose::WalletFund);
        let config = PaymentConfig {
            reference: reference.clone(),
            email: session.user.email.clone(),
            amount: to_minor_units(amount),
            public_key,
            currency: CURRENCY.to_string(),
            channels: [
                PaymentMethod::Card,
                PaymentMethod::BankTransfer,
                PaymentMethod::Ussd,
                PaymentMethod::Qr,
            ]
            .iter()
            .flat_map(|m| m.provider_channels())
            .collect(),
            label: "Wallet top-up".to_string(),
            metadata: PaymentMetadata {
                payment_method: "wallet_fund".to_string(),
                user_id: Some(session.user.id.clone()),
                ..Default::default()
            },
        };

        let transaction = match self.widget.open(&config).await {
            Ok(WidgetOutcome::Success(tx)) => tx,
            Ok(WidgetOutcome::Cancelled) => {
                tracing::info!(reference = %reference, "Wallet top-up cancelled");
                return Ok(FundingOutcome::Cancelled);
            }
            Err(e) => return Err(CheckoutError::Widget(e)),
        };

        let verified = self
            .verify_payment(&transaction.reference, PROVIDER, &session.token)
            .await?;
        let balance = self
            .fund_wallet(&verified, &session.user.id, amount, &session.token)
            .await?;
        Ok(FundingOutcome::Funded {
            reference: transaction.reference,
            balance,
        })
    }
}
