use async_trait::async_trait;
use shared::models::{PaymentConfig, ProviderTransaction};

/// How the provider popup was closed
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetOutcome {
    Success(ProviderTransaction),
    Cancelled,
}

/// One-shot adapter over the provider's inline popup
///
/// `open` resolves once, when the customer completes or dismisses the
/// popup. An `Err` means the popup itself failed (script load, provider
/// error) and is distinct from a cancellation.
#[async_trait]
pub trait PaymentWidget: Send + Sync {
    async fn open(&self, config: &PaymentConfig) -> Result<WidgetOutcome, String>;
}

/// Widget for hosts without a provider UI; every attempt is cancelled
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableWidget;

#[async_trait]
impl PaymentWidget for UnavailableWidget {
    async fn open(&self, config: &PaymentConfig) -> Result<WidgetOutcome, String> {
        tracing::warn!(reference = %config.reference, "No payment widget available");
        Ok(WidgetOutcome::Cancelled)
    }
}
