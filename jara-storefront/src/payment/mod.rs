//! Payments: wallet, provider popup and order submission

mod processor;
mod service;
mod widget;

pub use processor::{OrderConfirmation, OrderDraft, PaymentProcessor};
pub use service::{FundingOutcome, PROVIDER, UnifiedPaymentService, VerifiedPayment};
pub use widget::{PaymentWidget, UnavailableWidget, WidgetOutcome};
